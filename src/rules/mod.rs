//! Damage, escape, and reward rules
//!
//! Pure functions over combatants and an injected RNG. All mutation and
//! ordering concerns live in the session state machine.

pub mod damage;
pub mod escape;
pub mod rewards;

pub use damage::{adversary_damage, class_damage, matchup_damage, MIN_DAMAGE};
pub use escape::{attempt_escape, player_escape_chance};
pub use rewards::{pve_victory, pvp_victory, RewardOutcome};

use crate::combatant::Combatant;
use crate::core::error::{EngineError, Result};

/// Precondition check before a battle may start against a chosen target
pub fn can_attack(attacker: &Combatant, defender: &Combatant, energy_cost: u32) -> Result<()> {
    if attacker.id == defender.id {
        return Err(EngineError::InvalidOpponent(
            "you can't attack yourself".into(),
        ));
    }

    if attacker.energy < energy_cost {
        return Err(EngineError::InsufficientEnergy {
            required: energy_cost,
            available: attacker.energy,
        });
    }

    if defender.is_defeated() {
        return Err(EngineError::InvalidOpponent(
            "this player is already defeated".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::PlayerRecord;
    use crate::core::types::{CharacterClass, PlayerId};

    fn player(id: i64) -> Combatant {
        PlayerRecord::new(PlayerId(id), "p", "P", CharacterClass::Enforcer).to_combatant()
    }

    #[test]
    fn self_targeting_is_rejected() {
        let a = player(1);
        assert!(matches!(
            can_attack(&a, &a, 10),
            Err(EngineError::InvalidOpponent(_))
        ));
    }

    #[test]
    fn energy_gate_is_enforced() {
        let mut a = player(1);
        a.energy = 9;
        let b = player(2);
        assert!(matches!(
            can_attack(&a, &b, 10),
            Err(EngineError::InsufficientEnergy { required: 10, available: 9 })
        ));
    }

    #[test]
    fn defeated_targets_are_rejected() {
        let a = player(1);
        let mut b = player(2);
        b.health = 0;
        assert!(matches!(
            can_attack(&a, &b, 10),
            Err(EngineError::InvalidOpponent(_))
        ));
    }
}
