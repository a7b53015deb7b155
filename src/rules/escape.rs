//! Escape resolution
//!
//! Players compute a situational escape chance; adversaries carry a fixed
//! one on their profile and roll it directly.

use rand::Rng;

use crate::combatant::Combatant;
use crate::core::config::EngineConfig;
use crate::core::types::CharacterClass;

/// Probability that `defender` slips away from `attacker`.
///
/// Base chance, plus a Smuggler bonus, plus a step per level of difference
/// (negative when outleveled). Clamped so escape is never certain in
/// either direction.
pub fn player_escape_chance(
    defender: &Combatant,
    attacker: &Combatant,
    config: &EngineConfig,
) -> f64 {
    let mut chance = config.base_escape_chance;

    if defender.class == CharacterClass::Smuggler {
        chance += config.smuggler_escape_bonus;
    }

    let level_diff = defender.level as f64 - attacker.level as f64;
    chance += level_diff * config.escape_level_step;

    chance.clamp(0.05, 0.95)
}

/// Roll an escape attempt with the given probability
pub fn attempt_escape(probability: f64, rng: &mut impl Rng) -> bool {
    rng.gen_bool(probability.clamp(0.0, 1.0))
}
