//! Reward settlement math
//!
//! Pure payout computation; applying the outcome to a player record is the
//! engine's job and happens exactly once per concluded session.

use serde::{Deserialize, Serialize};

use crate::combatant::Combatant;

/// Deltas produced once per concluded session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardOutcome {
    pub cash: i64,
    pub reputation: i64,
    pub experience: u32,
    pub level_up: bool,
}

impl RewardOutcome {
    /// Fixed consolation payout for the losing side, independent of opponent
    pub fn defeat() -> Self {
        Self {
            cash: 0,
            reputation: -2,
            experience: 5,
            level_up: false,
        }
    }
}

/// Payout for defeating a generated adversary.
///
/// Cash and reputation scale with the adversary's level and tier
/// multiplier; experience is a flat per-tier amount.
pub fn pve_victory(defeated: &Combatant) -> RewardOutcome {
    let tier = defeated
        .adversary_profile()
        .map(|profile| profile.tier)
        .unwrap_or(crate::core::types::Tier::Easy);
    let multiplier = tier.reward_multiplier();
    let level = defeated.level as i64;

    RewardOutcome {
        cash: level * 20 * multiplier,
        reputation: level * 2 * multiplier,
        experience: tier.experience(),
        level_up: false,
    }
}

/// Payout for defeating a real player: skim up to a tenth of their cash,
/// capped, plus reputation scaled by their level.
pub fn pvp_victory(defeated: &Combatant) -> RewardOutcome {
    RewardOutcome {
        cash: (defeated.cash / 10).min(500),
        reputation: 5 + defeated.level as i64 / 2,
        experience: 10,
        level_up: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::AdversaryGenerator;
    use crate::combatant::PlayerRecord;
    use crate::core::types::{CharacterClass, PlayerId, Tier};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn easy_tier_payout_at_level_five() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let npc = AdversaryGenerator::generate(Tier::Easy, 5, &mut rng);
        let rewards = pve_victory(&npc);
        assert_eq!(rewards.cash, 100);
        assert_eq!(rewards.reputation, 10);
        assert_eq!(rewards.experience, 10);
    }

    #[test]
    fn boss_tier_multiplies_payout() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let npc = AdversaryGenerator::generate(Tier::Boss, 5, &mut rng);
        // Boss fights at level 8; cash = 8*20*5
        let rewards = pve_victory(&npc);
        assert_eq!(rewards.cash, 800);
        assert_eq!(rewards.reputation, 80);
        assert_eq!(rewards.experience, 50);
    }

    #[test]
    fn pvp_cash_skim_is_capped() {
        let mut record = PlayerRecord::new(PlayerId(2), "rich", "Rich", CharacterClass::Hacker);
        record.cash = 20_000;
        record.level = 9;
        let rewards = pvp_victory(&record.to_combatant());
        assert_eq!(rewards.cash, 500);
        assert_eq!(rewards.reputation, 9);
        assert_eq!(rewards.experience, 10);
    }

    #[test]
    fn defeat_payout_is_fixed() {
        let rewards = RewardOutcome::defeat();
        assert_eq!(rewards.cash, 0);
        assert_eq!(rewards.reputation, -2);
        assert_eq!(rewards.experience, 5);
        assert!(!rewards.level_up);
    }
}
