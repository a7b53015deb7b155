//! Adversary action policy
//!
//! A stateless weighted pick per personality. Nothing is carried between
//! calls; the session owns any lingering effect (guard flags).

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::Personality;

/// What an adversary does with its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdversaryAction {
    Attack,
    /// Raises guard: the next incoming hit is halved
    Defend,
    /// Amplified attack at 1.5x damage
    Special,
}

/// Per-personality weights, expressed in tenths
const AGGRESSIVE: [(AdversaryAction, u32); 2] =
    [(AdversaryAction::Attack, 8), (AdversaryAction::Special, 2)];
const DEFENSIVE: [(AdversaryAction, u32); 2] =
    [(AdversaryAction::Defend, 6), (AdversaryAction::Attack, 4)];
const TRICKY: [(AdversaryAction, u32); 3] = [
    (AdversaryAction::Attack, 5),
    (AdversaryAction::Special, 3),
    (AdversaryAction::Defend, 2),
];

/// Multiplier applied to adversary damage on a Special action
pub const SPECIAL_DAMAGE_FACTOR: f64 = 1.5;

/// Pick an action for one adversary turn
pub fn choose_action(personality: Personality, rng: &mut impl Rng) -> AdversaryAction {
    let weights: &[(AdversaryAction, u32)] = match personality {
        Personality::Aggressive => &AGGRESSIVE,
        Personality::Defensive => &DEFENSIVE,
        Personality::Tricky => &TRICKY,
    };

    let total: u32 = weights.iter().map(|(_, w)| w).sum();
    let mut roll = rng.gen_range(0..total);
    for (action, weight) in weights {
        if roll < *weight {
            return *action;
        }
        roll -= weight;
    }
    // Unreachable while the tables are non-empty
    AdversaryAction::Attack
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashMap;

    fn distribution(personality: Personality, rolls: u32) -> HashMap<AdversaryAction, u32> {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut counts = HashMap::new();
        for _ in 0..rolls {
            *counts.entry(choose_action(personality, &mut rng)).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn aggressive_never_defends() {
        let counts = distribution(Personality::Aggressive, 2_000);
        assert!(!counts.contains_key(&AdversaryAction::Defend));
        assert!(counts[&AdversaryAction::Attack] > counts[&AdversaryAction::Special]);
    }

    #[test]
    fn defensive_never_goes_special() {
        let counts = distribution(Personality::Defensive, 2_000);
        assert!(!counts.contains_key(&AdversaryAction::Special));
        assert!(counts[&AdversaryAction::Defend] > counts[&AdversaryAction::Attack]);
    }

    #[test]
    fn tricky_uses_the_full_toolkit() {
        let counts = distribution(Personality::Tricky, 2_000);
        assert_eq!(counts.len(), 3);
        assert!(counts[&AdversaryAction::Attack] > counts[&AdversaryAction::Special]);
        assert!(counts[&AdversaryAction::Special] > counts[&AdversaryAction::Defend]);
    }

    #[test]
    fn weighted_pick_roughly_matches_weights() {
        let counts = distribution(Personality::Aggressive, 10_000);
        let attacks = counts[&AdversaryAction::Attack] as f64 / 10_000.0;
        assert!((attacks - 0.8).abs() < 0.03);
    }
}
