//! Procedural adversary generation
//!
//! Each tier carries its own name pool, level offset, health scaling, and
//! combat multipliers. Construction is pure: all randomness comes through
//! the caller's RNG, which keeps tests deterministic.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::combatant::{AdversaryProfile, Combatant, CombatantKind};
use crate::core::types::{AdversaryId, CharacterClass, CombatantId, Personality, Tier};

const EASY_NAMES: &[&str] = &[
    "Street Thug",
    "Alley Punk",
    "Backstreet Bully",
    "Rookie Gangster",
];

const MEDIUM_NAMES: &[&str] = &[
    "Gang Member",
    "Mafia Soldier",
    "Crew Enforcer",
    "Syndicate Thug",
];

const HARD_RANKS: &[&str] = &["Officer", "Detective", "Sergeant", "Lieutenant"];
const HARD_SURNAMES: &[&str] = &["Miller", "Johnson", "Davis", "Rodriguez"];

/// Fixed boss personas: name, class, personality
const BOSSES: &[(&str, CharacterClass, Personality)] = &[
    ("Tony 'The Shark'", CharacterClass::Enforcer, Personality::Aggressive),
    ("Vinnie 'The Ghost'", CharacterClass::Smuggler, Personality::Tricky),
    ("Don 'The Brain'", CharacterClass::Hacker, Personality::Defensive),
];

/// Stat scaling for one tier
struct TierSpec {
    level_offset: u32,
    health_base: i32,
    health_per_level: i32,
    damage_multiplier: f64,
    defense_multiplier: f64,
    escape_chance: f64,
}

fn spec(tier: Tier) -> TierSpec {
    match tier {
        Tier::Easy => TierSpec {
            level_offset: 0,
            health_base: 80,
            health_per_level: 5,
            damage_multiplier: 0.8,
            defense_multiplier: 0.9,
            escape_chance: 0.1,
        },
        Tier::Medium => TierSpec {
            level_offset: 1,
            health_base: 100,
            health_per_level: 6,
            damage_multiplier: 1.0,
            defense_multiplier: 1.0,
            escape_chance: 0.1,
        },
        Tier::Hard => TierSpec {
            level_offset: 2,
            health_base: 120,
            health_per_level: 7,
            damage_multiplier: 1.2,
            defense_multiplier: 1.1,
            escape_chance: 0.1,
        },
        Tier::Boss => TierSpec {
            level_offset: 3,
            health_base: 150,
            health_per_level: 8,
            damage_multiplier: 1.5,
            defense_multiplier: 1.3,
            escape_chance: 0.05,
        },
    }
}

/// Factory for generated adversaries
pub struct AdversaryGenerator;

impl AdversaryGenerator {
    /// Generate an adversary of the given tier, scaled to the requester's level
    pub fn generate(tier: Tier, requester_level: u32, rng: &mut impl Rng) -> Combatant {
        let spec = spec(tier);
        let level = requester_level + spec.level_offset;
        let health = spec.health_base + (requester_level as i32) * spec.health_per_level;

        let (name, class, personality) = Self::identity(tier, rng);

        Combatant {
            id: CombatantId::Adversary(AdversaryId::new()),
            name,
            class,
            level,
            health,
            max_health: health,
            energy: 0,
            max_energy: 0,
            cash: 0,
            reputation: 0,
            kind: CombatantKind::Adversary(AdversaryProfile {
                tier,
                personality,
                damage_multiplier: spec.damage_multiplier,
                defense_multiplier: spec.defense_multiplier,
                escape_chance: spec.escape_chance,
            }),
        }
    }

    fn identity(tier: Tier, rng: &mut impl Rng) -> (String, CharacterClass, Personality) {
        match tier {
            Tier::Easy => {
                let name = *EASY_NAMES.choose(rng).unwrap_or(&EASY_NAMES[0]);
                (name.to_string(), CharacterClass::Enforcer, Personality::Aggressive)
            }
            Tier::Medium => {
                let name = *MEDIUM_NAMES.choose(rng).unwrap_or(&MEDIUM_NAMES[0]);
                let class = if rng.gen_bool(0.5) {
                    CharacterClass::Enforcer
                } else {
                    CharacterClass::Smuggler
                };
                let personality = if rng.gen_bool(0.5) {
                    Personality::Aggressive
                } else {
                    Personality::Defensive
                };
                (name.to_string(), class, personality)
            }
            Tier::Hard => {
                let rank = *HARD_RANKS.choose(rng).unwrap_or(&HARD_RANKS[0]);
                let surname = *HARD_SURNAMES.choose(rng).unwrap_or(&HARD_SURNAMES[0]);
                (
                    format!("{rank} {surname}"),
                    CharacterClass::Enforcer,
                    Personality::Defensive,
                )
            }
            Tier::Boss => {
                let (name, class, personality) = *BOSSES.choose(rng).unwrap_or(&BOSSES[0]);
                (name.to_string(), class, personality)
            }
        }
    }
}
