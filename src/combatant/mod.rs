//! Normalized view of a battle participant
//!
//! Players and generated adversaries fight through the same [`Combatant`]
//! shape so that damage and resolution code has a single path. The only
//! branch left is the [`CombatantKind`] tag, which carries the AI profile
//! for adversaries.

pub mod generator;
pub mod record;

use serde::{Deserialize, Serialize};

use crate::core::types::{CharacterClass, CombatantId, Personality, Tier};

pub use generator::AdversaryGenerator;
pub use record::PlayerRecord;

/// AI-facing stats carried only by generated adversaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdversaryProfile {
    pub tier: Tier,
    pub personality: Personality,
    /// Scales outgoing damage
    pub damage_multiplier: f64,
    /// Incoming damage is divided by this before it is applied
    pub defense_multiplier: f64,
    /// Probability per adversary turn of fleeing the battle
    pub escape_chance: f64,
}

/// Whether a combatant is a real player or a generated adversary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatantKind {
    Player,
    Adversary(AdversaryProfile),
}

/// One side of a battle
///
/// For players this is an owning snapshot of the store's [`PlayerRecord`];
/// the engine mutates it during the battle and writes it back at
/// settlement. Adversaries exist only for the life of the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub class: CharacterClass,
    pub level: u32,
    pub health: i32,
    pub max_health: i32,
    pub energy: u32,
    pub max_energy: u32,
    pub cash: i64,
    pub reputation: i64,
    pub kind: CombatantKind,
}

impl Combatant {
    pub fn is_player(&self) -> bool {
        matches!(self.kind, CombatantKind::Player)
    }

    pub fn adversary_profile(&self) -> Option<&AdversaryProfile> {
        match &self.kind {
            CombatantKind::Adversary(profile) => Some(profile),
            CombatantKind::Player => None,
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Apply incoming damage and return the amount actually taken.
    ///
    /// Adversaries divide incoming damage by their defense multiplier;
    /// players take it directly. Health never drops below zero.
    pub fn apply_damage(&mut self, amount: i32) -> i32 {
        let amount = amount.max(0);
        let actual = match &self.kind {
            CombatantKind::Adversary(profile) => {
                (amount as f64 / profile.defense_multiplier) as i32
            }
            CombatantKind::Player => amount,
        };
        self.health = (self.health - actual).max(0);
        actual
    }

    /// Deduct energy, clamping at zero
    pub fn spend_energy(&mut self, cost: u32) {
        self.energy = self.energy.saturating_sub(cost);
    }

    /// Restore health and energy to their maxima (level-up perk)
    pub fn restore_all(&mut self) {
        self.health = self.max_health;
        self.energy = self.max_energy;
    }
}
