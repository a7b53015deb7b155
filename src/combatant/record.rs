//! Persisted player record and its battle-view conversion

use serde::{Deserialize, Serialize};

use crate::combatant::{Combatant, CombatantKind};
use crate::core::types::{CharacterClass, CombatantId, PlayerId};

/// The player record as the external store owns it
///
/// The engine never owns this record's lifetime: it snapshots the record
/// into a [`Combatant`] at session creation and asks the store to persist
/// the mutated fields at settlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub user_id: PlayerId,
    pub username: String,
    pub display_name: String,
    pub class: CharacterClass,
    pub level: u32,
    pub cash: i64,
    pub health: i32,
    pub energy: u32,
    pub reputation: i64,
    pub created_at: Option<String>,
}

impl PlayerRecord {
    pub const MAX_HEALTH: i32 = 100;
    pub const MAX_ENERGY: u32 = 50;

    /// A fresh record with the game's starting stats
    pub fn new(
        user_id: PlayerId,
        username: impl Into<String>,
        display_name: impl Into<String>,
        class: CharacterClass,
    ) -> Self {
        Self {
            user_id,
            username: username.into(),
            display_name: display_name.into(),
            class,
            level: 1,
            cash: 1000,
            health: Self::MAX_HEALTH,
            energy: Self::MAX_ENERGY,
            reputation: 0,
            created_at: None,
        }
    }

    /// Snapshot this record as a battle combatant
    pub fn to_combatant(&self) -> Combatant {
        Combatant {
            id: CombatantId::Player(self.user_id),
            name: self.display_name.clone(),
            class: self.class,
            level: self.level,
            health: self.health,
            max_health: Self::MAX_HEALTH,
            energy: self.energy,
            max_energy: Self::MAX_ENERGY,
            cash: self.cash,
            reputation: self.reputation,
            kind: CombatantKind::Player,
        }
    }

    /// Fold battle mutations back into the record before persisting
    pub fn absorb(&mut self, combatant: &Combatant) {
        debug_assert_eq!(CombatantId::Player(self.user_id), combatant.id);
        self.level = combatant.level;
        self.cash = combatant.cash;
        self.health = combatant.health;
        self.energy = combatant.energy;
        self.reputation = combatant.reputation;
    }
}
