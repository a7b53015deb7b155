//! Battle event records
//!
//! The engine's only outbound surface toward presentation: an ordered list
//! of serialisable records per session. The renderer turns these into text
//! or animation frames on its own channel; no acknowledgement is assumed.

use serde::{Deserialize, Serialize};

use crate::core::types::{BattleKind, Side};
use crate::rules::RewardOutcome;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEvent {
    /// Session created and both combatants seated
    BattleStarted {
        kind: BattleKind,
        initiator: String,
        opponent: String,
    },

    /// A player action landed (or a plain adversary attack)
    Hit {
        round: u32,
        attacker: Side,
        actor: String,
        damage: i32,
        /// Set for Special attacks; presentation may render these as critical
        amplified: bool,
        /// Set when the defender's guard halved this hit
        guarded: bool,
    },

    /// A side raised its guard; the next incoming hit is halved
    GuardRaised { round: u32, side: Side, actor: String },

    /// An escape attempt was made
    EscapeAttempt {
        round: u32,
        side: Side,
        actor: String,
        success: bool,
    },

    /// The battle ended
    Concluded {
        winner: Option<Side>,
        victor_name: Option<String>,
        rewards: Option<RewardOutcome>,
    },

    /// The winning player leveled up on settlement
    LevelUp { actor: String, new_level: u32 },
}
