//! Omerta - Battle Session Engine
//!
//! Turn-based combat core for a criminal-underworld game: matchmaking,
//! adversary generation, the per-session turn state machine, and reward
//! settlement. Persistence and presentation stay outside; see
//! [`store::PlayerStore`] and [`events::BattleEvent`] for the seams.

pub mod ai;
pub mod combatant;
pub mod core;
pub mod engine;
pub mod events;
pub mod matchmaking;
pub mod rules;
pub mod session;
pub mod store;

pub use engine::{BattleEngine, BattleMode, SessionHandle, TurnOutcome};
