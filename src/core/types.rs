//! Core type definitions used throughout the engine

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a real player, assigned by the hosting platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub i64);

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a generated adversary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdversaryId(pub Uuid);

impl AdversaryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AdversaryId {
    fn default() -> Self {
        Self::new()
    }
}

/// Identity of either side of a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatantId {
    Player(PlayerId),
    Adversary(AdversaryId),
}

impl CombatantId {
    /// The player id, if this side is a real player
    pub fn as_player(&self) -> Option<PlayerId> {
        match self {
            CombatantId::Player(id) => Some(*id),
            CombatantId::Adversary(_) => None,
        }
    }
}

/// Unique identifier for a battle session.
///
/// Derived from the participant ids plus a random disambiguator so repeated
/// fights between the same pair never collide while one is live.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn derive(initiator: &CombatantId, opponent: &CombatantId, disambiguator: u16) -> Self {
        let part = |id: &CombatantId| match id {
            CombatantId::Player(p) => p.to_string(),
            CombatantId::Adversary(a) => format!("npc-{}", a.0.simple()),
        };
        Self(format!(
            "{}x{}-{disambiguator:04}",
            part(initiator),
            part(opponent)
        ))
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Character classes available to players (and mirrored by adversaries)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterClass {
    Enforcer,
    Hacker,
    Smuggler,
}

impl CharacterClass {
    /// Flat damage bonus used by the class-technique damage policy
    pub fn damage_bonus(&self) -> i32 {
        match self {
            CharacterClass::Enforcer => 15,
            CharacterClass::Hacker => 8,
            CharacterClass::Smuggler => 10,
        }
    }
}

/// Adversary strength class, controls stat scaling and rewards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Easy,
    Medium,
    Hard,
    Boss,
}

impl Tier {
    /// Reward multiplier applied to cash and reputation payouts
    pub fn reward_multiplier(&self) -> i64 {
        match self {
            Tier::Easy => 1,
            Tier::Medium => 2,
            Tier::Hard => 3,
            Tier::Boss => 5,
        }
    }

    /// Flat experience payout for defeating an adversary of this tier
    pub fn experience(&self) -> u32 {
        match self {
            Tier::Easy => 10,
            Tier::Medium => 20,
            Tier::Hard => 30,
            Tier::Boss => 50,
        }
    }
}

/// AI behaviour tag for generated adversaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Personality {
    Aggressive,
    Defensive,
    Tricky,
}

/// Action a player may submit for one turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerAction {
    Attack,
    Defend,
    Special,
    Escape,
}

/// Which battle variant a session is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleKind {
    Pvp,
    Pve,
}

/// The two seats of a session: the initiator always sits first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Initiator,
    Opponent,
}

impl Side {
    pub fn index(&self) -> usize {
        match self {
            Side::Initiator => 0,
            Side::Opponent => 1,
        }
    }

    pub fn other(&self) -> Side {
        match self {
            Side::Initiator => Side::Opponent,
            Side::Opponent => Side::Initiator,
        }
    }
}
