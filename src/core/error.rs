use thiserror::Error;

use crate::core::types::{PlayerId, SessionId};

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),

    #[error("Not enough energy: need {required}, have {available}")]
    InsufficientEnergy { required: u32, available: u32 },

    #[error("Invalid opponent: {0}")]
    InvalidOpponent(String),

    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("Battle already ended: {0}")]
    SessionConcluded(SessionId),

    #[error("No opponent available for matchmaking")]
    NoOpponentAvailable,

    #[error("It is not {0}'s turn")]
    NotYourTurn(PlayerId),

    #[error("Player {0} is already in a battle")]
    AlreadyInBattle(PlayerId),

    #[error("Player {0} is already waiting for a match")]
    AlreadyQueued(PlayerId),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
