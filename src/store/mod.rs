//! Player store interface
//!
//! The engine consumes the store; it never owns player persistence. Loads
//! happen before any session lock is taken and saves after it is released,
//! so a slow store can never stall turn resolution.

pub mod memory;

use async_trait::async_trait;

use crate::combatant::PlayerRecord;
use crate::core::error::Result;
use crate::core::types::PlayerId;

pub use memory::MemoryStore;

#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// Fetch a player's record; a miss is [`EngineError::PlayerNotFound`]
    ///
    /// [`EngineError::PlayerNotFound`]: crate::core::error::EngineError::PlayerNotFound
    async fn load(&self, id: PlayerId) -> Result<PlayerRecord>;

    /// Persist a mutated record
    async fn save(&self, record: &PlayerRecord) -> Result<()>;
}
