//! In-memory player store for tests and the demo binary

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::combatant::PlayerRecord;
use crate::core::error::{EngineError, Result};
use crate::core::types::PlayerId;
use crate::store::PlayerStore;

#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<PlayerId, PlayerRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a record, replacing any existing one
    pub fn insert(&self, record: PlayerRecord) {
        self.records.write().unwrap().insert(record.user_id, record);
    }
}

#[async_trait]
impl PlayerStore for MemoryStore {
    async fn load(&self, id: PlayerId) -> Result<PlayerRecord> {
        self.records
            .read()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(EngineError::PlayerNotFound(id))
    }

    async fn save(&self, record: &PlayerRecord) -> Result<()> {
        self.records
            .write()
            .unwrap()
            .insert(record.user_id, record.clone());
        Ok(())
    }
}
