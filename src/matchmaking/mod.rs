//! Matchmaking queue
//!
//! A single shared waiting pool for PvP pairing. One lock spans the whole
//! scan-and-remove sequence so a candidate can never be matched twice.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};
use crate::core::types::PlayerId;

/// Stats snapshot taken when a player joins the queue
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub id: PlayerId,
    pub level: u32,
    pub health: i32,
    pub energy: u32,
}

#[derive(Default)]
pub struct MatchQueue {
    waiting: Mutex<Vec<QueueEntry>>,
}

impl MatchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a player to the pool; a player id appears at most once
    pub fn enqueue(&self, entry: QueueEntry) -> Result<()> {
        let mut waiting = self.waiting.lock().unwrap();
        if waiting.iter().any(|queued| queued.id == entry.id) {
            return Err(EngineError::AlreadyQueued(entry.id));
        }
        waiting.push(entry);
        Ok(())
    }

    /// Pick the closest-level eligible opponent for `requester`.
    ///
    /// Eligible: not the requester, within `level_window`, health above
    /// zero, and energy at or above `energy_cost`. On a match both ids
    /// leave the pool atomically; on a miss the pool is untouched.
    pub fn find_match(
        &self,
        requester: PlayerId,
        requester_level: u32,
        level_window: u32,
        energy_cost: u32,
    ) -> Option<QueueEntry> {
        let mut waiting = self.waiting.lock().unwrap();

        let candidate = waiting
            .iter()
            .filter(|entry| entry.id != requester)
            .filter(|entry| entry.health > 0 && entry.energy >= energy_cost)
            .filter(|entry| entry.level.abs_diff(requester_level) <= level_window)
            .min_by_key(|entry| entry.level.abs_diff(requester_level))
            .copied()?;

        waiting.retain(|entry| entry.id != candidate.id && entry.id != requester);
        Some(candidate)
    }

    /// Drop a player from the pool, eg. when they fall back to an
    /// adversary fight or enter a session some other way
    pub fn remove(&self, player: PlayerId) -> bool {
        let mut waiting = self.waiting.lock().unwrap();
        let before = waiting.len();
        waiting.retain(|entry| entry.id != player);
        waiting.len() != before
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.waiting.lock().unwrap().iter().any(|entry| entry.id == player)
    }

    pub fn len(&self) -> usize {
        self.waiting.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.lock().unwrap().is_empty()
    }
}
