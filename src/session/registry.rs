//! Keyed lookup of active sessions
//!
//! The registry owns every live [`BattleSession`]. Each session sits behind
//! its own mutex so two actions on the same id serialize while distinct
//! sessions resolve fully in parallel. The registry also tracks which
//! players are currently seated somewhere, enforcing one live session per
//! player id.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, RwLock};

use crate::core::error::{EngineError, Result};
use crate::core::types::{PlayerId, SessionId};
use crate::session::BattleSession;

pub type SharedSession = Arc<Mutex<BattleSession>>;

#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, SharedSession>>,
    /// Player ids with a live seat; updated under the same write lock
    /// as the session map so membership stays linearizable with create/remove
    seated: RwLock<HashSet<PlayerId>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new session, claiming seats for its player participants.
    ///
    /// Fails with [`EngineError::AlreadyInBattle`] if any participant is
    /// already seated in a live session.
    pub fn create(&self, session: BattleSession) -> Result<SharedSession> {
        let participants: Vec<PlayerId> = [
            session.combatant(crate::core::types::Side::Initiator),
            session.combatant(crate::core::types::Side::Opponent),
        ]
        .iter()
        .filter_map(|combatant| combatant.id.as_player())
        .collect();

        let mut sessions = self.sessions.write().unwrap();
        let mut seated = self.seated.write().unwrap();

        for player in &participants {
            if seated.contains(player) {
                return Err(EngineError::AlreadyInBattle(*player));
            }
        }

        let id = session.id().clone();
        debug_assert!(!sessions.contains_key(&id));

        let shared = Arc::new(Mutex::new(session));
        sessions.insert(id, Arc::clone(&shared));
        for player in participants {
            seated.insert(player);
        }
        Ok(shared)
    }

    /// Look up a live session; a missing id is a normal `None`, not a fault
    pub fn get(&self, id: &SessionId) -> Option<SharedSession> {
        self.sessions.read().unwrap().get(id).cloned()
    }

    /// Whether a player currently holds a seat anywhere
    pub fn is_seated(&self, player: PlayerId) -> bool {
        self.seated.read().unwrap().contains(&player)
    }

    /// Evict a session and release its participants' seats.
    ///
    /// Returns the session if it was still registered; the second of two
    /// racing removals sees `None`.
    pub fn remove(&self, id: &SessionId) -> Option<SharedSession> {
        let mut sessions = self.sessions.write().unwrap();
        let mut seated = self.seated.write().unwrap();

        let shared = sessions.remove(id)?;
        {
            let session = shared.lock().unwrap();
            for side in [
                crate::core::types::Side::Initiator,
                crate::core::types::Side::Opponent,
            ] {
                if let Some(player) = session.combatant(side).id.as_player() {
                    seated.remove(&player);
                }
            }
        }
        Some(shared)
    }

    pub fn len(&self) -> usize {
        self.sessions.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().unwrap().is_empty()
    }
}
