//! Battle engine facade
//!
//! An explicitly constructed instance owning the session registry, the
//! matchmaking queue, the config, and a reference to the external player
//! store. The command-dispatch layer talks to this type and nothing else.
//!
//! Locking discipline: store I/O happens before a session lock is taken
//! (loads at creation) or after it is released (saves at settlement). Lock
//! order is registry, then session, then the engine RNG, never reversed.

use std::sync::{Arc, Mutex};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::combatant::{AdversaryGenerator, Combatant, PlayerRecord};
use crate::core::config::EngineConfig;
use crate::core::error::{EngineError, Result};
use crate::core::types::{
    BattleKind, CharacterClass, PlayerAction, PlayerId, Personality, SessionId, Side, Tier,
};
use crate::events::BattleEvent;
use crate::matchmaking::{MatchQueue, QueueEntry};
use crate::rules::{self, RewardOutcome};
use crate::session::{BattleSession, SessionRegistry, SessionStatus};
use crate::store::PlayerStore;

/// How a battle request wants its opponent chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleMode {
    /// Pair with a waiting player, or fall back to an Easy adversary
    Quick,
    /// Fight a generated adversary of the given tier
    Adversary(Tier),
    /// Challenge a specific player directly
    DirectOpponent(PlayerId),
    /// Pair with a waiting player, or join the queue and wait
    Matchmake,
}

/// Opponent details handed back to the dispatch layer at session start
#[derive(Debug, Clone)]
pub struct OpponentSummary {
    pub name: String,
    pub level: u32,
    pub class: CharacterClass,
    pub tier: Option<Tier>,
    pub personality: Option<Personality>,
}

impl OpponentSummary {
    fn of(combatant: &Combatant) -> Self {
        let profile = combatant.adversary_profile();
        Self {
            name: combatant.name.clone(),
            level: combatant.level,
            class: combatant.class,
            tier: profile.map(|p| p.tier),
            personality: profile.map(|p| p.personality),
        }
    }
}

/// Returned by [`BattleEngine::request_battle`]
#[derive(Debug, Clone)]
pub struct SessionHandle {
    pub session_id: SessionId,
    pub kind: BattleKind,
    pub opponent: OpponentSummary,
    /// Opening event records, ready for presentation
    pub events: Vec<BattleEvent>,
}

/// Returned by [`BattleEngine::submit_action`]
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub session_id: SessionId,
    pub round: u32,
    pub status: SessionStatus,
    /// Event records appended by this turn, in order
    pub events: Vec<BattleEvent>,
    pub your_health: i32,
    pub opponent_health: i32,
    /// The submitting player's settlement, when this turn concluded the battle
    pub rewards: Option<RewardOutcome>,
}

pub struct BattleEngine {
    store: Arc<dyn PlayerStore>,
    registry: SessionRegistry,
    queue: MatchQueue,
    config: EngineConfig,
    rng: Mutex<ChaCha8Rng>,
}

impl BattleEngine {
    pub fn new(store: Arc<dyn PlayerStore>, config: EngineConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            store,
            registry: SessionRegistry::new(),
            queue: MatchQueue::new(),
            config,
            rng: Mutex::new(rng),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of currently active sessions
    pub fn active_sessions(&self) -> usize {
        self.registry.len()
    }

    /// Start a battle for `player` according to `mode`.
    ///
    /// The mode's energy cost is deducted from the initiating player once,
    /// here; no energy is spent per action.
    pub async fn request_battle(
        &self,
        player: PlayerId,
        mode: BattleMode,
    ) -> Result<SessionHandle> {
        if self.registry.is_seated(player) {
            return Err(EngineError::AlreadyInBattle(player));
        }

        // Starting any battle consumes the player's queue slot
        self.queue.remove(player);

        let record = self.store.load(player).await?;
        let cost = self.energy_cost(mode);
        if record.energy < cost {
            return Err(EngineError::InsufficientEnergy {
                required: cost,
                available: record.energy,
            });
        }

        match mode {
            BattleMode::Adversary(tier) => self.start_adversary_battle(record, tier, cost).await,
            BattleMode::Quick => match self.match_from_queue(&record, cost) {
                Some(entry) => {
                    let opponent = self.store.load(entry.id).await?;
                    self.start_pvp_battle(record, opponent, cost).await
                }
                None => {
                    tracing::debug!(player = %player, "queue empty, falling back to adversary");
                    self.start_adversary_battle(record, Tier::Easy, cost).await
                }
            },
            BattleMode::Matchmake => match self.match_from_queue(&record, cost) {
                Some(entry) => {
                    let opponent = self.store.load(entry.id).await?;
                    self.start_pvp_battle(record, opponent, cost).await
                }
                None => {
                    self.queue.enqueue(QueueEntry {
                        id: record.user_id,
                        level: record.level,
                        health: record.health,
                        energy: record.energy,
                    })?;
                    tracing::debug!(player = %player, "no opponent available, enqueued");
                    Err(EngineError::NoOpponentAvailable)
                }
            },
            BattleMode::DirectOpponent(opponent) => {
                if opponent == player {
                    return Err(EngineError::InvalidOpponent(
                        "you can't attack yourself".into(),
                    ));
                }
                let opponent_record = self.store.load(opponent).await?;
                self.start_pvp_battle(record, opponent_record, cost).await
            }
        }
    }

    /// Route one player action to its session and resolve the turn.
    ///
    /// When the turn concludes the battle, settlement runs here exactly
    /// once: mutated player records are persisted best-effort and the
    /// session is evicted from the registry.
    pub async fn submit_action(
        &self,
        session_id: &SessionId,
        player: PlayerId,
        action: PlayerAction,
    ) -> Result<TurnOutcome> {
        let shared = self
            .registry
            .get(session_id)
            .ok_or_else(|| EngineError::SessionNotFound(session_id.clone()))?;

        // Resolve under the session lock; no store I/O inside
        let (report, side, concluded_seats) = {
            let mut session = shared.lock().unwrap();
            let side = session.side_of(player).ok_or_else(|| {
                EngineError::InvalidOpponent("you are not part of this battle".into())
            })?;

            let report = {
                let mut rng = self.rng.lock().unwrap();
                session.resolve_action(side, action, &self.config, &mut *rng)?
            };

            let concluded_seats = match report.status {
                SessionStatus::Concluded { .. } => Some((
                    session.combatant(Side::Initiator).clone(),
                    session.combatant(Side::Opponent).clone(),
                    session.settlement().cloned(),
                )),
                _ => None,
            };

            (report, side, concluded_seats)
        };

        let mut rewards = None;
        if let Some((initiator, opponent, settlement)) = &concluded_seats {
            rewards = settlement
                .as_ref()
                .and_then(|s| s.rewards[side.index()]);
            self.settle(session_id, [initiator, opponent]).await;
        }

        let (your_health, opponent_health) = match &concluded_seats {
            Some((initiator, opponent, _)) => {
                let seats = [initiator, opponent];
                (
                    seats[side.index()].health,
                    seats[side.other().index()].health,
                )
            }
            None => {
                let session = shared.lock().unwrap();
                (
                    session.combatant(side).health,
                    session.combatant(side.other()).health,
                )
            }
        };

        Ok(TurnOutcome {
            session_id: session_id.clone(),
            round: report.round,
            status: report.status,
            events: report.events,
            your_health,
            opponent_health,
            rewards,
        })
    }

    /// Persist both player seats and evict the session.
    ///
    /// A store failure is logged and eviction proceeds; durability is the
    /// store's concern, not the engine's.
    async fn settle(&self, session_id: &SessionId, seats: [&Combatant; 2]) {
        for combatant in seats {
            let Some(player) = combatant.id.as_player() else {
                continue;
            };
            match self.store.load(player).await {
                Ok(mut record) => {
                    record.absorb(combatant);
                    if let Err(error) = self.store.save(&record).await {
                        tracing::error!(%player, %error, "failed to persist battle result");
                    }
                }
                Err(error) => {
                    tracing::error!(%player, %error, "failed to reload record at settlement");
                }
            }
        }

        self.registry.remove(session_id);
        tracing::info!(session = %session_id, "session concluded and evicted");
    }

    fn energy_cost(&self, mode: BattleMode) -> u32 {
        match mode {
            BattleMode::Adversary(_) => self.config.pve_energy_cost,
            _ => self.config.pvp_energy_cost,
        }
    }

    fn match_from_queue(&self, record: &PlayerRecord, cost: u32) -> Option<QueueEntry> {
        self.queue.find_match(
            record.user_id,
            record.level,
            self.config.matchmaking_level_window,
            cost,
        )
    }

    async fn start_adversary_battle(
        &self,
        mut record: PlayerRecord,
        tier: Tier,
        cost: u32,
    ) -> Result<SessionHandle> {
        record.energy = record.energy.saturating_sub(cost);

        let (adversary, disambiguator) = {
            let mut rng = self.rng.lock().unwrap();
            (
                AdversaryGenerator::generate(tier, record.level, &mut *rng),
                rng.gen::<u16>(),
            )
        };

        let initiator = record.to_combatant();
        let opponent_summary = OpponentSummary::of(&adversary);
        let session_id = SessionId::derive(&initiator.id, &adversary.id, disambiguator);
        let session = BattleSession::new(
            session_id.clone(),
            BattleKind::Pve,
            initiator,
            adversary,
        );
        let events = session.log().to_vec();
        self.registry.create(session)?;

        // Persist the energy deduction after the session exists
        if let Err(error) = self.store.save(&record).await {
            tracing::warn!(player = %record.user_id, %error, "failed to persist energy cost");
        }

        tracing::info!(session = %session_id, ?tier, "adversary battle started");
        Ok(SessionHandle {
            session_id,
            kind: BattleKind::Pve,
            opponent: opponent_summary,
            events,
        })
    }

    async fn start_pvp_battle(
        &self,
        mut record: PlayerRecord,
        opponent_record: PlayerRecord,
        cost: u32,
    ) -> Result<SessionHandle> {
        let initiator_probe = record.to_combatant();
        let opponent_combatant = opponent_record.to_combatant();
        rules::can_attack(&initiator_probe, &opponent_combatant, cost)?;

        // A challenged player forfeits any waiting queue slot; matched
        // opponents already left the pool, direct targets have not
        self.queue.remove(opponent_record.user_id);

        record.energy = record.energy.saturating_sub(cost);
        let initiator = record.to_combatant();

        let disambiguator = {
            let mut rng = self.rng.lock().unwrap();
            rng.gen::<u16>()
        };
        let session_id = SessionId::derive(&initiator.id, &opponent_combatant.id, disambiguator);
        let opponent_summary = OpponentSummary::of(&opponent_combatant);
        let session = BattleSession::new(
            session_id.clone(),
            BattleKind::Pvp,
            initiator,
            opponent_combatant,
        );
        let events = session.log().to_vec();
        self.registry.create(session)?;

        if let Err(error) = self.store.save(&record).await {
            tracing::warn!(player = %record.user_id, %error, "failed to persist energy cost");
        }

        tracing::info!(session = %session_id, "pvp battle started");
        Ok(SessionHandle {
            session_id,
            kind: BattleKind::Pvp,
            opponent: opponent_summary,
            events,
        })
    }
}
