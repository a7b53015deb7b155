//! Battle session state machine
//!
//! One session owns one battle between two combatants: turn alternation,
//! termination detection, and reward settlement. All methods assume the
//! caller holds the session's lock (see the registry); nothing here blocks
//! or touches the store.
//!
//! PvE contract: the adversary is not an independent actor awaiting input,
//! so the player's action resolves and the adversary's reply runs
//! synchronously within the same call.

pub mod registry;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ai::{self, AdversaryAction, SPECIAL_DAMAGE_FACTOR};
use crate::combatant::Combatant;
use crate::core::config::EngineConfig;
use crate::core::error::{EngineError, Result};
use crate::core::types::{BattleKind, PlayerAction, SessionId, Side};
use crate::events::BattleEvent;
use crate::rules;
use crate::rules::RewardOutcome;

pub use registry::SessionRegistry;

/// Lifecycle of a session; `Concluded` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SessionStatus {
    Created,
    InProgress,
    Concluded { winner: Option<Side> },
}

/// Per-seat reward deltas, produced exactly once at conclusion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub winner: Option<Side>,
    /// Indexed by [`Side::index`]; `None` for adversary seats and fled battles
    pub rewards: [Option<RewardOutcome>; 2],
}

/// What one call to [`BattleSession::resolve_action`] produced
#[derive(Debug, Clone)]
pub struct TurnReport {
    pub round: u32,
    pub status: SessionStatus,
    /// Events appended by this resolution, in order
    pub events: Vec<BattleEvent>,
}

#[derive(Debug)]
pub struct BattleSession {
    id: SessionId,
    kind: BattleKind,
    /// Initiator seat first
    combatants: [Combatant; 2],
    turn: Side,
    round: u32,
    status: SessionStatus,
    /// Guard flags; a raised guard halves the next incoming hit and is consumed
    guard: [bool; 2],
    log: Vec<BattleEvent>,
    settlement: Option<Settlement>,
}

impl BattleSession {
    pub fn new(id: SessionId, kind: BattleKind, initiator: Combatant, opponent: Combatant) -> Self {
        let log = vec![BattleEvent::BattleStarted {
            kind,
            initiator: initiator.name.clone(),
            opponent: opponent.name.clone(),
        }];
        Self {
            id,
            kind,
            combatants: [initiator, opponent],
            turn: Side::Initiator,
            round: 0,
            status: SessionStatus::Created,
            guard: [false, false],
            log,
            settlement: None,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn kind(&self) -> BattleKind {
        self.kind
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        &self.combatants[side.index()]
    }

    /// Which seat a player id occupies, if any
    pub fn side_of(&self, player: crate::core::types::PlayerId) -> Option<Side> {
        for side in [Side::Initiator, Side::Opponent] {
            if self.combatants[side.index()].id.as_player() == Some(player) {
                return Some(side);
            }
        }
        None
    }

    /// Full ordered event log since creation
    pub fn log(&self) -> &[BattleEvent] {
        &self.log
    }

    /// The settlement, present once the session has concluded with one
    pub fn settlement(&self) -> Option<&Settlement> {
        self.settlement.as_ref()
    }

    /// Resolve one submitted action for the given seat.
    ///
    /// PvP: the acting seat must hold the turn, which then flips.
    /// PvE: only the initiator acts; the adversary replies in the same call.
    pub fn resolve_action(
        &mut self,
        side: Side,
        action: PlayerAction,
        config: &EngineConfig,
        rng: &mut impl Rng,
    ) -> Result<TurnReport> {
        if let SessionStatus::Concluded { .. } = self.status {
            return Err(EngineError::SessionConcluded(self.id.clone()));
        }

        if self.kind == BattleKind::Pvp && side != self.turn {
            let actor = self.combatants[side.index()]
                .id
                .as_player()
                .ok_or_else(|| EngineError::SessionNotFound(self.id.clone()))?;
            return Err(EngineError::NotYourTurn(actor));
        }

        self.status = SessionStatus::InProgress;
        self.round += 1;
        let log_mark = self.log.len();

        self.resolve_player_action(side, action, config, rng);

        // Adversary auto-reply, unless the player's action already ended it
        if self.kind == BattleKind::Pve && !self.is_concluded() {
            self.resolve_adversary_reply(config, rng);
        }

        if self.kind == BattleKind::Pvp && !self.is_concluded() {
            self.turn = self.turn.other();
        }

        Ok(TurnReport {
            round: self.round,
            status: self.status,
            events: self.log[log_mark..].to_vec(),
        })
    }

    fn is_concluded(&self) -> bool {
        matches!(self.status, SessionStatus::Concluded { .. })
    }

    fn resolve_player_action(
        &mut self,
        side: Side,
        action: PlayerAction,
        config: &EngineConfig,
        rng: &mut impl Rng,
    ) {
        let actor_name = self.combatants[side.index()].name.clone();
        match action {
            PlayerAction::Attack | PlayerAction::Special => {
                let amplified = action == PlayerAction::Special;
                let mut damage = {
                    let (attacker, defender) = self.seats(side);
                    match self.kind {
                        BattleKind::Pvp => rules::matchup_damage(attacker, defender, rng),
                        BattleKind::Pve => rules::class_damage(attacker, rng),
                    }
                };
                if amplified {
                    damage = (damage as f64 * SPECIAL_DAMAGE_FACTOR) as i32;
                }
                self.land_hit(side, damage, amplified, actor_name, config, rng);
            }
            PlayerAction::Defend => {
                self.guard[side.index()] = true;
                self.log.push(BattleEvent::GuardRaised {
                    round: self.round,
                    side,
                    actor: actor_name,
                });
            }
            PlayerAction::Escape => {
                let chance = {
                    let (actor, opponent) = self.seats(side);
                    rules::player_escape_chance(actor, opponent, config)
                };
                let success = rules::attempt_escape(chance, rng);
                self.log.push(BattleEvent::EscapeAttempt {
                    round: self.round,
                    side,
                    actor: actor_name,
                    success,
                });
                if success {
                    self.conclude(None, config, rng);
                }
            }
        }
    }

    fn resolve_adversary_reply(&mut self, config: &EngineConfig, rng: &mut impl Rng) {
        let side = Side::Opponent;
        let adversary = &self.combatants[side.index()];
        let actor_name = adversary.name.clone();
        let Some(profile) = adversary.adversary_profile() else {
            return;
        };
        let personality = profile.personality;
        let escape_chance = profile.escape_chance;

        // A fleeing adversary forfeits the battle
        if rules::attempt_escape(escape_chance, rng) {
            self.log.push(BattleEvent::EscapeAttempt {
                round: self.round,
                side,
                actor: actor_name,
                success: true,
            });
            self.conclude(Some(Side::Initiator), config, rng);
            return;
        }

        match ai::choose_action(personality, rng) {
            AdversaryAction::Attack => {
                let damage = rules::adversary_damage(&self.combatants[side.index()], rng);
                self.land_hit(side, damage, false, actor_name, config, rng);
            }
            AdversaryAction::Special => {
                let damage = rules::adversary_damage(&self.combatants[side.index()], rng);
                let damage = (damage as f64 * SPECIAL_DAMAGE_FACTOR) as i32;
                self.land_hit(side, damage, true, actor_name, config, rng);
            }
            AdversaryAction::Defend => {
                self.guard[side.index()] = true;
                self.log.push(BattleEvent::GuardRaised {
                    round: self.round,
                    side,
                    actor: actor_name,
                });
            }
        }
    }

    /// Apply a hit from `side` to the opposite seat, then check termination
    fn land_hit(
        &mut self,
        side: Side,
        mut damage: i32,
        amplified: bool,
        actor: String,
        config: &EngineConfig,
        rng: &mut impl Rng,
    ) {
        let target = side.other();
        let guarded = self.guard[target.index()];
        if guarded {
            // Consumed on use; a guarded hit always lands for at least 1
            self.guard[target.index()] = false;
            damage = (damage / 2).max(1);
        }

        let actual = self.combatants[target.index()].apply_damage(damage);
        self.log.push(BattleEvent::Hit {
            round: self.round,
            attacker: side,
            actor,
            damage: actual,
            amplified,
            guarded,
        });

        if self.combatants[target.index()].is_defeated() {
            self.conclude(Some(side), config, rng);
        }
    }

    /// Terminal transition: compute and apply per-seat rewards exactly once.
    ///
    /// Only the caller that performs this transition settles, so a second
    /// submission racing on the same session can never double-pay.
    fn conclude(&mut self, winner: Option<Side>, config: &EngineConfig, rng: &mut impl Rng) {
        debug_assert!(!self.is_concluded());

        let mut rewards: [Option<RewardOutcome>; 2] = [None, None];

        if let Some(winner_side) = winner {
            let loser_side = winner_side.other();

            if self.combatants[winner_side.index()].is_player() {
                let loser = &self.combatants[loser_side.index()];
                let mut outcome = if loser.is_player() {
                    rules::pvp_victory(loser)
                } else {
                    rules::pve_victory(loser)
                };
                outcome.level_up = rng.gen_bool(config.level_up_chance);

                let victor = &mut self.combatants[winner_side.index()];
                victor.cash += outcome.cash;
                victor.reputation += outcome.reputation;
                if outcome.level_up {
                    victor.level += 1;
                    victor.restore_all();
                    self.log.push(BattleEvent::LevelUp {
                        actor: victor.name.clone(),
                        new_level: victor.level,
                    });
                }
                rewards[winner_side.index()] = Some(outcome);
            }

            let loser = &mut self.combatants[loser_side.index()];
            if loser.is_player() {
                let outcome = RewardOutcome::defeat();
                loser.cash += outcome.cash;
                loser.reputation += outcome.reputation;
                // Defeat never kills outright
                loser.health = loser.health.max(1);
                rewards[loser_side.index()] = Some(outcome);
            }
        }

        let victor_name =
            winner.map(|side| self.combatants[side.index()].name.clone());
        let winner_rewards = winner.and_then(|side| rewards[side.index()]);

        self.status = SessionStatus::Concluded { winner };
        self.settlement = Some(Settlement { winner, rewards });
        self.log.push(BattleEvent::Concluded {
            winner,
            victor_name,
            rewards: winner_rewards,
        });
    }

    fn seats(&self, side: Side) -> (&Combatant, &Combatant) {
        (
            &self.combatants[side.index()],
            &self.combatants[side.other().index()],
        )
    }
}
