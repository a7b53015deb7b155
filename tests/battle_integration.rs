//! Battle engine integration tests
//!
//! Drive whole battles through the public facade: request, act, settle,
//! and check what the store saw afterwards.

use std::sync::Arc;

use omerta::combatant::PlayerRecord;
use omerta::core::config::EngineConfig;
use omerta::core::error::EngineError;
use omerta::core::types::{CharacterClass, PlayerAction, PlayerId, Side, Tier};
use omerta::session::SessionStatus;
use omerta::store::{MemoryStore, PlayerStore};
use omerta::{BattleEngine, BattleMode};

fn seeded_config(seed: u64) -> EngineConfig {
    EngineConfig {
        rng_seed: Some(seed),
        // Deterministic settlements: no level-up roll
        level_up_chance: 0.0,
        ..Default::default()
    }
}

fn engine_with_players(
    seed: u64,
    players: &[(i64, u32, CharacterClass)],
) -> (BattleEngine, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    for (id, level, class) in players {
        let mut record = PlayerRecord::new(
            PlayerId(*id),
            format!("user{id}"),
            format!("Player{id}"),
            *class,
        );
        record.level = *level;
        store.insert(record);
    }
    (BattleEngine::new(store.clone(), seeded_config(seed)), store)
}

#[tokio::test]
async fn low_energy_blocks_session_creation() {
    // Scenario: energy 9 against an attack cost of 10
    let (engine, store) = engine_with_players(1, &[(1, 5, CharacterClass::Enforcer)]);
    let mut record = store.load(PlayerId(1)).await.unwrap();
    record.energy = 9;
    store.save(&record).await.unwrap();

    let err = engine
        .request_battle(PlayerId(1), BattleMode::Quick)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::InsufficientEnergy { required: 10, available: 9 }
    ));
    assert_eq!(engine.active_sessions(), 0);

    // The steeper adversary gate applies to PvE entry
    record.energy = 14;
    store.save(&record).await.unwrap();
    let err = engine
        .request_battle(PlayerId(1), BattleMode::Adversary(Tier::Boss))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::InsufficientEnergy { required: 15, available: 14 }
    ));
}

#[tokio::test]
async fn unknown_player_is_a_store_miss() {
    let (engine, _store) = engine_with_players(2, &[]);
    let err = engine
        .request_battle(PlayerId(99), BattleMode::Quick)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::PlayerNotFound(PlayerId(99))));
}

#[tokio::test]
async fn self_challenge_is_rejected() {
    let (engine, _store) = engine_with_players(3, &[(1, 5, CharacterClass::Enforcer)]);
    let err = engine
        .request_battle(PlayerId(1), BattleMode::DirectOpponent(PlayerId(1)))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidOpponent(_)));
}

#[tokio::test]
async fn full_adversary_battle_settles_once_and_evicts() {
    // A level 1 Enforcer always beats an Easy adversary: the thug needs
    // ~20 unanswered rounds to land 100 damage, the player three hits.
    let (engine, store) = engine_with_players(4, &[(1, 1, CharacterClass::Enforcer)]);

    let handle = engine
        .request_battle(PlayerId(1), BattleMode::Adversary(Tier::Easy))
        .await
        .unwrap();
    assert_eq!(engine.active_sessions(), 1);

    // Entry cost was deducted and persisted immediately
    assert_eq!(store.load(PlayerId(1)).await.unwrap().energy, 35);

    let mut last = None;
    for _ in 0..20 {
        let outcome = engine
            .submit_action(&handle.session_id, PlayerId(1), PlayerAction::Attack)
            .await
            .unwrap();
        let concluded = matches!(outcome.status, SessionStatus::Concluded { .. });
        last = Some(outcome);
        if concluded {
            break;
        }
    }

    let outcome = last.expect("battle ran");
    let SessionStatus::Concluded { winner } = outcome.status else {
        panic!("battle did not conclude in 20 rounds");
    };
    assert_eq!(winner, Some(Side::Initiator));

    // Easy tier at level 1: 20 cash, 2 reputation, 10 experience
    let rewards = outcome.rewards.expect("winner settlement");
    assert_eq!(rewards.cash, 20);
    assert_eq!(rewards.reputation, 2);
    assert_eq!(rewards.experience, 10);

    // Settlement was persisted and the session evicted
    let record = store.load(PlayerId(1)).await.unwrap();
    assert_eq!(record.cash, 1020);
    assert_eq!(record.reputation, 2);
    assert_eq!(engine.active_sessions(), 0);

    // A stale submission is the benign "battle already ended" outcome
    let err = engine
        .submit_action(&handle.session_id, PlayerId(1), PlayerAction::Attack)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::SessionNotFound(_)));

    // And it must not pay again
    assert_eq!(store.load(PlayerId(1)).await.unwrap().cash, 1020);
}

#[tokio::test]
async fn pvp_defeat_applies_loser_consolation() {
    // Scenario: two level-5 players trade blows until one drops
    let (engine, store) = engine_with_players(
        5,
        &[
            (1, 5, CharacterClass::Enforcer),
            (2, 5, CharacterClass::Hacker),
        ],
    );

    let handle = engine
        .request_battle(PlayerId(1), BattleMode::DirectOpponent(PlayerId(2)))
        .await
        .unwrap();

    let mut winner_id = None;
    let mut final_rewards = None;
    for turn in 0..60 {
        let actor = if turn % 2 == 0 { PlayerId(1) } else { PlayerId(2) };
        let outcome = engine
            .submit_action(&handle.session_id, actor, PlayerAction::Attack)
            .await
            .unwrap();
        if matches!(outcome.status, SessionStatus::Concluded { .. }) {
            winner_id = Some(actor);
            final_rewards = outcome.rewards;
            break;
        }
    }

    let winner = winner_id.expect("someone won within 60 turns");
    let loser = if winner == PlayerId(1) { PlayerId(2) } else { PlayerId(1) };

    // Winner skims a tenth of the loser's 1000 cash and gains reputation
    let rewards = final_rewards.expect("winner settlement");
    assert_eq!(rewards.cash, 100);
    assert_eq!(rewards.reputation, 7);
    assert_eq!(rewards.experience, 10);

    let winner_record = store.load(winner).await.unwrap();
    assert_eq!(winner_record.cash, 1100);
    assert_eq!(winner_record.reputation, 7);

    // Loser: no cash, -2 reputation, survives at 1 health
    let loser_record = store.load(loser).await.unwrap();
    assert_eq!(loser_record.cash, 1000);
    assert_eq!(loser_record.reputation, -2);
    assert_eq!(loser_record.health, 1);

    assert_eq!(engine.active_sessions(), 0);
}

#[tokio::test]
async fn out_of_turn_pvp_submission_is_rejected() {
    let (engine, _store) = engine_with_players(
        6,
        &[
            (1, 5, CharacterClass::Enforcer),
            (2, 5, CharacterClass::Enforcer),
        ],
    );
    let handle = engine
        .request_battle(PlayerId(1), BattleMode::DirectOpponent(PlayerId(2)))
        .await
        .unwrap();

    // Player 2 tries to jump the initiator's turn
    let err = engine
        .submit_action(&handle.session_id, PlayerId(2), PlayerAction::Attack)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotYourTurn(PlayerId(2))));
}

#[tokio::test]
async fn a_seated_player_cannot_start_another_battle() {
    let (engine, _store) = engine_with_players(7, &[(1, 3, CharacterClass::Smuggler)]);
    engine
        .request_battle(PlayerId(1), BattleMode::Adversary(Tier::Medium))
        .await
        .unwrap();

    let err = engine
        .request_battle(PlayerId(1), BattleMode::Adversary(Tier::Easy))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::AlreadyInBattle(PlayerId(1))));
    assert_eq!(engine.active_sessions(), 1);
}

#[tokio::test]
async fn outsiders_cannot_act_in_a_session() {
    let (engine, _store) = engine_with_players(
        8,
        &[
            (1, 5, CharacterClass::Enforcer),
            (3, 5, CharacterClass::Hacker),
        ],
    );
    let handle = engine
        .request_battle(PlayerId(1), BattleMode::Adversary(Tier::Easy))
        .await
        .unwrap();

    let err = engine
        .submit_action(&handle.session_id, PlayerId(3), PlayerAction::Attack)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidOpponent(_)));
}
