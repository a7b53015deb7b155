//! Matchmaking integration tests
//!
//! Pairing decisions as seen through the engine facade: who waits, who
//! gets matched, and what happens when nobody suitable is around.

use std::sync::Arc;

use omerta::combatant::PlayerRecord;
use omerta::core::config::EngineConfig;
use omerta::core::error::EngineError;
use omerta::core::types::{BattleKind, CharacterClass, PlayerId, Tier};
use omerta::store::MemoryStore;
use omerta::{BattleEngine, BattleMode};

fn engine_with_levels(seed: u64, levels: &[(i64, u32)]) -> BattleEngine {
    let store = Arc::new(MemoryStore::new());
    for (id, level) in levels {
        let mut record = PlayerRecord::new(
            PlayerId(*id),
            format!("user{id}"),
            format!("Player{id}"),
            CharacterClass::Enforcer,
        );
        record.level = *level;
        store.insert(record);
    }
    BattleEngine::new(store, EngineConfig {
        rng_seed: Some(seed),
        ..Default::default()
    })
}

#[tokio::test]
async fn matchmake_pairs_the_closest_level() {
    // Waiting pool: level 5 and level 7. A level 4 requester should pair
    // with the level 5 player even though both are inside the window.
    let engine = engine_with_levels(11, &[(1, 4), (2, 5), (3, 7)]);

    let err = engine
        .request_battle(PlayerId(2), BattleMode::Matchmake)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NoOpponentAvailable));

    let err = engine
        .request_battle(PlayerId(3), BattleMode::Matchmake)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NoOpponentAvailable));

    let handle = engine
        .request_battle(PlayerId(1), BattleMode::Matchmake)
        .await
        .unwrap();
    assert_eq!(handle.kind, BattleKind::Pvp);
    assert_eq!(handle.opponent.name, "Player2");
    assert_eq!(handle.opponent.level, 5);
    assert_eq!(engine.active_sessions(), 1);

    // Player 3 keeps waiting, unclaimed
    let err = engine
        .request_battle(PlayerId(3), BattleMode::Matchmake)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NoOpponentAvailable));
}

#[tokio::test]
async fn out_of_window_players_never_pair() {
    // Default window is 3 levels; 4 and 9 are too far apart
    let engine = engine_with_levels(12, &[(1, 4), (2, 9)]);

    let err = engine
        .request_battle(PlayerId(2), BattleMode::Matchmake)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NoOpponentAvailable));

    let err = engine
        .request_battle(PlayerId(1), BattleMode::Matchmake)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NoOpponentAvailable));
    assert_eq!(engine.active_sessions(), 0);
}

#[tokio::test]
async fn quick_battle_falls_back_to_an_easy_adversary() {
    let engine = engine_with_levels(13, &[(1, 4)]);

    let handle = engine
        .request_battle(PlayerId(1), BattleMode::Quick)
        .await
        .unwrap();
    assert_eq!(handle.kind, BattleKind::Pve);
    assert_eq!(handle.opponent.tier, Some(Tier::Easy));
}

#[tokio::test]
async fn quick_battle_claims_a_waiting_player_first() {
    let engine = engine_with_levels(14, &[(1, 4), (2, 5)]);

    let err = engine
        .request_battle(PlayerId(2), BattleMode::Matchmake)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NoOpponentAvailable));

    let handle = engine
        .request_battle(PlayerId(1), BattleMode::Quick)
        .await
        .unwrap();
    assert_eq!(handle.kind, BattleKind::Pvp);
    assert_eq!(handle.opponent.name, "Player2");
}

#[tokio::test]
async fn direct_challenge_consumes_the_target_queue_slot() {
    let engine = engine_with_levels(16, &[(1, 5), (2, 5), (3, 5)]);

    // Player 2 waits for a match
    let err = engine
        .request_battle(PlayerId(2), BattleMode::Matchmake)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NoOpponentAvailable));

    // Player 1 pulls them into a direct fight instead
    let handle = engine
        .request_battle(PlayerId(1), BattleMode::DirectOpponent(PlayerId(2)))
        .await
        .unwrap();
    assert_eq!(handle.kind, BattleKind::Pvp);

    // Player 3 must find an empty pool and wait, not trip over a stale
    // entry for someone already mid-battle
    let err = engine
        .request_battle(PlayerId(3), BattleMode::Matchmake)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NoOpponentAvailable));
    assert_eq!(engine.active_sessions(), 1);
}

#[tokio::test]
async fn starting_a_battle_vacates_the_queue_slot() {
    let engine = engine_with_levels(15, &[(1, 4), (2, 5)]);

    // Player 1 waits; nobody in range
    let err = engine
        .request_battle(PlayerId(1), BattleMode::Matchmake)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NoOpponentAvailable));

    // They give up and take an adversary fight instead
    engine
        .request_battle(PlayerId(1), BattleMode::Adversary(Tier::Easy))
        .await
        .unwrap();

    // Their stale queue slot is gone: an in-range player finds nobody
    // instead of pairing with someone already mid-battle
    let err = engine
        .request_battle(PlayerId(2), BattleMode::Matchmake)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NoOpponentAvailable));
}
