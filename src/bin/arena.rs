//! Headless Arena Runner
//!
//! Runs one scripted adversary battle end to end and prints the event
//! records, either as text or as JSON lines for downstream tooling.

use std::sync::Arc;

use clap::Parser;

use omerta::combatant::PlayerRecord;
use omerta::core::config::EngineConfig;
use omerta::core::error::Result;
use omerta::core::types::{CharacterClass, PlayerAction, PlayerId, Tier};
use omerta::session::SessionStatus;
use omerta::store::{MemoryStore, PlayerStore};
use omerta::{BattleEngine, BattleMode};

/// Headless arena runner - scripted battles for tuning and inspection
#[derive(Parser, Debug)]
#[command(name = "arena")]
#[command(about = "Run a scripted adversary battle and print its event records")]
struct Args {
    /// Adversary tier: easy, medium, hard, boss
    #[arg(long, default_value = "easy")]
    tier: String,

    /// Player level for the scripted character
    #[arg(long, default_value_t = 5)]
    level: u32,

    /// Player class: enforcer, hacker, smuggler
    #[arg(long, default_value = "enforcer")]
    class: String,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum turns before giving up on the run
    #[arg(long, default_value_t = 50)]
    max_turns: u32,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,
}

fn parse_tier(raw: &str) -> Tier {
    match raw {
        "medium" => Tier::Medium,
        "hard" => Tier::Hard,
        "boss" => Tier::Boss,
        _ => Tier::Easy,
    }
}

fn parse_class(raw: &str) -> CharacterClass {
    match raw {
        "hacker" => CharacterClass::Hacker,
        "smuggler" => CharacterClass::Smuggler,
        _ => CharacterClass::Enforcer,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("omerta=info")
        .init();

    let args = Args::parse();

    let store = Arc::new(MemoryStore::new());
    let mut record = PlayerRecord::new(
        PlayerId(1),
        "runner",
        "Runner",
        parse_class(&args.class),
    );
    record.level = args.level;
    store.insert(record);

    let config = EngineConfig {
        rng_seed: args.seed,
        ..Default::default()
    };
    config.validate()?;
    let engine = BattleEngine::new(store.clone(), config);

    let handle = engine
        .request_battle(PlayerId(1), BattleMode::Adversary(parse_tier(&args.tier)))
        .await?;

    emit(&args.format, &handle.events)?;
    tracing::info!(
        opponent = %handle.opponent.name,
        level = handle.opponent.level,
        "battle started"
    );

    for _ in 0..args.max_turns {
        let outcome = engine
            .submit_action(&handle.session_id, PlayerId(1), PlayerAction::Attack)
            .await?;
        emit(&args.format, &outcome.events)?;

        if let SessionStatus::Concluded { .. } = outcome.status {
            if let Some(rewards) = outcome.rewards {
                println!(
                    "rewards: cash {:+}, reputation {:+}, experience {}{}",
                    rewards.cash,
                    rewards.reputation,
                    rewards.experience,
                    if rewards.level_up { ", level up" } else { "" }
                );
            }
            break;
        }
    }

    let survivor = store.load(PlayerId(1)).await?;
    println!(
        "final record: level {}, health {}, energy {}, cash {}, reputation {}",
        survivor.level, survivor.health, survivor.energy, survivor.cash, survivor.reputation
    );

    Ok(())
}

fn emit(format: &str, events: &[omerta::events::BattleEvent]) -> Result<()> {
    for event in events {
        if format == "json" {
            println!("{}", serde_json::to_string(event)?);
        } else {
            println!("{event:?}");
        }
    }
    Ok(())
}
