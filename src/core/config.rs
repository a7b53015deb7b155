//! Engine configuration with documented constants
//!
//! Every tunable that used to be a magic number in a handler lives here,
//! with a note on what it controls. The config is owned by the engine
//! instance that it was built for; there is no process-global copy.

use std::path::Path;

use serde::Deserialize;

use crate::core::error::{EngineError, Result};

/// Configuration for the battle engine
///
/// Defaults reproduce the tuning of the live game. Changing them shifts
/// pacing and economy, not correctness.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === ENERGY GATING ===
    /// Energy deducted once when a quick-match or direct PvP session starts
    ///
    /// A player below this cannot enter PvP combat at all; the deduction
    /// happens at session creation, never per action.
    pub pvp_energy_cost: u32,

    /// Energy deducted once when an adversary (PvE) session starts
    ///
    /// Deliberately higher than the PvP cost: adversary fights are always
    /// available, so they carry the steeper gate.
    pub pve_energy_cost: u32,

    // === MATCHMAKING ===
    /// Maximum level difference accepted when pairing two players
    ///
    /// Candidates further apart than this are never matched, even if the
    /// queue holds nobody closer.
    pub matchmaking_level_window: u32,

    // === ESCAPE ===
    /// Base probability that a player escape attempt succeeds
    pub base_escape_chance: f64,

    /// Additional escape probability for Smuggler-class players
    pub smuggler_escape_bonus: f64,

    /// Escape probability shift per point of level difference
    /// (defender level minus attacker level, may be negative)
    pub escape_level_step: f64,

    // === REWARDS ===
    /// Probability of leveling up after a victory
    ///
    /// A level-up restores health and energy to their maxima.
    pub level_up_chance: f64,

    // === DETERMINISM ===
    /// Seed for the engine RNG; `None` seeds from OS entropy
    pub rng_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pvp_energy_cost: 10,
            pve_energy_cost: 15,
            matchmaking_level_window: 3,
            base_escape_chance: 0.3,
            smuggler_escape_bonus: 0.2,
            escape_level_step: 0.05,
            level_up_chance: 0.4,
            rng_seed: None,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file; missing keys fall back to defaults
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: EngineConfig = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate internal consistency
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("base_escape_chance", self.base_escape_chance),
            ("smuggler_escape_bonus", self.smuggler_escape_bonus),
            ("level_up_chance", self.level_up_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(EngineError::InvalidConfig(format!(
                    "{name} ({value}) must be within [0, 1]"
                )));
            }
        }

        if self.pvp_energy_cost == 0 || self.pve_energy_cost == 0 {
            return Err(EngineError::InvalidConfig(
                "energy costs must be positive".into(),
            ));
        }

        Ok(())
    }
}
