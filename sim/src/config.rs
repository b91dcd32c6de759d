//! Simulation configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use ffg_utils::LogFormat;

use crate::SimError;

/// Deposit weights of the reference validator set, ids `0..10`.
pub const REFERENCE_DEPOSITS: [i64; 10] = [500, 100, 300, 250, 150, 500, 600, 350, 200, 150];

/// Number of checkpoint rounds in the reference run.
pub const REFERENCE_CHECKPOINTS: u64 = 10;

/// One validator as written in a config file.
///
/// `deposit` is signed so that a negative value in a file surfaces as an
/// invalid-weight error rather than a parse failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorEntry {
    pub id: u64,
    pub deposit: i64,
}

/// Configuration for a simulation run.
///
/// Can be loaded from a TOML file via [`SimulationConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of checkpoint rounds to play.
    #[serde(default = "default_total_checkpoints")]
    pub total_checkpoints: u64,

    /// Seed for the session's branch source. Unset means OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Apply each round's votes across validators in parallel.
    #[serde(default)]
    pub parallel_voting: bool,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Validator set, registered in this order.
    #[serde(default = "default_validators")]
    pub validators: Vec<ValidatorEntry>,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_total_checkpoints() -> u64 {
    REFERENCE_CHECKPOINTS
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_validators() -> Vec<ValidatorEntry> {
    REFERENCE_DEPOSITS
        .iter()
        .enumerate()
        .map(|(id, &deposit)| ValidatorEntry {
            id: id as u64,
            deposit,
        })
        .collect()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl SimulationConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, SimError> {
        toml::from_str(s).map_err(|e| SimError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, SimError> {
        toml::to_string_pretty(self).map_err(|e| SimError::Serialization(e.to_string()))
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            total_checkpoints: default_total_checkpoints(),
            seed: None,
            parallel_voting: false,
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            validators: default_validators(),
        }
    }
}
