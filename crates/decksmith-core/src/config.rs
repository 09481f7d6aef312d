//! Engine configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// What to do with the supplementary `combo_enablers` slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnablerPolicy {
    /// Carve the slot out of the flexible category; the deck size holds.
    #[default]
    Reserve,

    /// Add the slot on top of the deck size and report the overrun.
    Bonus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of non-commander cards in the final list.
    pub deck_size: usize,

    /// Per-slot candidate cap is `candidate_multiplier * target`.
    pub candidate_multiplier: usize,

    /// Maximum results requested from a single primary query.
    pub per_query_limit: usize,

    /// Independent timeout for each corpus call.
    pub call_timeout_ms: u64,

    pub combo_injection_per_slot: usize,
    pub staple_injection_per_slot: usize,

    /// How many of the strongest combos contribute pieces.
    pub top_combos: usize,

    pub combo_enabler_count: usize,
    pub enabler_policy: EnablerPolicy,

    /// Price (USD) above which a card counts as expensive for the power estimate.
    pub expensive_card_threshold: f64,

    /// Fill slots concurrently.
    pub parallel_fill: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            deck_size: 99,
            candidate_multiplier: 3,
            per_query_limit: 10,
            call_timeout_ms: 5_000,
            combo_injection_per_slot: 2,
            staple_injection_per_slot: 1,
            top_combos: 3,
            combo_enabler_count: 3,
            enabler_policy: EnablerPolicy::Reserve,
            expensive_card_threshold: 10.0,
            parallel_fill: true,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.deck_size == 0 {
            return Err(ConfigError::Invalid("deck_size must be positive".to_string()));
        }
        if self.candidate_multiplier == 0 || self.per_query_limit == 0 {
            return Err(ConfigError::Invalid(
                "candidate_multiplier and per_query_limit must be positive".to_string(),
            ));
        }
        if self.call_timeout_ms == 0 {
            return Err(ConfigError::Invalid("call_timeout_ms must be positive".to_string()));
        }
        Ok(())
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms)
    }
}
