//! Engine configuration loading
//!
//! Tunable limits for the questionnaire engine, resolved in priority order:
//! 1. Explicit path supplied by the caller (highest priority)
//! 2. `BOOKFLOW_CONFIG` environment variable
//! 3. Compiled defaults (fallback)
//!
//! Every field has a default, so a partial TOML file overrides only the
//! keys it names.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming a TOML config file
pub const CONFIG_ENV_VAR: &str = "BOOKFLOW_CONFIG";

/// Tunable engine limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Delay before auto-advancing past the encouragement narrative (ms)
    ///
    /// Applies only to the new-reader and mismatched-taste signals; the
    /// mixed signal always waits for an explicit user action.
    pub auto_advance_ms: u64,

    /// Event bus channel capacity
    ///
    /// Takes effect when the host builds its bus via
    /// [`EventBus::from_config`](crate::events::EventBus::from_config).
    pub event_capacity: usize,

    /// Minimum accepted name length (characters, after trimming)
    pub min_name_len: usize,

    /// Exact number of picks required on the young genre stage
    pub young_pick_count: usize,

    /// Minimum picks required on the fiction genre stage
    pub fiction_pick_min: usize,

    /// Maximum picks accepted on the fiction genre stage
    pub fiction_pick_max: usize,

    /// Youngest supported reader age
    pub min_age: u8,

    /// Oldest supported reader age
    pub max_age: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            auto_advance_ms: 2500,
            event_capacity: 100,
            min_name_len: 2,
            young_pick_count: 3,
            fiction_pick_min: 1,
            fiction_pick_max: 3,
            min_age: 4,
            max_age: 18,
        }
    }
}

impl EngineConfig {
    /// Load configuration following the resolution priority order
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // Priority 1: explicit path from the caller
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // Priority 2: environment variable
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::from_file(Path::new(&path));
        }

        // Priority 3: compiled defaults
        Ok(Self::default())
    }

    /// Parse configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid TOML in {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine cannot operate under
    pub fn validate(&self) -> Result<()> {
        if self.min_age >= self.max_age {
            return Err(Error::Config(format!(
                "min_age ({}) must be below max_age ({})",
                self.min_age, self.max_age
            )));
        }
        if self.fiction_pick_min == 0 || self.fiction_pick_min > self.fiction_pick_max {
            return Err(Error::Config(format!(
                "fiction pick range [{}, {}] is invalid",
                self.fiction_pick_min, self.fiction_pick_max
            )));
        }
        if self.young_pick_count == 0 {
            return Err(Error::Config("young_pick_count must be non-zero".into()));
        }
        if self.event_capacity == 0 {
            return Err(Error::Config("event_capacity must be non-zero".into()));
        }
        Ok(())
    }
}
