//! Settings for the demonstration binary.
//!
//! Values are layered: defaults, then an optional TOML file, then
//! `EVENTCLOCK_*` environment variables. Command line flags are applied on
//! top by the binary itself.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::unit::TimeUnit;

pub const ENV_UNIT: &str = "EVENTCLOCK_UNIT";
pub const ENV_ITERATIONS: &str = "EVENTCLOCK_ITERATIONS";
pub const ENV_LAPS: &str = "EVENTCLOCK_LAPS";
pub const ENV_EVENT: &str = "EVENTCLOCK_EVENT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Unit the demo registry accumulates in
    pub unit: TimeUnit,

    /// Length of the busy loop timed on every lap
    pub iterations: u64,

    /// Number of start/stop cycles
    pub laps: u32,

    /// Label the laps are recorded under
    pub event: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            unit: TimeUnit::Seconds,
            iterations: 1_000_000_000,
            laps: 2,
            event: "test".to_string(),
        }
    }
}

impl DemoConfig {
    /// Defaults overridden by whatever `EVENTCLOCK_*` variables are set
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().merge_with_env()
    }

    /// Load configuration from TOML file
    #[cfg(feature = "toml-config")]
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: DemoConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from TOML file (stub when toml feature is disabled)
    #[cfg(not(feature = "toml-config"))]
    pub fn from_file(_path: &Path) -> Result<Self, ConfigError> {
        Err(ConfigError::TomlDisabled)
    }

    /// Merge with environment variables (env vars take precedence)
    pub fn merge_with_env(self) -> Result<Self, ConfigError> {
        self.merge_with(|key| std::env::var(key).ok())
    }

    /// Merge with values produced by `lookup`, keyed by the `EVENTCLOCK_*` names
    pub fn merge_with<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup(ENV_UNIT) {
            self.unit = val.parse()?;
        }

        if let Some(val) = lookup(ENV_ITERATIONS) {
            self.iterations = parse_number(ENV_ITERATIONS, &val)?;
        }

        if let Some(val) = lookup(ENV_LAPS) {
            self.laps = parse_number(ENV_LAPS, &val)?;
        }

        if let Some(val) = lookup(ENV_EVENT) {
            self.event = val;
        }

        Ok(self)
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            key: key.to_string(),
            value: value.to_string(),
        })
}
