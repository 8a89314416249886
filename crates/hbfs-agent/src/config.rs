use std::time::Duration;

use hbfs_search::SearchConfig;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_INIT_MARGIN_MS: u64 = 25;
pub const DEFAULT_ACTION_MARGIN_MS: u64 = 10;
pub const DEFAULT_MAX_TICKS: u64 = 1800;
pub const DEFAULT_MAX_EMPTY_FRONTIER_EVENTS: u32 = 1;
pub const DEFAULT_REPORT_EVERY: u64 = 100;

/// Tunables of one planner instance. Fixed for the lifetime of a controller.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    pub search: SearchConfig,

    /// Time that must remain in the construction budget for another expansion to start.
    pub init_margin_ms: u64,

    /// Time that must remain in a decision tick's budget for another expansion to start.
    pub action_margin_ms: u64,

    /// Environment tick after which planning stops and the best frontier node is executed.
    pub max_ticks: u64,

    /// Planning is abandoned for a random action once the search has starved more often than
    /// this.
    pub max_empty_frontier_events: u32,

    /// Progress is reported on ticks where `tick % report_every == 1`. Zero disables reports.
    pub report_every: u64,

    /// Log the forward-model probe when a search is initialized.
    pub probe_forward_model: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            init_margin_ms: DEFAULT_INIT_MARGIN_MS,
            action_margin_ms: DEFAULT_ACTION_MARGIN_MS,
            max_ticks: DEFAULT_MAX_TICKS,
            max_empty_frontier_events: DEFAULT_MAX_EMPTY_FRONTIER_EVENTS,
            report_every: DEFAULT_REPORT_EVERY,
            probe_forward_model: false,
        }
    }
}

impl PlannerConfig {
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    pub fn init_margin(&self) -> Duration {
        Duration::from_millis(self.init_margin_ms)
    }

    pub fn action_margin(&self) -> Duration {
        Duration::from_millis(self.action_margin_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.search
            .validate()
            .map_err(|err| ConfigError::Invalid(err.to_string()))?;
        if self.max_ticks == 0 {
            return Err(ConfigError::Invalid("max_ticks must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Parse a (possibly partial) YAML document; missing fields keep their defaults.
    #[cfg(feature = "serde")]
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML configuration file.
    #[cfg(feature = "serde")]
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }
}
