use hbfs_search::SearchError;
use thiserror::Error;

/// Fatal controller failures. Recoverable search anomalies never surface here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControllerError {
    #[error("cannot plan from a terminal snapshot")]
    InvalidInitialState,

    #[error("{0}")]
    InvalidConfig(String),

    #[error("illegal controller state: {0}")]
    IllegalState(&'static str),

    #[error("search setup failed: {0}")]
    Search(#[from] SearchError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config from {}", path.display())]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "serde")]
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
