use thiserror::Error;

/// Search failures.
///
/// `EmptyFrontier` is recoverable: the controller falls back to a fresh search. The other two
/// abort setup of the search that reported them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("expansion requested on an empty frontier")]
    EmptyFrontier,

    #[error("root snapshot is already terminal")]
    InvalidInitialState,

    #[error("invalid search config: {reason}")]
    InvalidConfig { reason: String },
}

pub type Result<T> = std::result::Result<T, SearchError>;
