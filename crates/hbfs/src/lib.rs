//! Umbrella crate that re-exports the `hbfs-*` building blocks.
//!
//! - [`core`]: the `Snapshot` boundary, tick context and time budgets.
//! - [`search`]: the bounded, resumable best-first search.
//! - [`agent`]: the per-tick planning/acting controller.
//! - [`tools`]: decision tracing.
//! - [`gridworld`]: a small deterministic environment for tests and benchmarks.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use hbfs_core as core;

#[cfg(feature = "tools")]
#[cfg_attr(docsrs, doc(cfg(feature = "tools")))]
pub use hbfs_tools as tools;

#[cfg(feature = "search")]
#[cfg_attr(docsrs, doc(cfg(feature = "search")))]
pub use hbfs_search as search;

#[cfg(feature = "agent")]
#[cfg_attr(docsrs, doc(cfg(feature = "agent")))]
pub use hbfs_agent as agent;

#[cfg(feature = "gridworld")]
#[cfg_attr(docsrs, doc(cfg(feature = "gridworld")))]
pub use hbfs_gridworld as gridworld;
