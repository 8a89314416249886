//! Real-time planning controller.
//!
//! [`HbfsController`] owns one resumable search per episode and answers one decision per tick:
//!
//! - `Planning`: expand while the tick's budget exceeds the configured margin, then check the stop
//!   conditions (solution, tick ceiling, repeated starvation) and return the no-op action.
//! - `Acting`: pop the next planned action; once the plan is exhausted the search is released.
//! - `Idle`/`Other`: re-initialize if the episode is still running.
//!
//! Search anomalies never escape `act`; they become best-effort or random plans and are counted
//! in [`EpisodeStats`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod config;
pub mod controller;
pub mod error;
pub mod stats;

pub use config::PlannerConfig;
pub use controller::{ControllerState, HbfsController};
pub use error::{ConfigError, ControllerError};
pub use stats::EpisodeStats;
