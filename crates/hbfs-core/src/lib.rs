//! Deterministic, engine-agnostic primitives for real-time heuristic planning.
//!
//! The planner never owns the simulation: it consumes [`Snapshot`] values, advances copies of
//! them, and hands back one action per decision tick.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod plan;
pub mod rng;
pub mod snapshot;
pub mod tick;

pub use plan::ActionSequence;
pub use rng::{DeterministicRng, SplitMix64};
pub use snapshot::{EntityCategory, EntitySighting, GridPos, InteractionEvent, Outcome, Snapshot};
pub use tick::{Deadline, TickContext, TimeBudget};
