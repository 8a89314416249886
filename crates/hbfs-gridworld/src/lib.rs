//! A small deterministic grid puzzle implementing [`hbfs_core::Snapshot`].
//!
//! It exists to drive the planner in tests and benchmarks. Maps are parsed from ASCII:
//!
//! | char | meaning |
//! |------|---------|
//! | `#`  | wall |
//! | `.`  | floor |
//! | `A`  | avatar start |
//! | `k`  | key (picked up on contact) |
//! | `D`  | door (opened by a held key, otherwise blocks) |
//! | `x`  | pit (loss) |
//! | `E`  | exit (win) |

#![forbid(unsafe_code)]

mod world;

pub use world::{types, GridParseError, GridWorld, Move};
