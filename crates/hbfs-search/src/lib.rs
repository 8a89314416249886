//! Heuristic best-first search (HBFS) over environment snapshots.
//!
//! One [`Search`] owns a bounded [`Frontier`], a bounded [`VisitedSet`], and the node graph
//! reachable from them. Each call to [`Search::expand`] is one unit of planner work: pop the most
//! promising node, generate a successor per action, filter duplicates and losses, and refill the
//! frontier.
//!
//! Both structures are capped. When the frontier overflows only a small elite band survives, and
//! when the visited set overflows it is cleared outright. The search is therefore neither
//! complete nor optimal; it trades both for bounded memory and bounded pop latency.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod frontier;
pub mod hasher;
pub mod node;
pub mod probe;
pub mod score;
pub mod search;
pub mod visited;

pub use config::{HeuristicWeights, SearchConfig};
pub use error::SearchError;
pub use frontier::{Frontier, FrontierKey};
pub use hasher::{StateDigest, StructuralHasher};
pub use node::SearchNode;
pub use probe::{probe_forward_model, ActionProbe};
pub use score::{Heuristic, ScoreComponents};
pub use search::{ExpandStatus, Search, SearchStats};
pub use visited::VisitedSet;
