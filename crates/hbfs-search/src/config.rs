#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};

pub const DEFAULT_MAX_FRONTIER_LEN: usize = 2000;
pub const DEFAULT_CARRY_OVER_LEN: usize = 200;
pub const DEFAULT_MAX_VISITED_LEN: usize = 2000;

/// Weights of the composite node score. Lower scores are expanded first.
///
/// `depth` is positive (long paths are penalized); the other weights are negative, so events,
/// interaction diversity and removed tiles make a node more promising.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeuristicWeights {
    pub depth: f64,
    pub events: f64,
    pub tile_diversity: f64,
    pub load: f64,
    /// Base of the exponential tile-diversity term.
    pub diversity_base: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            depth: 1.0,
            events: -0.1,
            tile_diversity: -3.0,
            load: -2.0,
            diversity_base: 1.75,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Frontier size at which it is compacted before the next push.
    pub max_frontier_len: usize,
    /// Number of best nodes kept when the frontier is compacted.
    pub carry_over_len: usize,
    /// Visited-set size at which it is cleared before the next insert.
    pub max_visited_len: usize,
    /// Cells per axis folded together by the structural hasher.
    pub position_bucket: i32,
    pub weights: HeuristicWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_frontier_len: DEFAULT_MAX_FRONTIER_LEN,
            carry_over_len: DEFAULT_CARRY_OVER_LEN,
            max_visited_len: DEFAULT_MAX_VISITED_LEN,
            position_bucket: 1,
            weights: HeuristicWeights::default(),
        }
    }
}

impl SearchConfig {
    pub fn with_weights(mut self, weights: HeuristicWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_frontier_len == 0 || self.max_visited_len == 0 {
            return Err(invalid("frontier and visited caps must be non-zero"));
        }
        if self.carry_over_len == 0 || self.carry_over_len >= self.max_frontier_len {
            return Err(invalid(format!(
                "carry_over_len ({}) must be in 1..max_frontier_len ({})",
                self.carry_over_len, self.max_frontier_len
            )));
        }
        if self.position_bucket < 1 {
            return Err(invalid("position_bucket must be >= 1"));
        }
        let w = &self.weights;
        let finite = [w.depth, w.events, w.tile_diversity, w.load, w.diversity_base]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(invalid("heuristic weights must be finite"));
        }
        Ok(())
    }

    /// Reseeding pushes one node per action plus the expanded node into freshly emptied
    /// structures; both caps must leave room for that.
    pub(crate) fn validate_for_actions(&self, num_actions: usize) -> Result<()> {
        let needed = num_actions.saturating_add(1);
        if needed > self.max_frontier_len || needed > self.max_visited_len {
            return Err(invalid(format!(
                "caps (frontier {}, visited {}) cannot hold a reseed of {} actions",
                self.max_frontier_len, self.max_visited_len, num_actions
            )));
        }
        Ok(())
    }
}

fn invalid(reason: impl Into<String>) -> SearchError {
    SearchError::InvalidConfig {
        reason: reason.into(),
    }
}
