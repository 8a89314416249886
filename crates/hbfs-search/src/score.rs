use std::collections::BTreeSet;

use hbfs_core::{InteractionEvent, Snapshot};

use crate::config::HeuristicWeights;

/// Weighted score components of one node, computed once at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreComponents {
    pub depth_score: f64,
    pub event_score: f64,
    pub tile_diversity_score: f64,
    pub load_score: f64,
    /// Raw length of the event history.
    pub events: usize,
    /// Raw number of distinct `(active, passive)` interaction pairs.
    pub distinct_interactions: usize,
    /// Raw entity/tile count.
    pub load: usize,
}

impl ScoreComponents {
    pub fn total(&self) -> f64 {
        self.depth_score + self.event_score + self.tile_diversity_score + self.load_score
    }
}

/// Scoring function for one search: the weights plus the root's load, which the load term is
/// measured against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heuristic {
    weights: HeuristicWeights,
    root_load: usize,
}

impl Heuristic {
    pub fn new(weights: HeuristicWeights, root_load: usize) -> Self {
        Self { weights, root_load }
    }

    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }

    pub fn root_load(&self) -> usize {
        self.root_load
    }

    pub fn evaluate<S: Snapshot>(&self, snapshot: &S, depth: u32) -> ScoreComponents {
        let w = &self.weights;
        let events = snapshot.events();
        let distinct = distinct_interactions(events);
        let load = snapshot.load();

        let exponent = i32::try_from(distinct).unwrap_or(i32::MAX);
        // Positive when tiles were removed since the root.
        let load_delta = self.root_load as f64 - load as f64;

        ScoreComponents {
            depth_score: w.depth * depth as f64,
            event_score: w.events * events.len() as f64,
            tile_diversity_score: w.tile_diversity * w.diversity_base.powi(exponent),
            load_score: w.load * load_delta,
            events: events.len(),
            distinct_interactions: distinct,
            load,
        }
    }
}

pub fn distinct_interactions(events: &[InteractionEvent]) -> usize {
    events
        .iter()
        .map(|e| (e.active_type, e.passive_type))
        .collect::<BTreeSet<_>>()
        .len()
}
