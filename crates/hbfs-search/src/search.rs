use std::rc::Rc;

use hbfs_core::{ActionSequence, Snapshot};

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::frontier::{Frontier, FrontierKey};
use crate::hasher::StructuralHasher;
use crate::node::SearchNode;
use crate::score::Heuristic;
use crate::visited::VisitedSet;

/// Result of one expansion step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandStatus {
    /// A winning terminal successor was found; see [`Search::solution`].
    Solved,
    /// Successors were filtered and pushed normally.
    Expanded,
    /// Every successor was rejected; the frontier was reseeded around the expanded node.
    Reseeded,
}

impl ExpandStatus {
    pub fn is_solved(self) -> bool {
        matches!(self, ExpandStatus::Solved)
    }
}

/// Counters for one search (one episode's worth of planning).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub expansions: u64,
    /// Successors dropped as structural duplicates.
    pub rejects: u64,
    /// Expansions that left the frontier empty and triggered a reseed.
    pub empty_frontier_events: u32,
    pub frontier_compactions: u64,
    pub compaction_discards: u64,
    /// Visited-set clears caused by its size cap (reseed clears are not counted).
    pub visited_resets: u64,
}

/// A resumable heuristic best-first search.
///
/// All state lives in this value, so planning can be suspended between any two calls to
/// [`Search::expand`] and picked up on a later tick.
#[derive(Debug)]
pub struct Search<S: Snapshot> {
    config: SearchConfig,
    actions: Vec<S::Action>,
    hasher: StructuralHasher,
    heuristic: Heuristic,
    frontier: Frontier<S>,
    visited: VisitedSet,
    root: Rc<SearchNode<S>>,
    solution: Option<Rc<SearchNode<S>>>,
    next_seq: u64,
    stats: SearchStats,
}

impl<S: Snapshot> Search<S> {
    /// Start a search from `snapshot` over the actions it currently reports.
    pub fn new(config: SearchConfig, snapshot: &S) -> Result<Self> {
        let actions = snapshot.available_actions();
        Self::with_actions(config, snapshot, actions)
    }

    pub fn with_actions(config: SearchConfig, snapshot: &S, actions: Vec<S::Action>) -> Result<Self> {
        config.validate()?;
        config.validate_for_actions(actions.len())?;
        if snapshot.is_terminal() {
            return Err(SearchError::InvalidInitialState);
        }

        let hasher = StructuralHasher::new(config.position_bucket);
        let heuristic = Heuristic::new(config.weights, snapshot.load());
        let root = Rc::new(SearchNode::root(snapshot.clone(), 0, &hasher, &heuristic));

        let mut frontier = Frontier::new(config.max_frontier_len, config.carry_over_len);
        let mut visited = VisitedSet::new(config.max_visited_len);
        visited.insert(root.digest());
        frontier.push(Rc::clone(&root));

        Ok(Self {
            config,
            actions,
            hasher,
            heuristic,
            frontier,
            visited,
            root,
            solution: None,
            next_seq: 1,
            stats: SearchStats::default(),
        })
    }

    /// One unit of planner work.
    ///
    /// Fails with [`SearchError::EmptyFrontier`] when there is nothing to expand; the search is
    /// left untouched in that case.
    pub fn expand(&mut self) -> Result<ExpandStatus> {
        let current = self.frontier.pop()?;
        self.stats.expansions += 1;

        let mut children: Vec<Rc<SearchNode<S>>> = Vec::with_capacity(self.actions.len());
        for i in 0..self.actions.len() {
            let action = self.actions[i];
            let mut next = current.snapshot().clone();
            next.advance(action);

            let child = self.make_child(&current, action, next);
            if child.snapshot().is_win() {
                // Accept the first winning successor without looking at its siblings: the search
                // wants a winning path, not the best one. Discarding the batch and restoring
                // `current` leaves the frontier as it was.
                tracing::debug!(
                    depth = child.depth(),
                    expansions = self.stats.expansions,
                    "winning terminal found"
                );
                self.solution = Some(Rc::new(child));
                self.frontier.push(current);
                return Ok(ExpandStatus::Solved);
            }
            children.push(Rc::new(child));
        }

        for child in &children {
            // Losing terminals are pruned, never queued.
            if child.is_terminal() {
                continue;
            }

            if self.visited.enforce_bound() {
                self.stats.visited_resets += 1;
            }
            let discarded = self.frontier.enforce_bound();
            if discarded > 0 {
                self.stats.frontier_compactions += 1;
                self.stats.compaction_discards += discarded as u64;
            }

            if self.visited.contains_or_insert(child) {
                self.stats.rejects += 1;
            } else {
                self.frontier.push(Rc::clone(child));
            }
        }

        tracing::trace!(
            depth = current.depth(),
            score = current.score(),
            frontier = self.frontier.len(),
            visited = self.visited.len(),
            rejects = self.stats.rejects,
            "expanded"
        );

        if !self.frontier.is_empty() {
            return Ok(ExpandStatus::Expanded);
        }

        self.reseed(current, children);
        Ok(ExpandStatus::Reseeded)
    }

    /// Refill a starved frontier with every successor of `current` plus `current` itself,
    /// bypassing duplicate rejection.
    fn reseed(&mut self, current: Rc<SearchNode<S>>, children: Vec<Rc<SearchNode<S>>>) {
        self.stats.empty_frontier_events += 1;
        tracing::warn!(
            depth = current.depth(),
            events = self.stats.empty_frontier_events,
            "frontier starved; reseeding and clearing visited set"
        );

        self.visited.clear();
        for child in children {
            self.visited.insert(child.digest());
            self.frontier.push(child);
        }
        self.visited.insert(current.digest());
        self.frontier.push(current);
    }

    fn make_child(&mut self, parent: &Rc<SearchNode<S>>, action: S::Action, snapshot: S) -> SearchNode<S> {
        let seq = self.next_seq;
        self.next_seq += 1;
        SearchNode::child(parent, action, snapshot, seq, &self.hasher, &self.heuristic)
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn actions(&self) -> &[S::Action] {
        &self.actions
    }

    pub fn hasher(&self) -> &StructuralHasher {
        &self.hasher
    }

    pub fn heuristic(&self) -> &Heuristic {
        &self.heuristic
    }

    pub fn frontier(&self) -> &Frontier<S> {
        &self.frontier
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    pub fn root(&self) -> &Rc<SearchNode<S>> {
        &self.root
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Number of nodes created so far, root included.
    pub fn nodes_created(&self) -> u64 {
        self.next_seq
    }

    pub fn solution(&self) -> Option<&Rc<SearchNode<S>>> {
        self.solution.as_ref()
    }

    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }

    /// The most promising node not yet expanded.
    pub fn best(&self) -> Option<&Rc<SearchNode<S>>> {
        self.frontier.peek()
    }

    pub fn solution_plan(&self) -> Option<ActionSequence<S::Action>> {
        self.solution.as_ref().map(|node| node.action_sequence())
    }

    /// Path to the best non-terminal frontier node, used when planning runs out of ticks.
    ///
    /// Losing terminals queued by a reseed are never chosen.
    pub fn best_effort_plan(&self) -> Option<ActionSequence<S::Action>> {
        self.frontier
            .iter()
            .filter(|node| !node.is_terminal())
            .max_by_key(|node| FrontierKey::of(node))
            .map(|node| node.action_sequence())
    }
}
