use std::rc::Rc;

use hbfs_core::{ActionSequence, Snapshot};

use crate::hasher::{StateDigest, StructuralHasher};
use crate::score::{Heuristic, ScoreComponents};

/// An immutable search node.
///
/// A node owns its snapshot exclusively and holds a counted handle to its parent. Parents never
/// point at children, so the graph is a tree of back-edges only: ancestors stay alive exactly as
/// long as some descendant is still reachable from the frontier or the solution.
#[derive(Debug)]
pub struct SearchNode<S: Snapshot> {
    snapshot: S,
    action: Option<S::Action>,
    parent: Option<Rc<SearchNode<S>>>,
    depth: u32,
    seq: u64,
    digest: StateDigest,
    components: ScoreComponents,
    score: f64,
}

impl<S: Snapshot> SearchNode<S> {
    pub fn root(snapshot: S, seq: u64, hasher: &StructuralHasher, heuristic: &Heuristic) -> Self {
        Self::build(snapshot, None, None, 0, seq, hasher, heuristic)
    }

    /// Build the node reached from `parent` by `action`. `snapshot` must already be advanced.
    pub fn child(
        parent: &Rc<SearchNode<S>>,
        action: S::Action,
        snapshot: S,
        seq: u64,
        hasher: &StructuralHasher,
        heuristic: &Heuristic,
    ) -> Self {
        let depth = parent.depth.saturating_add(1);
        Self::build(
            snapshot,
            Some(action),
            Some(Rc::clone(parent)),
            depth,
            seq,
            hasher,
            heuristic,
        )
    }

    fn build(
        snapshot: S,
        action: Option<S::Action>,
        parent: Option<Rc<SearchNode<S>>>,
        depth: u32,
        seq: u64,
        hasher: &StructuralHasher,
        heuristic: &Heuristic,
    ) -> Self {
        let digest = hasher.digest(&snapshot);
        let components = heuristic.evaluate(&snapshot, depth);
        Self {
            snapshot,
            action,
            parent,
            depth,
            seq,
            digest,
            score: components.total(),
            components,
        }
    }

    pub fn snapshot(&self) -> &S {
        &self.snapshot
    }

    pub fn action(&self) -> Option<S::Action> {
        self.action
    }

    pub fn parent(&self) -> Option<&SearchNode<S>> {
        self.parent.as_deref()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Creation order within its search; breaks score ties.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn digest(&self) -> StateDigest {
        self.digest
    }

    pub fn components(&self) -> &ScoreComponents {
        &self.components
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn is_terminal(&self) -> bool {
        self.snapshot.is_terminal()
    }

    /// This node followed by its ancestors up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = &SearchNode<S>> {
        std::iter::successors(Some(self), |node| node.parent())
    }

    /// Actions from the root to this node, in execution order.
    pub fn action_path(&self) -> Vec<S::Action> {
        let mut path: Vec<S::Action> = self.ancestors().filter_map(|n| n.action).collect();
        path.reverse();
        path
    }

    pub fn action_sequence(&self) -> ActionSequence<S::Action> {
        ActionSequence::new(self.action_path())
    }
}

impl<S: Snapshot> Drop for SearchNode<S> {
    // Unlink uniquely owned ancestors one at a time; the default drop would recurse once per
    // level of depth.
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(node) = next {
            match Rc::try_unwrap(node) {
                Ok(mut inner) => next = inner.parent.take(),
                Err(_) => break,
            }
        }
    }
}
