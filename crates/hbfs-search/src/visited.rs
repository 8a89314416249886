use std::collections::HashSet;

use hbfs_core::Snapshot;

use crate::hasher::StateDigest;
use crate::node::SearchNode;

/// Bounded set of structural digests used to reject duplicate states and cycles.
///
/// On overflow the whole set is cleared rather than evicted piecemeal: short-term duplicate
/// detection is lost, memory and per-insert cost stay flat.
#[derive(Debug, Clone)]
pub struct VisitedSet {
    digests: HashSet<StateDigest>,
    max_len: usize,
}

impl VisitedSet {
    pub fn new(max_len: usize) -> Self {
        // Room for the full cap at a 3/4 load factor.
        let capacity = max_len.saturating_mul(4) / 3 + 1;
        Self {
            digests: HashSet::with_capacity(capacity),
            max_len,
        }
    }

    /// Returns `true` (and leaves the set unchanged) if an equivalent node is already present,
    /// otherwise records the node and returns `false`.
    pub fn contains_or_insert<S: Snapshot>(&mut self, node: &SearchNode<S>) -> bool {
        !self.digests.insert(node.digest())
    }

    pub fn contains(&self, digest: StateDigest) -> bool {
        self.digests.contains(&digest)
    }

    /// Record a digest without the duplicate check's result. Used when reseeding.
    pub fn insert(&mut self, digest: StateDigest) {
        self.digests.insert(digest);
    }

    /// Clear the set if it is full. Returns whether it was cleared.
    pub fn enforce_bound(&mut self) -> bool {
        if self.digests.len() < self.max_len {
            return false;
        }
        self.digests.clear();
        true
    }

    pub fn clear(&mut self) {
        self.digests.clear();
    }

    pub fn len(&self) -> usize {
        self.digests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }
}
