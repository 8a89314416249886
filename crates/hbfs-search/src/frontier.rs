use core::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;

use hbfs_core::Snapshot;

use crate::error::{Result, SearchError};
use crate::node::SearchNode;

/// Frontier ordering key: lower score first, then older creation order.
#[derive(Debug, Clone, Copy)]
pub struct FrontierKey {
    pub score: f64,
    pub seq: u64,
}

impl FrontierKey {
    pub fn of<S: Snapshot>(node: &SearchNode<S>) -> Self {
        Self {
            score: node.score(),
            seq: node.seq(),
        }
    }
}

impl PartialEq for FrontierKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierKey {}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap pop the best (lowest) key.
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug)]
struct FrontierEntry<S: Snapshot> {
    key: FrontierKey,
    node: Rc<SearchNode<S>>,
}

impl<S: Snapshot> PartialEq for FrontierEntry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<S: Snapshot> Eq for FrontierEntry<S> {}

impl<S: Snapshot> PartialOrd for FrontierEntry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S: Snapshot> Ord for FrontierEntry<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Bounded best-first priority structure over search nodes.
///
/// The bound is not enforced by `push`; callers run [`Frontier::enforce_bound`] before each
/// insertion so the overflow policy is visible at the call site.
#[derive(Debug)]
pub struct Frontier<S: Snapshot> {
    heap: BinaryHeap<FrontierEntry<S>>,
    max_len: usize,
    carry_over_len: usize,
    high_water: usize,
}

impl<S: Snapshot> Frontier<S> {
    pub fn new(max_len: usize, carry_over_len: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(max_len.saturating_add(1)),
            max_len,
            carry_over_len: carry_over_len.min(max_len),
            high_water: 0,
        }
    }

    pub fn push(&mut self, node: Rc<SearchNode<S>>) {
        self.heap.push(FrontierEntry {
            key: FrontierKey::of(&node),
            node,
        });
        self.high_water = self.high_water.max(self.heap.len());
    }

    /// Remove and return the best node.
    pub fn pop(&mut self) -> Result<Rc<SearchNode<S>>> {
        self.heap
            .pop()
            .map(|entry| entry.node)
            .ok_or(SearchError::EmptyFrontier)
    }

    pub fn peek(&self) -> Option<&Rc<SearchNode<S>>> {
        self.heap.peek().map(|entry| &entry.node)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn high_water(&self) -> usize {
        self.high_water
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Compact if the frontier is full. Returns the number of discarded nodes.
    pub fn enforce_bound(&mut self) -> usize {
        if self.heap.len() < self.max_len {
            return 0;
        }
        self.compact()
    }

    /// Keep only the `carry_over_len` best nodes. Returns the number of discarded nodes.
    pub fn compact(&mut self) -> usize {
        let before = self.heap.len();
        let keep = self.carry_over_len.min(before);

        let mut survivors = Vec::with_capacity(keep);
        for _ in 0..keep {
            if let Some(entry) = self.heap.pop() {
                survivors.push(entry);
            }
        }
        self.heap.clear();
        self.heap.extend(survivors);

        before - self.heap.len()
    }

    /// Nodes in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Rc<SearchNode<S>>> {
        self.heap.iter().map(|entry| &entry.node)
    }
}
