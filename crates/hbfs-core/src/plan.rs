use std::collections::VecDeque;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A reconstructed action sequence, drained front to back one action per tick.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActionSequence<A> {
    steps: VecDeque<A>,
}

impl<A> ActionSequence<A> {
    /// Build a sequence from actions in execution order.
    pub fn new(steps: Vec<A>) -> Self {
        Self {
            steps: steps.into(),
        }
    }

    pub fn single(action: A) -> Self {
        Self {
            steps: VecDeque::from([action]),
        }
    }

    pub fn empty() -> Self {
        Self {
            steps: VecDeque::new(),
        }
    }

    /// Remove and return the next action to execute.
    pub fn pop_next(&mut self) -> Option<A> {
        self.steps.pop_front()
    }

    pub fn peek_next(&self) -> Option<&A> {
        self.steps.front()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &A> {
        self.steps.iter()
    }
}

impl<A> Default for ActionSequence<A> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<A> FromIterator<A> for ActionSequence<A> {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}
