use std::time::{Duration, Instant};

use crate::{rng, SplitMix64};

/// Per-decision context handed to the planner by the host loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickContext {
    /// Game tick of the snapshot the decision is made for.
    pub tick: u64,
    pub seed: u64,
}

impl TickContext {
    pub fn new(tick: u64, seed: u64) -> Self {
        Self { tick, seed }
    }

    /// Deterministic RNG for one episode and stream.
    pub fn rng_for_episode(&self, episode: u64, stream: u64) -> SplitMix64 {
        SplitMix64::new(rng::derive_seed(self.seed, episode, stream))
    }
}

/// Wall-clock budget for one decision tick.
///
/// The planner only reads `remaining` between units of work, never during one.
pub trait TimeBudget {
    fn remaining(&self) -> Duration;

    fn exceeds(&self, margin: Duration) -> bool {
        self.remaining() > margin
    }
}

/// A budget that expires at a fixed instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    due: Instant,
}

impl Deadline {
    pub fn at(due: Instant) -> Self {
        Self { due }
    }

    pub fn after(budget: Duration) -> Self {
        Self {
            due: Instant::now() + budget,
        }
    }

    pub fn due(&self) -> Instant {
        self.due
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.due
    }
}

impl TimeBudget for Deadline {
    fn remaining(&self) -> Duration {
        self.due.saturating_duration_since(Instant::now())
    }
}

impl<B: TimeBudget + ?Sized> TimeBudget for &B {
    fn remaining(&self) -> Duration {
        (**self).remaining()
    }
}
