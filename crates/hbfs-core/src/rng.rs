//! Seeded randomness for planner fallbacks, plus the 64-bit finalizer shared with the hasher.
//!
//! Not cryptographic. Every stream is a pure function of `(run seed, episode, stream)`, so a run
//! replays exactly under the same seed.

pub trait DeterministicRng {
    fn next_u64(&mut self) -> u64;

    /// Uniform index in `0..len`. Returns `None` for an empty range.
    fn next_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        // Lemire's multiply-shift; the bias is negligible for action-set sized ranges.
        let x = self.next_u64() as u128;
        Some(((x * len as u128) >> 64) as usize)
    }
}

/// SplitMix64 generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    const GAMMA: u64 = 0x9E3779B97F4A7C15;

    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }
}

impl DeterministicRng for SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(Self::GAMMA);
        mix64(self.state)
    }
}

/// SplitMix64 finalizer: full avalanche of a 64-bit word.
pub fn mix64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58476D1CE4E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D049BB133111EB);
    x ^ (x >> 31)
}

/// Seed of one random stream within one episode of a run.
pub fn derive_seed(run_seed: u64, episode: u64, stream: u64) -> u64 {
    mix64(run_seed ^ mix64(episode.wrapping_add(SplitMix64::GAMMA)) ^ mix64(stream.rotate_left(17)))
}
