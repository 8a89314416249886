use hbfs_search::SearchStats;

/// Counters kept by one controller across episodes.
///
/// `search` mirrors the live search and is reset with it; the remaining counters accumulate for
/// the lifetime of the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EpisodeStats {
    pub search: SearchStats,
    pub episodes_initialized: u64,
    pub planning_ticks: u64,
    /// Expansions performed during the most recent planning burst.
    pub last_turnaround: u64,
    pub solutions: u64,
    pub timeouts: u64,
    pub random_fallbacks: u64,
    pub recovered_panics: u64,
}
