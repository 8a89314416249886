use core::fmt::Debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How an episode ended, as seen from the planning agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Outcome {
    /// Not decided yet (the episode is running, or ended without a verdict).
    Pending,
    Win,
    Loss,
}

/// Integer grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Coarsen the position to a bucket of `size` cells per axis.
    pub fn bucket(self, size: i32) -> Self {
        let size = size.max(1);
        Self {
            x: self.x.div_euclid(size),
            y: self.y.div_euclid(size),
        }
    }
}

/// Coarse classification of non-avatar entities.
///
/// The ordering is stable and is part of the structural digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EntityCategory {
    Npc,
    Immovable,
    Movable,
    Resource,
    Portal,
    FromAvatar,
}

impl EntityCategory {
    pub const ALL: [EntityCategory; 6] = [
        EntityCategory::Npc,
        EntityCategory::Immovable,
        EntityCategory::Movable,
        EntityCategory::Resource,
        EntityCategory::Portal,
        EntityCategory::FromAvatar,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// One observed entity or tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntitySighting {
    pub category: EntityCategory,
    pub type_id: u32,
    pub position: GridPos,
}

/// A collision/interaction recorded by the environment.
///
/// `active_type` is the type that caused the interaction (usually the avatar or something it
/// spawned), `passive_type` the type that was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InteractionEvent {
    pub tick: u64,
    pub active_type: u32,
    pub passive_type: u32,
}

/// A point-in-time copy of the simulated environment.
///
/// Cloning must be deep enough that advancing the clone never affects the original. The planner
/// only ever mutates clones it owns.
///
/// The feature accessors (`avatar_position`, `entities`, `events`, `load`) are read for heuristic
/// scoring and duplicate detection only; implementations should keep them cheap, they are queried
/// for every generated successor.
pub trait Snapshot: Clone {
    type Action: Copy + Eq + Debug;

    /// Actions available to the agent. The planner reads this once per search.
    fn available_actions(&self) -> Vec<Self::Action>;

    /// The action emitted on ticks where the planner makes no decision.
    fn noop_action(&self) -> Self::Action;

    /// Advance the simulation by one step.
    fn advance(&mut self, action: Self::Action);

    fn is_terminal(&self) -> bool;

    fn winner(&self) -> Outcome;

    fn avatar_position(&self) -> Option<GridPos>;

    fn entities(&self) -> Vec<EntitySighting>;

    /// Cumulative interaction history since the start of the episode.
    fn events(&self) -> &[InteractionEvent];

    /// Total number of entities/tiles currently present.
    fn load(&self) -> usize {
        self.entities().len()
    }

    fn is_win(&self) -> bool {
        self.is_terminal() && self.winner() == Outcome::Win
    }
}
