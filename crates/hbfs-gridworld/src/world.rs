use std::collections::BTreeSet;
use std::rc::Rc;

use hbfs_core::{EntityCategory, EntitySighting, GridPos, InteractionEvent, Outcome, Snapshot};
use thiserror::Error;

/// Entity type ids reported in sightings and interaction events.
pub mod types {
    pub const AVATAR: u32 = 0;
    pub const WALL: u32 = 1;
    pub const KEY: u32 = 2;
    pub const DOOR: u32 = 3;
    pub const PIT: u32 = 4;
    pub const EXIT: u32 = 5;
}

pub const DEFAULT_STEP_LIMIT: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Move {
    Up,
    Right,
    Down,
    Left,
    Nil,
}

impl Move {
    /// Fixed order for determinism: N, E, S, W, then the no-op.
    pub const ALL: [Move; 5] = [Move::Up, Move::Right, Move::Down, Move::Left, Move::Nil];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Move::Up => (0, -1),
            Move::Right => (1, 0),
            Move::Down => (0, 1),
            Move::Left => (-1, 0),
            Move::Nil => (0, 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridParseError {
    #[error("map is empty")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown tile {tile:?} at row {row}, column {col}")]
    UnknownTile { tile: char, row: usize, col: usize },

    #[error("expected exactly one avatar, found {0}")]
    AvatarCount(usize),
}

/// Static part of a map, shared between all clones.
#[derive(Debug)]
struct Layout {
    width: i32,
    height: i32,
    walls: Vec<bool>,
    pits: Vec<GridPos>,
    exits: Vec<GridPos>,
}

impl Layout {
    fn in_bounds(&self, p: GridPos) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    fn is_wall(&self, p: GridPos) -> bool {
        if !self.in_bounds(p) {
            return true;
        }
        self.walls[(p.y * self.width + p.x) as usize]
    }
}

#[derive(Debug, Clone)]
pub struct GridWorld {
    layout: Rc<Layout>,
    avatar: GridPos,
    keys: BTreeSet<GridPos>,
    doors: BTreeSet<GridPos>,
    held_keys: u32,
    tick: u64,
    step_limit: u64,
    outcome: Outcome,
    terminal: bool,
    events: Vec<InteractionEvent>,
}

impl GridWorld {
    pub fn parse(map: &str) -> Result<Self, GridParseError> {
        let rows: Vec<&str> = map
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let Some(first) = rows.first() else {
            return Err(GridParseError::Empty);
        };
        let width = first.chars().count();

        let mut walls = Vec::with_capacity(width * rows.len());
        let mut pits = Vec::new();
        let mut exits = Vec::new();
        let mut keys = BTreeSet::new();
        let mut doors = BTreeSet::new();
        let mut avatars = Vec::new();

        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(GridParseError::Ragged {
                    row,
                    expected: width,
                    found,
                });
            }
            for (col, tile) in line.chars().enumerate() {
                let pos = GridPos::new(col as i32, row as i32);
                walls.push(tile == '#');
                match tile {
                    '#' | '.' => {}
                    'A' => avatars.push(pos),
                    'k' => {
                        keys.insert(pos);
                    }
                    'D' => {
                        doors.insert(pos);
                    }
                    'x' => pits.push(pos),
                    'E' => exits.push(pos),
                    _ => return Err(GridParseError::UnknownTile { tile, row, col }),
                }
            }
        }

        let &[avatar] = avatars.as_slice() else {
            return Err(GridParseError::AvatarCount(avatars.len()));
        };

        Ok(Self {
            layout: Rc::new(Layout {
                width: width as i32,
                height: rows.len() as i32,
                walls,
                pits,
                exits,
            }),
            avatar,
            keys,
            doors,
            held_keys: 0,
            tick: 0,
            step_limit: DEFAULT_STEP_LIMIT,
            outcome: Outcome::Pending,
            terminal: false,
            events: Vec::new(),
        })
    }

    /// The episode is lost once `limit` steps have been taken.
    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = limit;
        self
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn avatar(&self) -> GridPos {
        self.avatar
    }

    pub fn held_keys(&self) -> u32 {
        self.held_keys
    }

    pub fn keys_left(&self) -> usize {
        self.keys.len()
    }

    pub fn doors_left(&self) -> usize {
        self.doors.len()
    }

    fn record(&mut self, passive_type: u32) {
        self.events.push(InteractionEvent {
            tick: self.tick,
            active_type: types::AVATAR,
            passive_type,
        });
    }

    fn finish(&mut self, outcome: Outcome) {
        self.terminal = true;
        self.outcome = outcome;
    }

    fn step(&mut self, action: Move) {
        let (dx, dy) = action.delta();
        let target = GridPos::new(self.avatar.x + dx, self.avatar.y + dy);
        if target == self.avatar || self.layout.is_wall(target) {
            return;
        }

        if self.doors.contains(&target) {
            self.record(types::DOOR);
            if self.held_keys == 0 {
                return;
            }
            self.held_keys -= 1;
            self.doors.remove(&target);
        }

        self.avatar = target;

        if self.keys.remove(&target) {
            self.held_keys += 1;
            self.record(types::KEY);
        }
        if self.layout.pits.contains(&target) {
            self.record(types::PIT);
            self.finish(Outcome::Loss);
        } else if self.layout.exits.contains(&target) {
            self.record(types::EXIT);
            self.finish(Outcome::Win);
        }
    }
}

impl Snapshot for GridWorld {
    type Action = Move;

    fn available_actions(&self) -> Vec<Move> {
        Move::ALL.to_vec()
    }

    fn noop_action(&self) -> Move {
        Move::Nil
    }

    fn advance(&mut self, action: Move) {
        if self.terminal {
            return;
        }
        self.tick += 1;
        self.step(action);
        if !self.terminal && self.tick >= self.step_limit {
            self.finish(Outcome::Loss);
        }
    }

    fn is_terminal(&self) -> bool {
        self.terminal
    }

    fn winner(&self) -> Outcome {
        self.outcome
    }

    fn avatar_position(&self) -> Option<GridPos> {
        Some(self.avatar)
    }

    fn entities(&self) -> Vec<EntitySighting> {
        let layout = &self.layout;
        let mut out = Vec::new();
        for y in 0..layout.height {
            for x in 0..layout.width {
                let pos = GridPos::new(x, y);
                if layout.is_wall(pos) {
                    out.push(sighting(EntityCategory::Immovable, types::WALL, pos));
                }
            }
        }
        out.extend(layout.pits.iter().map(|&p| sighting(EntityCategory::Immovable, types::PIT, p)));
        out.extend(self.doors.iter().map(|&p| sighting(EntityCategory::Immovable, types::DOOR, p)));
        out.extend(self.keys.iter().map(|&p| sighting(EntityCategory::Resource, types::KEY, p)));
        out.extend(layout.exits.iter().map(|&p| sighting(EntityCategory::Portal, types::EXIT, p)));
        out
    }

    fn events(&self) -> &[InteractionEvent] {
        &self.events
    }

    fn load(&self) -> usize {
        let walls = self.layout.walls.iter().filter(|&&w| w).count();
        walls + self.layout.pits.len() + self.layout.exits.len() + self.doors.len() + self.keys.len()
    }
}

fn sighting(category: EntityCategory, type_id: u32, position: GridPos) -> EntitySighting {
    EntitySighting {
        category,
        type_id,
        position,
    }
}
