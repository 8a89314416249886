use hbfs_core::rng::mix64;
use hbfs_core::{EntityCategory, GridPos, Snapshot};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Structural digest of a snapshot's discretized state.
///
/// Two nodes with equal digests are treated as the same state, regardless of the path that
/// produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StateDigest(pub u64);

/// Rotate-and-xor accumulator for sequences of small integers.
///
/// Same family as the classic rotating hash; the per-step multiply keeps nearby small values from
/// cancelling each other out.
#[derive(Debug, Clone, Copy)]
struct RotatingHash(u64);

impl RotatingHash {
    const SEED: u64 = 0x243F_6A88_85A3_08D3;
    const MUL: u64 = 0x517C_C1B7_2722_0A95;

    fn new() -> Self {
        Self(Self::SEED)
    }

    fn push(&mut self, value: u64) {
        self.0 = (self.0.rotate_left(5) ^ value).wrapping_mul(Self::MUL);
    }

    fn push_pos(&mut self, pos: GridPos) {
        self.push(((pos.x as u32 as u64) << 32) | pos.y as u32 as u64);
    }

    fn finish(self) -> u64 {
        mix64(self.0)
    }
}

/// Computes [`StateDigest`]s from the avatar position bucket, per-category entity counts and the
/// sorted entity list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructuralHasher {
    position_bucket: i32,
}

impl Default for StructuralHasher {
    fn default() -> Self {
        Self { position_bucket: 1 }
    }
}

impl StructuralHasher {
    pub fn new(position_bucket: i32) -> Self {
        Self {
            position_bucket: position_bucket.max(1),
        }
    }

    pub fn position_bucket(&self) -> i32 {
        self.position_bucket
    }

    pub fn digest<S: Snapshot>(&self, snapshot: &S) -> StateDigest {
        let mut h = RotatingHash::new();

        match snapshot.avatar_position() {
            Some(pos) => {
                h.push(1);
                h.push_pos(pos.bucket(self.position_bucket));
            }
            None => h.push(0),
        }

        let mut entities = snapshot.entities();
        for e in entities.iter_mut() {
            e.position = e.position.bucket(self.position_bucket);
        }
        // Entity order is an implementation detail of the environment.
        entities.sort_unstable();

        let mut counts = [0u64; EntityCategory::ALL.len()];
        for e in &entities {
            counts[e.category.index()] += 1;
        }
        for count in counts {
            h.push(count);
        }

        h.push(entities.len() as u64);
        for e in &entities {
            h.push(((e.category.index() as u64) << 32) | e.type_id as u64);
            h.push_pos(e.position);
        }

        StateDigest(h.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotating_hash_is_order_sensitive() {
        let mut a = RotatingHash::new();
        a.push(1);
        a.push(2);
        let mut b = RotatingHash::new();
        b.push(2);
        b.push(1);
        assert_ne!(a.finish(), b.finish());
    }

    #[test]
    fn nearby_positions_do_not_cancel() {
        let digest = |x: i32, y: i32| {
            let mut h = RotatingHash::new();
            h.push_pos(GridPos::new(x, y));
            h.finish()
        };
        assert_ne!(digest(1, 17), digest(0, 1));
        assert_ne!(digest(1, 2), digest(2, 1));
        assert_ne!(digest(-1, 0), digest(0, -1));
    }
}
