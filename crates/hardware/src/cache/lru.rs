//! Least Recently Used (LRU) tracking.
//!
//! Each set keeps a usage stack of way indices. Index 0 is the most recently used
//! way and the last index is the replacement victim. The stack is always a
//! permutation of `0..ways`.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `promote()`: O(W) where W is the number of ways (associativity)
//!   - `victimize()`: O(1)
//! - **Space Complexity:** O(S × W) where S is the number of sets

/// Per-set LRU ordering, newest to oldest.
#[derive(Clone, Debug)]
pub struct LruTracker {
    /// A vector of usage stacks (one per set).
    usage: Vec<Vec<usize>>,
    ways: usize,
}

impl LruTracker {
    /// Creates a tracker for `sets` sets of `ways` ways, each in identity order.
    pub fn new(sets: usize, ways: usize) -> Self {
        let mut usage = Vec::with_capacity(sets);
        for _ in 0..sets {
            usage.push((0..ways).collect());
        }
        Self { usage, ways }
    }

    /// Restores the identity order `[0, 1, .., ways-1]` in every set.
    pub fn reset(&mut self) {
        for stack in &mut self.usage {
            for (pos, way) in stack.iter_mut().enumerate() {
                *way = pos;
            }
        }
    }

    /// Moves `way` to the most recently used position of `set`.
    ///
    /// Entries in front of the old position shift back by one; entries behind
    /// it do not move. Promoting the current front is a no-op.
    pub fn promote(&mut self, set: usize, way: usize) {
        let stack = &mut self.usage[set];
        if let Some(pos) = stack.iter().position(|&w| w == way) {
            stack[..=pos].rotate_right(1);
        }
    }

    /// Returns the least recently used way of `set`.
    ///
    /// Does not change the ordering; the caller promotes the way once it refills it.
    #[inline]
    pub fn victimize(&self, set: usize) -> usize {
        self.usage[set][self.ways - 1]
    }

    /// The current ordering of `set`, newest first.
    pub fn order(&self, set: usize) -> &[usize] {
        &self.usage[set]
    }
}
