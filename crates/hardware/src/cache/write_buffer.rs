//! Write Buffer for evicted dirty lines.
//!
//! Dirty lines leaving the scalar cache wait here before reaching DRAM. The
//! buffer holds line addresses only and provides:
//! 1. **Admission:** Insert an evicted line at the newest position.
//! 2. **Backpressure:** On a full buffer, push the oldest entry to DRAM first and charge for it.
//! 3. **Restore:** A scalar miss that finds its line here takes it back out.
//! 4. **Flush:** Drop every pending entry.
//!
//! The buffer never waits for room. Nothing else drains it while the simulator
//! runs, so a full buffer always makes progress by draining exactly one entry.

use std::collections::VecDeque;

use crate::memory::MemoryController;

/// Outcome of inserting a line into the write buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct Admission {
    /// Extra cycles charged to the caller; zero unless a drain was forced.
    pub penalty: u64,
    /// Line pushed to DRAM to make room, if the buffer was full.
    pub drained: Option<u64>,
}

impl Admission {
    /// Returns `true` if the buffer was full and had to drain an entry.
    #[inline]
    pub fn was_backpressured(&self) -> bool {
        self.drained.is_some()
    }
}

/// Bounded FIFO of dirty line addresses, newest at the front.
#[derive(Clone, Debug)]
pub struct WriteBuffer {
    entries: VecDeque<u64>,
    capacity: usize,
    lookup_penalty: u64,
    drain_penalty: u64,
}

impl WriteBuffer {
    /// Creates an empty buffer.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of pending lines.
    /// * `lookup_penalty` - Cycles charged by every [`lookup`](Self::lookup).
    /// * `drain_penalty` - Cycles charged when [`add`](Self::add) must drain to DRAM.
    ///
    /// # Returns
    ///
    /// A new `WriteBuffer` with no pending lines.
    pub fn new(capacity: usize, lookup_penalty: u64, drain_penalty: u64) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            lookup_penalty,
            drain_penalty,
        }
    }

    /// Returns the capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of occupied entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if the buffer is full.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Returns true if `addr` is pending.
    pub fn contains(&self, addr: u64) -> bool {
        self.entries.contains(&addr)
    }

    /// Pending addresses, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &u64> {
        self.entries.iter()
    }

    /// Inserts `addr` at the newest position.
    ///
    /// If the buffer is full, the oldest entry is handed to `dram` first and the
    /// drain penalty is charged. An address that is already pending is only moved
    /// to the front.
    pub fn add(&mut self, addr: u64, dram: &mut dyn MemoryController) -> Admission {
        if let Some(pos) = self.entries.iter().position(|&a| a == addr) {
            let _ = self.entries.remove(pos);
            self.entries.push_front(addr);
            return Admission {
                penalty: 0,
                drained: None,
            };
        }

        let mut admission = Admission {
            penalty: 0,
            drained: None,
        };
        if self.is_full()
            && let Some(oldest) = self.entries.pop_back()
        {
            dram.drain(oldest);
            admission = Admission {
                penalty: self.drain_penalty,
                drained: Some(oldest),
            };
        }
        self.entries.push_front(addr);
        admission
    }

    /// Looks for `addr` and removes it if present, returning `(found, penalty)`.
    ///
    /// The penalty is the lookup penalty whether or not the line is found.
    /// Remaining entries keep their relative order.
    pub fn lookup(&mut self, addr: u64) -> (bool, u64) {
        let found = match self.entries.iter().position(|&a| a == addr) {
            Some(pos) => self.entries.remove(pos).is_some(),
            None => false,
        };
        (found, self.lookup_penalty)
    }

    /// Drops every pending entry.
    pub fn flush(&mut self) {
        self.entries.clear();
    }
}
