//! Memory Access Types.
//!
//! The interpreter classifies each simulated memory reference before handing it
//! to the cache. The classification decides whether the touched line becomes dirty.

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AccessType {
    /// Data read access (load or instruction fetch).
    ///
    /// Leaves the dirty bit of the touched line unchanged.
    #[default]
    Read,

    /// Data write access (store).
    ///
    /// Marks the touched line dirty, so it is routed through the write buffer
    /// when it is later evicted.
    Write,
}

impl AccessType {
    /// Returns `true` for stores.
    #[inline]
    pub fn is_write(self) -> bool {
        matches!(self, Self::Write)
    }
}
