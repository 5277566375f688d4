//! Configuration error definitions.
//!
//! Every check runs once, when a cache is built. A cache that exists is valid,
//! so the hot path (`Cache::access`) has no failure mode and returns plain values.

use thiserror::Error;

/// Reasons a cache cannot be constructed from a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The set count is zero or not a power of two.
    #[error("number of sets must be a power of two, got {0}")]
    SetsNotPowerOfTwo(usize),

    /// The line size is zero or not a power of two.
    #[error("row size must be a power of two number of bytes, got {0}")]
    RowSizeNotPowerOfTwo(usize),

    /// The associativity is zero or above [`MAX_WAYS`](crate::common::constants::MAX_WAYS).
    #[error("unsupported associativity: {0} ways (expected 1..={max})", max = crate::common::constants::MAX_WAYS)]
    UnsupportedWays(usize),

    /// Set and offset bits leave no room for a tag in the 32-bit address view.
    #[error("geometry too wide: {bits_set} set bits + {bits_offset} offset bits leave no tag bits")]
    GeometryTooWide {
        /// Bits used for the set index.
        bits_set: u32,
        /// Bits used for the line offset.
        bits_offset: u32,
    },

    /// The write buffer would never be able to hold an evicted line.
    #[error("write buffer capacity must be at least one entry")]
    ZeroWriteBufferCapacity,
}
