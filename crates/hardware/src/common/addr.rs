//! Cache geometry and address decomposition.
//!
//! This module turns a validated cache shape into the bit widths used to split an
//! address. It provides the following:
//! 1. **Validation:** Power-of-two set count and line size, bounded associativity.
//! 2. **Decomposition:** The pure `address -> (tag, set)` mapping used on every lookup.
//! 3. **Reconstruction:** Rebuilding the base address of a line from its tag and set.
//!
//! Addresses are viewed as 32-bit values laid out as `| tag | set | offset |`.

use super::constants::{ADDRESS_WIDTH, MAX_WAYS};
use super::error::ConfigError;

/// Validated shape of a set-associative cache.
///
/// Immutable once built. All derived widths satisfy
/// `bits_tag + bits_set + bits_offset == ADDRESS_WIDTH` with `bits_tag >= 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    /// Associativity (lines per set).
    pub n_ways: usize,
    /// Number of sets.
    pub n_sets: usize,
    /// Line size in bytes.
    pub row_size: usize,
    /// Address bits selecting the set.
    pub bits_set: u32,
    /// Address bits selecting the byte within a line.
    pub bits_offset: u32,
    /// Address bits stored as the tag.
    pub bits_tag: u32,
}

impl Geometry {
    /// Validates a cache shape and derives its bit widths.
    ///
    /// # Arguments
    ///
    /// * `ways` - Lines per set.
    /// * `sets` - Number of sets; must be a power of two.
    /// * `row_size` - Bytes per line; must be a power of two.
    ///
    /// # Returns
    ///
    /// The validated `Geometry` with set, offset and tag widths filled in.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `sets` or `row_size` is not a power of two,
    /// if `ways` is outside `1..=MAX_WAYS`, or if no tag bits would remain.
    pub fn new(ways: usize, sets: usize, row_size: usize) -> Result<Self, ConfigError> {
        if ways == 0 || ways > MAX_WAYS {
            return Err(ConfigError::UnsupportedWays(ways));
        }
        if !sets.is_power_of_two() {
            return Err(ConfigError::SetsNotPowerOfTwo(sets));
        }
        if !row_size.is_power_of_two() {
            return Err(ConfigError::RowSizeNotPowerOfTwo(row_size));
        }

        let bits_set = sets.trailing_zeros();
        let bits_offset = row_size.trailing_zeros();
        if bits_set + bits_offset >= ADDRESS_WIDTH {
            return Err(ConfigError::GeometryTooWide {
                bits_set,
                bits_offset,
            });
        }

        Ok(Self {
            n_ways: ways,
            n_sets: sets,
            row_size,
            bits_set,
            bits_offset,
            bits_tag: ADDRESS_WIDTH - bits_set - bits_offset,
        })
    }

    /// Total number of lines (`n_ways * n_sets`).
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.n_ways * self.n_sets
    }

    /// Data capacity in bytes (`n_rows * row_size`).
    #[inline]
    pub fn capacity_bytes(&self) -> usize {
        self.n_rows() * self.row_size
    }

    /// Mask selecting the byte offset within a line.
    #[inline]
    pub fn offset_mask(&self) -> u32 {
        (1u32 << self.bits_offset) - 1
    }

    /// Splits an address into `(tag, set)`.
    ///
    /// Only the low 32 bits of `address` are considered. The tag is everything above
    /// the set and offset fields; the set index is the middle `bits_set` bits.
    #[inline]
    pub fn decompose(&self, address: u64) -> (u32, usize) {
        let view = address as u32;
        let tag = view >> (self.bits_set + self.bits_offset);
        let set_mask = (1u32 << self.bits_set) - 1;
        let set = (view >> self.bits_offset) & set_mask;
        (tag, set as usize)
    }

    /// Rebuilds the base (offset zero) address of the line identified by `tag` and `set`.
    #[inline]
    pub fn line_base(&self, tag: u32, set: usize) -> u32 {
        (tag << (self.bits_set + self.bits_offset)) | ((set as u32) << self.bits_offset)
    }
}
