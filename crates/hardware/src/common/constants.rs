//! Global Model Constants.
//!
//! This module defines the structural limits of the cache model. It includes:
//! 1. **Address Constants:** Width of the address view used for decomposition.
//! 2. **Structural Limits:** Bounds on associativity and write-buffer depth.

/// Width in bits of the address view used to derive tag and set index.
///
/// Simulated addresses may be wider; only the low `ADDRESS_WIDTH` bits
/// participate in line identification.
pub const ADDRESS_WIDTH: u32 = 32;

/// Largest associativity accepted at construction time.
pub const MAX_WAYS: usize = 64;

/// Write buffer depth of the reference configuration.
pub const DEFAULT_WB_CAPACITY: usize = 4;
