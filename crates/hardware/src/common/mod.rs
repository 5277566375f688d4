//! Common types shared by every part of the cache model.
//!
//! This module provides the building blocks the cache, its collaborators and the
//! trace driver agree on:
//! 1. **Geometry:** Validated cache shape and the address-to-(tag, set) decomposition.
//! 2. **Constants:** Address width and structural limits.
//! 3. **Memory Access:** Classification of loads and stores.
//! 4. **Error Handling:** Construction-time configuration errors.

/// Cache geometry and address decomposition.
pub mod addr;

/// Common constants used throughout the model.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Error types.
pub mod error;

pub use addr::Geometry;
pub use constants::ADDRESS_WIDTH;
pub use data::AccessType;
pub use error::ConfigError;
