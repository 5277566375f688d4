//! Scalar cache model for RISC-V instruction-set simulators.
//!
//! This crate models the memory hierarchy an interpreter consults on every load and store:
//! 1. **Cache:** Set-associative scalar cache with strict LRU replacement per set.
//! 2. **Write Buffer:** Bounded FIFO of evicted dirty lines with forced-drain backpressure.
//! 3. **Memory:** Vector cache and DRAM collaborators behind narrow traits.
//! 4. **Simulation:** Configuration, statistics, reporting and trace replay.
//!
//! Every access returns whether it hit and the cycle penalty of all tiers it touched.

/// Scalar cache, LRU tracking and write buffer.
pub mod cache;
/// Common types (geometry, access types, errors, constants).
pub mod common;
/// Cache and DRAM configuration.
pub mod config;
/// Vector cache and DRAM collaborators.
pub mod memory;
/// Trace replay driver.
pub mod sim;
/// Cache statistics collection and reporting.
pub mod stats;

/// Main cache type; construct with `Cache::new` or `Cache::from_config`.
pub use crate::cache::Cache;
/// Kind of memory reference (load or store).
pub use crate::common::AccessType;
/// Construction-time configuration error.
pub use crate::common::ConfigError;
/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
