//! Simulation drivers.
//!
//! Feeds recorded memory references through a cache outside of a full interpreter,
//! for quick what-if runs over different cache shapes.

/// Memory reference trace parsing and replay.
pub mod trace;
