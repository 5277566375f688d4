//! Memory tiers behind the scalar cache.
//!
//! The cache reaches the rest of the hierarchy through two narrow, synchronous
//! interfaces:
//! 1. **Vector cache:** Probed after a scalar miss; a hit there forecloses filling the scalar cache.
//! 2. **DRAM:** Backing store of last resort, also the drain target of the write buffer.

/// DRAM controller models.
pub mod controller;

/// Vector cache interface.
pub mod vector;

pub use controller::{DramController, MemoryController, SimpleController};
pub use vector::{AbsentVectorCache, VectorCache};

use crate::config::{MemoryConfig, MemoryController as ControllerType};

/// Builds the DRAM controller selected by `config`.
pub fn build_controller(config: &MemoryConfig) -> Box<dyn MemoryController + Send + Sync> {
    match config.controller {
        ControllerType::Simple => Box::new(SimpleController::new(config.latency)),
        ControllerType::Dram => Box::new(DramController::new(
            config.t_cas,
            config.t_ras,
            config.t_pre,
        )),
    }
}
