//! Configuration system for the cache model.
//!
//! This module defines the configuration structures used to build a cache and its
//! DRAM collaborator. It provides:
//! 1. **Defaults:** Baseline geometry, penalties and DRAM timings.
//! 2. **Structures:** `CacheConfig` for the scalar cache, `MemoryConfig` for DRAM, `Config` as the root.
//! 3. **Loading:** JSON deserialization with per-field defaults.
//!
//! Every field may be omitted from JSON; the constants in `defaults` fill the gaps.
//!
//! # Example
//!
//! ```
//! use rvcache_core::config::{Config, MemoryController};
//!
//! let json = r#"{
//!     "cache": { "name": "L1D", "ways": 2, "sets": 128, "row_size": 32 },
//!     "memory": { "controller": "Dram" }
//! }"#;
//!
//! let config = Config::from_json_str(json).unwrap();
//! assert_eq!(config.cache.ways, 2);
//! assert_eq!(config.cache.wb_capacity, 4);
//! assert_eq!(config.memory.controller, MemoryController::Dram);
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::Geometry;
use crate::common::constants::DEFAULT_WB_CAPACITY;
use crate::common::error::ConfigError;

/// Default configuration constants for the model.
mod defaults {
    /// Name printed in reports.
    pub const CACHE_NAME: &str = "SC";

    /// Default associativity.
    pub const CACHE_WAYS: usize = 4;

    /// Default number of sets.
    pub const CACHE_SETS: usize = 64;

    /// Default line size in bytes.
    pub const CACHE_ROW: usize = 64;

    /// Cycles charged for every scalar cache probe.
    pub const SC_PENALTY: u64 = 1;

    /// Cycles charged for every write buffer probe.
    pub const WB_PENALTY: u64 = 2;

    /// Cycles charged when a full write buffer has to push one line to DRAM.
    pub const WB_TO_DRAM_PENALTY: u64 = 10;

    /// Fixed DRAM latency for the simple controller.
    pub const DRAM_LATENCY: u64 = 100;

    /// CAS latency in DRAM cycles.
    pub const T_CAS: u64 = 14;

    /// RAS latency in DRAM cycles.
    pub const T_RAS: u64 = 14;

    /// Precharge latency in DRAM cycles.
    pub const T_PRE: u64 = 14;
}

/// DRAM controller implementation types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum MemoryController {
    /// Every access costs the same fixed latency.
    #[default]
    Simple,
    /// Row-buffer model with CAS, RAS and precharge timings.
    #[serde(alias = "DRAM")]
    Dram,
}

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Scalar cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,
    /// DRAM collaborator configuration.
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the text is not valid JSON or a field has the wrong type.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or an `InvalidData`
    /// error wrapping the parse failure.
    pub fn from_json_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text).map_err(std::io::Error::other)
    }
}

/// Scalar cache configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Name used in reports.
    #[serde(default = "CacheConfig::default_name")]
    pub name: String,

    /// Associativity (number of ways)
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Number of sets (power of two)
    #[serde(default = "CacheConfig::default_sets")]
    pub sets: usize,

    /// Line size in bytes (power of two)
    #[serde(default = "CacheConfig::default_row_size")]
    pub row_size: usize,

    /// Cycles for a scalar cache lookup
    #[serde(default = "CacheConfig::default_sc_penalty")]
    pub sc_penalty: u64,

    /// Cycles for a write buffer lookup
    #[serde(default = "CacheConfig::default_wb_penalty")]
    pub wb_penalty: u64,

    /// Cycles for draining one write buffer entry to DRAM
    #[serde(default = "CacheConfig::default_wb_to_dram_penalty")]
    pub wb_to_dram_penalty: u64,

    /// Write buffer depth in entries
    #[serde(default = "CacheConfig::default_wb_capacity")]
    pub wb_capacity: usize,
}

impl CacheConfig {
    /// Returns the default cache name.
    fn default_name() -> String {
        defaults::CACHE_NAME.to_owned()
    }

    /// Returns the default associativity.
    fn default_ways() -> usize {
        defaults::CACHE_WAYS
    }

    /// Returns the default number of sets.
    fn default_sets() -> usize {
        defaults::CACHE_SETS
    }

    /// Returns the default line size in bytes.
    fn default_row_size() -> usize {
        defaults::CACHE_ROW
    }

    /// Returns the default scalar cache lookup penalty.
    fn default_sc_penalty() -> u64 {
        defaults::SC_PENALTY
    }

    /// Returns the default write buffer lookup penalty.
    fn default_wb_penalty() -> u64 {
        defaults::WB_PENALTY
    }

    /// Returns the default write-buffer-to-DRAM drain penalty.
    fn default_wb_to_dram_penalty() -> u64 {
        defaults::WB_TO_DRAM_PENALTY
    }

    /// Returns the default write buffer depth.
    fn default_wb_capacity() -> usize {
        DEFAULT_WB_CAPACITY
    }

    /// Builds a configuration from positional penalties and geometry.
    ///
    /// # Arguments
    ///
    /// * `name` - Label used in the report.
    /// * `sc_penalty` - Cycles charged by every lookup.
    /// * `wb_penalty` - Cycles charged when a miss probes the write buffer.
    /// * `wb_to_dram_penalty` - Cycles charged for a forced drain.
    /// * `ways`, `sets`, `row_size` - Cache geometry, validated later by [`Self::validate`].
    ///
    /// # Returns
    ///
    /// A `CacheConfig` whose write buffer keeps its default depth.
    pub fn new(
        name: &str,
        sc_penalty: u64,
        wb_penalty: u64,
        wb_to_dram_penalty: u64,
        ways: usize,
        sets: usize,
        row_size: usize,
    ) -> Self {
        Self {
            name: name.to_owned(),
            ways,
            sets,
            row_size,
            sc_penalty,
            wb_penalty,
            wb_to_dram_penalty,
            wb_capacity: DEFAULT_WB_CAPACITY,
        }
    }

    /// Checks the configuration and derives the cache geometry.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an invalid geometry or an empty write buffer.
    pub fn validate(&self) -> Result<Geometry, ConfigError> {
        let geometry = Geometry::new(self.ways, self.sets, self.row_size)?;
        if self.wb_capacity == 0 {
            return Err(ConfigError::ZeroWriteBufferCapacity);
        }
        Ok(geometry)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            name: defaults::CACHE_NAME.to_owned(),
            ways: defaults::CACHE_WAYS,
            sets: defaults::CACHE_SETS,
            row_size: defaults::CACHE_ROW,
            sc_penalty: defaults::SC_PENALTY,
            wb_penalty: defaults::WB_PENALTY,
            wb_to_dram_penalty: defaults::WB_TO_DRAM_PENALTY,
            wb_capacity: DEFAULT_WB_CAPACITY,
        }
    }
}

/// DRAM collaborator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemoryConfig {
    /// Controller model
    #[serde(default)]
    pub controller: MemoryController,

    /// Fixed latency used by the simple controller
    #[serde(default = "MemoryConfig::default_latency")]
    pub latency: u64,

    /// CAS latency (DRAM controller)
    #[serde(default = "MemoryConfig::default_t_cas")]
    pub t_cas: u64,

    /// RAS latency (DRAM controller)
    #[serde(default = "MemoryConfig::default_t_ras")]
    pub t_ras: u64,

    /// Precharge latency (DRAM controller)
    #[serde(default = "MemoryConfig::default_t_pre")]
    pub t_pre: u64,
}

impl MemoryConfig {
    /// Returns the default fixed DRAM latency.
    fn default_latency() -> u64 {
        defaults::DRAM_LATENCY
    }

    /// Returns the default CAS latency.
    fn default_t_cas() -> u64 {
        defaults::T_CAS
    }

    /// Returns the default RAS latency.
    fn default_t_ras() -> u64 {
        defaults::T_RAS
    }

    /// Returns the default precharge latency.
    fn default_t_pre() -> u64 {
        defaults::T_PRE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            controller: MemoryController::default(),
            latency: defaults::DRAM_LATENCY,
            t_cas: defaults::T_CAS,
            t_ras: defaults::T_RAS,
            t_pre: defaults::T_PRE,
        }
    }
}
