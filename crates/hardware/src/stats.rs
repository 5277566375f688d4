//! Cache statistics collection and reporting.
//!
//! This module tracks what every lookup did and renders it for humans. It provides:
//! 1. **Counters:** Accesses and misses, plus where each miss was serviced.
//! 2. **Rates:** Miss and hit rates that are zero, not undefined, before the first access.
//! 3. **Report:** The text summary printed at the end of a run.
//!
//! Counters only grow between flushes and never decrease otherwise.

use std::fmt;

use crate::common::Geometry;
use crate::config::CacheConfig;

/// Cumulative cache counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups performed.
    pub accesses: u64,
    /// Lookups that hit a valid scalar cache line.
    pub hits: u64,
    /// Lookups that missed in the scalar cache.
    pub misses: u64,
    /// Misses serviced by the vector cache.
    pub vc_hits: u64,
    /// Misses serviced by restoring a line from the write buffer.
    pub wb_restores: u64,
    /// Misses serviced by DRAM.
    pub dram_fetches: u64,
    /// Dirty victims sent to the write buffer.
    pub writebacks: u64,
    /// Insertions that found the write buffer full and forced a drain.
    pub forced_drains: u64,
    /// Sum of all penalties returned to the caller, in cycles.
    pub total_penalty: u64,
}

impl CacheStats {
    /// Fraction of accesses that missed; zero when nothing was accessed.
    pub fn miss_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.misses as f64 / self.accesses as f64
        }
    }

    /// Fraction of accesses that hit; zero when nothing was accessed.
    pub fn hit_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.hits as f64 / self.accesses as f64
        }
    }

    /// Mean penalty per access in cycles; zero when nothing was accessed.
    pub fn average_penalty(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.total_penalty as f64 / self.accesses as f64
        }
    }
}

/// Formats a byte count the way the report prints capacities.
///
/// `>= 1 MiB` prints as `"{:.1} MB"`, `>= 1 KiB` as `"{:.1} KB"`, anything smaller as `"{} B"`.
pub fn format_capacity(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Human-readable end-of-run report for one cache.
#[derive(Debug)]
pub struct CacheReport<'a> {
    /// Configuration the cache was built from.
    pub config: &'a CacheConfig,
    /// Derived geometry.
    pub geometry: &'a Geometry,
    /// Counters to print.
    pub stats: &'a CacheStats,
}

impl fmt::Display for CacheReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.stats;
        writeln!(f, "{} cache", self.config.name)?;
        writeln!(
            f,
            "  {} capacity",
            format_capacity(self.geometry.capacity_bytes())
        )?;
        writeln!(f, "  {} bytes line size", self.geometry.row_size)?;
        writeln!(f, "  {} ways set associativity", self.geometry.n_ways)?;
        writeln!(f, "  {} cycles lookup penalty", self.config.sc_penalty)?;
        writeln!(f, "  {} cycles write buffer penalty", self.config.wb_penalty)?;
        writeln!(
            f,
            "  {} cycles write buffer to DRAM penalty",
            self.config.wb_to_dram_penalty
        )?;
        writeln!(f, "  {} references", s.accesses)?;
        writeln!(
            f,
            "  {} misses ({:5.3}%)",
            s.misses,
            100.0 * s.miss_rate()
        )?;
        writeln!(f, "  {} vector cache hits", s.vc_hits)?;
        writeln!(f, "  {} write buffer restores", s.wb_restores)?;
        writeln!(f, "  {} DRAM fetches", s.dram_fetches)?;
        writeln!(f, "  {} write-backs", s.writebacks)?;
        writeln!(f, "  {} forced drains", s.forced_drains)?;
        write!(
            f,
            "  {} penalty cycles ({:.2} per reference)",
            s.total_penalty,
            s.average_penalty()
        )
    }
}
