//! Set-Associative Scalar Cache.
//!
//! This module implements the scalar cache consulted on every simulated load and
//! store. It models hits, misses, LRU replacement and a bounded write buffer for
//! dirty victims, and returns the cycle penalty of every tier an access touched.
//!
//! A miss walks the hierarchy in a fixed order: vector cache, write buffer, DRAM.
//! A vector cache hit ends the walk without filling the scalar cache, since a line
//! lives in at most one of the two.

/// Cache line storage.
pub mod line;

/// LRU ordering per set.
pub mod lru;

/// Bounded buffer of evicted dirty lines.
pub mod write_buffer;

use tracing::{debug, info, trace, warn};

use self::line::{CacheLine, LineStore};
use self::lru::LruTracker;
use self::write_buffer::WriteBuffer;
use crate::common::{AccessType, ConfigError, Geometry};
use crate::config::{CacheConfig, Config, MemoryConfig};
use crate::memory::{AbsentVectorCache, MemoryController, VectorCache, build_controller};
use crate::stats::{CacheReport, CacheStats};

/// Scalar cache with LRU replacement and a write buffer in front of DRAM.
///
/// Each instance is owned by the thread that drives its simulated core. The
/// collaborators are boxed (`Send + Sync`) so the cache can move between threads.
pub struct Cache {
    config: CacheConfig,
    geometry: Geometry,
    lines: LineStore,
    lru: LruTracker,
    write_buffer: WriteBuffer,
    stats: CacheStats,
    vector: Box<dyn VectorCache + Send + Sync>,
    dram: Box<dyn MemoryController + Send + Sync>,
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("name", &self.config.name)
            .field("geometry", &self.geometry)
            .field("write_buffer", &self.write_buffer)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Cache {
    /// Creates a cache with no vector cache and the default fixed-latency DRAM.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration fails validation.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        Self::with_backends(
            config,
            Box::new(AbsentVectorCache),
            build_controller(&MemoryConfig::default()),
        )
    }

    /// Creates a cache whose DRAM model is selected by `config.memory`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the cache configuration fails validation.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::with_backends(
            &config.cache,
            Box::new(AbsentVectorCache),
            build_controller(&config.memory),
        )
    }

    /// Creates a cache wired to the given collaborators.
    ///
    /// # Arguments
    ///
    /// * `config` - Geometry, penalties and write buffer depth.
    /// * `vector` - Vector cache probed after a scalar miss.
    /// * `dram` - Backing store and drain target of the write buffer.
    ///
    /// # Returns
    ///
    /// An empty cache with every line invalid and counters at zero.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration fails validation.
    pub fn with_backends(
        config: &CacheConfig,
        vector: Box<dyn VectorCache + Send + Sync>,
        dram: Box<dyn MemoryController + Send + Sync>,
    ) -> Result<Self, ConfigError> {
        let geometry = config.validate()?;
        let mut cache = Self {
            config: config.clone(),
            geometry,
            lines: LineStore::new(geometry.n_sets, geometry.n_ways),
            lru: LruTracker::new(geometry.n_sets, geometry.n_ways),
            write_buffer: WriteBuffer::new(
                config.wb_capacity,
                config.wb_penalty,
                config.wb_to_dram_penalty,
            ),
            stats: CacheStats::default(),
            vector,
            dram,
        };
        cache.flush();
        info!(
            name = %cache.config.name,
            ways = geometry.n_ways,
            sets = geometry.n_sets,
            row_size = geometry.row_size,
            "cache constructed"
        );
        Ok(cache)
    }

    /// Looks up `address` as a load, returning `(hit, penalty)`.
    pub fn lookup(&mut self, address: u64) -> (bool, u64) {
        self.access(address, AccessType::Read)
    }

    /// Performs one simulated memory reference, returning `(hit, penalty)`.
    ///
    /// A hit costs exactly the scalar cache penalty. A miss accumulates the penalty
    /// of every tier consulted plus any write-buffer drain caused by evicting a
    /// dirty victim. Stores mark the touched line dirty.
    pub fn access(&mut self, address: u64, kind: AccessType) -> (bool, u64) {
        let (tag, set) = self.geometry.decompose(address);
        self.stats.accesses += 1;
        let mut penalty = self.config.sc_penalty;

        let resident = self.lines.probe(set, tag);
        if let Some(way) = resident {
            let line = self.lines.line_mut(set, way);
            if line.valid {
                if kind.is_write() {
                    line.dirty = true;
                }
                self.lru.promote(set, way);
                self.stats.hits += 1;
                self.stats.total_penalty += penalty;
                trace!(address, set, way, penalty, "hit");
                return (true, penalty);
            }
        }

        self.stats.misses += 1;

        let (vc_hit, vc_penalty) = self.vector.lookup(address);
        penalty += vc_penalty;
        if vc_hit {
            self.stats.vc_hits += 1;
            self.stats.total_penalty += penalty;
            trace!(address, set, penalty, "miss, serviced by vector cache");
            return (false, penalty);
        }

        let line_address = self.line_address(tag, set);
        let (restored, wb_penalty) = self.write_buffer.lookup(line_address);
        penalty += wb_penalty;
        if restored {
            self.stats.wb_restores += 1;
            debug!(address = line_address, "line restored from write buffer");
        } else {
            self.stats.dram_fetches += 1;
            penalty += self.dram.access_latency(line_address);
        }

        let way = match resident {
            Some(way) => way,
            None => {
                let victim = self.lru.victimize(set);
                penalty += self.evict(set, victim);
                victim
            }
        };

        *self.lines.line_mut(set, way) = CacheLine {
            valid: true,
            dirty: restored || kind.is_write(),
            tag: Some(tag),
            address: Some(line_address),
        };
        self.lru.promote(set, way);

        self.stats.total_penalty += penalty;
        trace!(address, set, way, penalty, restored, "miss");
        (false, penalty)
    }

    /// Clears the valid bit of the line holding `address`, returning `(was_valid, penalty)`.
    ///
    /// The line keeps its tag. A dirty line is written back through the write
    /// buffer first; the penalty is whatever that insertion cost.
    pub fn invalidate(&mut self, address: u64) -> (bool, u64) {
        let (tag, set) = self.geometry.decompose(address);
        let Some(way) = self.lines.probe(set, tag) else {
            return (false, 0);
        };
        if !self.lines.line(set, way).valid {
            return (false, 0);
        }
        let penalty = self.evict(set, way);
        let line = self.lines.line_mut(set, way);
        line.valid = false;
        line.dirty = false;
        self.stats.total_penalty += penalty;
        debug!(address, set, way, "line invalidated");
        (true, penalty)
    }

    /// Resets every line, the LRU ordering, the write buffer and all counters.
    ///
    /// Configuration is left unchanged.
    pub fn flush(&mut self) {
        self.lines.reset();
        self.lru.reset();
        self.write_buffer.flush();
        self.stats = CacheStats::default();
        info!(name = %self.config.name, "cache flushed");
    }

    /// Renders the end-of-run report.
    pub fn report(&self) -> String {
        CacheReport {
            config: &self.config,
            geometry: &self.geometry,
            stats: &self.stats,
        }
        .to_string()
    }

    /// One-line dump of the derived geometry.
    pub fn configuration_summary(&self) -> String {
        let g = &self.geometry;
        format!(
            "bits_offset={} bits_set={} bits_tag={} row_size(B)={} rows={} ways={} sets={}",
            g.bits_offset,
            g.bits_set,
            g.bits_tag,
            g.row_size,
            g.n_rows(),
            g.n_ways,
            g.n_sets
        )
    }

    /// Name given in the configuration.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Configuration the cache was built from.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Derived geometry.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Counters since construction or the last flush.
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Read-only view of the write buffer.
    pub fn write_buffer(&self) -> &WriteBuffer {
        &self.write_buffer
    }

    /// LRU ordering of `set`, most recently used first.
    pub fn lru_order(&self, set: usize) -> &[usize] {
        self.lru.order(set)
    }

    /// The lines of `set`, indexed by way.
    pub fn set_lines(&self, set: usize) -> &[CacheLine] {
        self.lines.set(set)
    }

    /// Returns `true` if a valid line holds `address`. Does not touch LRU state or counters.
    pub fn contains(&self, address: u64) -> bool {
        self.resident_line(address).is_some()
    }

    /// Returns `true` if a valid, dirty line holds `address`.
    pub fn is_dirty(&self, address: u64) -> bool {
        self.resident_line(address).is_some_and(|line| line.dirty)
    }

    /// Number of valid lines currently held.
    pub fn occupancy(&self) -> usize {
        self.lines.iter().filter(|line| line.valid).count()
    }

    /// Line base rebuilt from `(tag, set)`, as stored in lines and the write buffer.
    ///
    /// Bits above the decomposed address width do not name a different line.
    #[inline]
    fn line_address(&self, tag: u32, set: usize) -> u64 {
        u64::from(self.geometry.line_base(tag, set))
    }

    fn resident_line(&self, address: u64) -> Option<&CacheLine> {
        let (tag, set) = self.geometry.decompose(address);
        let way = self.lines.probe(set, tag)?;
        let line = self.lines.line(set, way);
        line.valid.then_some(line)
    }

    /// Routes a dirty victim into the write buffer and returns the extra penalty.
    fn evict(&mut self, set: usize, way: usize) -> u64 {
        let victim = *self.lines.line(set, way);
        if !victim.needs_writeback() {
            return 0;
        }
        let Some(addr) = victim.address else {
            return 0;
        };

        self.stats.writebacks += 1;
        let admission = self.write_buffer.add(addr, self.dram.as_mut());
        if let Some(drained) = admission.drained {
            self.stats.forced_drains += 1;
            warn!(
                evicted = addr,
                drained,
                penalty = admission.penalty,
                "write buffer full, forced drain to DRAM"
            );
        } else {
            debug!(evicted = addr, set, way, "dirty victim queued in write buffer");
        }
        admission.penalty
    }
}
