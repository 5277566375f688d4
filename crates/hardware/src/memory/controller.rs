//! DRAM controller implementations for latency modeling.
//!
//! This module provides:
//! 1. **SimpleController:** Fixed latency per access (no row-buffer modeling).
//! 2. **DramController:** Row-buffer-aware latency (CAS, RAS, precharge) for DRAM-style timing.
//!
//! Both also accept lines drained from the write buffer. The data itself is not
//! modeled, so a drain only updates bookkeeping.

/// Trait for DRAM models reached from the scalar cache.
///
/// Implementors must be `Send + Sync` so a cache can move to the thread that drives its core.
pub trait MemoryController: Send + Sync {
    /// Returns the number of cycles required to fetch the line at `addr`.
    ///
    /// Always succeeds: DRAM holds every address.
    fn access_latency(&mut self, addr: u64) -> u64;

    /// Accepts one dirty line pushed out of a full write buffer.
    ///
    /// The caller already charged the drain penalty, so this returns nothing.
    fn drain(&mut self, addr: u64);
}

/// Fixed-latency controller; every access takes the same number of cycles.
#[derive(Debug, Clone)]
pub struct SimpleController {
    latency: u64,
    drained: u64,
}

impl SimpleController {
    /// Creates a simple controller with the given fixed latency in cycles.
    ///
    /// # Arguments
    ///
    /// * `latency` - Cycles per access.
    ///
    /// # Returns
    ///
    /// A new `SimpleController` that has accepted no drains.
    pub fn new(latency: u64) -> Self {
        Self {
            latency,
            drained: 0,
        }
    }

    /// Number of lines accepted through [`MemoryController::drain`].
    pub fn drained(&self) -> u64 {
        self.drained
    }
}

impl MemoryController for SimpleController {
    fn access_latency(&mut self, _addr: u64) -> u64 {
        self.latency
    }

    fn drain(&mut self, _addr: u64) {
        self.drained += 1;
    }
}

/// DRAM-style controller with a single open row; models CAS, RAS, and precharge latencies.
#[derive(Debug, Clone)]
pub struct DramController {
    last_row: Option<u64>,
    t_cas: u64,
    t_ras: u64,
    t_pre: u64,
    row_mask: u64,
}

impl DramController {
    /// Creates a DRAM controller with the given timing parameters (in cycles).
    ///
    /// # Arguments
    ///
    /// * `t_cas` - Column access strobe latency.
    /// * `t_ras` - Row access strobe latency.
    /// * `t_pre` - Precharge latency.
    ///
    /// # Returns
    ///
    /// A new `DramController` with 2 KiB rows and no row currently open.
    pub fn new(t_cas: u64, t_ras: u64, t_pre: u64) -> Self {
        Self {
            last_row: None,
            t_cas,
            t_ras,
            t_pre,
            row_mask: !2047,
        }
    }

    /// Opens the row holding `addr` and returns the cycles it cost.
    fn activate(&mut self, addr: u64) -> u64 {
        let row = addr & self.row_mask;
        match self.last_row {
            Some(open_row) if open_row == row => self.t_cas,
            Some(_) => {
                self.last_row = Some(row);
                self.t_pre + self.t_ras + self.t_cas
            }
            None => {
                self.last_row = Some(row);
                self.t_ras + self.t_cas
            }
        }
    }
}

impl MemoryController for DramController {
    fn access_latency(&mut self, addr: u64) -> u64 {
        self.activate(addr)
    }

    // A drained write still opens its row, which changes the cost of the next fetch.
    fn drain(&mut self, addr: u64) {
        let _ = self.activate(addr);
    }
}
