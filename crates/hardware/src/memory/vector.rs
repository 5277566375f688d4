//! Vector cache interface.
//!
//! The vector cache is a sibling of the scalar cache. A line lives in at most one
//! of the two, so a vector hit services the access without a scalar fill.

/// A cache probed after a scalar cache miss.
pub trait VectorCache: Send + Sync {
    /// Looks up `addr`, returning `(hit, penalty)`.
    fn lookup(&mut self, addr: u64) -> (bool, u64);
}

/// Stand-in for a vector unit that is not modeled; always misses at no cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbsentVectorCache;

impl VectorCache for AbsentVectorCache {
    fn lookup(&mut self, _addr: u64) -> (bool, u64) {
        (false, 0)
    }
}
