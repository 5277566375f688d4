use rvcache_core::memory::VectorCache;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Vector cache that hits on a configurable set of addresses.
#[derive(Clone, Default)]
pub struct MockVectorCache {
    penalty: u64,
    resident: Arc<Mutex<HashSet<u64>>>,
    probes: Arc<Mutex<Vec<u64>>>,
}

impl MockVectorCache {
    pub fn new(penalty: u64) -> Self {
        Self {
            penalty,
            ..Self::default()
        }
    }

    pub fn hold(&self, addr: u64) {
        let _ = self.resident.lock().unwrap().insert(addr);
    }

    pub fn probes(&self) -> Vec<u64> {
        self.probes.lock().unwrap().clone()
    }
}

impl VectorCache for MockVectorCache {
    fn lookup(&mut self, addr: u64) -> (bool, u64) {
        self.probes.lock().unwrap().push(addr);
        (self.resident.lock().unwrap().contains(&addr), self.penalty)
    }
}
