//! Randomized Cache Invariants.
//!
//! Drives the cache with arbitrary loads and stores and checks after every
//! access that the counters, LRU orderings and write buffer stay consistent.

use crate::common::harness::TestCache;
use proptest::prelude::*;
use rvcache_core::AccessType;
use rvcache_core::config::CacheConfig;

fn access_kind() -> impl Strategy<Value = AccessType> {
    prop_oneof![Just(AccessType::Read), Just(AccessType::Write)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn counters_orderings_and_buffer_stay_consistent(
        ways in 1usize..=4,
        ops in prop::collection::vec((0u64..256, access_kind()), 1..400),
    ) {
        let config = CacheConfig {
            wb_capacity: 2,
            ..CacheConfig::new("SC", 1, 2, 5, ways, 4, 4)
        };
        let mut t = TestCache::new(&config);
        let mut penalty_sum = 0;
        let mut last = *t.cache.stats();

        for (addr, kind) in ops {
            let (hit, penalty) = t.cache.access(addr, kind);
            penalty_sum += penalty;
            let stats = *t.cache.stats();

            prop_assert!(stats.misses <= stats.accesses);
            prop_assert_eq!(stats.hits + stats.misses, stats.accesses);
            prop_assert_eq!(stats.accesses, last.accesses + 1);
            prop_assert!(stats.misses >= last.misses);
            prop_assert_eq!(stats.misses - last.misses, u64::from(!hit));
            if hit {
                prop_assert_eq!(penalty, 1);
            } else {
                prop_assert!(penalty >= 1 + 2);
            }
            prop_assert!(t.cache.contains(addr));
            if kind == AccessType::Write {
                prop_assert!(t.cache.is_dirty(addr));
            }

            prop_assert!(t.cache.write_buffer().len() <= t.cache.write_buffer().capacity());
            for set in 0..4 {
                let mut order = t.cache.lru_order(set).to_vec();
                order.sort_unstable();
                prop_assert_eq!(order, (0..ways).collect::<Vec<_>>());
            }
            last = stats;
        }

        prop_assert_eq!(t.cache.stats().total_penalty, penalty_sum);
        prop_assert_eq!(
            t.cache.stats().misses,
            t.cache.stats().vc_hits + t.cache.stats().wb_restores + t.cache.stats().dram_fetches
        );

        t.cache.flush();
        prop_assert_eq!(t.cache.stats().accesses, 0);
        prop_assert_eq!(t.cache.stats().misses, 0);
    }

    /// Re-reading a resident address hits at exactly the scalar penalty.
    #[test]
    fn resident_lookup_costs_sc_penalty_only(addrs in prop::collection::vec(any::<u32>(), 1..64)) {
        let mut t = TestCache::new(&CacheConfig::default());
        for addr in addrs {
            let addr = u64::from(addr);
            let _ = t.cache.lookup(addr);
            let misses = t.cache.stats().misses;
            prop_assert_eq!(t.cache.lookup(addr), (true, 1));
            prop_assert_eq!(t.cache.stats().misses, misses);
        }
    }
}
