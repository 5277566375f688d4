//! Scalar Cache Lookup Tests.
//!
//! Verifies hit/miss accounting, the order in which tiers are consulted,
//! vector cache exclusivity, invalidation and flush.

use crate::common::harness::{DRAM_LATENCY, TestCache, scenario_config};
use rvcache_core::AccessType;
use rvcache_core::config::CacheConfig;

#[test]
fn hit_does_not_consult_other_tiers() {
    let mut t = TestCache::scenario();
    let _ = t.cache.lookup(0x40);
    let _ = t.cache.lookup(0x40);
    let _ = t.cache.lookup(0x41);

    assert_eq!(t.vector.probes(), vec![0x40]);
    assert_eq!(t.dram.fetches(), vec![0x40]);
    assert_eq!(t.cache.stats().hits, 2);
}

#[test]
fn same_line_different_offset_hits() {
    let mut t = TestCache::scenario();
    let _ = t.cache.lookup(0x20);
    assert_eq!(t.cache.lookup(0x23), (true, 1));
}

#[test]
fn write_buffer_is_probed_with_line_address() {
    let mut t = TestCache::scenario();
    let _ = t.cache.access(0x01, AccessType::Write);
    let _ = t.cache.lookup(0x09);
    let _ = t.cache.lookup(0x11);
    assert!(t.cache.write_buffer().contains(0x00));

    // Different byte of the same line still restores it.
    assert_eq!(t.cache.lookup(0x03), (false, 3));
    assert!(t.cache.is_dirty(0x00));
}

#[test]
fn wide_address_restores_the_same_line_from_write_buffer() {
    let mut t = TestCache::scenario();
    let _ = t.cache.access(0x00, AccessType::Write);
    let _ = t.cache.lookup(0x08);
    let _ = t.cache.lookup(0x10);
    assert!(t.cache.write_buffer().contains(0x00));

    let wide = 0x1_0000_0000;
    assert_eq!(
        t.cache.geometry().decompose(wide),
        t.cache.geometry().decompose(0x00)
    );
    assert_eq!(t.cache.lookup(wide), (false, 1 + 2));
    assert!(t.cache.write_buffer().is_empty());
    assert!(t.cache.is_dirty(0x00));
    assert_eq!(t.dram.fetches(), vec![0x00, 0x08, 0x10]);
    assert!(t.cache.set_lines(0).iter().any(|line| line.address == Some(0x00)));
}

#[test]
fn vector_cache_penalty_is_charged_on_hit_and_miss() {
    let mut t = TestCache::with_vector_penalty(&scenario_config(), 7);
    t.vector.hold(0x40);

    assert_eq!(t.cache.lookup(0x40), (false, 1 + 7));
    assert!(!t.cache.contains(0x40));
    assert_eq!(t.cache.lookup(0x80), (false, 1 + 7 + 2 + DRAM_LATENCY));
    assert!(t.cache.contains(0x80));

    // Resident lines never reach the vector cache.
    assert_eq!(t.cache.lookup(0x80), (true, 1));
    assert_eq!(t.vector.probes(), vec![0x40, 0x80]);
    assert_eq!(t.cache.stats().total_penalty, 8 + 110 + 1);
}

#[test]
fn vector_cache_hit_skips_fill() {
    let mut t = TestCache::scenario();
    t.vector.hold(0x40);

    assert_eq!(t.cache.lookup(0x40), (false, 1));
    assert!(!t.cache.contains(0x40));
    assert!(t.dram.fetches().is_empty());
    assert_eq!(t.cache.stats().vc_hits, 1);
    assert_eq!(t.cache.stats().misses, 1);
    assert_eq!(t.cache.occupancy(), 0);
}

#[test]
fn store_miss_installs_dirty() {
    let mut t = TestCache::scenario();
    assert_eq!(
        t.cache.access(0x30, AccessType::Write),
        (false, 1 + 2 + DRAM_LATENCY)
    );
    assert!(t.cache.is_dirty(0x30));
}

#[test]
fn load_miss_installs_clean() {
    let mut t = TestCache::scenario();
    let _ = t.cache.lookup(0x30);
    assert!(t.cache.contains(0x30));
    assert!(!t.cache.is_dirty(0x30));
}

#[test]
fn clean_victim_is_not_written_back() {
    let mut t = TestCache::scenario();
    for addr in [0x00, 0x08, 0x10, 0x18] {
        let _ = t.cache.lookup(addr);
    }
    assert!(t.cache.write_buffer().is_empty());
    assert_eq!(t.cache.stats().writebacks, 0);
}

#[test]
fn lru_victim_is_least_recent() {
    let mut t = TestCache::scenario();
    let _ = t.cache.lookup(0x00);
    let _ = t.cache.lookup(0x08);
    // Touch 0x00 so 0x08 becomes the LRU line.
    let _ = t.cache.lookup(0x00);
    let _ = t.cache.lookup(0x10);

    assert!(t.cache.contains(0x00));
    assert!(!t.cache.contains(0x08));
    assert!(t.cache.contains(0x10));
}

#[test]
fn invalidate_writes_back_and_keeps_tag() {
    let mut t = TestCache::scenario();
    let _ = t.cache.access(0x00, AccessType::Write);
    // Installed in way 1, the LRU way of the identity ordering.
    assert_eq!(t.cache.set_lines(0)[1].tag, Some(0));

    assert_eq!(t.cache.invalidate(0x00), (true, 0));
    assert!(!t.cache.contains(0x00));
    assert!(t.cache.write_buffer().contains(0x00));
    assert_eq!(t.cache.set_lines(0)[1].tag, Some(0));

    // The miss reuses the invalid way holding the tag instead of evicting way 0.
    assert_eq!(t.cache.lookup(0x00), (false, 1 + 2));
    assert!(t.cache.set_lines(0)[1].valid);
    assert_eq!(t.cache.set_lines(0)[0].tag, None);
    assert!(t.cache.is_dirty(0x00));
}

#[test]
fn invalidate_absent_line_is_a_noop() {
    let mut t = TestCache::scenario();
    assert_eq!(t.cache.invalidate(0x80), (false, 0));
    let _ = t.cache.lookup(0x80);
    assert_eq!(t.cache.invalidate(0x80), (true, 0));
    assert_eq!(t.cache.invalidate(0x80), (false, 0));
    assert!(t.cache.write_buffer().is_empty());
}

#[test]
fn flush_resets_state_but_not_configuration() {
    let mut t = TestCache::scenario();
    for addr in [0x00, 0x04, 0x08, 0x10] {
        let _ = t.cache.access(addr, AccessType::Write);
    }
    assert!(!t.cache.write_buffer().is_empty());

    t.cache.flush();

    assert_eq!(t.cache.stats().accesses, 0);
    assert_eq!(t.cache.stats().misses, 0);
    assert_eq!(t.cache.occupancy(), 0);
    assert!(t.cache.write_buffer().is_empty());
    assert_eq!(t.cache.lru_order(0), &[0, 1]);
    assert_eq!(t.cache.lru_order(1), &[0, 1]);
    assert!(t.cache.set_lines(0).iter().all(|l| l.tag.is_none() && l.address.is_none()));
    assert_eq!(t.cache.config(), &scenario_config());
}

#[test]
fn configuration_summary_lists_geometry() {
    let t = TestCache::scenario();
    assert_eq!(
        t.cache.configuration_summary(),
        "bits_offset=2 bits_set=1 bits_tag=29 row_size(B)=4 rows=4 ways=2 sets=2"
    );
    assert_eq!(t.cache.name(), "SC");
}

#[test]
fn direct_mapped_cache_conflicts() {
    let mut t = TestCache::new(&CacheConfig::new("DM", 1, 2, 5, 1, 4, 16));
    let _ = t.cache.lookup(0x000);
    let _ = t.cache.lookup(0x040);
    assert!(!t.cache.contains(0x000));
    assert_eq!(t.cache.lookup(0x040), (true, 1));
}
