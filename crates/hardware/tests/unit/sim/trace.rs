//! Trace Replay Tests.

use std::io::Write;

use crate::common::harness::{DRAM_LATENCY, TestCache};
use rvcache_core::AccessType;
use rvcache_core::sim::trace::{self, ReplaySummary, TraceError, TraceRecord};

const TRACE: &str = "\
# scenario walkthrough
R 0x00
W 0x00
0x08
r 16
R 0x0
";

#[test]
fn reads_trace_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(TRACE.as_bytes()).unwrap();

    let records = trace::read_trace_file(file.path()).unwrap();
    assert_eq!(records.len(), 5);
    assert_eq!(
        records[1],
        TraceRecord {
            kind: AccessType::Write,
            address: 0
        }
    );
    assert_eq!(records[3].address, 16);
}

#[test]
fn missing_trace_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = trace::read_trace_file(dir.path().join("none.trace")).unwrap_err();
    assert!(matches!(err, TraceError::Io(_)));
}

#[test]
fn replay_matches_scenario() {
    let mut t = TestCache::scenario();
    let records = trace::parse(TRACE.as_bytes()).unwrap();

    let mut statuses = Vec::new();
    let summary = trace::replay(&mut t.cache, records, 2, |s| statuses.push(*s));

    let miss = 1 + 2 + DRAM_LATENCY;
    assert_eq!(
        summary,
        ReplaySummary {
            records: 5,
            hits: 1,
            misses: 4,
            penalty: miss + 1 + miss + miss + (1 + 2),
        }
    );
    assert_eq!(statuses.len(), 2);
    assert_eq!(statuses[0].records, 2);
    assert_eq!(statuses[1].records, 4);
    assert_eq!(t.cache.stats().wb_restores, 1);
    assert_eq!(summary.penalty, t.cache.stats().total_penalty);
}

#[test]
fn zero_interval_disables_status() {
    let mut t = TestCache::scenario();
    let records = trace::parse(TRACE.as_bytes()).unwrap();
    let mut calls = 0;
    let _ = trace::replay(&mut t.cache, records, 0, |_| calls += 1);
    assert_eq!(calls, 0);
}

#[test]
fn malformed_line_is_reported_with_its_number() {
    let err = trace::parse("R 0x0\n# ok\nQ 12\n".as_bytes()).unwrap_err();
    assert!(matches!(err, TraceError::Parse { line: 3, .. }));
}
