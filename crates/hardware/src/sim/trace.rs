//! Memory Reference Trace Replay.
//!
//! This module replays a recorded stream of loads and stores through a [`Cache`]. It performs:
//! 1. **Parsing:** One reference per line, `R <addr>`, `W <addr>`, or a bare `<addr>` (a load).
//! 2. **Replay:** Drives `Cache::access` in order and totals hits, misses and penalty.
//! 3. **Progress:** Invokes a status callback every N references.
//!
//! Addresses are hexadecimal with a `0x` prefix or decimal. Blank lines and lines
//! starting with `#` are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::cache::Cache;
use crate::common::AccessType;

/// Errors raised while reading a trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace could not be read.
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),

    /// A line is not a valid reference.
    #[error("trace line {line}: {reason}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },
}

/// One recorded memory reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// Load or store.
    pub kind: AccessType,
    /// Referenced address.
    pub address: u64,
}

/// Totals of a replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// References replayed.
    pub records: u64,
    /// References that hit.
    pub hits: u64,
    /// References that missed.
    pub misses: u64,
    /// Penalty cycles accumulated.
    pub penalty: u64,
}

fn parse_address(token: &str) -> Result<u64, String> {
    let parsed = match token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => token.parse::<u64>(),
    };
    parsed.map_err(|e| format!("bad address '{token}': {e}"))
}

/// Parses one trace line; `Ok(None)` for blank and comment lines.
///
/// # Errors
///
/// Returns a description of the problem if the line is not a reference.
pub fn parse_line(text: &str) -> Result<Option<TraceRecord>, String> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }

    let mut fields = text.split_whitespace();
    let (Some(first), second, None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(format!("expected '[R|W] <address>', got '{text}'"));
    };

    let record = match second {
        None => TraceRecord {
            kind: AccessType::Read,
            address: parse_address(first)?,
        },
        Some(addr) => {
            let kind = match first {
                "R" | "r" => AccessType::Read,
                "W" | "w" => AccessType::Write,
                other => return Err(format!("unknown access kind '{other}'")),
            };
            TraceRecord {
                kind,
                address: parse_address(addr)?,
            }
        }
    };
    Ok(Some(record))
}

/// Parses a whole trace.
///
/// # Errors
///
/// Returns [`TraceError::Io`] on a read failure and [`TraceError::Parse`] on the
/// first malformed line.
pub fn parse<R: BufRead>(reader: R) -> Result<Vec<TraceRecord>, TraceError> {
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        match parse_line(&line) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(reason) => {
                return Err(TraceError::Parse {
                    line: idx + 1,
                    reason,
                });
            }
        }
    }
    Ok(records)
}

/// Opens and parses a trace file.
///
/// # Errors
///
/// See [`parse`].
pub fn read_trace_file(path: impl AsRef<Path>) -> Result<Vec<TraceRecord>, TraceError> {
    let file = File::open(path)?;
    parse(BufReader::new(file))
}

/// Replays `records` through `cache`.
///
/// `on_status` is called with the running totals after every `report_every`
/// references; `report_every == 0` disables it.
pub fn replay<I, F>(
    cache: &mut Cache,
    records: I,
    report_every: u64,
    mut on_status: F,
) -> ReplaySummary
where
    I: IntoIterator<Item = TraceRecord>,
    F: FnMut(&ReplaySummary),
{
    let mut summary = ReplaySummary::default();
    for record in records {
        let (hit, penalty) = cache.access(record.address, record.kind);
        summary.records += 1;
        if hit {
            summary.hits += 1;
        } else {
            summary.misses += 1;
        }
        summary.penalty += penalty;

        if report_every != 0 && summary.records % report_every == 0 {
            on_status(&summary);
        }
    }
    summary
}
