/// Trace parsing and replay tests.
pub mod trace;
