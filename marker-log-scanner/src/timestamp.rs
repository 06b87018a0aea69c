//! Timestamp and value extraction from log lines
//!
//! Log lines written by the simulation's action logger look like
//! `[12.5]: Pointed at: Target3 at 0.42`. Only the first bracketed decimal
//! number on a line is treated as its timestamp.

use crate::types::{LogLine, Result, ScanError, Timestamp};
use regex::Regex;
use std::sync::LazyLock;

/// Bracketed decimal number, e.g. `[123.456]`
static TIMESTAMP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([0-9]+\.[0-9]+)\]").unwrap());

/// Any signed decimal or integer number
static NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-+]?[0-9]*\.[0-9]+|[0-9]+").unwrap());

/// Extract the first bracketed timestamp from a line
///
/// Returns `None` if the line has no `[<digits>.<digits>]` group.
pub fn extract_timestamp(line: &str) -> Option<Timestamp> {
    TIMESTAMP_PATTERN
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Extract the timestamp of a marker line, failing if it has none
pub fn require_timestamp(line: &LogLine<'_>) -> Result<Timestamp> {
    extract_timestamp(line.text).ok_or(ScanError::MissingTimestamp {
        line_number: line.number,
    })
}

/// Elapsed time between two timestamps
///
/// Always non-negative; out-of-order timestamps are tolerated, not corrected.
pub fn elapsed(a: Timestamp, b: Timestamp) -> f64 {
    (b - a).abs()
}

/// Last number appearing anywhere on the line
pub fn last_number(line: &str) -> Option<f64> {
    NUMBER_PATTERN
        .find_iter(line)
        .last()
        .and_then(|m| m.as_str().parse().ok())
}
