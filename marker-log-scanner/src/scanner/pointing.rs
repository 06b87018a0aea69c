//! Pointing timing: per-target hit times, hit distances and failed attempts
//!
//! Target hits fill a fixed number of slots in arrival order. Each slot holds
//! the time since the previous hit (or since the task start for the first
//! one) and the distance to the target center, read from the last number on
//! the hit line. A hit beyond the last slot produces an overflow row.

use super::{FileScan, ScanVariant};
use crate::config::PointingConfig;
use crate::resolver::FileSet;
use crate::timestamp::{elapsed, last_number, require_timestamp};
use crate::types::{FileLabel, FileResult, LogLine, Result, ScanError, ScanFlow, Timestamp};
use regex::Regex;

/// Recognises failed pointing attempts
///
/// An attempt is a failure when the text after the prefix does not match the
/// exclusion pattern and still contains a `;` after at least one character.
#[derive(Debug, Clone)]
struct FailureMatcher {
    prefix: String,
    exclude: Regex,
}

impl FailureMatcher {
    fn new(prefix: &str, exclude: &str) -> Result<Self> {
        if prefix.is_empty() {
            return Err(ScanError::InvalidConfig(
                "pointing failure prefix must not be empty".to_string(),
            ));
        }
        Ok(Self {
            prefix: prefix.to_string(),
            exclude: compile(&format!("^(?:{})", exclude))?,
        })
    }

    fn is_failure(&self, text: &str) -> bool {
        text.match_indices(self.prefix.as_str()).any(|(start, _)| {
            let rest = &text[start + self.prefix.len()..];
            let rest = rest.split('\n').next().unwrap_or_default();
            !self.exclude.is_match(rest) && rest.chars().skip(1).any(|c| c == ';')
        })
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| ScanError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

/// Pointing timing variant
#[derive(Debug, Clone)]
pub struct PointingScan {
    config: PointingConfig,
    success: Regex,
    failure: FailureMatcher,
}

impl PointingScan {
    pub fn new(config: &PointingConfig) -> Result<Self> {
        if config.slot_count == 0 {
            return Err(ScanError::InvalidConfig(
                "pointing slot_count must be at least 1".to_string(),
            ));
        }
        if config.start_marker.is_empty() || config.completion_marker.is_empty() {
            return Err(ScanError::InvalidConfig(
                "pointing markers must not be empty".to_string(),
            ));
        }
        Ok(Self {
            config: config.clone(),
            success: compile(&config.success_pattern)?,
            failure: FailureMatcher::new(&config.failure_prefix, &config.failure_exclude)?,
        })
    }

    pub fn config(&self) -> &PointingConfig {
        &self.config
    }
}

impl ScanVariant for PointingScan {
    fn name(&self) -> &'static str {
        "pointing"
    }

    fn header(&self) -> Vec<String> {
        let mut header = vec!["File".to_string()];
        header.extend((1..=self.config.slot_count).map(|n| format!("Target {n}")));
        header.push("Mean_Distance_To_Center".to_string());
        header.push("fails".to_string());
        header
    }

    fn files(&self) -> &FileSet {
        &self.config.files
    }

    fn label_chars(&self) -> usize {
        self.config.label_chars
    }

    fn start_file(&self, label: FileLabel) -> Box<dyn FileScan + '_> {
        Box::new(PointingFile {
            scan: self,
            label,
            reference: None,
            missing_reference: false,
            timings: Vec::with_capacity(self.config.slot_count),
            distances: Vec::with_capacity(self.config.slot_count),
            fails: 0,
            rows: Vec::new(),
        })
    }
}

struct PointingFile<'a> {
    scan: &'a PointingScan,
    label: FileLabel,
    /// Timestamp of the task start or the previous hit
    reference: Option<Timestamp>,
    /// Set once a hit was timed against the zero default
    missing_reference: bool,
    timings: Vec<f64>,
    distances: Vec<f64>,
    fails: u32,
    rows: Vec<FileResult>,
}

impl PointingFile<'_> {
    fn record_hit(&mut self, line: &LogLine<'_>) -> Result<ScanFlow> {
        let slot_count = self.scan.config.slot_count;
        if self.timings.len() >= slot_count {
            log::warn!(
                "{}: more than {} target hits, overflow on line {}",
                self.label,
                slot_count,
                line.number
            );
            self.rows.push(FileResult::SlotOverflow {
                label: self.label.clone(),
                line_number: line.number,
            });
            return Ok(ScanFlow::Continue);
        }

        let hit = require_timestamp(line)?;
        if self.reference.is_none() {
            self.missing_reference = true;
        }
        let timing = elapsed(self.reference.unwrap_or(0.0), hit);
        self.reference = Some(hit);

        let distance = last_number(line.text).ok_or(ScanError::MissingDistance {
            line_number: line.number,
        })?;

        log::debug!(
            "{}: target slot {} hit after {}s at distance {}",
            self.label,
            self.timings.len() + 1,
            timing,
            distance
        );
        self.timings.push(timing);
        self.distances.push(distance);
        Ok(ScanFlow::Continue)
    }

    fn summary(&self) -> FileResult {
        let config = &self.scan.config;
        let missing = config.slot_count - self.timings.len();

        let mut timings = self.timings.clone();
        timings.resize(config.slot_count, 0.0);

        let total: f64 =
            self.distances.iter().sum::<f64>() + config.default_distance * missing as f64;

        FileResult::Pointing {
            label: self.label.clone(),
            timings,
            mean_distance: total / config.slot_count as f64,
            fails: self.fails,
            incomplete: self.missing_reference || missing > 0,
        }
    }
}

impl FileScan for PointingFile<'_> {
    fn on_line(&mut self, line: &LogLine<'_>) -> Result<ScanFlow> {
        let scan = self.scan;

        if line.contains(&scan.config.start_marker) {
            self.reference = Some(require_timestamp(line)?);
        }

        if scan.failure.is_failure(line.text) {
            self.fails += 1;
        }

        if scan.success.is_match(line.text) {
            let overflowed = self.timings.len() >= scan.config.slot_count;
            self.record_hit(line)?;
            // An overflowing hit line is not checked for completion
            if overflowed {
                return Ok(ScanFlow::Continue);
            }
        }

        if line.contains(&scan.config.completion_marker) {
            self.rows.push(self.summary());
            return Ok(ScanFlow::Stop);
        }

        Ok(ScanFlow::Continue)
    }

    fn finish(&mut self) -> Vec<FileResult> {
        std::mem::take(&mut self.rows)
    }
}
