//! Intro timing: time from the start marker to each end marker

use super::{FileScan, ScanVariant};
use crate::config::IntroConfig;
use crate::resolver::FileSet;
use crate::timestamp::{elapsed, require_timestamp};
use crate::types::{FileLabel, FileResult, LogLine, Result, ScanError, ScanFlow, Timestamp};

/// Intro timing variant
///
/// Every end marker emits one row with the time since the previous start or
/// end marker, so a file can produce several rows.
#[derive(Debug, Clone)]
pub struct IntroScan {
    config: IntroConfig,
}

impl IntroScan {
    pub fn new(config: &IntroConfig) -> Result<Self> {
        if config.start_marker.is_empty() || config.end_marker.is_empty() {
            return Err(ScanError::InvalidConfig(
                "intro markers must not be empty".to_string(),
            ));
        }
        Ok(Self {
            config: config.clone(),
        })
    }

    pub fn config(&self) -> &IntroConfig {
        &self.config
    }
}

impl ScanVariant for IntroScan {
    fn name(&self) -> &'static str {
        "intro"
    }

    fn header(&self) -> Vec<String> {
        ["File", "Line Number", "SolveTime"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn files(&self) -> &FileSet {
        &self.config.files
    }

    fn label_chars(&self) -> usize {
        self.config.label_chars
    }

    fn start_file(&self, label: FileLabel) -> Box<dyn FileScan + '_> {
        Box::new(IntroFile {
            config: &self.config,
            label,
            reference: None,
            rows: Vec::new(),
        })
    }
}

struct IntroFile<'a> {
    config: &'a IntroConfig,
    label: FileLabel,
    /// Timestamp of the last start or end marker
    reference: Option<Timestamp>,
    rows: Vec<FileResult>,
}

impl FileScan for IntroFile<'_> {
    fn on_line(&mut self, line: &LogLine<'_>) -> Result<ScanFlow> {
        if line.contains(&self.config.start_marker) {
            self.reference = Some(require_timestamp(line)?);
        }

        if line.contains(&self.config.end_marker) {
            let end = require_timestamp(line)?;
            let solve_time = elapsed(self.reference.unwrap_or(0.0), end);
            log::debug!("{}: interval of {}s ending on line {}", self.label, solve_time, line.number);

            self.rows.push(FileResult::Intro {
                label: self.label.clone(),
                line_number: line.number,
                solve_time,
                incomplete: self.reference.is_none(),
            });
            self.reference = Some(end);
        }

        Ok(ScanFlow::Continue)
    }

    fn finish(&mut self) -> Vec<FileResult> {
        std::mem::take(&mut self.rows)
    }
}
