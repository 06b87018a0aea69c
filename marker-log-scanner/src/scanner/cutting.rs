//! Cutting counter: number of cut events and the time of the last one

use super::{FileScan, ScanVariant};
use crate::config::CuttingConfig;
use crate::resolver::FileSet;
use crate::timestamp::extract_timestamp;
use crate::types::{FileLabel, FileResult, LogLine, Result, ScanError, ScanFlow, Timestamp};

/// Cutting counter variant
#[derive(Debug, Clone)]
pub struct CuttingScan {
    config: CuttingConfig,
}

impl CuttingScan {
    pub fn new(config: &CuttingConfig) -> Result<Self> {
        if config.count_marker.is_empty() {
            return Err(ScanError::InvalidConfig(
                "cutting marker must not be empty".to_string(),
            ));
        }
        Ok(Self {
            config: config.clone(),
        })
    }

    pub fn config(&self) -> &CuttingConfig {
        &self.config
    }
}

impl ScanVariant for CuttingScan {
    fn name(&self) -> &'static str {
        "cutting"
    }

    fn header(&self) -> Vec<String> {
        ["File", "CuttingCount", "SolveTime"]
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
        Box::new(CuttingFile {
            marker: &self.config.count_marker,
            label,
            count: 0,
            last_timestamp: None,
        })
    }
}

struct CuttingFile<'a> {
    marker: &'a str,
    label: FileLabel,
    count: u32,
    last_timestamp: Option<Timestamp>,
}

impl FileScan for CuttingFile<'_> {
    fn on_line(&mut self, line: &LogLine<'_>) -> Result<ScanFlow> {
        if line.contains(self.marker) {
            self.count += 1;
            // The last match wins, even if it has no timestamp
            self.last_timestamp = extract_timestamp(line.text);
            if self.last_timestamp.is_none() {
                log::warn!("{}: cut event without timestamp on line {}", self.label, line.number);
            }
        }
        Ok(ScanFlow::Continue)
    }

    fn finish(&mut self) -> Vec<FileResult> {
        if self.count == 0 {
            log::debug!("{}: no cut events, no row emitted", self.label);
            return Vec::new();
        }
        vec![FileResult::Cutting {
            label: self.label.clone(),
            count: self.count,
            last_timestamp: self.last_timestamp,
            incomplete: self.last_timestamp.is_none(),
        }]
    }
}
