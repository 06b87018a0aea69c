//! Core types for the marker log scanner library
//!
//! This module defines the values that flow through a scan: the lines read from
//! a log file, the per-file results a scan variant produces, and the error type
//! shared by every module.

use std::fmt;
use std::path::PathBuf;

/// Timestamp type used throughout the scanner (seconds since level start)
pub type Timestamp = f64;

/// Result type for scanner operations
pub type Result<T> = std::result::Result<T, ScanError>;

/// A single line read from a log file
///
/// Line numbers start at 1 and are strictly increasing within a file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogLine<'a> {
    /// 1-based line number within the file
    pub number: usize,
    /// Line content without the trailing line terminator
    pub text: &'a str,
}

impl<'a> LogLine<'a> {
    pub fn new(number: usize, text: &'a str) -> Self {
        Self { number, text }
    }

    /// True if the line contains the given marker substring
    pub fn contains(&self, marker: &str) -> bool {
        self.text.contains(marker)
    }
}

/// Whether a scan should keep reading the current file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanFlow {
    /// Read the next line
    Continue,
    /// A terminal marker was seen; stop reading this file
    Stop,
}

/// Errors that can occur while scanning log files
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("No timestamp found on marker line {line_number}")]
    MissingTimestamp { line_number: usize },

    #[error("No distance value found on line {line_number}")]
    MissingDistance { line_number: usize },

    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to scan {path:?}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: Box<ScanError>,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ScanError {
    /// Attach the path of the file being scanned to this error
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        match self {
            // Already attributed to a file
            ScanError::File { .. } => self,
            other => ScanError::File {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }
}

/// Label identifying an input file in the output table
///
/// Rendered as `File <index> <suffix>`, where the suffix is the tail of the
/// file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLabel {
    /// 1-based position of the file in resolution order
    pub index: usize,
    /// Trailing characters of the file path
    pub suffix: String,
}

impl FileLabel {
    /// Build a label keeping only the last `label_chars` characters of the path
    pub fn new(index: usize, path: &std::path::Path, label_chars: usize) -> Self {
        let full = path.to_string_lossy();
        let total = full.chars().count();
        let suffix = full.chars().skip(total.saturating_sub(label_chars)).collect();
        Self { index, suffix }
    }
}

impl fmt::Display for FileLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "File {} {}", self.index, self.suffix)
    }
}

/// The per-file record produced by a scan variant
#[derive(Debug, Clone, PartialEq)]
pub enum FileResult {
    /// One start→end interval of the intro variant
    Intro {
        label: FileLabel,
        /// Line number of the end marker
        line_number: usize,
        solve_time: f64,
        /// True if no start marker preceded the end marker
        incomplete: bool,
    },

    /// Summary of a completed pointing task
    Pointing {
        label: FileLabel,
        /// Elapsed time per target hit, in arrival order (unfilled slots are 0)
        timings: Vec<f64>,
        /// Mean of the distance slots (unfilled slots use the default distance)
        mean_distance: f64,
        /// Number of lines matching the failure pattern
        fails: u32,
        /// True if the task start was never seen or fewer targets were hit
        incomplete: bool,
    },

    /// More target hits than slots; emitted in place of writing past the end
    SlotOverflow {
        label: FileLabel,
        line_number: usize,
    },

    /// Summary of a completed rating task
    Rating {
        label: FileLabel,
        good_time: f64,
        good_fails: i64,
        bad_time: f64,
        bad_fails: i64,
        average_time: f64,
        average_fails: i64,
        /// True if the phases were not all completed in order
        incomplete: bool,
    },

    /// Count of cut events in a cutting log
    Cutting {
        label: FileLabel,
        count: u32,
        /// Timestamp of the last matching line, if it carried one
        last_timestamp: Option<Timestamp>,
        incomplete: bool,
    },
}

impl FileResult {
    /// Label of the file this row summarises
    pub fn label(&self) -> &FileLabel {
        match self {
            FileResult::Intro { label, .. } => label,
            FileResult::Pointing { label, .. } => label,
            FileResult::SlotOverflow { label, .. } => label,
            FileResult::Rating { label, .. } => label,
            FileResult::Cutting { label, .. } => label,
        }
    }

    /// True if the row's numbers were computed from defaulted values
    pub fn is_incomplete(&self) -> bool {
        match self {
            FileResult::Intro { incomplete, .. } => *incomplete,
            FileResult::Pointing { incomplete, .. } => *incomplete,
            FileResult::SlotOverflow { .. } => true,
            FileResult::Rating { incomplete, .. } => *incomplete,
            FileResult::Cutting { incomplete, .. } => *incomplete,
        }
    }

    /// True for the explicit overflow error row
    pub fn is_overflow(&self) -> bool {
        matches!(self, FileResult::SlotOverflow { .. })
    }
}
