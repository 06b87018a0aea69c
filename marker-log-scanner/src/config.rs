//! Scan variant configuration types
//!
//! Every marker string, file selector and output name used by a scan variant
//! lives here. The defaults reproduce the markers written by the simulation's
//! test scenes, so an empty configuration file evaluates the standard
//! introduction, pointing, rating and cutting logs.

use crate::resolver::FileSet;
use serde::{Deserialize, Serialize};

/// Configuration for the intro timing variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroConfig {
    /// Log files to scan
    pub files: FileSet,
    /// Trailing path characters kept in the file label
    pub label_chars: usize,
    /// Marker that (re)starts the interval
    pub start_marker: String,
    /// Marker that ends the interval and emits a row
    pub end_marker: String,
    /// Output file name
    pub output: String,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            files: FileSet::new("IntroductionTest", "Introduction"),
            label_chars: 41,
            start_marker: "Button pressed successfully".to_string(),
            end_marker: "Tutorial Completed".to_string(),
            output: "results_with_Introduction.csv".to_string(),
        }
    }
}

impl IntroConfig {
    /// Builder method: set the start and end markers
    pub fn with_markers(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_marker = start.into();
        self.end_marker = end.into();
        self
    }

    /// Builder method: select the log files
    pub fn with_files(mut self, files: FileSet) -> Self {
        self.files = files;
        self
    }
}

/// Configuration for the pointing timing variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointingConfig {
    pub files: FileSet,
    pub label_chars: usize,
    /// Marker that sets the reference timestamp for the first hit
    pub start_marker: String,
    /// Regex matching a successful target hit
    pub success_pattern: String,
    /// Literal prefix of a pointing attempt
    pub failure_prefix: String,
    /// Regex, anchored at the end of `failure_prefix`, that marks an attempt as
    /// a hit rather than a failure
    pub failure_exclude: String,
    /// Marker that completes the task and emits the row
    pub completion_marker: String,
    /// Number of target slots
    pub slot_count: usize,
    /// Distance assumed for targets that were never hit
    pub default_distance: f64,
    pub output: String,
}

impl Default for PointingConfig {
    fn default() -> Self {
        Self {
            files: FileSet::new("PointingRatingSceneTest", "Pointing_Rating"),
            label_chars: 45,
            start_marker: "Spawn pointing targets".to_string(),
            success_pattern: r"Pointed at: Target[1-6]?".to_string(),
            failure_prefix: "Pointed at: ".to_string(),
            failure_exclude: r"\s*Target[1-6]?\s*;".to_string(),
            completion_marker: "All Targets Successfully hit".to_string(),
            slot_count: 6,
            default_distance: 100.0,
            output: "results_with_Pointing.csv".to_string(),
        }
    }
}

impl PointingConfig {
    /// Builder method: set the number of target slots
    pub fn with_slot_count(mut self, slot_count: usize) -> Self {
        self.slot_count = slot_count;
        self
    }

    /// Builder method: select the log files
    pub fn with_files(mut self, files: FileSet) -> Self {
        self.files = files;
        self
    }
}

/// Configuration for the rating timing variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    pub files: FileSet,
    pub label_chars: usize,
    /// Idle → Good
    pub start_marker: String,
    /// Good → Bad
    pub good_done_marker: String,
    /// Bad → Average
    pub bad_done_marker: String,
    /// Average → Done
    pub average_done_marker: String,
    /// Marker that emits the row and stops the scan
    pub final_marker: String,
    /// Lines containing any of these are counted in the active phase
    pub count_markers: Vec<String>,
    pub output: String,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            files: FileSet::new("PointingRatingSceneTest", "Pointing_Rating"),
            label_chars: 45,
            start_marker: "Rating Task Started".to_string(),
            good_done_marker: "Completed Good rating".to_string(),
            bad_done_marker: "Completed bad rating".to_string(),
            average_done_marker: "Completed average rating".to_string(),
            final_marker: "[Task]Completed average rating".to_string(),
            count_markers: vec!["[Rating]".to_string(), "[Pointing]".to_string()],
            output: "results_with_Rate.csv".to_string(),
        }
    }
}

impl RatingConfig {
    /// Builder method: select the log files
    pub fn with_files(mut self, files: FileSet) -> Self {
        self.files = files;
        self
    }
}

/// Configuration for the cutting counter variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CuttingConfig {
    pub files: FileSet,
    pub label_chars: usize,
    /// Lines containing this marker are counted
    pub count_marker: String,
    pub output: String,
}

impl Default for CuttingConfig {
    fn default() -> Self {
        Self {
            files: FileSet::new("Cutting", "CuttingScene"),
            label_chars: 40,
            count_marker: "was cut".to_string(),
            output: "results_with_Cutting.csv".to_string(),
        }
    }
}

impl CuttingConfig {
    /// Builder method: set the counted marker
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.count_marker = marker.into();
        self
    }

    /// Builder method: select the log files
    pub fn with_files(mut self, files: FileSet) -> Self {
        self.files = files;
        self
    }
}
