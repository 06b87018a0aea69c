//! Marker Log Scanner Library
//!
//! Scans timestamped simulation log files for marker phrases, measures the time
//! between markers and summarises each file as one row of a result table.
//!
//! # Architecture
//!
//! - [`timestamp`] extracts the `[<seconds>]` prefix and trailing values from lines
//! - [`resolver`] finds the log files of a scan variant
//! - [`scanner`] holds the four scan variants (intro, pointing, rating, cutting)
//!   built on one sequential line-scanning driver
//! - [`evaluator`] runs a variant over its files in resolution order
//! - [`table`] collects rows and writes them as CSV
//!
//! The library does NOT:
//! - Parse command lines or configuration files
//! - Decide where output tables are written
//!
//! Those live in the application layer (marker-log-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use marker_log_scanner::{Evaluator, IntroConfig, IntroScan, TableOptions};
//! use std::fs::File;
//!
//! let variant = IntroScan::new(&IntroConfig::default()).unwrap();
//! let report = Evaluator::new("ResultEvaluator").evaluate(&variant).unwrap();
//!
//! let mut out = File::create("results_with_Introduction.csv").unwrap();
//! report.table.write_csv(&mut out, TableOptions::default()).unwrap();
//! ```

// Public modules
pub mod config;
pub mod evaluator;
pub mod resolver;
pub mod scanner;
pub mod table;
pub mod timestamp;
pub mod types;

// Re-export main types for convenience
pub use config::{CuttingConfig, IntroConfig, PointingConfig, RatingConfig};
pub use evaluator::{Evaluator, FailurePolicy, FileFailure, VariantReport};
pub use resolver::FileSet;
pub use scanner::{
    CuttingScan, FileScan, IntroScan, PointingScan, RatingPhase, RatingScan, ScanVariant,
};
pub use table::{ResultTable, TableOptions};
pub use types::{FileLabel, FileResult, LogLine, Result, ScanError, ScanFlow, Timestamp};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
