//! Evaluation of a scan variant over a set of log files
//!
//! The [`Evaluator`] is the entry point for running a variant: it resolves the
//! variant's file set below a base directory, scans every file strictly in
//! resolution order and collects the rows into a [`ResultTable`].

use crate::resolver::{resolve, FileSet};
use crate::scanner::{scan_file, ScanVariant};
use crate::table::ResultTable;
use crate::types::{FileLabel, Result, ScanError};
use std::path::{Path, PathBuf};

/// What to do when a file cannot be read or scanned
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the whole evaluation on the first failing file
    #[default]
    Abort,
    /// Log the failing file, record it and continue with the next one
    Skip,
}

/// A file that was skipped under [`FailurePolicy::Skip`]
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: ScanError,
}

/// Outcome of evaluating one variant
#[derive(Debug)]
pub struct VariantReport {
    /// Variant name (e.g. "pointing")
    pub variant: &'static str,
    /// Number of files the resolver returned
    pub files_scanned: usize,
    pub table: ResultTable,
    /// Files skipped because of errors (always empty under `Abort`)
    pub failures: Vec<FileFailure>,
}

/// Runs scan variants against a log directory
#[derive(Debug, Clone)]
pub struct Evaluator {
    base_directory: PathBuf,
    policy: FailurePolicy,
}

impl Evaluator {
    /// Create an evaluator for logs below `base_directory`
    pub fn new(base_directory: impl Into<PathBuf>) -> Self {
        Self {
            base_directory: base_directory.into(),
            policy: FailurePolicy::default(),
        }
    }

    /// Builder method: set the per-file failure policy
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Resolve the variant's files and evaluate them
    ///
    /// # Example
    /// ```no_run
    /// use marker_log_scanner::{CuttingConfig, CuttingScan, Evaluator};
    ///
    /// let variant = CuttingScan::new(&CuttingConfig::default()).unwrap();
    /// let report = Evaluator::new("ResultEvaluator").evaluate(&variant).unwrap();
    /// println!("{} rows", report.table.len());
    /// ```
    pub fn evaluate<V: ScanVariant + ?Sized>(&self, variant: &V) -> Result<VariantReport> {
        let files = self.resolve(variant.files())?;
        self.evaluate_files(variant, &files)
    }

    /// Resolve a file set below the base directory
    pub fn resolve(&self, files: &FileSet) -> Result<Vec<PathBuf>> {
        resolve(&self.base_directory, files)
    }

    /// Evaluate an explicit list of files, in the given order
    pub fn evaluate_files<V: ScanVariant + ?Sized>(
        &self,
        variant: &V,
        files: &[PathBuf],
    ) -> Result<VariantReport> {
        log::info!("Evaluating {} file(s) for {}", files.len(), variant.name());

        let mut table = ResultTable::new(variant.header());
        let mut failures = Vec::new();

        for (index, path) in files.iter().enumerate() {
            // File numbering follows resolution order, including skipped files
            let label = FileLabel::new(index + 1, path, variant.label_chars());

            match scan_file(path, label, variant) {
                Ok(rows) => {
                    log::debug!("{:?}: {} row(s)", path, rows.len());
                    for row in rows {
                        table.push(row);
                    }
                }
                Err(e) => {
                    let error = e.in_file(path);
                    match self.policy {
                        FailurePolicy::Abort => return Err(error),
                        FailurePolicy::Skip => {
                            log::warn!("Skipping {:?}: {}", path, error);
                            failures.push(FileFailure {
                                path: path.clone(),
                                error,
                            });
                        }
                    }
                }
            }
        }

        log::info!("{}: {} row(s) from {} file(s)", variant.name(), table.len(), files.len());
        Ok(VariantReport {
            variant: variant.name(),
            files_scanned: files.len(),
            table,
            failures,
        })
    }
}
