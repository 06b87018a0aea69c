//! Report output
//!
//! Writes each variant's result table to its CSV file and, on request, a JSON
//! summary of the whole run.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use marker_log_scanner::{TableOptions, VariantReport};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Write a variant's table to `path`, replacing any existing file
pub fn write_table(report: &VariantReport, path: &Path, options: TableOptions) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {:?}", path))?;
    let mut out = BufWriter::new(file);

    report
        .table
        .write_csv(&mut out, options)
        .with_context(|| format!("Failed to write output file: {:?}", path))?;

    log::info!("Wrote {} row(s) to {:?}", report.table.len(), path);
    Ok(())
}

/// Machine-readable summary of one run
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub generated_at: DateTime<Utc>,
    pub base_directory: PathBuf,
    pub variants: Vec<VariantSummary>,
}

#[derive(Debug, Serialize)]
pub struct VariantSummary {
    pub name: String,
    pub files_scanned: usize,
    pub rows: usize,
    pub incomplete_rows: usize,
    pub overflow_rows: usize,
    pub output: PathBuf,
    pub failures: Vec<FailureSummary>,
}

#[derive(Debug, Serialize)]
pub struct FailureSummary {
    pub path: PathBuf,
    pub error: String,
}

impl RunSummary {
    pub fn new(base_directory: &Path) -> Self {
        Self {
            generated_at: Utc::now(),
            base_directory: base_directory.to_path_buf(),
            variants: Vec::new(),
        }
    }

    /// Record a finished variant and the file its table went to
    pub fn add(&mut self, report: &VariantReport, output: &Path) {
        let rows = report.table.rows();
        self.variants.push(VariantSummary {
            name: report.variant.to_string(),
            files_scanned: report.files_scanned,
            rows: rows.len(),
            incomplete_rows: rows.iter().filter(|r| r.is_incomplete() && !r.is_overflow()).count(),
            overflow_rows: rows.iter().filter(|r| r.is_overflow()).count(),
            output: output.to_path_buf(),
            failures: report
                .failures
                .iter()
                .map(|f| FailureSummary {
                    path: f.path.clone(),
                    error: f.error.to_string(),
                })
                .collect(),
        });
    }

    /// Write the summary as pretty-printed JSON
    pub fn write(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create summary file: {:?}", path))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .with_context(|| format!("Failed to write summary file: {:?}", path))?;
        log::info!("Run summary written to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marker_log_scanner::{CuttingConfig, CuttingScan, Evaluator, FailurePolicy};
    use std::fs;

    fn cutting_report(dir: &Path) -> VariantReport {
        let sub = dir.join("Cutting");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("CuttingScene_1.log"), "[1.0]: a was cut\n[4.0]: b was cut\n").unwrap();

        let variant = CuttingScan::new(&CuttingConfig::default()).unwrap();
        Evaluator::new(dir)
            .with_failure_policy(FailurePolicy::Skip)
            .evaluate(&variant)
            .unwrap()
    }

    #[test]
    fn test_write_table_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let report = cutting_report(dir.path());
        let out = dir.path().join("results_with_Cutting.csv");
        fs::write(&out, "stale content that is much longer than the new table\n".repeat(10)).unwrap();

        write_table(&report, &out, TableOptions::default()).unwrap();

        let text = fs::read_to_string(&out).unwrap();
        assert!(text.starts_with("File,CuttingCount,SolveTime\r\n"));
        assert!(text.ends_with("CuttingScene_1.log,2,4.0\r\n"));
        assert!(!text.contains("stale"));
    }

    #[test]
    fn test_summary_json() {
        let dir = tempfile::tempdir().unwrap();
        let report = cutting_report(dir.path());

        let mut summary = RunSummary::new(dir.path());
        summary.add(&report, Path::new("results_with_Cutting.csv"));
        let path = dir.path().join("summary.json");
        summary.write(&path).unwrap();

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["variants"][0]["name"], "cutting");
        assert_eq!(value["variants"][0]["rows"], 1);
        assert_eq!(value["variants"][0]["files_scanned"], 1);
        assert!(value["generated_at"].is_string());
    }
}
