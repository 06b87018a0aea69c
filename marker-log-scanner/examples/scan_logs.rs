//! Standalone marker log scanner
//!
//! Runs every scan variant with its default markers against a log directory
//! and prints the resulting tables to stdout.
//!
//! Usage:
//!   scan_logs <base_directory> [--variant <intro|pointing|rating|cutting>] [--verbose]
//!
//! Example:
//!   scan_logs ResultEvaluator --variant cutting

use marker_log_scanner::{
    CuttingConfig, CuttingScan, Evaluator, FileResult, IntroConfig, IntroScan, PointingConfig,
    PointingScan, RatingConfig, RatingScan, ScanVariant, TableOptions,
};
use std::env;
use std::io;
use std::path::PathBuf;

struct ScanStats {
    files: usize,
    rows: usize,
    incomplete: usize,
    overflows: usize,
}

impl ScanStats {
    fn print_summary(&self, name: &str) {
        println!("\n=== {} SUMMARY ===", name.to_uppercase());
        println!("Files scanned: {}", self.files);
        println!("Rows written: {}", self.rows);
        println!("Incomplete rows: {}", self.incomplete);
        println!("Overflow rows: {}", self.overflows);
    }
}

fn run(evaluator: &Evaluator, variant: &dyn ScanVariant) -> Result<(), Box<dyn std::error::Error>> {
    let report = evaluator.evaluate(variant)?;

    println!("\n--- {} ---", report.variant);
    report
        .table
        .write_csv(&mut io::stdout().lock(), TableOptions { completeness_column: true })?;

    let rows = report.table.rows();
    ScanStats {
        files: report.files_scanned,
        rows: rows.len(),
        incomplete: rows.iter().filter(|r| r.is_incomplete()).count(),
        overflows: rows.iter().filter(|r| matches!(r, FileResult::SlotOverflow { .. })).count(),
    }
    .print_summary(report.variant);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <base_directory> [--variant <name>] [--verbose]", args[0]);
        eprintln!("\nExample:");
        eprintln!("  {} ResultEvaluator --variant cutting", args[0]);
        std::process::exit(1);
    }

    let base = PathBuf::from(&args[1]);
    let mut only: Option<String> = None;
    let mut verbose = false;

    // Parse arguments
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--variant" => {
                i += 1;
                if i < args.len() {
                    only = Some(args[i].clone());
                }
            }
            "--verbose" | "-v" => verbose = true,
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    env_logger::Builder::new()
        .filter_level(if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Warn })
        .init();

    let evaluator = Evaluator::new(&base);
    let variants: Vec<Box<dyn ScanVariant>> = vec![
        Box::new(IntroScan::new(&IntroConfig::default())?),
        Box::new(PointingScan::new(&PointingConfig::default())?),
        Box::new(RatingScan::new(&RatingConfig::default())?),
        Box::new(CuttingScan::new(&CuttingConfig::default())?),
    ];

    for variant in &variants {
        if only.as_deref().map_or(true, |name| name == variant.name()) {
            run(&evaluator, variant.as_ref())?;
        }
    }

    Ok(())
}
