//! Marker Log Timing CLI Application
//!
//! This is the command-line interface for the marker log scanner.
//! It uses the marker-log-scanner library and adds:
//! - TOML configuration of markers, file sets and outputs
//! - Variant selection and failure policy from the command line
//! - CSV table files per variant
//! - Optional JSON run summary

use anyhow::Result;
use clap::{Parser, ValueEnum};
use marker_log_scanner::{
    CuttingScan, Evaluator, FailurePolicy, IntroScan, PointingScan, RatingScan, ScanVariant,
    TableOptions,
};
use std::path::PathBuf;

mod config;
mod report;

use config::AppConfig;
use report::RunSummary;

/// Marker Log Timing - Evaluate timestamped simulation logs
#[derive(Parser, Debug)]
#[command(name = "marker-log-cli")]
#[command(about = "Measure marker timings in simulation logs and write CSV tables", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding the log subdirectories (overrides the config)
    #[arg(short, long, value_name = "DIR")]
    base_dir: Option<PathBuf>,

    /// Directory for the CSV tables (overrides the config)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Scan variant to run (can be repeated; default: all enabled)
    #[arg(long, value_enum)]
    variant: Vec<VariantKind>,

    /// Skip unreadable or malformed files instead of aborting
    #[arg(long)]
    keep_going: bool,

    /// Append a Complete column to every table
    #[arg(long)]
    completeness: bool,

    /// Write a JSON run summary to this file
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum VariantKind {
    Intro,
    Pointing,
    Rating,
    Cutting,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Marker Log Timing CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using scanner library v{}", marker_log_scanner::VERSION);

    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };
    apply_overrides(&mut config, &args);

    run(&config, &args.variant, args.summary.as_deref())
}

/// Command-line flags win over the configuration file
fn apply_overrides(config: &mut AppConfig, args: &Args) {
    if let Some(base) = &args.base_dir {
        config.input.base_directory = base.clone();
    }
    if let Some(dir) = &args.output_dir {
        config.output.directory = dir.clone();
    }
    if args.keep_going {
        config.run.keep_going = true;
    }
    if args.completeness {
        config.output.completeness_column = true;
    }
}

/// A compiled variant together with its output file name
struct Job {
    variant: Box<dyn ScanVariant>,
    output: String,
}

/// Compile the variants selected on the command line (or enabled in the config)
fn select_jobs(config: &AppConfig, selected: &[VariantKind]) -> Result<Vec<Job>> {
    let wanted = |kind: VariantKind, enabled: bool| {
        if selected.is_empty() {
            enabled
        } else {
            selected.contains(&kind)
        }
    };

    let mut jobs = Vec::new();
    if wanted(VariantKind::Intro, config.intro.enabled) {
        let settings = &config.intro.settings;
        jobs.push(Job {
            variant: Box::new(IntroScan::new(settings)?),
            output: settings.output.clone(),
        });
    }
    if wanted(VariantKind::Pointing, config.pointing.enabled) {
        let settings = &config.pointing.settings;
        jobs.push(Job {
            variant: Box::new(PointingScan::new(settings)?),
            output: settings.output.clone(),
        });
    }
    if wanted(VariantKind::Rating, config.rating.enabled) {
        let settings = &config.rating.settings;
        jobs.push(Job {
            variant: Box::new(RatingScan::new(settings)?),
            output: settings.output.clone(),
        });
    }
    if wanted(VariantKind::Cutting, config.cutting.enabled) {
        let settings = &config.cutting.settings;
        jobs.push(Job {
            variant: Box::new(CuttingScan::new(settings)?),
            output: settings.output.clone(),
        });
    }
    Ok(jobs)
}

/// Evaluate every selected variant and write its table
fn run(config: &AppConfig, selected: &[VariantKind], summary_path: Option<&std::path::Path>) -> Result<()> {
    let jobs = select_jobs(config, selected)?;
    if jobs.is_empty() {
        log::warn!("No scan variants enabled, nothing to do");
        return Ok(());
    }

    let policy = if config.run.keep_going {
        FailurePolicy::Skip
    } else {
        FailurePolicy::Abort
    };
    let evaluator = Evaluator::new(&config.input.base_directory).with_failure_policy(policy);
    let options = TableOptions {
        completeness_column: config.output.completeness_column,
    };
    let mut summary = RunSummary::new(evaluator.base_directory());

    for job in &jobs {
        let report = evaluator.evaluate(job.variant.as_ref())?;
        let output = config.output.directory.join(&job.output);
        report::write_table(&report, &output, options)?;

        for failure in &report.failures {
            log::error!("{}: skipped {:?}: {}", report.variant, failure.path, failure.error);
        }
        summary.add(&report, &output);
    }

    if let Some(path) = summary_path {
        summary.write(path)?;
    }

    log::info!("Files processed. Results saved in {:?}", config.output.directory);
    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
