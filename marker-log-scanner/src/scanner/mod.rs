//! Sequential marker scanners
//!
//! A scan variant reads one log file line by line, reacts to marker substrings
//! or patterns and accumulates timers and counters into [`FileResult`] rows.
//! Each variant implements [`ScanVariant`] (immutable, compiled configuration)
//! and hands out a fresh [`FileScan`] (mutable per-file state) for every file.

use crate::resolver::FileSet;
use crate::types::{FileLabel, FileResult, LogLine, Result, ScanFlow};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub mod cutting;
pub mod intro;
pub mod pointing;
pub mod rating;

pub use cutting::CuttingScan;
pub use intro::IntroScan;
pub use pointing::PointingScan;
pub use rating::{RatingPhase, RatingScan};

/// A compiled scan variant
pub trait ScanVariant {
    /// Short name used in logs and summaries (e.g. "intro")
    fn name(&self) -> &'static str;

    /// Fixed header row of this variant's result table
    fn header(&self) -> Vec<String>;

    /// Log files this variant reads
    fn files(&self) -> &FileSet;

    /// Trailing path characters kept in file labels
    fn label_chars(&self) -> usize;

    /// Create the per-file state for a new file
    fn start_file(&self, label: FileLabel) -> Box<dyn FileScan + '_>;
}

/// Per-file scan state
pub trait FileScan {
    /// Process the next line of the file
    fn on_line(&mut self, line: &LogLine<'_>) -> Result<ScanFlow>;

    /// Rows produced for this file, called once after the last line read
    fn finish(&mut self) -> Vec<FileResult>;
}

/// Scan a single file with the given variant
///
/// Lines are fed in order until the file ends or the variant asks to stop.
/// The file is closed when this function returns, on every path.
pub fn scan_file<V: ScanVariant + ?Sized>(
    path: &Path,
    label: FileLabel,
    variant: &V,
) -> Result<Vec<FileResult>> {
    log::debug!("Scanning {:?} as {} ({})", path, label, variant.name());

    let mut reader = BufReader::new(File::open(path)?);
    let mut scan = variant.start_file(label);
    let mut buf = Vec::new();
    let mut number = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        number += 1;

        let text = String::from_utf8_lossy(&buf);
        let text = text.trim_end_matches(|c: char| c == '\n' || c == '\r');
        let flow = scan.on_line(&LogLine::new(number, text))?;
        log::trace!("Processed line {} in {:?}", number, path);

        if flow == ScanFlow::Stop {
            log::debug!("Terminal marker on line {} of {:?}", number, path);
            break;
        }
    }

    Ok(scan.finish())
}

/// Feed in-memory text through a variant, as if it were a file
pub fn scan_text<V: ScanVariant + ?Sized>(
    text: &str,
    label: FileLabel,
    variant: &V,
) -> Result<Vec<FileResult>> {
    let mut scan = variant.start_file(label);
    for (index, line) in text.lines().enumerate() {
        if scan.on_line(&LogLine::new(index + 1, line))? == ScanFlow::Stop {
            break;
        }
    }
    Ok(scan.finish())
}
