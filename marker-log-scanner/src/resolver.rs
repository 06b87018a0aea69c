//! File set resolution
//!
//! Finds the log files a scan variant should process: every file under
//! `<base>/<subdirectory>/` whose name contains a keyword and ends in the log
//! extension.

use crate::types::{Result, ScanError};
use glob::{glob, Pattern};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Selects the files a scan variant reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSet {
    /// Directory below the base directory holding the logs
    pub subdirectory: String,
    /// Substring the file name must contain
    pub keyword: String,
    /// File extension without the leading dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_extension() -> String {
    "log".to_string()
}

impl FileSet {
    pub fn new(subdirectory: impl Into<String>, keyword: impl Into<String>) -> Self {
        Self {
            subdirectory: subdirectory.into(),
            keyword: keyword.into(),
            extension: default_extension(),
        }
    }

    /// Builder method: match a different file extension
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Glob pattern for this file set below `base_directory`
    ///
    /// The base directory, subdirectory, keyword and extension are escaped so
    /// glob metacharacters in them match literally.
    pub fn pattern(&self, base_directory: &Path) -> String {
        let mut dir = base_directory.to_path_buf();
        if !self.subdirectory.is_empty() {
            dir.push(&self.subdirectory);
        }
        let dir = Pattern::escape(&dir.to_string_lossy());
        let separator = if dir.ends_with('/') || dir.ends_with('\\') { "" } else { "/" };
        format!(
            "{}{}*{}*.{}",
            dir,
            separator,
            Pattern::escape(&self.keyword),
            Pattern::escape(&self.extension)
        )
    }
}

/// Resolve a file set to the list of matching log files
///
/// Files come back in the order the directory walk yields them; the result is
/// not re-sorted. No matches is not an error.
pub fn resolve(base_directory: &Path, files: &FileSet) -> Result<Vec<PathBuf>> {
    let pattern = files.pattern(base_directory);
    log::debug!("Resolving log files with pattern: {}", pattern);

    let entries = glob(&pattern).map_err(|e| ScanError::InvalidPattern {
        pattern: pattern.clone(),
        reason: e.to_string(),
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| ScanError::IoError(e.into_error()))?;
        if path.is_file() {
            paths.push(path);
        } else {
            log::trace!("Skipping non-file match: {:?}", path);
        }
    }

    log::info!(
        "Found {} file(s) matching '{}' in {:?}",
        paths.len(),
        files.keyword,
        base_directory.join(&files.subdirectory)
    );
    Ok(paths)
}
