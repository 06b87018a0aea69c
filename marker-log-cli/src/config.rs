//! Configuration loading and parsing

use anyhow::{Context, Result};
use marker_log_scanner::{CuttingConfig, IntroConfig, PointingConfig, RatingConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from config.toml)
///
/// Every section is optional; a missing section means the defaults of the
/// standard test scenes.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub run: RunConfig,
    pub intro: Toggle<IntroConfig>,
    pub pointing: Toggle<PointingConfig>,
    pub rating: Toggle<RatingConfig>,
    pub cutting: Toggle<CuttingConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    /// Directory holding the per-scene log subdirectories
    pub base_directory: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            base_directory: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the CSV tables are written to
    pub directory: PathBuf,
    /// Append a `Complete` column to every table
    pub completeness_column: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            completeness_column: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RunConfig {
    /// Skip unreadable files instead of aborting
    pub keep_going: bool,
}

/// A variant section with an `enabled` switch next to its own settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Toggle<T> {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(flatten)]
    pub settings: T,
}

impl<T: Default> Default for Toggle<T> {
    fn default() -> Self {
        Self {
            enabled: true,
            settings: T::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}
