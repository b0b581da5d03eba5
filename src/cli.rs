//! CLI command implementations for Loco.

pub(crate) mod battle;
pub(crate) mod explore;
pub(crate) mod rarity;
pub(crate) mod zone;

mod output;

use std::error::Error;
use std::fmt;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use loco::encounter::ArchetypeCatalog;
use loco::{CatalogError, ConfigError, SimConfig, ZoneKeyError};

/// Output format for single-result commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for aggregated statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum StatsFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<CatalogError> for CliError {
    fn from(e: CatalogError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ZoneKeyError> for CliError {
    fn from(e: ZoneKeyError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}

/// Load the config file if one was given, defaults otherwise.
pub(crate) fn load_config(path: Option<&Path>) -> Result<SimConfig, CliError> {
    Ok(match path {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    })
}

/// Load the catalog file if one was given, the stock catalog otherwise.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<ArchetypeCatalog, CliError> {
    Ok(match path {
        Some(path) => ArchetypeCatalog::load(path)?,
        None => ArchetypeCatalog::default(),
    })
}

/// Use the given seed or derive one from the clock.
pub(crate) fn seed_or_clock(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() ^ u64::from(d.subsec_nanos()))
            .unwrap_or(42)
    })
}

/// Progress bar counting `len` units of work.
pub(crate) fn progress_bar(len: u64, unit: &str) -> Result<ProgressBar, CliError> {
    let style = ProgressStyle::default_bar()
        .template(&format!(
            "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {unit} ({{per_sec}})"
        ))
        .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
        .progress_chars("=>-");
    let pb = ProgressBar::new(len);
    pb.set_style(style);
    Ok(pb)
}
