//! Settings file for the `sheetnav` binary.
//!
//! Every section falls back to its defaults, so a settings file only needs
//! the keys that differ from the standard tracker layout.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sheetnav_reports::{BurnChartConfig, PricingConfig, ReportWriter, ValidationConfig};

/// Settings file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG: &str = "sheetnav.toml";

/// Top-level settings structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Input and output locations
    pub paths: PathSettings,
    /// Validation report tabs
    pub validation: ValidationConfig,
    /// Pricing analysis tabs
    pub pricing: PricingConfig,
    /// Burn chart tabs and reporting week
    pub burn_chart: BurnChartConfig,
}

/// Where workbooks are read from and reports are written to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Current tracker, relative to `input_dir`
    pub this_week: Option<String>,
    /// Previous tracker used for the comparison report
    pub last_week: Option<String>,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
            this_week: None,
            last_week: None,
        }
    }
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load settings from `path`, or from `sheetnav.toml` when it exists,
    /// or fall back to the defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                Self::read(path)
            }
            None => {
                let candidate = Path::new(DEFAULT_CONFIG);
                if candidate.exists() {
                    Self::read(candidate)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    pub fn this_week(&self) -> Option<PathBuf> {
        self.paths
            .this_week
            .as_ref()
            .map(|name| self.paths.input_dir.join(name))
    }

    pub fn last_week(&self) -> Option<PathBuf> {
        self.paths
            .last_week
            .as_ref()
            .map(|name| self.paths.input_dir.join(name))
    }

    pub fn writer(&self) -> ReportWriter {
        ReportWriter::new(&self.paths.output_dir)
    }
}
