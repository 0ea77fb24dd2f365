//! # sheetnav-cli
//!
//! Command-line interface for budget tracker reports.
//!
//! ## Library Usage
//!
//! The CLI logic is exposed as a library so the commands can be driven from
//! tests or other tools:
//!
//! ```rust,ignore
//! use sheetnav_cli::{pricing_command, OutputFormat, Settings};
//!
//! let settings = Settings::load(None)?;
//! pricing_command(&settings, "input/Budget Tracker 1005.xlsx".as_ref(), true, OutputFormat::Text)?;
//! ```
//!
//! ## Binary Usage
//!
//! ```bash
//! sheetnav validate "input/Budget Tracker 1005.xlsx" --compare "input/Budget Tracker 0824.xlsx"
//! sheetnav pricing "input/Budget Tracker 1005.xlsx" --format json
//! sheetnav burn-chart "input/Budget Tracker 1005.xlsx" --week -2
//! sheetnav run --config sheetnav.toml
//! ```

pub mod app;
pub mod settings;

pub use app::{
    burn_chart_command, pricing_command, run_all_command, run_cli, validate_command, OutputFormat,
};
pub use settings::{PathSettings, Settings, DEFAULT_CONFIG};
