//! # sheetnav-reports
//!
//! Budget tracker reports on top of sheetnav label lookups.
//!
//! ## Reports
//!
//! - **Validation**: charged timesheet hours against the staffing plan, with
//!   over-, under- and wrong-code charging per week
//! - **Comparison**: charged hours of this tracker against an older one
//! - **Pricing analysis**: a proposed pricing scenario against its baseline
//! - **Burn chart**: weekly budget and actual fees as a spreadsheet
//!
//! ## Example
//!
//! ```rust,ignore
//! use sheetnav_data::Workbook;
//! use sheetnav_reports::{ReportWriter, ValidationConfig, Validator};
//!
//! let workbook = Workbook::open("input/Budget Tracker 1005.xlsx")?;
//! let validator = Validator::load(&workbook, &ValidationConfig::default())?;
//! let text = validator.render();
//! ReportWriter::new("output").write_text("report", &workbook.tag(), &text)?;
//! ```

pub mod collectors;
pub mod config;
pub mod error;
pub mod output;
pub mod reports;
pub mod table;
pub mod weekly;

// Re-exports
pub use collectors::{
    reporting_friday, BurnChartCollector, BurnChartData, NameDirectory, PricingCollector,
    PricingScenario, StaffingCollector, StaffingPlan, TeamMember, TimesheetCollector,
};
pub use config::{BurnChartConfig, PricingConfig, TabConfig, ValidationConfig};
pub use error::{ReportError, Result};
pub use output::ReportWriter;
pub use reports::{BurnChart, PricingAnalysis, Validator};
pub use table::TextTable;
pub use weekly::{HoursPivot, PivotStyle, WeeklyHours};
