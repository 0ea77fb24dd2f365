//! Collectors: pull domain records out of budget tracker worksheets.
//!
//! Every collector works on a [`Navigator`] and finds its regions by label,
//! so the worksheets may move blocks around as long as the labels stay.

pub mod burn_chart;
pub mod names;
pub mod pricing;
pub mod staffing;
pub mod timesheet;

pub use burn_chart::{reporting_friday, BurnChartCollector, BurnChartData};
pub use names::NameDirectory;
pub use pricing::{PricingCollector, PricingScenario, TeamMember};
pub use staffing::{StaffingCollector, StaffingPlan, StaffingRow};
pub use timesheet::TimesheetCollector;

use sheetnav_data::Workbook;
use sheetnav_grid::{CellValue, Coordinate, Navigator};
use tracing::debug;

use crate::config::TabConfig;
use crate::error::{InTab, ReportError, Result};

/// Read and index one configured tab
pub fn open_tab(workbook: &Workbook, tab: &TabConfig) -> Result<Navigator> {
    let nav = workbook.navigator(&tab.name, &tab.options())?;
    let (rows, cols) = nav.dimensions();
    debug!(tab = %tab.name, rows, cols, "indexed tab");
    Ok(nav)
}

/// Text for a key cell, with a fallback for missing cells
pub(crate) fn key_text(value: &CellValue, fallback: &str) -> String {
    if value.is_missing() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

/// Hours or fees at `coord`. Blank cells count as zero; text, dates and
/// spreadsheet errors abort the report.
pub(crate) fn number_at(nav: &Navigator, coord: Coordinate, tab: &str) -> Result<f64> {
    let value = nav.value_at(coord).in_tab(tab)?;
    if value.is_missing() {
        return Ok(0.0);
    }
    value.as_f64().ok_or_else(|| {
        ReportError::layout(
            tab,
            format!("expected a number at {}, found '{}'", coord.a1(), value),
        )
    })
}
