//! Per-report worksheet settings.
//!
//! Tab names and header-row counts are the only layout facts the collectors
//! take from configuration; everything else is found by label.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sheetnav_data::SheetOptions;

/// First week ending date counted by the tracker
pub fn default_tracking_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 3, 6).unwrap_or(NaiveDate::MIN)
}

/// A worksheet name plus the number of header rows stripped before indexing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabConfig {
    pub name: String,
    #[serde(default)]
    pub header_rows: usize,
}

impl TabConfig {
    pub fn new(name: &str, header_rows: usize) -> Self {
        Self {
            name: name.to_string(),
            header_rows,
        }
    }

    pub fn options(&self) -> SheetOptions {
        SheetOptions::with_header_rows(self.header_rows)
    }
}

/// Validation report settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Raw time and expense export
    pub raw_tab: TabConfig,
    /// Staffing plan with weekly budgeted hours
    pub staffing_tab: TabConfig,
    /// Trailing staffing rows (totals) that are not people
    pub staffing_footer_rows: usize,
    /// Bill tab holding the legal name -> preferred name directory
    pub bill_tab: TabConfig,
    /// Timesheet weeks before this date are ignored
    pub tracking_start: NaiveDate,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            raw_tab: TabConfig::new("TimeAndExpenseDetails", 0),
            staffing_tab: TabConfig::new("Tech", 1),
            staffing_footer_rows: 1,
            bill_tab: TabConfig::new("Bill", 3),
            tracking_start: default_tracking_start(),
        }
    }
}

/// Pricing analysis settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Scenario the proposal is compared against
    pub baseline_tab: TabConfig,
    /// Proposed scenario
    pub proposal_tab: TabConfig,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            baseline_tab: TabConfig::new("Gignow", 1),
            proposal_tab: TabConfig::new("Tech", 1),
        }
    }
}

/// Burn chart settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurnChartConfig {
    pub burn_chart_tab: TabConfig,
    pub bill_tab: TabConfig,
    /// Week offset of the reporting Friday from the current week (-1 = last week)
    pub week: i64,
    /// Cost category rows in each budget/actual block
    pub category_rows: usize,
    pub tracking_start: NaiveDate,
}

impl Default for BurnChartConfig {
    fn default() -> Self {
        Self {
            burn_chart_tab: TabConfig::new("Burn Chart", 0),
            bill_tab: TabConfig::new("Bill", 1),
            week: -1,
            category_rows: 8,
            tracking_start: default_tracking_start(),
        }
    }
}
