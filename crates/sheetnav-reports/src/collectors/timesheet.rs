//! Charged hours from the raw time and expense export.

use chrono::NaiveDate;
use sheetnav_grid::{Coordinate, Navigator};
use tracing::debug;

use super::{key_text, number_at, NameDirectory};
use crate::error::{InTab, Result};
use crate::weekly::WeeklyHours;

/// Sums charged hours per (week, person, activity code).
#[derive(Debug, Clone)]
pub struct TimesheetCollector {
    tab: String,
    tracking_start: NaiveDate,
}

impl TimesheetCollector {
    pub fn new(tab: &str, tracking_start: NaiveDate) -> Self {
        Self {
            tab: tab.to_string(),
            tracking_start,
        }
    }

    /// Rows are those with a date under `Week Ending Date`; employees are
    /// reported under their preferred name.
    pub fn collect(&self, nav: &Navigator, names: &NameDirectory) -> Result<WeeklyHours> {
        let tab = self.tab.as_str();
        let mut hours = WeeklyHours::new();
        let charged_col = nav.find("Charged Hours", 0).in_tab(tab)?.col;

        for cell in nav.values_below("Week Ending Date", 0).in_tab(tab)? {
            let Some(week) = cell.value.as_date() else {
                continue;
            };
            if week < self.tracking_start {
                continue;
            }
            let legal = key_text(nav.value_in_row(cell.coord, "Employee Name", 0).in_tab(tab)?, "");
            let code = key_text(
                nav.value_in_row(cell.coord, "Activity Code Description", 0)
                    .in_tab(tab)?,
                "",
            );
            let charged = number_at(nav, Coordinate::new(cell.coord.row, charged_col), tab)?;
            hours.add(week, names.preferred(&legal), &code, charged);
        }

        hours.drop_zero();
        debug!(tab, weeks = hours.len(), "collected timesheet");
        Ok(hours)
    }
}
