//! Budgeted hours from the staffing plan.

use chrono::NaiveDate;
use serde::Serialize;
use sheetnav_grid::{Coordinate, Navigator};
use tracing::debug;

use super::{key_text, number_at};
use crate::error::{InTab, ReportError, Result};
use crate::weekly::{HoursPivot, WeekKey, WeeklyHours};

/// Placeholder for staffing rows without a name or code
pub const NO_NAME: &str = "No Name";

/// One staffing line: a person on an activity code
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaffingRow {
    pub name: String,
    pub activity_code: String,
    /// Hours per week column, aligned with [`StaffingPlan::weeks`]
    pub hours: Vec<f64>,
}

/// The staffing plan as read from the sheet
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StaffingPlan {
    /// Week columns in sheet order
    pub weeks: Vec<WeekKey>,
    pub rows: Vec<StaffingRow>,
    /// Non-zero hours by week, person and code
    pub hours: WeeklyHours,
}

impl StaffingPlan {
    /// Budget hours by code over the first `n_weeks` week columns.
    ///
    /// Codes whose hours are all zero still get a row.
    pub fn budget_pivot(&self, n_weeks: usize) -> HoursPivot {
        let n = n_weeks.min(self.weeks.len());
        let mut pivot = HoursPivot::new(self.weeks[..n].iter().copied());
        for row in &self.rows {
            for (week, hours) in self.weeks[..n].iter().zip(&row.hours) {
                pivot.add(&row.activity_code, *week, *hours);
            }
        }
        pivot
    }
}

/// Reads the staffing block anchored at `Name`.
///
/// Week columns are the date cells on the row above the anchor. Rows run
/// to the last non-missing `Name` or `Activity Code`; the configured number
/// of footer rows (the totals) is dropped.
#[derive(Debug, Clone)]
pub struct StaffingCollector {
    tab: String,
    footer_rows: usize,
}

impl StaffingCollector {
    pub fn new(tab: &str, footer_rows: usize) -> Self {
        Self {
            tab: tab.to_string(),
            footer_rows,
        }
    }

    pub fn collect(&self, nav: &Navigator) -> Result<StaffingPlan> {
        let tab = self.tab.as_str();
        let anchor = nav.find("Name", 0).in_tab(tab)?;
        let code_col = nav.find("Activity Code", 0).in_tab(tab)?.col;

        let header_row = anchor
            .row
            .checked_sub(1)
            .ok_or_else(|| ReportError::layout(tab, "no week header row above 'Name'"))?;
        let week_cols: Vec<(usize, NaiveDate)> = nav
            .index()
            .row_cells(header_row)
            .in_tab(tab)?
            .filter_map(|(coord, value)| value.as_date().map(|d| (coord.col, d)))
            .collect();
        if week_cols.is_empty() {
            return Err(ReportError::layout(tab, "no week dates above 'Name'"));
        }

        let last_name = nav.values_below("Name", 0).in_tab(tab)?.last().map(|c| c.coord.row);
        let last_code = nav
            .values_below("Activity Code", 0)
            .in_tab(tab)?
            .last()
            .map(|c| c.coord.row);
        let last_row = last_name.max(last_code).unwrap_or(anchor.row);

        let mut lines = Vec::new();
        for row in anchor.row + 1..=last_row {
            let name = nav.value_at(Coordinate::new(row, anchor.col)).in_tab(tab)?;
            let code = nav.value_at(Coordinate::new(row, code_col)).in_tab(tab)?;
            if name.is_missing() && code.is_missing() {
                continue;
            }
            lines.push((row, key_text(name, NO_NAME), key_text(code, NO_NAME)));
        }
        lines.truncate(lines.len().saturating_sub(self.footer_rows));

        let mut plan = StaffingPlan {
            weeks: week_cols.iter().map(|(_, d)| *d).collect(),
            ..Default::default()
        };
        for (row, name, activity_code) in lines {
            let mut hours = Vec::with_capacity(week_cols.len());
            for (col, week) in &week_cols {
                let h = number_at(nav, Coordinate::new(row, *col), tab)?;
                if h != 0.0 {
                    plan.hours.add(*week, &name, &activity_code, h);
                }
                hours.push(h);
            }
            plan.rows.push(StaffingRow {
                name,
                activity_code,
                hours,
            });
        }

        debug!(
            tab,
            rows = plan.rows.len(),
            weeks = plan.weeks.len(),
            "collected staffing plan"
        );
        Ok(plan)
    }
}
