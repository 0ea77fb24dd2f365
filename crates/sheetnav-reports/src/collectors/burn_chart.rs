//! Budget and actual fees for the weekly burn chart.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use sheetnav_grid::{CellValue, Coordinate, Navigator};
use tracing::debug;

use super::number_at;
use crate::error::{InTab, ReportError, Result};

/// The Friday of the current week shifted by `week` weeks, or `None` when
/// the shift leaves the calendar.
pub fn reporting_friday(today: NaiveDate, week: i64) -> Option<NaiveDate> {
    let weekday = i64::from(today.weekday().num_days_from_monday());
    let shift = Duration::try_weeks(week)?.checked_add(&Duration::days(4 - weekday))?;
    today.checked_add_signed(shift)
}

/// Everything the burn chart is built from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BurnChartData {
    pub friday: NaiveDate,
    /// `Week n (Mon - dd)`, oldest first
    pub headers: Vec<String>,
    /// One column of category fees per week
    pub budget_fees: Vec<Vec<f64>>,
    pub actual_fees: Vec<Vec<f64>>,
    /// Bill rate per billed person
    pub bill_rates: Vec<f64>,
    /// Hours per week since tracking start, aligned with `bill_rates`
    pub hours: Vec<Vec<f64>>,
}

/// Reads the `Burn Chart` fee blocks and the `Bill` rates and hours.
#[derive(Debug, Clone)]
pub struct BurnChartCollector {
    burn_chart_tab: String,
    bill_tab: String,
    friday: NaiveDate,
    tracking_start: NaiveDate,
    category_rows: usize,
}

impl BurnChartCollector {
    pub fn new(burn_chart_tab: &str, bill_tab: &str, friday: NaiveDate) -> Self {
        Self {
            burn_chart_tab: burn_chart_tab.to_string(),
            bill_tab: bill_tab.to_string(),
            friday,
            tracking_start: crate::config::default_tracking_start(),
            category_rows: 8,
        }
    }

    pub fn with_tracking_start(mut self, tracking_start: NaiveDate) -> Self {
        self.tracking_start = tracking_start;
        self
    }

    pub fn with_category_rows(mut self, rows: usize) -> Self {
        self.category_rows = rows;
        self
    }

    pub fn collect(&self, burn: &Navigator, bill: &Navigator) -> Result<BurnChartData> {
        // The adjustment rewrites categories 0 and 2 against the last one
        if self.category_rows < 4 {
            return Err(ReportError::layout(
                &self.burn_chart_tab,
                format!("need at least 4 category rows, got {}", self.category_rows),
            ));
        }

        let week = self.week_number(burn)?;
        let budget_fees = self.fees(burn, "Total Budgeted Cost - Extension")?;
        let actual_fees = self.fees(burn, "Total Actual Cost")?;
        let headers = self.headers(week, budget_fees.len());
        let (bill_rates, hours) = self.rates_and_hours(bill)?;

        debug!(
            friday = %self.friday,
            weeks = headers.len(),
            fee_columns = budget_fees.len(),
            billed = bill_rates.len(),
            "collected burn chart"
        );
        Ok(BurnChartData {
            friday: self.friday,
            headers,
            budget_fees,
            actual_fees,
            bill_rates,
            hours,
        })
    }

    /// The fiscal week number: the last two characters of the label under
    /// the Friday date, e.g. `FY20 Wk 07` or `202007`
    fn week_number(&self, burn: &Navigator) -> Result<usize> {
        let tab = self.burn_chart_tab.as_str();
        let label = burn.value_by_offset(self.friday, 0, (1, 0)).in_tab(tab)?;
        let text = match label {
            CellValue::Number(_) | CellValue::Text(_) => label.to_string(),
            _ => String::new(),
        };
        let chars: Vec<char> = text.trim().chars().collect();
        let tail: String = chars[chars.len().saturating_sub(2)..].iter().collect();
        tail.trim()
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                ReportError::layout(tab, format!("cannot read a week number from '{}'", label))
            })
    }

    /// One header per fee column, at most `week` of them, ending on the Friday
    fn headers(&self, week: usize, fee_columns: usize) -> Vec<String> {
        let shown = week.min(fee_columns);
        (0..shown)
            .rev()
            .map(|i| {
                let day = self.friday - Duration::weeks(i as i64);
                format!("Week {} ({} - {})", week - i, day.format("%b"), day.format("%d"))
            })
            .collect()
    }

    /// Category columns from two columns right of `label` through the
    /// Friday column, starting three rows below `label`
    fn fees(&self, burn: &Navigator, label: &str) -> Result<Vec<Vec<f64>>> {
        let tab = self.burn_chart_tab.as_str();
        let anchor = burn.find(label, 0).in_tab(tab)?;
        let last_col = burn.find(self.friday, 0).in_tab(tab)?.col;

        let mut columns = Vec::new();
        for col in anchor.col + 2..=last_col {
            let column = (0..self.category_rows)
                .map(|i| number_at(burn, Coordinate::new(anchor.row + 3 + i, col), tab))
                .collect::<Result<Vec<_>>>()?;
            columns.push(column);
        }
        Ok(columns)
    }

    /// Rates under the second `Bill Rate`, and each rate row's hours for every
    /// week from tracking start through the Friday, negatives clamped to zero
    fn rates_and_hours(&self, bill: &Navigator) -> Result<(Vec<f64>, Vec<Vec<f64>>)> {
        let tab = self.bill_tab.as_str();
        let rates = bill.consecutive_values_below("Bill Rate", 1).in_tab(tab)?;
        let first = rates
            .first()
            .ok_or_else(|| ReportError::layout(tab, "no bill rates under the second 'Bill Rate'"))?;

        let date_row = first
            .coord
            .row
            .checked_sub(2)
            .ok_or_else(|| ReportError::layout(tab, "no date row above the bill rates"))?;
        let friday_col = bill.find_in_row(self.friday, date_row).in_tab(tab)?.col;

        let weeks = (self.friday - self.tracking_start).num_days() / 7;
        let weeks = usize::try_from(weeks).map_err(|_| {
            ReportError::layout(
                tab,
                format!("{} is before tracking start {}", self.friday, self.tracking_start),
            )
        })?;
        let first_col = friday_col.checked_sub(weeks).ok_or_else(|| {
            ReportError::layout(tab, format!("fewer than {} week columns before {}", weeks, self.friday))
        })?;

        let mut hours = Vec::with_capacity(weeks + 1);
        for col in first_col..=friday_col {
            let week = rates
                .iter()
                .map(|rate| {
                    let hours = number_at(bill, Coordinate::new(rate.coord.row, col), tab)?;
                    Ok(hours.max(0.0))
                })
                .collect::<Result<Vec<_>>>()?;
            hours.push(week);
        }

        let rates = rates.iter().map(|r| r.value.number_or_zero()).collect();
        Ok((rates, hours))
    }
}
