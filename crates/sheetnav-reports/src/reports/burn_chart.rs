//! Weekly burn chart sheet.

use chrono::NaiveDate;
use sheetnav_data::Workbook;
use sheetnav_grid::CellValue;

use crate::collectors::{open_tab, BurnChartCollector, BurnChartData};
use crate::config::BurnChartConfig;
use crate::error::Result;
use crate::table::{format_cell, TextTable};

pub const REPORT_NAME: &str = "burn chart";

/// Builds the burn chart rows from collected fees, rates and hours
#[derive(Debug, Clone)]
pub struct BurnChart {
    data: BurnChartData,
}

impl BurnChart {
    pub fn new(data: BurnChartData) -> Self {
        Self { data }
    }

    pub fn load(workbook: &Workbook, config: &BurnChartConfig, friday: NaiveDate) -> Result<Self> {
        let burn = open_tab(workbook, &config.burn_chart_tab)?;
        let bill = open_tab(workbook, &config.bill_tab)?;
        let collector =
            BurnChartCollector::new(&config.burn_chart_tab.name, &config.bill_tab.name, friday);
        let data = collector
            .with_tracking_start(config.tracking_start)
            .with_category_rows(config.category_rows)
            .collect(&burn, &bill)?;
        Ok(Self::new(data))
    }

    pub fn data(&self) -> &BurnChartData {
        &self.data
    }

    /// Actual fees with category 2 replaced by billed rate x hours and
    /// category 0 rebalanced so the block still adds up to the last line
    pub fn adjusted_actual(&self) -> Vec<Vec<f64>> {
        self.data
            .actual_fees
            .iter()
            .zip(&self.data.hours)
            .map(|(actual, hours)| {
                let mut column = actual.clone();
                if column.len() < 4 {
                    return column;
                }
                let last = column.len() - 1;
                column[2] = self
                    .data
                    .bill_rates
                    .iter()
                    .zip(hours)
                    .map(|(rate, h)| rate * h)
                    .sum();
                column[0] = column[last] - column[1..last].iter().sum::<f64>();
                column
            })
            .collect()
    }

    /// Header rows, the budget/actual block, a blank row, then the headers
    /// again over the budget/adjusted block
    pub fn rows(&self) -> Vec<Vec<CellValue>> {
        let headers = self.header_rows();
        let mut rows = headers.clone();
        rows.extend(block(&self.data.budget_fees, &self.data.actual_fees));
        rows.push(vec![CellValue::Empty]);
        rows.extend(headers);
        rows.extend(block(&self.data.budget_fees, &self.adjusted_actual()));
        rows
    }

    fn header_rows(&self) -> Vec<Vec<CellValue>> {
        let mut weeks = Vec::new();
        for header in self.data.headers.iter().map(String::as_str).chain(["Cumulative"]) {
            weeks.push(CellValue::from(header));
            weeks.push(CellValue::Empty);
        }
        let kinds = (0..=self.data.headers.len())
            .flat_map(|_| [CellValue::from("Budgeted Fees"), CellValue::from("Actual Fees")])
            .collect();
        vec![weeks, kinds]
    }

    /// The rows as text, for printing
    pub fn to_table(&self) -> TextTable {
        let rows = self.rows();
        let mut iter = rows.iter().map(|row| row.iter().map(format_cell).collect::<Vec<_>>());
        let mut table = TextTable::new(iter.next().unwrap_or_default());
        for row in iter {
            table.push_row(row);
        }
        table
    }
}

/// One row per category: budget and actual side by side for every week,
/// then the cumulative budget and actual
fn block(budget: &[Vec<f64>], actual: &[Vec<f64>]) -> Vec<Vec<CellValue>> {
    let categories = budget.first().map_or(0, Vec::len);
    let cumulative = |columns: &[Vec<f64>], i: usize| -> f64 {
        columns.iter().map(|c| c.get(i).copied().unwrap_or(0.0)).sum()
    };

    (0..categories)
        .map(|i| {
            let mut row = Vec::new();
            for (b, a) in budget.iter().zip(actual) {
                row.push(CellValue::from(b[i]));
                row.push(CellValue::from(a.get(i).copied().unwrap_or(0.0)));
            }
            row.push(CellValue::from(cumulative(budget, i)));
            row.push(CellValue::from(cumulative(actual, i)));
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart() -> BurnChart {
        BurnChart::new(BurnChartData {
            friday: NaiveDate::from_ymd_opt(2020, 3, 13).unwrap(),
            headers: vec![
                "Week 1 (Mar - 06)".to_string(),
                "Week 2 (Mar - 13)".to_string(),
            ],
            budget_fees: vec![vec![1.0, 2.0, 3.0, 10.0], vec![1.0, 2.0, 3.0, 10.0]],
            actual_fees: vec![vec![2.0, 2.0, 2.0, 9.0], vec![1.0, 1.0, 1.0, 5.0]],
            bill_rates: vec![100.0, 50.0],
            hours: vec![vec![0.01, 0.02], vec![0.0, 0.04]],
        })
    }

    #[test]
    fn test_adjusted_actual() {
        let adjusted = chart().adjusted_actual();
        assert_eq!(adjusted.len(), 2);
        // 100 * 0.01 + 50 * 0.02
        assert!((adjusted[0][2] - 2.0).abs() < 1e-9);
        // 9 - (2 + 2)
        assert!((adjusted[0][0] - 5.0).abs() < 1e-9);
        assert!((adjusted[1][2] - 2.0).abs() < 1e-9);
        assert!((adjusted[1][0] - 2.0).abs() < 1e-9);
        assert_eq!(adjusted[1][3], 5.0);
    }

    #[test]
    fn test_rows_layout() {
        let rows = chart().rows();
        // 2 headers + 4 categories + blank + 2 headers + 4 categories
        assert_eq!(rows.len(), 13);
        assert_eq!(rows[0][0], CellValue::from("Week 1 (Mar - 06)"));
        assert_eq!(rows[0][4], CellValue::from("Cumulative"));
        assert_eq!(rows[1].len(), 6);
        assert_eq!(rows[1][1], CellValue::from("Actual Fees"));
        // Last category: budget, actual per week then cumulative
        assert_eq!(
            rows[5],
            vec![
                CellValue::from(10.0),
                CellValue::from(9.0),
                CellValue::from(10.0),
                CellValue::from(5.0),
                CellValue::from(20.0),
                CellValue::from(14.0),
            ]
        );
        assert_eq!(rows[6], vec![CellValue::Empty]);
        assert_eq!(rows[7], rows[0]);
    }

    #[test]
    fn test_text_table() {
        let table = chart().to_table();
        assert_eq!(table.headers()[0], "Week 1 (Mar - 06)");
        assert_eq!(table.len(), 12);
    }
}
