//! Weekly hour summaries.
//!
//! `WeekKey -> PersonName -> ActivityCode -> Hours`, held in `BTreeMap`s so
//! every walk over weeks, people and codes is sorted.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::table::{format_number, TextTable};

/// Week ending date
pub type WeekKey = NaiveDate;
pub type PersonName = String;
pub type ActivityCode = String;

/// Hours per activity code for one person
pub type CodeHours = BTreeMap<ActivityCode, f64>;
/// Hours per person for one week
pub type PersonHours = BTreeMap<PersonName, CodeHours>;

/// Hours by week, person and activity code
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeeklyHours {
    weeks: BTreeMap<WeekKey, PersonHours>,
}

impl WeeklyHours {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate hours for (week, person, code)
    pub fn add(&mut self, week: WeekKey, person: &str, code: &str, hours: f64) {
        *self
            .weeks
            .entry(week)
            .or_default()
            .entry(person.to_string())
            .or_default()
            .entry(code.to_string())
            .or_default() += hours;
    }

    /// Remove zero entries and any person or week left empty
    pub fn drop_zero(&mut self) {
        for people in self.weeks.values_mut() {
            for codes in people.values_mut() {
                codes.retain(|_, hours| *hours != 0.0);
            }
            people.retain(|_, codes| !codes.is_empty());
        }
        self.weeks.retain(|_, people| !people.is_empty());
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    /// Number of weeks with any hours
    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn weeks(&self) -> impl Iterator<Item = WeekKey> + '_ {
        self.weeks.keys().copied()
    }

    pub fn first_week(&self) -> Option<WeekKey> {
        self.weeks.keys().next().copied()
    }

    pub fn last_week(&self) -> Option<WeekKey> {
        self.weeks.keys().next_back().copied()
    }

    pub fn week(&self, week: &WeekKey) -> Option<&PersonHours> {
        self.weeks.get(week)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&WeekKey, &PersonHours)> {
        self.weeks.iter()
    }

    /// Total hours per activity code per week, summed over people
    pub fn by_code(&self) -> HoursPivot {
        let mut pivot = HoursPivot::new(self.weeks());
        for (week, people) in &self.weeks {
            for codes in people.values() {
                for (code, hours) in codes {
                    pivot.add(code, *week, *hours);
                }
            }
        }
        pivot
    }
}

/// Activity code x week matrix of hours
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HoursPivot {
    weeks: Vec<WeekKey>,
    rows: BTreeMap<ActivityCode, BTreeMap<WeekKey, f64>>,
}

/// Rendering switches for [`HoursPivot::to_table`]
#[derive(Debug, Clone, Copy, Default)]
pub struct PivotStyle {
    /// Append a `Total` row and column
    pub totals: bool,
    /// Print zero cells as blanks
    pub blank_zero: bool,
    /// Omit rows and columns whose cells are all zero
    pub drop_empty: bool,
}

impl HoursPivot {
    /// A pivot with the given week columns, in order
    pub fn new(weeks: impl IntoIterator<Item = WeekKey>) -> Self {
        let mut seen = BTreeSet::new();
        let weeks = weeks.into_iter().filter(|w| seen.insert(*w)).collect();
        Self {
            weeks,
            rows: BTreeMap::new(),
        }
    }

    /// Add hours; a week not yet a column is appended
    pub fn add(&mut self, code: &str, week: WeekKey, hours: f64) {
        if !self.weeks.contains(&week) {
            self.weeks.push(week);
        }
        *self
            .rows
            .entry(code.to_string())
            .or_default()
            .entry(week)
            .or_default() += hours;
    }

    pub fn weeks(&self) -> &[WeekKey] {
        &self.weeks
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn get(&self, code: &str, week: &WeekKey) -> f64 {
        self.rows
            .get(code)
            .and_then(|weeks| weeks.get(week))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn contains_code(&self, code: &str) -> bool {
        self.rows.contains_key(code)
    }

    pub fn total(&self) -> f64 {
        self.rows.values().flat_map(|w| w.values()).sum()
    }

    /// `self - other` over the union of codes and weeks (missing cells are 0)
    pub fn delta(&self, other: &HoursPivot) -> HoursPivot {
        let mut weeks: Vec<WeekKey> = self.weeks.iter().chain(&other.weeks).copied().collect();
        weeks.sort();
        let mut out = HoursPivot::new(weeks);

        let codes: BTreeSet<&str> = self.codes().chain(other.codes()).collect();
        let all_weeks = out.weeks.clone();
        for code in codes {
            for week in &all_weeks {
                let d = self.get(code, week) - other.get(code, week);
                if d != 0.0 {
                    out.add(code, *week, d);
                }
            }
        }
        out
    }

    /// Cells where `self` (budget) falls short of `charged`.
    ///
    /// Only codes and weeks present in both pivots are compared; the result
    /// holds `budget - charged` for the negative cells.
    pub fn shortfall(&self, charged: &HoursPivot) -> HoursPivot {
        let weeks: Vec<WeekKey> = self
            .weeks
            .iter()
            .filter(|w| charged.weeks.contains(w))
            .copied()
            .collect();
        let mut out = HoursPivot::new(Vec::new());

        for code in self.codes().filter(|c| charged.contains_code(c)) {
            for week in &weeks {
                let d = self.get(code, week) - charged.get(code, week);
                if d < 0.0 {
                    out.add(code, *week, d);
                }
            }
        }
        out.weeks.sort();
        out
    }

    /// Render as a text table with the activity code as row label
    pub fn to_table(&self, style: PivotStyle) -> TextTable {
        let codes: Vec<&str> = self.codes().collect();

        let mut matrix: Vec<Vec<f64>> = codes
            .iter()
            .map(|code| self.weeks.iter().map(|w| self.get(code, w)).collect())
            .collect();
        let mut col_labels: Vec<String> = self.weeks.iter().map(|w| w.to_string()).collect();
        let mut row_labels: Vec<String> = codes.iter().map(|c| c.to_string()).collect();

        if style.totals {
            let totals: Vec<f64> = (0..col_labels.len())
                .map(|j| matrix.iter().map(|row| row[j]).sum())
                .collect();
            matrix.push(totals);
            row_labels.push("Total".to_string());
            for row in &mut matrix {
                let sum = row.iter().sum();
                row.push(sum);
            }
            col_labels.push("Total".to_string());
        }

        let keep_rows: Vec<usize> = (0..row_labels.len())
            .filter(|&i| !style.drop_empty || matrix[i].iter().any(|v| *v != 0.0))
            .collect();
        let keep_cols: Vec<usize> = (0..col_labels.len())
            .filter(|&j| !style.drop_empty || keep_rows.iter().any(|&i| matrix[i][j] != 0.0))
            .collect();

        let headers = std::iter::once(String::new())
            .chain(keep_cols.iter().map(|&j| col_labels[j].clone()));
        let mut table = TextTable::new(headers);
        for &i in &keep_rows {
            let cells = keep_cols.iter().map(|&j| {
                let v = matrix[i][j];
                if style.blank_zero && v == 0.0 {
                    String::new()
                } else {
                    format_number(v)
                }
            });
            table.push_row(std::iter::once(row_labels[i].clone()).chain(cells));
        }
        table
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week(d: u32) -> WeekKey {
        NaiveDate::from_ymd_opt(2020, 3, d).unwrap()
    }

    #[test]
    fn test_add_accumulates() {
        let mut hours = WeeklyHours::new();
        hours.add(week(6), "Ann", "Design", 4.0);
        hours.add(week(6), "Ann", "Design", 4.0);
        hours.add(week(13), "Bob", "Build", 0.0);

        assert_eq!(hours.week(&week(6)).unwrap()["Ann"]["Design"], 8.0);
        hours.drop_zero();
        assert_eq!(hours.len(), 1);
        assert_eq!(hours.first_week(), Some(week(6)));
    }

    #[test]
    fn test_by_code() {
        let mut hours = WeeklyHours::new();
        hours.add(week(13), "Ann", "Design", 8.0);
        hours.add(week(6), "Bob", "Design", 2.0);
        hours.add(week(6), "Ann", "Build", 5.0);

        let pivot = hours.by_code();
        assert_eq!(pivot.weeks(), &[week(6), week(13)]);
        assert_eq!(pivot.get("Design", &week(6)), 2.0);
        assert_eq!(pivot.get("Build", &week(13)), 0.0);
        assert_eq!(pivot.total(), 15.0);
    }

    #[test]
    fn test_shortfall_only_shared_cells() {
        let mut budget = HoursPivot::new([week(6), week(13)]);
        budget.add("Design", week(6), 10.0);
        budget.add("Design", week(13), 4.0);
        budget.add("Build", week(6), 1.0);

        let mut charged = HoursPivot::new([week(6), week(20)]);
        charged.add("Design", week(6), 12.0);
        charged.add("Design", week(20), 50.0);
        charged.add("Support", week(6), 3.0);

        let short = budget.shortfall(&charged);
        assert_eq!(short.codes().collect::<Vec<_>>(), vec!["Design"]);
        assert_eq!(short.weeks(), &[week(6)]);
        assert_eq!(short.get("Design", &week(6)), -2.0);
    }

    #[test]
    fn test_delta() {
        let mut new = HoursPivot::new([week(6)]);
        new.add("Design", week(6), 10.0);
        let mut old = HoursPivot::new([week(6)]);
        old.add("Design", week(6), 10.0);
        old.add("Build", week(6), 3.0);

        let delta = new.delta(&old);
        assert_eq!(delta.get("Build", &week(6)), -3.0);
        assert!(!delta.contains_code("Design"));
    }

    #[test]
    fn test_table_with_totals() {
        let mut pivot = HoursPivot::new([week(6), week(13)]);
        pivot.add("Build", week(6), 5.0);
        pivot.add("Design", week(13), 8.0);

        let table = pivot.to_table(PivotStyle {
            totals: true,
            ..Default::default()
        });
        assert_eq!(
            table.headers(),
            &["", "2020-03-06", "2020-03-13", "Total"]
        );
        assert_eq!(table.rows()[2], vec!["Total", "5", "8", "13"]);
    }

    #[test]
    fn test_table_drop_empty() {
        let mut pivot = HoursPivot::new([week(6), week(13)]);
        pivot.add("Build", week(6), -2.0);
        pivot.add("Design", week(6), 0.0);

        let table = pivot.to_table(PivotStyle {
            blank_zero: true,
            drop_empty: true,
            ..Default::default()
        });
        assert_eq!(table.headers(), &["", "2020-03-06"]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0], vec!["Build", "-2"]);
    }
}
