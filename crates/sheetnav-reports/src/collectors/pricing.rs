//! Pricing scenario tabs.

use serde::Serialize;
use sheetnav_grid::{CellValue, Coordinate, Navigator};
use tracing::debug;

use super::number_at;
use crate::error::{InTab, Result};

/// One staffed line of a pricing scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamMember {
    pub name: String,
    pub level: CellValue,
    pub activity_code: CellValue,
    pub discounted_rate: CellValue,
    pub base_cost: CellValue,
    pub start_date: CellValue,
    pub end_date: CellValue,
    pub total_fees_discounted: f64,
    /// Values under every `Hours` column, in column order
    pub hours: Vec<f64>,
}

impl TeamMember {
    /// `start - end` with each side cut to its date part
    pub fn date_span(&self) -> String {
        let day = |v: &CellValue| v.to_string().chars().take(10).collect::<String>();
        format!("{} - {}", day(&self.start_date), day(&self.end_date))
    }

    /// Distinct positive weekly hours, sorted as text and space separated
    pub fn hours_summary(&self) -> String {
        let mut seen: Vec<String> = self
            .hours
            .iter()
            .filter(|h| **h > 0.0)
            .map(|h| crate::table::format_number(*h))
            .collect();
        seen.sort();
        seen.dedup();
        seen.join(" ")
    }
}

/// Scalars and team of one pricing scenario tab
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingScenario {
    pub scenario: String,
    pub total_fees_discounted: CellValue,
    pub remaining_fee_including_gignow: CellValue,
    pub margin_pct_with_gignow: CellValue,
    pub team: Vec<TeamMember>,
    /// The `Activity Code` column, trailing blanks trimmed
    pub activity_codes: Vec<CellValue>,
    /// The `Total Fees Discounted` column, trailing blanks trimmed
    pub all_fees_discounted: Vec<CellValue>,
}

/// Reads a pricing scenario tab. The scenario is named after the tab.
#[derive(Debug, Clone)]
pub struct PricingCollector {
    tab: String,
}

impl PricingCollector {
    pub fn new(tab: &str) -> Self {
        Self {
            tab: tab.to_string(),
        }
    }

    pub fn collect(&self, nav: &Navigator) -> Result<PricingScenario> {
        let tab = self.tab.as_str();

        let total_fees_discounted = nav
            .value_at_intersection("Total", "Total Fees Discounted")
            .in_tab(tab)?
            .clone();
        let remaining_fee_including_gignow = nav
            .value_by_offset("Remaining fee including Gignow", 0, (0, 1))
            .in_tab(tab)?
            .clone();
        let margin_pct_with_gignow = nav
            .value_by_offset("Margin (%) with Gignow", 1, (0, 1))
            .in_tab(tab)?
            .clone();

        let team = self.team(nav)?;
        let activity_codes = nav
            .values_below("Activity Code", 0)
            .in_tab(tab)?
            .into_iter()
            .map(|c| c.value.clone())
            .collect();
        let all_fees_discounted = nav
            .values_below("Total Fees Discounted", 0)
            .in_tab(tab)?
            .into_iter()
            .map(|c| c.value.clone())
            .collect();

        debug!(tab, team = team.len(), "collected pricing scenario");
        Ok(PricingScenario {
            scenario: self.tab.clone(),
            total_fees_discounted,
            remaining_fee_including_gignow,
            margin_pct_with_gignow,
            team,
            activity_codes,
            all_fees_discounted,
        })
    }

    fn team(&self, nav: &Navigator) -> Result<Vec<TeamMember>> {
        let tab = self.tab.as_str();
        let hours_cols: Vec<usize> = nav.occurrences("Hours").iter().map(|c| c.col).collect();
        let fees_col = nav.find("Total Fees Discounted", 0).in_tab(tab)?.col;

        let mut team = Vec::new();
        for cell in nav.values_below("Name", 0).in_tab(tab)? {
            if cell.value.is_missing() {
                continue;
            }
            let at = |label: &str| -> Result<CellValue> {
                Ok(nav.value_in_row(cell.coord, label, 0).in_tab(tab)?.clone())
            };
            let row = cell.coord.row;
            let hours = hours_cols
                .iter()
                .map(|col| number_at(nav, Coordinate::new(row, *col), tab))
                .collect::<Result<Vec<_>>>()?;

            team.push(TeamMember {
                name: cell.value.to_string(),
                level: at("Level")?,
                activity_code: at("Activity Code")?,
                discounted_rate: at("Discounted Rate")?,
                base_cost: at("Base Cost")?,
                start_date: at("Start Date")?,
                end_date: at("End Date")?,
                total_fees_discounted: number_at(nav, Coordinate::new(row, fees_col), tab)?,
                hours,
            });
        }
        Ok(team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sheetnav_grid::Grid;

    fn scenario_grid() -> Navigator {
        Navigator::new(Grid::from_rows(scenario_rows()).unwrap())
    }

    fn scenario_rows() -> Vec<Vec<CellValue>> {
        let e = || CellValue::Empty;
        let start: CellValue = NaiveDate::from_ymd_opt(2020, 3, 2).unwrap().into();
        let end: CellValue = NaiveDate::from_ymd_opt(2020, 6, 26).unwrap().into();
        let header = [
            "Name",
            "Level",
            "Activity Code",
            "Discounted Rate",
            "Base Cost",
            "Start Date",
            "End Date",
            "Total Fees Discounted",
            "Hours",
            "Hours",
        ];
        vec![
            header.iter().map(|h| CellValue::from(*h)).collect(),
            vec![
                "Ann".into(),
                "Senior".into(),
                "Design".into(),
                150.0.into(),
                90.0.into(),
                start.clone(),
                end.clone(),
                12000.0.into(),
                40.0.into(),
                40.0.into(),
            ],
            vec![e(), e(), e(), e(), e(), e(), e(), e(), e(), e()],
            vec![
                "Bob".into(),
                "Junior".into(),
                "Build".into(),
                100.0.into(),
                60.0.into(),
                start,
                end,
                4000.0.into(),
                e(),
                20.0.into(),
            ],
            vec![
                e(),
                e(),
                "Total".into(),
                e(),
                e(),
                e(),
                e(),
                16000.0.into(),
                e(),
                e(),
            ],
            vec![
                e(),
                e(),
                e(),
                "Remaining fee including Gignow".into(),
                2500.0.into(),
                "Margin (%) with Gignow".into(),
                0.3.into(),
                e(),
                "Margin (%) with Gignow".into(),
                0.25.into(),
            ],
        ]
    }

    #[test]
    fn test_collect_scenario() {
        let scenario = PricingCollector::new("Gignow").collect(&scenario_grid()).unwrap();

        assert_eq!(scenario.scenario, "Gignow");
        assert_eq!(scenario.total_fees_discounted, CellValue::Number(16000.0));
        assert_eq!(scenario.remaining_fee_including_gignow, CellValue::Number(2500.0));
        assert_eq!(scenario.margin_pct_with_gignow, CellValue::Number(0.25));
        assert_eq!(scenario.activity_codes.len(), 4);
        assert_eq!(scenario.activity_codes[3], CellValue::from("Total"));
        assert_eq!(scenario.all_fees_discounted.len(), 4);
    }

    #[test]
    fn test_team_rows() {
        let scenario = PricingCollector::new("Gignow").collect(&scenario_grid()).unwrap();

        assert_eq!(scenario.team.len(), 2);
        let bob = &scenario.team[1];
        assert_eq!(bob.name, "Bob");
        assert_eq!(bob.activity_code, CellValue::from("Build"));
        assert_eq!(bob.hours, vec![0.0, 20.0]);
        assert_eq!(bob.total_fees_discounted, 4000.0);
        assert_eq!(bob.date_span(), "2020-03-02 - 2020-06-26");
        assert_eq!(scenario.team[0].hours_summary(), "40");
    }

    #[test]
    fn test_text_in_hours_column() {
        let mut rows = scenario_rows();
        rows[3][8] = "TBD".into();
        let err = PricingCollector::new("Tech")
            .collect(&Navigator::new(Grid::from_rows(rows).unwrap()))
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("tab 'Tech'"));
        assert!(msg.contains("I4"));
    }

    #[test]
    fn test_missing_marker() {
        let grid = Grid::from_rows(vec![vec!["Total".into()]]).unwrap();
        let err = PricingCollector::new("Tech")
            .collect(&Navigator::new(grid))
            .unwrap_err();
        assert!(err.to_string().contains("Total Fees Discounted"));
    }
}
