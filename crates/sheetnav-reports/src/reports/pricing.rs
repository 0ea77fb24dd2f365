//! Pricing analysis: a proposed scenario against its baseline.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use sheetnav_data::Workbook;
use sheetnav_grid::CellValue;

use crate::collectors::{open_tab, PricingCollector, PricingScenario, TeamMember};
use crate::config::PricingConfig;
use crate::error::Result;
use crate::table::{format_cell, format_number, TextTable};

pub const REPORT_NAME: &str = "pricing analysis";

const NOT_APPLICABLE: &str = "N/A";

/// A change log line. Baseline or proposal columns read `N/A` when the line
/// only exists on the other side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeRow {
    pub name: String,
    pub level: String,
    pub activity_code: String,
    pub discounted_rate: String,
    pub base_cost: String,
    pub dates_baseline: String,
    pub dates_proposal: String,
    pub hours_baseline: String,
    pub hours_proposal: String,
    pub delta_fees: f64,
}

impl ChangeRow {
    fn new(
        member: &TeamMember,
        baseline: Option<&TeamMember>,
        proposal: Option<&TeamMember>,
        delta_fees: f64,
    ) -> Self {
        let na = || NOT_APPLICABLE.to_string();
        Self {
            name: member.name.clone(),
            level: format_cell(&member.level),
            activity_code: format_cell(&member.activity_code),
            discounted_rate: format_cell(&member.discounted_rate),
            base_cost: format_cell(&member.base_cost),
            dates_baseline: baseline.map_or_else(na, TeamMember::date_span),
            dates_proposal: proposal.map_or_else(na, TeamMember::date_span),
            hours_baseline: baseline.map_or_else(na, TeamMember::hours_summary),
            hours_proposal: proposal.map_or_else(na, TeamMember::hours_summary),
            delta_fees,
        }
    }

    fn added(member: &TeamMember) -> Self {
        Self::new(member, None, Some(member), member.total_fees_discounted)
    }

    fn removed(member: &TeamMember) -> Self {
        Self::new(member, Some(member), None, member.total_fees_discounted)
    }

    fn changed(baseline: &TeamMember, proposal: &TeamMember) -> Self {
        Self::new(
            proposal,
            Some(baseline),
            Some(proposal),
            proposal.total_fees_discounted - baseline.total_fees_discounted,
        )
    }
}

/// The three change logs between baseline and proposal
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChangeLog {
    /// People only in the proposal
    pub added: Vec<ChangeRow>,
    /// Same person and code with different weekly hours
    pub modified: Vec<ChangeRow>,
    /// People whose activity codes differ between the scenarios
    pub switched: Vec<ChangeRow>,
}

/// Fees per activity code in both scenarios
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeImpact {
    pub activity_code: String,
    pub baseline: f64,
    pub proposal: f64,
    pub fee_difference: f64,
}

/// Compares two pricing scenarios
#[derive(Debug, Clone, Serialize)]
pub struct PricingAnalysis {
    pub baseline: PricingScenario,
    pub proposal: PricingScenario,
}

impl PricingAnalysis {
    pub fn new(baseline: PricingScenario, proposal: PricingScenario) -> Self {
        Self { baseline, proposal }
    }

    pub fn load(workbook: &Workbook, config: &PricingConfig) -> Result<Self> {
        let baseline = PricingCollector::new(&config.baseline_tab.name)
            .collect(&open_tab(workbook, &config.baseline_tab)?)?;
        let proposal = PricingCollector::new(&config.proposal_tab.name)
            .collect(&open_tab(workbook, &config.proposal_tab)?)?;
        Ok(Self::new(baseline, proposal))
    }

    pub fn change_log(&self) -> ChangeLog {
        ChangeLog {
            added: self.added(),
            modified: self.modified(),
            switched: self.switched(),
        }
    }

    fn added(&self) -> Vec<ChangeRow> {
        let known: BTreeSet<&str> = self.baseline.team.iter().map(|m| m.name.as_str()).collect();
        self.proposal
            .team
            .iter()
            .filter(|m| !known.contains(m.name.as_str()))
            .map(ChangeRow::added)
            .collect()
    }

    fn modified(&self) -> Vec<ChangeRow> {
        let mut rows = Vec::new();
        for after in &self.proposal.team {
            for before in &self.baseline.team {
                if after.name == before.name
                    && after.activity_code == before.activity_code
                    && hours_differ(before, after)
                {
                    rows.push(ChangeRow::changed(before, after));
                }
            }
        }
        rows
    }

    /// For each person found under a different code, every code that was
    /// added, dropped or re-priced. People with a single such line are left
    /// out.
    fn switched(&self) -> Vec<ChangeRow> {
        let mut done = BTreeSet::new();
        let mut rows = Vec::new();

        for after in &self.proposal.team {
            let switched = self.baseline.team.iter().any(|before| {
                before.name == after.name && before.activity_code != after.activity_code
            });
            if !switched || !done.insert(after.name.as_str()) {
                continue;
            }

            let same_person = |m: &&TeamMember| m.name == after.name;
            let now: Vec<&TeamMember> = self.proposal.team.iter().filter(same_person).collect();
            let then: Vec<&TeamMember> = self.baseline.team.iter().filter(same_person).collect();
            let codes: BTreeSet<&CellValue> = now
                .iter()
                .chain(then.iter())
                .map(|m| &m.activity_code)
                .collect();

            let mut items = Vec::new();
            for code in codes {
                let t = now.iter().find(|m| &m.activity_code == code);
                let g = then.iter().find(|m| &m.activity_code == code);
                match (g, t) {
                    (None, Some(t)) if t.total_fees_discounted != 0.0 => {
                        items.push(ChangeRow::added(t))
                    }
                    (Some(g), None) if g.total_fees_discounted != 0.0 => {
                        items.push(ChangeRow::removed(g))
                    }
                    (Some(g), Some(t)) if t.total_fees_discounted != g.total_fees_discounted => {
                        items.push(ChangeRow::changed(g, t))
                    }
                    _ => {}
                }
            }
            if items.len() > 1 {
                rows.extend(items);
            }
        }
        rows
    }

    /// Fees summed per activity code, joined on codes present in both
    /// scenarios; the `Total` line sorts last
    pub fn impact_by_code(&self) -> Vec<CodeImpact> {
        let baseline = fees_by_code(&self.baseline);
        let proposal = fees_by_code(&self.proposal);

        let mut rows: Vec<CodeImpact> = baseline
            .iter()
            .filter_map(|(code, b)| {
                proposal.get(code).map(|p| CodeImpact {
                    activity_code: code.clone(),
                    baseline: *b,
                    proposal: *p,
                    fee_difference: p - b,
                })
            })
            .collect();
        rows.sort_by_key(|r| r.activity_code == "Total");
        rows
    }

    fn total_impact(&self) -> String {
        let mut table = TextTable::new([
            "Scenario",
            "Total Fees Discounted",
            "Remaining Fee including Gignow",
            "Margin (%) with Gignow",
        ]);
        for s in [&self.baseline, &self.proposal] {
            table.push_row([
                s.scenario.clone(),
                format_cell(&s.total_fees_discounted),
                format_cell(&s.remaining_fee_including_gignow),
                format_cell(&s.margin_pct_with_gignow),
            ]);
        }
        format!("\n1. Total Impact for Project:\n{}", table)
    }

    fn change_table(&self, rows: &[ChangeRow]) -> TextTable {
        let (b, p) = (&self.baseline.scenario, &self.proposal.scenario);
        let mut table = TextTable::new([
            "Name".to_string(),
            "Level".to_string(),
            "Activity Code".to_string(),
            "Discounted Rate".to_string(),
            "Base Cost".to_string(),
            format!("Date_{}", b),
            format!("Date_{}", p),
            format!("Hours_{}", b),
            format!("Hours_{}", p),
            "Delta_Fees".to_string(),
        ]);
        for r in rows {
            table.push_row([
                r.name.clone(),
                r.level.clone(),
                r.activity_code.clone(),
                r.discounted_rate.clone(),
                r.base_cost.clone(),
                r.dates_baseline.clone(),
                r.dates_proposal.clone(),
                r.hours_baseline.clone(),
                r.hours_proposal.clone(),
                format_number(r.delta_fees),
            ]);
        }
        table
    }

    fn change_log_text(&self) -> String {
        let log = self.change_log();
        let part = |rows: &[ChangeRow], none: &str| {
            if rows.is_empty() {
                format!("{}\n", none)
            } else {
                self.change_table(rows).to_string()
            }
        };
        format!(
            "\n2. Change Log:\n\n2.1 Following are the new people added:\n{}\n\
             2.2 Followings are the records who modify hours:\n{}\n\
             2.3 Followings are the records who switch activity code:\n{}",
            part(&log.added, "NO NEWLY ADDED PEOPLE!"),
            part(&log.modified, "NO ONE MODIFIED HOURS!"),
            part(&log.switched, "NO ONE SWITCHED ACTIVITY CODE!")
        )
    }

    fn impact_text(&self) -> String {
        let mut table = TextTable::new([
            "Activity Code".to_string(),
            self.baseline.scenario.clone(),
            self.proposal.scenario.clone(),
            "Fee Difference".to_string(),
        ]);
        for r in self.impact_by_code() {
            table.push_row([
                r.activity_code,
                format_number(r.baseline),
                format_number(r.proposal),
                format_number(r.fee_difference),
            ]);
        }
        format!("\n3.Impact by Activity Code:\n{}", table)
    }

    /// The full pricing analysis text
    pub fn render(&self) -> String {
        [self.total_impact(), self.change_log_text(), self.impact_text()].join("\n")
    }
}

/// Weekly hours differ once negatives are clamped to zero
fn hours_differ(before: &TeamMember, after: &TeamMember) -> bool {
    after
        .hours
        .iter()
        .zip(&before.hours)
        .any(|(a, b)| a.max(0.0) != b.max(0.0))
}

fn fees_by_code(scenario: &PricingScenario) -> BTreeMap<String, f64> {
    let mut fees = BTreeMap::new();
    for (code, fee) in scenario.activity_codes.iter().zip(&scenario.all_fees_discounted) {
        if code.is_missing() {
            continue;
        }
        *fees.entry(code.to_string()).or_insert(0.0) += fee.number_or_zero();
    }
    fees
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str, code: &str, fees: f64, hours: &[f64]) -> TeamMember {
        TeamMember {
            name: name.to_string(),
            level: "Senior".into(),
            activity_code: code.into(),
            discounted_rate: 150.0.into(),
            base_cost: 90.0.into(),
            start_date: CellValue::Empty,
            end_date: CellValue::Empty,
            total_fees_discounted: fees,
            hours: hours.to_vec(),
        }
    }

    fn scenario(name: &str, team: Vec<TeamMember>, codes: &[(&str, f64)]) -> PricingScenario {
        PricingScenario {
            scenario: name.to_string(),
            total_fees_discounted: 1000.0.into(),
            remaining_fee_including_gignow: 200.0.into(),
            margin_pct_with_gignow: 0.25.into(),
            team,
            activity_codes: codes.iter().map(|(c, _)| CellValue::from(*c)).collect(),
            all_fees_discounted: codes.iter().map(|(_, f)| CellValue::from(*f)).collect(),
        }
    }

    fn analysis() -> PricingAnalysis {
        let baseline = scenario(
            "Gignow",
            vec![
                member("Ann", "Design", 6000.0, &[40.0, 40.0]),
                member("Bob", "Build", 4000.0, &[20.0, 20.0]),
            ],
            &[("Design", 6000.0), ("Build", 4000.0), ("Total", 10000.0)],
        );
        let proposal = scenario(
            "Tech",
            vec![
                member("Ann", "Design", 6000.0, &[40.0, 40.0]),
                member("Bob", "Support", 3000.0, &[20.0, 10.0]),
                member("Bob", "Build", 1000.0, &[10.0, 0.0]),
                member("Carl", "Build", 2000.0, &[0.0, 16.0]),
            ],
            &[
                ("Design", 6000.0),
                ("Build", 3000.0),
                ("Support", 3000.0),
                ("Total", 12000.0),
            ],
        );
        PricingAnalysis::new(baseline, proposal)
    }

    #[test]
    fn test_added_people() {
        let log = analysis().change_log();
        assert_eq!(log.added.len(), 1);
        let carl = &log.added[0];
        assert_eq!(carl.name, "Carl");
        assert_eq!(carl.dates_baseline, "N/A");
        assert_eq!(carl.hours_proposal, "16");
        assert_eq!(carl.delta_fees, 2000.0);
    }

    #[test]
    fn test_modified_hours() {
        let log = analysis().change_log();
        assert_eq!(log.modified.len(), 1);
        assert_eq!(log.modified[0].name, "Bob");
        assert_eq!(log.modified[0].activity_code, "Build");
        assert_eq!(log.modified[0].hours_baseline, "20");
        assert_eq!(log.modified[0].hours_proposal, "10");
        assert_eq!(log.modified[0].delta_fees, -3000.0);
    }

    #[test]
    fn test_switched_codes() {
        let log = analysis().change_log();
        let codes: Vec<&str> = log.switched.iter().map(|r| r.activity_code.as_str()).collect();
        assert_eq!(codes, vec!["Build", "Support"]);
        assert_eq!(log.switched[1].hours_baseline, "N/A");
    }

    #[test]
    fn test_impact_total_last() {
        let impact = analysis().impact_by_code();
        let codes: Vec<&str> = impact.iter().map(|r| r.activity_code.as_str()).collect();
        assert_eq!(codes, vec!["Build", "Design", "Total"]);
        assert_eq!(impact[0].fee_difference, -1000.0);
        assert_eq!(impact[2].fee_difference, 2000.0);
    }

    #[test]
    fn test_render_sections() {
        let text = analysis().render();
        assert!(text.contains("1. Total Impact for Project:"));
        assert!(text.contains("Date_Gignow"));
        assert!(text.contains("3.Impact by Activity Code:"));
        assert!(!text.contains("NO NEWLY ADDED PEOPLE!"));
    }

    #[test]
    fn test_change_log_json() {
        let json = serde_json::to_value(analysis().change_log()).unwrap();
        assert_eq!(json["added"][0]["name"], "Carl");
        assert_eq!(json["modified"][0]["delta_fees"], -3000.0);
    }

    #[test]
    fn test_render_without_changes() {
        let a = analysis();
        let same = PricingAnalysis::new(a.baseline.clone(), a.baseline.clone());
        let text = same.render();
        assert!(text.contains("NO NEWLY ADDED PEOPLE!"));
        assert!(text.contains("NO ONE MODIFIED HOURS!"));
        assert!(text.contains("NO ONE SWITCHED ACTIVITY CODE!"));
    }
}
