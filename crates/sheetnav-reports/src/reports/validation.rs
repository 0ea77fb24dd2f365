//! Timesheet validation against the staffing plan.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use sheetnav_data::Workbook;
use tracing::debug;

use crate::collectors::{
    open_tab, NameDirectory, StaffingCollector, StaffingPlan, TimesheetCollector,
};
use crate::config::ValidationConfig;
use crate::error::Result;
use crate::table::format_number;
use crate::weekly::{CodeHours, HoursPivot, PersonHours, PivotStyle, WeekKey, WeeklyHours};

pub const REPORT_NAME: &str = "report";
pub const COMPARISON_NAME: &str = "Comparison";

/// One person's hours on one code in one week
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChargeLine {
    pub name: String,
    pub activity_code: String,
    pub budget: f64,
    pub charged: f64,
}

impl fmt::Display for ChargeLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "    {} charged {} hours on {}, with {} hours on budget.",
            self.name,
            format_number(self.charged),
            self.activity_code,
            format_number(self.budget)
        )
    }
}

/// Charging discrepancies found in one week
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekDiscrepancies {
    pub week: WeekKey,
    pub over: Vec<ChargeLine>,
    pub under: Vec<ChargeLine>,
    /// People with both over and under lines, likely on the wrong code
    pub wrong_code: Vec<ChargeLine>,
}

/// Compares charged hours with budgeted hours
#[derive(Debug, Clone)]
pub struct Validator {
    timesheet: WeeklyHours,
    staffing: StaffingPlan,
}

impl Validator {
    pub fn new(timesheet: WeeklyHours, staffing: StaffingPlan) -> Self {
        Self {
            timesheet,
            staffing,
        }
    }

    /// Collect the timesheet, the staffing plan and the name directory from
    /// one workbook
    pub fn load(workbook: &Workbook, config: &ValidationConfig) -> Result<Self> {
        let bill = open_tab(workbook, &config.bill_tab)?;
        let names = NameDirectory::collect(&bill, &config.bill_tab.name)?;
        debug!(names = names.len(), "loaded name directory");

        let timesheet = TimesheetCollector::new(&config.raw_tab.name, config.tracking_start)
            .collect(&open_tab(workbook, &config.raw_tab)?, &names)?;
        let staffing =
            StaffingCollector::new(&config.staffing_tab.name, config.staffing_footer_rows)
                .collect(&open_tab(workbook, &config.staffing_tab)?)?;
        Ok(Self::new(timesheet, staffing))
    }

    pub fn timesheet(&self) -> &WeeklyHours {
        &self.timesheet
    }

    pub fn staffing(&self) -> &StaffingPlan {
        &self.staffing
    }

    /// Charged hours by code by week
    pub fn charged_pivot(&self) -> HoursPivot {
        self.timesheet.by_code()
    }

    /// Budget hours by code over as many leading staffing weeks as there are
    /// charged weeks
    pub fn budget_pivot(&self) -> HoursPivot {
        self.staffing.budget_pivot(self.timesheet.len())
    }

    /// Cells where more hours were charged than budgeted, as `budget - charged`
    pub fn unbudgeted(&self) -> HoursPivot {
        self.budget_pivot().shortfall(&self.charged_pivot())
    }

    /// Over-, under- and wrong-code charging for every charged week
    pub fn discrepancies(&self) -> Vec<WeekDiscrepancies> {
        let empty = PersonHours::new();
        self.timesheet
            .iter()
            .map(|(week, charged)| {
                let budget = self.staffing.hours.week(week).unwrap_or(&empty);
                week_discrepancies(*week, charged, budget)
            })
            .collect()
    }

    pub fn summary(&self) -> String {
        let recorded = match (self.timesheet.first_week(), self.timesheet.last_week()) {
            (Some(first), Some(last)) => format!(
                "Currently {} weeks of timesheets have been recorded (from {} to {}).",
                self.timesheet.len(),
                first,
                last
            ),
            _ => "Currently 0 weeks of timesheets have been recorded.".to_string(),
        };

        let unbudgeted = self.unbudgeted();
        let msg = if unbudgeted.is_empty() {
            "Great! All charged hours are under budget!".to_string()
        } else {
            let table = unbudgeted.to_table(PivotStyle {
                blank_zero: true,
                drop_empty: true,
                ..Default::default()
            });
            format!("Attention: Found unbudgeted hours charged:\n{}", table)
        };

        let totals = PivotStyle {
            totals: true,
            ..Default::default()
        };
        format!(
            "\n#### 1. SUMMARY ####\n{}\n\nTotal budget hours by Activity Codes by week:\n{}\n\
             Total charged hours by Activity Codes by week:\n{}\n{}\n",
            recorded,
            self.budget_pivot().to_table(totals),
            self.charged_pivot().to_table(totals),
            msg.trim_end()
        )
    }

    pub fn charging_diffs(&self) -> String {
        let weeks = self.discrepancies();

        let over = section(&weeks, |w| w.over.as_slice());
        let over_msg = if over.is_empty() {
            "Great! No over-charging error is found!".to_string()
        } else {
            format!("Attention: Found over-charging hours! Please consider correct them:\n{}", over)
        };
        let under = section(&weeks, |w| w.under.as_slice());
        let under_msg = if under.is_empty() {
            "Great! No under-charging error is found!".to_string()
        } else {
            format!("There are some under-charging hours you may want to notice.\n{}", under)
        };
        let wrong = section(&weeks, |w| w.wrong_code.as_slice());
        let wrong_msg = if wrong.is_empty() {
            "Great! No activity code is wrongly charged!".to_string()
        } else {
            format!("The following discrepancies may caused by miss use of Activity Code:\n{}", wrong)
        };

        format!(
            "\n#### 2. OVER-CHARGING ####\n{}\n\n#### 3. UNDER-CHARGING ####\n{}\n\n\
             #### 4. POSSIBLY WRONG CODE ####\n{}\n",
            over_msg, under_msg, wrong_msg
        )
    }

    /// The full validation report text
    pub fn render(&self) -> String {
        [self.summary(), self.charging_diffs()].join("\n")
    }
}

/// `Week <date>` headed blocks of lines, skipping weeks with none
fn section(
    weeks: &[WeekDiscrepancies],
    lines: impl Fn(&WeekDiscrepancies) -> &[ChargeLine],
) -> String {
    let mut out = Vec::new();
    for week in weeks {
        let found = lines(week);
        if found.is_empty() {
            continue;
        }
        out.push(format!("\nWeek {}", week.week));
        out.extend(found.iter().map(ToString::to_string));
    }
    out.join("\n")
}

fn week_discrepancies(
    week: WeekKey,
    charged: &PersonHours,
    budget: &PersonHours,
) -> WeekDiscrepancies {
    let empty = CodeHours::new();
    let mut out = WeekDiscrepancies {
        week,
        over: Vec::new(),
        under: Vec::new(),
        wrong_code: Vec::new(),
    };

    let people: BTreeSet<&String> = charged.keys().chain(budget.keys()).collect();
    for name in people {
        let line = |code: &str, b: f64, c: f64| ChargeLine {
            name: name.clone(),
            activity_code: code.to_string(),
            budget: b,
            charged: c,
        };
        let budgeted = budget.get(name).unwrap_or(&empty);
        let booked = charged.get(name).unwrap_or(&empty);

        let mut over = Vec::new();
        let mut under = Vec::new();
        let codes: BTreeSet<&String> = booked.keys().chain(budgeted.keys()).collect();
        for code in codes {
            let b = budgeted.get(code).copied().unwrap_or(0.0);
            let c = booked.get(code).copied().unwrap_or(0.0);
            if c > b {
                over.push(line(code, b, c));
            } else if c < b {
                under.push(line(code, b, c));
            }
        }

        if !over.is_empty() && !under.is_empty() {
            out.wrong_code.extend(over.iter().cloned());
            out.wrong_code.extend(under.iter().cloned());
        }
        out.over.extend(over);
        out.under.extend(under);
    }
    out
}

/// Charged hours of this workbook against an older one
pub fn comparison(this_label: &str, this: &Validator, old_label: &str, old: &Validator) -> String {
    let totals = PivotStyle {
        totals: true,
        ..Default::default()
    };
    let this_pivot = this.charged_pivot();
    let old_pivot = old.charged_pivot();
    let delta = this_pivot.delta(&old_pivot);
    let delta_text = if delta.is_empty() {
        "No difference.\n".to_string()
    } else {
        delta
            .to_table(PivotStyle {
                totals: true,
                blank_zero: true,
                drop_empty: true,
            })
            .to_string()
    };

    format!(
        "\n#### Comparison with Old Spreedsheet ####\n{}\n{}\n{}\n{}\nDelta\n{}",
        this_label,
        this_pivot.to_table(totals),
        old_label,
        old_pivot.to_table(totals),
        delta_text
    )
}

/// Name of the comparison report file, tagged with both workbooks
pub fn comparison_tag(this_tag: &str, old_tag: &str) -> String {
    format!("{} and {}", this_tag, old_tag)
}
