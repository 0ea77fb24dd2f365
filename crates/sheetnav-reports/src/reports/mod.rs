//! Text and spreadsheet reports built from collector output.

pub mod burn_chart;
pub mod pricing;
pub mod validation;

pub use burn_chart::BurnChart;
pub use pricing::{ChangeLog, ChangeRow, CodeImpact, PricingAnalysis};
pub use validation::{comparison, comparison_tag, ChargeLine, Validator, WeekDiscrepancies};
