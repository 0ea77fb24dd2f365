//! Legal name to preferred name directory.

use std::collections::HashMap;

use sheetnav_grid::Navigator;
use tracing::warn;

use crate::error::{InTab, Result};

/// Maps the legal names used by the timesheet export to the names used in
/// the staffing plan.
#[derive(Debug, Clone, Default)]
pub struct NameDirectory {
    names: HashMap<String, String>,
}

impl NameDirectory {
    /// Read the `Legal Name` column and the `Name` on the same rows.
    ///
    /// A legal name listed twice keeps its first preferred name.
    pub fn collect(nav: &Navigator, tab: &str) -> Result<Self> {
        let legal = nav.values_below("Legal Name", 0).in_tab(tab)?;
        let mut names = HashMap::new();
        for cell in legal {
            if cell.value.is_missing() {
                continue;
            }
            let name = nav.value_in_row(cell.coord, "Name", 0).in_tab(tab)?;
            if name.is_missing() {
                continue;
            }
            names
                .entry(cell.value.to_string())
                .or_insert_with(|| name.to_string());
        }
        Ok(Self { names })
    }

    pub fn from_pairs<L, N>(pairs: impl IntoIterator<Item = (L, N)>) -> Self
    where
        L: Into<String>,
        N: Into<String>,
    {
        let mut names = HashMap::new();
        for (legal, name) in pairs {
            names.entry(legal.into()).or_insert_with(|| name.into());
        }
        Self { names }
    }

    /// Preferred name for `legal`, or `legal` itself when unknown
    pub fn preferred<'a>(&'a self, legal: &'a str) -> &'a str {
        match self.names.get(legal) {
            Some(name) => name,
            None => {
                warn!(
                    legal_name = legal,
                    "no preferred name on record, using the legal name"
                );
                legal
            }
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
