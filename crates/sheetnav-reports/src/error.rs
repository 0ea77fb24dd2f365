//! Error types for collectors and reports.

use sheetnav_data::DataError;
use sheetnav_grid::GridError;
use thiserror::Error;

/// Result type for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that abort a report
#[derive(Debug, Error)]
pub enum ReportError {
    /// A label lookup failed inside a named worksheet
    #[error("tab '{tab}': {source}")]
    Lookup {
        tab: String,
        #[source]
        source: GridError,
    },

    /// A label lookup failed outside any worksheet context
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Loading the workbook failed
    #[error(transparent)]
    Data(#[from] DataError),

    /// The worksheet does not have the shape the collector expects
    #[error("unexpected layout in tab '{tab}': {message}")]
    Layout { tab: String, message: String },

    /// Writing a spreadsheet report failed
    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReportError {
    pub fn layout(tab: &str, message: impl Into<String>) -> Self {
        ReportError::Layout {
            tab: tab.to_string(),
            message: message.into(),
        }
    }
}

/// Attach the worksheet name to grid lookup failures
pub trait InTab<T> {
    fn in_tab(self, tab: &str) -> Result<T>;
}

impl<T> InTab<T> for std::result::Result<T, GridError> {
    fn in_tab(self, tab: &str) -> Result<T> {
        self.map_err(|source| ReportError::Lookup {
            tab: tab.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_message_names_tab_and_label() {
        let err: Result<()> = Err(GridError::NotFound {
            value: "Bill Rate".to_string(),
            occurrence: 1,
            available: 1,
        })
        .in_tab("Bill");
        let msg = err.unwrap_err().to_string();
        assert!(msg.contains("tab 'Bill'"));
        assert!(msg.contains("'Bill Rate' not found"));
    }
}
