//! CSV data source.
//!
//! A CSV export holds a single worksheet, exposed as the sheet `data`.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use sheetnav_grid::{CellValue, Grid};

use crate::error::{DataError, Result};
use crate::sources::{DataSource, SheetOptions};

/// Name of the only sheet of a CSV source
pub const CSV_SHEET: &str = "data";

/// Options for CSV parsing
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Quote character (default: double quote)
    pub quote: u8,
    /// Whether to trim whitespace from fields
    pub trim: bool,
    /// Pad short records with empty cells instead of rejecting the file
    pub pad_ragged: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            trim: true,
            pad_ragged: true,
        }
    }
}

impl CsvOptions {
    /// Create options for tab-separated values (TSV)
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            ..Default::default()
        }
    }

    /// Create options for semicolon-separated values (common in European locales)
    pub fn semicolon() -> Self {
        Self {
            delimiter: b';',
            ..Default::default()
        }
    }

    /// Reject files whose records differ in length
    pub fn strict() -> Self {
        Self {
            pad_ragged: false,
            ..Default::default()
        }
    }
}

/// CSV file data source
pub struct CsvSource {
    /// Path to the CSV file
    path: PathBuf,
    /// Parsing options
    options: CsvOptions,
}

impl CsvSource {
    /// Create a new CSV source from a file path
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_options(path, CsvOptions::default())
    }

    /// Create a new CSV source with custom options
    pub fn with_options(path: impl AsRef<Path>, options: CsvOptions) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DataError::FileNotFound(path.display().to_string()));
        }

        Ok(Self {
            path: path.to_path_buf(),
            options,
        })
    }

    /// Read all records as raw strings
    pub fn read_all(&self) -> Result<Vec<Vec<String>>> {
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.options.delimiter)
            .quote(self.options.quote)
            .has_headers(false) // header rows are stripped by SheetOptions
            .trim(if self.options.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .flexible(true)
            .from_reader(reader);

        let mut result = Vec::new();

        for record in csv_reader.records() {
            let record = record?;
            result.push(record.iter().map(str::to_string).collect());
        }

        Ok(result)
    }

    /// Interpret one CSV field: blank, number, ISO date, otherwise text.
    pub fn parse_field(field: &str) -> CellValue {
        if field.is_empty() {
            return CellValue::Empty;
        }
        if let Ok(n) = field.parse::<f64>() {
            if n.is_finite() {
                return CellValue::Number(n);
            }
        }
        if let Ok(d) = NaiveDate::parse_from_str(field, "%Y-%m-%d") {
            return CellValue::from(d);
        }
        CellValue::Text(field.to_string())
    }
}

impl DataSource for CsvSource {
    fn read_sheet(&self, sheet: &str, options: &SheetOptions) -> Result<Grid> {
        if sheet != CSV_SHEET {
            return Err(DataError::SheetNotFound(format!(
                "{} (a CSV file only has the sheet '{}')",
                sheet, CSV_SHEET
            )));
        }

        let rows: Vec<Vec<CellValue>> = self
            .read_all()?
            .iter()
            .map(|record| record.iter().map(|f| Self::parse_field(f)).collect())
            .collect();

        let grid = if self.options.pad_ragged {
            Grid::from_rows_padded(rows)
        } else {
            Grid::from_rows(rows)?
        };

        Ok(grid.skip_rows(options.header_rows))
    }

    fn list_sheets(&self) -> Result<Vec<String>> {
        Ok(vec![CSV_SHEET.to_string()])
    }

    fn default_sheet(&self) -> Option<String> {
        Some(CSV_SHEET.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetnav_grid::Coordinate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_csv_read_all() {
        let file = create_test_csv("Name,Hours\nAnn,40\nBob,37.5\n");

        let source = CsvSource::new(file.path()).unwrap();
        let data = source.read_all().unwrap();

        assert_eq!(data.len(), 3);
        assert_eq!(data[0], vec!["Name", "Hours"]);
        assert_eq!(data[2], vec!["Bob", "37.5"]);
    }

    #[test]
    fn test_csv_read_sheet_typed() {
        let file = create_test_csv("Name,Hours,Week\nAnn,40,2020-03-06\nBob,,\n");

        let source = CsvSource::new(file.path()).unwrap();
        let grid = source.read_sheet(CSV_SHEET, &SheetOptions::raw()).unwrap();

        assert_eq!(grid.dimensions(), (3, 3));
        assert_eq!(grid.get(Coordinate::new(1, 1)), Some(&CellValue::Number(40.0)));
        assert_eq!(
            grid.get(Coordinate::new(1, 2)).and_then(CellValue::as_date),
            NaiveDate::from_ymd_opt(2020, 3, 6)
        );
        assert_eq!(grid.get(Coordinate::new(2, 1)), Some(&CellValue::Empty));
    }

    #[test]
    fn test_csv_header_rows() {
        let file = create_test_csv("Report,,\nName,Hours,\nAnn,40,\n");

        let source = CsvSource::new(file.path()).unwrap();
        let grid = source
            .read_sheet(CSV_SHEET, &SheetOptions::with_header_rows(1))
            .unwrap();

        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.get(Coordinate::new(0, 0)), Some(&CellValue::from("Name")));
    }

    #[test]
    fn test_csv_ragged_padded() {
        let file = create_test_csv("a,b,c\nd\n");

        let source = CsvSource::new(file.path()).unwrap();
        let grid = source.read_sheet(CSV_SHEET, &SheetOptions::raw()).unwrap();
        assert_eq!(grid.dimensions(), (2, 3));
    }

    #[test]
    fn test_csv_ragged_strict() {
        let file = create_test_csv("a,b,c\nd\n");

        let source = CsvSource::with_options(file.path(), CsvOptions::strict()).unwrap();
        let result = source.read_sheet(CSV_SHEET, &SheetOptions::raw());
        assert!(matches!(result, Err(DataError::Grid(_))));
    }

    #[test]
    fn test_csv_tsv() {
        let file = create_test_csv("Name\tHours\nAnn\t40\n");

        let source = CsvSource::with_options(file.path(), CsvOptions::tsv()).unwrap();
        let data = source.read_all().unwrap();

        assert_eq!(data[0], vec!["Name", "Hours"]);
    }

    #[test]
    fn test_csv_semicolon() {
        let file = create_test_csv("Name;Hours\nAnn;40\n");

        let source = CsvSource::with_options(file.path(), CsvOptions::semicolon()).unwrap();
        let data = source.read_all().unwrap();

        assert_eq!(data[1], vec!["Ann", "40"]);
    }

    #[test]
    fn test_csv_quoted_fields() {
        let csv_content = r#"Name,Description
"Ann","A ""quoted"" value"
"Bob","Value with, comma"
"#;
        let file = create_test_csv(csv_content);

        let source = CsvSource::new(file.path()).unwrap();
        let data = source.read_all().unwrap();

        assert_eq!(data[1][1], r#"A "quoted" value"#);
        assert_eq!(data[2][1], "Value with, comma");
    }

    #[test]
    fn test_csv_unknown_sheet() {
        let file = create_test_csv("a\n");

        let source = CsvSource::new(file.path()).unwrap();
        assert!(matches!(
            source.read_sheet("Tech", &SheetOptions::raw()),
            Err(DataError::SheetNotFound(_))
        ));
        assert_eq!(source.list_sheets().unwrap(), vec![CSV_SHEET.to_string()]);
        assert_eq!(source.default_sheet(), Some(CSV_SHEET.to_string()));
    }

    #[test]
    fn test_csv_file_not_found() {
        let result = CsvSource::new("/nonexistent/path/file.csv");
        assert!(matches!(result, Err(DataError::FileNotFound(_))));
    }

    #[test]
    fn test_parse_field() {
        assert_eq!(CsvSource::parse_field(""), CellValue::Empty);
        assert_eq!(CsvSource::parse_field("-12.5"), CellValue::Number(-12.5));
        assert_eq!(CsvSource::parse_field("NaN"), CellValue::from("NaN"));
        assert_eq!(CsvSource::parse_field("Bill Rate"), CellValue::from("Bill Rate"));
    }
}
