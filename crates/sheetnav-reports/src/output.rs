//! Saving reports to the output directory.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook};
use sheetnav_grid::CellValue;
use tracing::info;

use crate::error::{ReportError, Result};

/// Writes `<output_dir>/<name> <tag>.<ext>` report files
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn report_path(&self, name: &str, tag: &str, ext: &str) -> PathBuf {
        self.output_dir.join(format!("{} {}.{}", name, tag, ext))
    }

    pub fn write_text(&self, name: &str, tag: &str, text: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.report_path(name, tag, "txt");
        fs::write(&path, text)?;
        info!(path = %path.display(), "Result has been saved");
        Ok(path)
    }

    pub fn write_sheet(&self, name: &str, tag: &str, rows: &[Vec<CellValue>]) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.report_path(name, tag, "xlsx");
        let mut workbook = sheet_workbook(name, rows)?;
        workbook.save(&path)?;
        info!(path = %path.display(), "Result has been saved");
        Ok(path)
    }
}

/// A single-sheet workbook holding `rows` from A1
pub fn sheet_workbook(sheet_name: &str, rows: &[Vec<CellValue>]) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (i, row) in rows.iter().enumerate() {
        for (j, value) in row.iter().enumerate() {
            let (Ok(r), Ok(c)) = (u32::try_from(i), u16::try_from(j)) else {
                return Err(ReportError::layout(sheet_name, "report exceeds the worksheet size"));
            };
            match value {
                CellValue::Empty => {}
                CellValue::Number(n) if n.is_nan() => {}
                CellValue::Number(n) => {
                    worksheet.write_number(r, c, *n)?;
                }
                CellValue::Text(s) => {
                    worksheet.write_string(r, c, s)?;
                }
                CellValue::Bool(b) => {
                    worksheet.write_boolean(r, c, *b)?;
                }
                CellValue::Date(dt) => {
                    let serial = (*dt - excel_epoch()).num_seconds() as f64 / 86_400.0;
                    worksheet.write_number_with_format(r, c, serial, &date_format)?;
                }
            }
        }
    }
    Ok(workbook)
}

fn excel_epoch() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .unwrap_or(NaiveDate::MIN)
        .and_time(chrono::NaiveTime::MIN)
}
