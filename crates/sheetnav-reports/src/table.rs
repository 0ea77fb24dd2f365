//! Plain-text tables for narrative reports.

use std::fmt;

use sheetnav_grid::CellValue;

/// Format a number for report text: integers without decimals, otherwise
/// at most two decimals with trailing zeros removed.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        return format!("{:.0}", n);
    }
    let s = format!("{:.2}", n);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Report text for a cell value
pub fn format_cell(value: &CellValue) -> String {
    match value {
        CellValue::Number(n) if !n.is_nan() => format_number(*n),
        other => other.to_string(),
    }
}

/// A column-aligned text table.
///
/// The first column is left-aligned (row labels), the rest are
/// right-aligned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; short rows are padded with blanks
    pub fn push_row<S: Into<String>>(&mut self, row: impl IntoIterator<Item = S>) {
        let mut row: Vec<String> = row.into_iter().map(Into::into).collect();
        if row.len() < self.headers.len() {
            row.resize(self.headers.len(), String::new());
        }
        self.rows.push(row);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    fn widths(&self) -> Vec<usize> {
        let cols = self
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0);
        let mut widths = vec![0; cols];
        for line in std::iter::once(&self.headers).chain(self.rows.iter()) {
            for (i, cell) in line.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
        widths
    }

    fn write_line(f: &mut fmt::Formatter<'_>, line: &[String], widths: &[usize]) -> fmt::Result {
        let mut out = String::new();
        for (i, width) in widths.iter().enumerate() {
            let cell = line.get(i).map_or("", String::as_str);
            if i == 0 {
                out.push_str(&format!("{:<width$}", cell, width = width));
            } else {
                out.push_str("  ");
                out.push_str(&format!("{:>width$}", cell, width = width));
            }
        }
        writeln!(f, "{}", out.trim_end())
    }
}

impl fmt::Display for TextTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        Self::write_line(f, &self.headers, &widths)?;
        for row in &self.rows {
            Self::write_line(f, row, &widths)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(40.0), "40");
        assert_eq!(format_number(37.5), "37.5");
        assert_eq!(format_number(0.126), "0.13");
        assert_eq!(format_number(-8.0), "-8");
        assert_eq!(format_number(1234.10), "1234.1");
    }

    #[test]
    fn test_alignment() {
        let mut table = TextTable::new(["Code", "Hours"]);
        table.push_row(["A1", "8"]);
        table.push_row(["Design", "37.5"]);

        let text = table.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Code    Hours");
        assert_eq!(lines[1], "A1          8");
        assert_eq!(lines[2], "Design   37.5");
    }

    #[test]
    fn test_short_rows_padded() {
        let mut table = TextTable::new(["a", "b", "c"]);
        table.push_row(["x"]);
        assert_eq!(table.rows()[0].len(), 3);
        assert_eq!(table.len(), 1);
    }
}
