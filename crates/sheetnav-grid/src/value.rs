//! Cell values.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A scalar worksheet cell value.
///
/// `CellValue` is used as a hash key by the finder index, so equality and
/// hashing are value based. Numbers compare by a canonical bit pattern:
/// `0.0` and `-0.0` are the same value, and all NaN payloads are the same
/// value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum CellValue {
    /// Empty / missing cell
    #[default]
    Empty,
    /// Any numeric cell (Excel stores integers as doubles too)
    Number(f64),
    /// Plain string
    Text(String),
    /// Boolean
    Bool(bool),
    /// Date or date-time
    Date(NaiveDateTime),
}

impl CellValue {
    /// Canonical bit pattern for numeric cells.
    pub fn canonical_number_bits(n: f64) -> u64 {
        if n == 0.0 {
            return 0.0_f64.to_bits();
        }
        if n.is_nan() {
            return f64::NAN.to_bits();
        }
        n.to_bits()
    }

    /// True for the empty marker and for NaN numbers.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Number(n) => n.is_nan(),
            _ => false,
        }
    }

    /// True for a non-NaN number.
    pub fn is_numeric(&self) -> bool {
        matches!(self, CellValue::Number(n) if !n.is_nan())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if !n.is_nan() => Some(*n),
            _ => None,
        }
    }

    /// The number, or `0.0` for anything that is not a number.
    ///
    /// Used by report aggregation where blank cells count as zero hours/fees.
    pub fn number_or_zero(&self) -> f64 {
        self.as_f64().unwrap_or(0.0)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(dt) => Some(dt.date()),
            _ => None,
        }
    }

    /// Convert an Excel serial date number (1900 date system) to a cell value.
    pub fn from_excel_serial(serial: f64) -> Self {
        // Serial 0 is 1899-12-30 once the 1900 leap-year bug is folded in.
        let Some(epoch) = NaiveDate::from_ymd_opt(1899, 12, 30) else {
            return CellValue::Number(serial);
        };
        let millis = (serial * 86_400_000.0).round() as i64;
        match epoch
            .and_time(NaiveTime::MIN)
            .checked_add_signed(chrono::Duration::milliseconds(millis))
        {
            Some(dt) => CellValue::Date(dt),
            None => CellValue::Number(serial),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            CellValue::Empty => 0,
            CellValue::Number(_) => 1,
            CellValue::Text(_) => 2,
            CellValue::Bool(_) => 3,
            CellValue::Date(_) => 4,
        }
    }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Empty, CellValue::Empty) => true,
            (CellValue::Number(a), CellValue::Number(b)) => {
                Self::canonical_number_bits(*a) == Self::canonical_number_bits(*b)
            }
            (CellValue::Text(a), CellValue::Text(b)) => a == b,
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            (CellValue::Date(a), CellValue::Date(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for CellValue {}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            CellValue::Empty => {}
            CellValue::Number(n) => Self::canonical_number_bits(*n).hash(state),
            CellValue::Text(s) => s.hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Date(dt) => dt.hash(state),
        }
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b)) => {
                let a = f64::from_bits(Self::canonical_number_bits(*a));
                let b = f64::from_bits(Self::canonical_number_bits(*b));
                a.total_cmp(&b)
            }
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Date(a), CellValue::Date(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{:.0}", n)
                } else {
                    write!(f, "{}", n)
                }
            }
            CellValue::Text(s) => f.write_str(s),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Date(dt) => {
                if dt.time() == NaiveTime::MIN {
                    write!(f, "{}", dt.format("%Y-%m-%d"))
                } else {
                    write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S"))
                }
            }
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<&String> for CellValue {
    fn from(s: &String) -> Self {
        CellValue::Text(s.clone())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(f64::from(n))
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d.and_time(NaiveTime::MIN))
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::Date(dt)
    }
}

impl From<&CellValue> for CellValue {
    fn from(v: &CellValue) -> Self {
        v.clone()
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(CellValue::Empty, Into::into)
    }
}
