//! Common types for tabular input.

use std::path::Path;

use crate::common::error::{Error, Result};

/// Types of data that can be stored in a cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Empty cell
    Empty,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point number
    Float(f64),
    /// String value
    String(String),
    /// Error value such as `#N/A` or `#DIV/0!`
    Error(String),
}

/// Text tokens read as "no value".
const NA_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// True if `text` is one of the missing-value tokens.
#[inline]
pub fn is_na_token(text: &str) -> bool {
    NA_TOKENS.contains(&text)
}

impl CellValue {
    /// The cell as an entity key, None for empty and missing-value cells.
    pub fn as_key(&self) -> Option<String> {
        match self {
            CellValue::Empty | CellValue::Error(_) => None,
            CellValue::String(s) if is_na_token(s) => None,
            CellValue::String(s) => Some(s.clone()),
            CellValue::Int(i) => Some(i.to_string()),
            CellValue::Float(f) if f.is_nan() => None,
            CellValue::Float(f) => Some(f.to_string()),
            CellValue::Bool(b) => Some(if *b { "True" } else { "False" }.to_string()),
        }
    }

    /// The cell as a numeric value.
    ///
    /// `Ok(None)` means undefined: empty, error, NaN or a missing-value token.
    /// Text that is neither numeric nor a missing-value token fails with
    /// [`Error::InvalidValue`] naming the (1-based, header included) row.
    pub fn as_number(&self, row: usize, column: &str) -> Result<Option<f64>> {
        let invalid = |value: String| Error::InvalidValue {
            row,
            column: column.to_string(),
            value,
        };

        match self {
            CellValue::Empty | CellValue::Error(_) => Ok(None),
            CellValue::Int(i) => Ok(Some(*i as f64)),
            CellValue::Float(f) => Ok((!f.is_nan()).then_some(*f)),
            CellValue::Bool(b) => Err(invalid(b.to_string())),
            CellValue::String(s) => parse_number(s).ok_or_else(|| invalid(s.clone())),
        }
    }
}

/// Parse a numeric field. The outer None means "not a number"; `Some(None)`
/// is a missing value.
pub fn parse_number(text: &str) -> Option<Option<f64>> {
    if is_na_token(text) {
        return Some(None);
    }

    let trimmed = text.trim();
    if is_na_token(trimmed) {
        return Some(None);
    }

    fast_float2::parse::<f64, _>(trimmed)
        .ok()
        .map(|value| (!value.is_nan()).then_some(value))
}

/// Supported input table formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Csv,
    Xlsx,
}

impl DataFormat {
    /// Select the format from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("csv") => Ok(DataFormat::Csv),
            Some("xlsx") => Ok(DataFormat::Xlsx),
            _ => Err(Error::UnsupportedDataFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_format_from_extension() {
        assert_eq!(DataFormat::from_path(Path::new("expr.CSV")).unwrap(), DataFormat::Csv);
        assert_eq!(DataFormat::from_path(Path::new("a/b.Xlsx")).unwrap(), DataFormat::Xlsx);
        assert!(matches!(
            DataFormat::from_path(Path::new("data.txt")),
            Err(Error::UnsupportedDataFormat { .. })
        ));
        assert!(DataFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("2.5"), Some(Some(2.5)));
        assert_eq!(parse_number(" -3 "), Some(Some(-3.0)));
        assert_eq!(parse_number("1e3"), Some(Some(1000.0)));
        assert_eq!(parse_number("NA"), Some(None));
        assert_eq!(parse_number("#N/A"), Some(None));
        assert_eq!(parse_number(""), Some(None));
        assert_eq!(parse_number("nan"), Some(None));
        assert_eq!(parse_number("high"), None);
    }

    #[test]
    fn test_cell_as_number() {
        assert_eq!(CellValue::Int(4).as_number(2, "Value").unwrap(), Some(4.0));
        assert_eq!(CellValue::Float(f64::NAN).as_number(2, "Value").unwrap(), None);
        assert_eq!(CellValue::Error("#N/A".into()).as_number(2, "Value").unwrap(), None);

        let err = CellValue::String("high".into()).as_number(7, "Value").unwrap_err();
        assert!(matches!(err, Error::InvalidValue { row: 7, ref value, .. } if value == "high"));
    }

    #[test]
    fn test_cell_as_key() {
        assert_eq!(CellValue::String("TP53".into()).as_key().as_deref(), Some("TP53"));
        assert_eq!(CellValue::Int(42).as_key().as_deref(), Some("42"));
        assert_eq!(CellValue::Float(2.5).as_key().as_deref(), Some("2.5"));
        assert_eq!(CellValue::String("NA".into()).as_key(), None);
        assert_eq!(CellValue::Empty.as_key(), None);
    }
}
