//! Header-plus-rows tables and entity/value extraction.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::common::error::{Error, Result};
use crate::sheet::types::CellValue;

/// A table whose first row is the header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Split `rows` into header and data rows. Header cells are rendered as text.
    pub fn from_rows(mut rows: Vec<Vec<CellValue>>) -> Self {
        if rows.is_empty() {
            return Self::default();
        }

        let headers = rows
            .remove(0)
            .iter()
            .map(|cell| match cell {
                CellValue::Empty => String::new(),
                CellValue::String(s) => s.clone(),
                other => other.as_key().unwrap_or_default(),
            })
            .collect();

        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Index of the column named `name` (exact match, first occurrence).
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::MissingColumn {
                column: name.to_string(),
                available: self.headers.clone(),
            })
    }

    /// Build the entity-to-value map from the `key_column` and `value_column` columns.
    ///
    /// Rows without a usable key are skipped. When a key repeats, the last
    /// row wins.
    pub fn entity_values(&self, key_column: &str, value_column: &str) -> Result<EntityValues> {
        let key_idx = self.column_index(key_column)?;
        let value_idx = self.column_index(value_column)?;

        let mut values = EntityValues::default();
        for (i, row) in self.rows.iter().enumerate() {
            // 1-based file row, counting the header
            let row_number = i + 2;
            let cell = |idx: usize| row.get(idx).unwrap_or(&CellValue::Empty);

            let Some(key) = cell(key_idx).as_key() else {
                debug!(row = row_number, "row without entity name skipped");
                continue;
            };
            let value = cell(value_idx).as_number(row_number, value_column)?;

            if values.insert(key.clone(), value).is_some() {
                warn!(entity = %key, row = row_number, "duplicate entity name, last row wins");
            }
        }

        Ok(values)
    }
}

/// Mapping from entity name to an optional numeric value.
///
/// A present key with `None` is a known entity without a value; it gets no color.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityValues {
    values: HashMap<String, Option<f64>>,
}

impl EntityValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous one if the key was present.
    pub fn insert(&mut self, key: String, value: Option<f64>) -> Option<Option<f64>> {
        self.values.insert(key, value)
    }

    /// The value for `key`: None if the key is unknown, `Some(None)` if it has no value.
    pub fn get(&self, key: &str) -> Option<Option<f64>> {
        self.values.get(key).copied()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<f64>)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, Option<f64>)> for EntityValues {
    fn from_iter<I: IntoIterator<Item = (String, Option<f64>)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(text: &str) -> CellValue {
        CellValue::String(text.to_string())
    }

    fn table() -> Table {
        Table::from_rows(vec![
            vec![s("Gene"), s("Value"), s("Note")],
            vec![s("GeneA"), CellValue::Int(0)],
            vec![s("GeneB"), s("5")],
            vec![CellValue::Empty, CellValue::Int(3)],
            vec![s("GeneD"), s("NA")],
            vec![s("GeneA"), CellValue::Float(2.5)],
        ])
    }

    #[test]
    fn test_entity_values() {
        let values = table().entity_values("Gene", "Value").unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(values.get("GeneA"), Some(Some(2.5)));
        assert_eq!(values.get("GeneB"), Some(Some(5.0)));
        assert_eq!(values.get("GeneD"), Some(None));
        assert_eq!(values.get("GeneZ"), None);
    }

    #[test]
    fn test_missing_column() {
        let err = table().entity_values("Symbol", "Value").unwrap_err();
        match err {
            Error::MissingColumn { column, available } => {
                assert_eq!(column, "Symbol");
                assert_eq!(available, vec!["Gene", "Value", "Note"]);
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_value_names_row() {
        let table = Table::from_rows(vec![
            vec![s("Gene"), s("Value")],
            vec![s("GeneA"), s("1")],
            vec![s("GeneB"), s("high")],
        ]);
        let err = table.entity_values("Gene", "Value").unwrap_err();
        assert!(matches!(err, Error::InvalidValue { row: 3, .. }));
    }

    #[test]
    fn test_empty_table() {
        let table = Table::from_rows(Vec::new());
        assert!(table.headers().is_empty());
        assert!(matches!(
            table.entity_values("Gene", "Value"),
            Err(Error::MissingColumn { .. })
        ));
    }
}
