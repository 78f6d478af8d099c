//! Tabular input: entity names and their values from .csv or .xlsx files.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pathtint::sheet::load_entity_values;
//! use std::path::Path;
//!
//! let values = load_entity_values(Path::new("expression.xlsx"), "Gene", "Value")?;
//! println!("{} entities", values.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Both formats are read into a [`Table`] (first row is the header), from
//! which the key and value columns are extracted into [`EntityValues`].

pub mod delimited;
pub mod table;
pub mod types;

pub use table::{EntityValues, Table};
pub use types::{CellValue, DataFormat};

use std::path::Path;

use tracing::info;

use crate::common::error::Result;
use crate::ooxml::xlsx::Workbook;

/// Read the table in `path`, choosing the reader by file extension.
///
/// `.xlsx` files are read from their first worksheet.
pub fn read_table(path: &Path) -> Result<Table> {
    match DataFormat::from_path(path)? {
        DataFormat::Csv => delimited::read_csv_path(path),
        DataFormat::Xlsx => {
            let workbook = Workbook::open(path)?;
            Ok(Table::from_rows(workbook.worksheet_rows(0)?))
        },
    }
}

/// Load the entity-to-value map from `path`.
pub fn load_entity_values(path: &Path, key_column: &str, value_column: &str) -> Result<EntityValues> {
    let table = read_table(path)?;
    let values = table.entity_values(key_column, value_column)?;
    info!(
        path = %path.display(),
        rows = table.rows().len(),
        entities = values.len(),
        "data table loaded"
    );
    Ok(values)
}
