//! Excel (.xlsx) workbook reading.
//!
//! Reads the sheet list, the shared strings table and worksheet cell values
//! from SpreadsheetML packages. Styles, formulas and charts are not
//! interpreted: formula cells yield their cached value.

pub mod parsers;
pub mod shared_strings;
pub mod workbook;

pub use shared_strings::SharedStrings;
pub use workbook::{Workbook, WorksheetInfo};
