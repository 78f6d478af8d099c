//! quick-xml parsers for the SpreadsheetML parts the reader needs.

pub mod workbook_parser;
pub mod worksheet_parser;

pub use workbook_parser::parse_workbook_xml;
pub use worksheet_parser::{parse_worksheet_xml, reference_to_coords};
