//! Parser for Excel workbook.xml files.
//!
//! Only the `<sheets>` list is read: sheet names, ids and the relationship
//! ids pointing at the worksheet parts.

use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::xlsx::workbook::WorksheetInfo;
use quick_xml::Reader;
use quick_xml::events::Event;

const INITIAL_SHEETS_CAPACITY: usize = 16;

/// Parse workbook.xml content into the sheet list, in workbook order.
pub fn parse_workbook_xml(xml: &[u8]) -> Result<Vec<WorksheetInfo>> {
    let mut reader = Reader::from_reader(xml);
    let mut sheets = Vec::with_capacity(INITIAL_SHEETS_CAPACITY);

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.local_name().as_ref() == b"sheet" => {
                let mut name = None;
                let mut sheet_id = None;
                let mut relationship_id = None;

                for attr in e.attributes() {
                    let attr = attr?;
                    match (attr.key.prefix().is_some(), attr.key.local_name().as_ref()) {
                        (false, b"name") => name = Some(attr.unescape_value()?.into_owned()),
                        (false, b"sheetId") => sheet_id = atoi_simd::parse::<u32>(&attr.value).ok(),
                        (true, b"id") => relationship_id = Some(attr.unescape_value()?.into_owned()),
                        _ => {},
                    }
                }

                if let (Some(name), Some(sheet_id), Some(relationship_id)) = (name, sheet_id, relationship_id) {
                    sheets.push(WorksheetInfo {
                        name,
                        sheet_id,
                        relationship_id,
                    });
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::Xml(e.to_string())),
            _ => {},
        }
    }

    Ok(sheets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sheets_in_order() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <bookViews><workbookView activeTab="1"/></bookViews>
  <sheets>
    <sheet name="Expression" sheetId="3" r:id="rId1"/>
    <sheet name="Notes &amp; Refs" sheetId="1" r:id="rId2"/>
    <sheet name="Broken"/>
  </sheets>
</workbook>"#;

        let sheets = parse_workbook_xml(xml).unwrap();
        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0].name, "Expression");
        assert_eq!(sheets[0].sheet_id, 3);
        assert_eq!(sheets[0].relationship_id, "rId1");
        assert_eq!(sheets[1].name, "Notes & Refs");
    }
}
