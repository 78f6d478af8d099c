//! Excel workbook reading.
//!
//! Opens an .xlsx package, resolves its sheet list and shared strings, and
//! reads worksheets into dense rows of [`CellValue`]s.

use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::{content_type as ct, relationship_type};
use crate::ooxml::opc::OpcPackage;
use crate::ooxml::xlsx::parsers::{parse_workbook_xml, parse_worksheet_xml};
use crate::ooxml::xlsx::shared_strings::SharedStrings;
use crate::sheet::CellValue;
use std::path::Path;
use tracing::debug;

/// Main-part content types accepted as workbooks.
const WORKBOOK_CONTENT_TYPES: [&str; 3] = [ct::SML_SHEET_MAIN, ct::SML_SHEET_MACRO_MAIN, ct::SML_TEMPLATE_MAIN];

/// Information about a worksheet, from the workbook's sheet list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorksheetInfo {
    pub name: String,
    pub sheet_id: u32,
    /// Relationship id of the worksheet part, relative to the workbook part
    pub relationship_id: String,
}

/// An Excel (.xlsx) workbook opened for reading.
///
/// # Examples
///
/// ```rust,no_run
/// use pathtint::ooxml::xlsx::Workbook;
///
/// let workbook = Workbook::open("expression.xlsx")?;
/// for row in workbook.worksheet_rows(0)? {
///     println!("{:?}", row);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Workbook {
    opc: OpcPackage,
    sheets: Vec<WorksheetInfo>,
    shared_strings: SharedStrings,
}

impl Workbook {
    /// Open an .xlsx workbook from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_opc(OpcPackage::open(path)?)
    }

    /// Load an .xlsx workbook from its bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_opc(OpcPackage::from_bytes(data)?)
    }

    fn from_opc(opc: OpcPackage) -> Result<Self> {
        let main_part = opc
            .main_document_part()
            .map_err(|e| OoxmlError::PartNotFound(format!("main workbook part: {}", e)))?;

        let content_type = main_part.content_type();
        if !WORKBOOK_CONTENT_TYPES.contains(&content_type) {
            return Err(OoxmlError::InvalidContentType {
                expected: WORKBOOK_CONTENT_TYPES.join(" or "),
                got: content_type.to_string(),
            });
        }

        let sheets = parse_workbook_xml(main_part.blob())?;

        let shared_strings = match main_part.rels().part_with_reltype(relationship_type::SHARED_STRINGS) {
            Ok(rel) => {
                let partname = rel.target_partname()?;
                SharedStrings::parse(opc.get_part(&partname)?.blob())?
            },
            Err(_) => SharedStrings::new(),
        };

        debug!(
            sheets = sheets.len(),
            shared_strings = shared_strings.len(),
            "workbook loaded"
        );

        Ok(Self {
            opc,
            sheets,
            shared_strings,
        })
    }

    /// Sheets in workbook order.
    pub fn worksheets(&self) -> &[WorksheetInfo] {
        &self.sheets
    }

    pub fn worksheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Rows of the worksheet at `index` as dense vectors.
    ///
    /// Leading blank rows are dropped; gaps between used rows become empty
    /// rows. Every row is padded with [`CellValue::Empty`] to the widest used
    /// column.
    pub fn worksheet_rows(&self, index: usize) -> Result<Vec<Vec<CellValue>>> {
        let info = self
            .sheets
            .get(index)
            .ok_or_else(|| OoxmlError::PartNotFound(format!("worksheet #{}", index + 1)))?;

        let main_part = self.opc.main_document_part()?;
        let partname = main_part.related_partname(&info.relationship_id)?;
        let cells = parse_worksheet_xml(self.opc.get_part(&partname)?.blob(), &self.shared_strings)?;

        let width = cells
            .values()
            .filter_map(|row| row.keys().next_back())
            .max()
            .copied()
            .unwrap_or(0) as usize;

        let (Some(&first), Some(&last)) = (cells.keys().next(), cells.keys().next_back()) else {
            return Ok(Vec::new());
        };

        let mut rows = Vec::with_capacity((last - first + 1) as usize);
        for row_num in first..=last {
            let mut row = vec![CellValue::Empty; width];
            if let Some(row_cells) = cells.get(&row_num) {
                for (&col, value) in row_cells {
                    row[col as usize - 1] = value.clone();
                }
            }
            rows.push(row);
        }

        Ok(rows)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    /// A workbook whose first sheet holds `sheet_data` and whose shared
    /// strings are `strings`.
    pub(crate) fn minimal_xlsx(sheet_data: &str, strings: &[&str]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();

        writer.start_file("[Content_Types].xml", options).unwrap();
        writer.write_all(br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
<Override PartName="/xl/worksheets/sheet2.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
<Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>
</Types>"#).unwrap();

        writer.start_file("_rels/.rels", options).unwrap();
        writer.write_all(br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#).unwrap();

        writer.start_file("xl/workbook.xml", options).unwrap();
        writer.write_all(br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Data" sheetId="1" r:id="rId1"/><sheet name="Other" sheetId="2" r:id="rId2"/></sheets></workbook>"#).unwrap();

        writer.start_file("xl/_rels/workbook.xml.rels", options).unwrap();
        writer.write_all(br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="/xl/worksheets/sheet2.xml"/>
<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>
</Relationships>"#).unwrap();

        writer.start_file("xl/worksheets/sheet1.xml", options).unwrap();
        writer
            .write_all(
                format!(
                    r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{sheet_data}</sheetData></worksheet>"#
                )
                .as_bytes(),
            )
            .unwrap();

        writer.start_file("xl/worksheets/sheet2.xml", options).unwrap();
        writer.write_all(br#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData><row r="1"><c r="A1"><v>99</v></c></row></sheetData></worksheet>"#).unwrap();

        let items: String = strings
            .iter()
            .map(|s| format!("<si><t>{}</t></si>", s))
            .collect();
        writer.start_file("xl/sharedStrings.xml", options).unwrap();
        writer
            .write_all(
                format!(r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">{items}</sst>"#)
                    .as_bytes(),
            )
            .unwrap();

        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_first_sheet_rows() {
        let data = r#"<row r="2"><c r="A2" t="s"><v>0</v></c><c r="B2" t="s"><v>1</v></c></row>
<row r="3"><c r="A3" t="s"><v>2</v></c><c r="B3"><v>2.5</v></c></row>
<row r="5"><c r="C5"><v>1</v></c></row>"#;
        let workbook = Workbook::from_bytes(minimal_xlsx(data, &["Gene", "Value", "EGFR"])).unwrap();

        assert_eq!(workbook.worksheet_names(), vec!["Data", "Other"]);

        let rows = workbook.worksheet_rows(0).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(
            rows[0],
            vec![
                CellValue::String("Gene".into()),
                CellValue::String("Value".into()),
                CellValue::Empty
            ]
        );
        assert_eq!(rows[1][1], CellValue::Float(2.5));
        assert!(rows[2].iter().all(|c| *c == CellValue::Empty));
        assert_eq!(rows[3][2], CellValue::Int(1));

        assert_eq!(workbook.worksheet_rows(1).unwrap(), vec![vec![CellValue::Int(99)]]);
        assert!(workbook.worksheet_rows(2).is_err());
    }

    #[test]
    fn test_empty_sheet() {
        let workbook = Workbook::from_bytes(minimal_xlsx("", &[])).unwrap();
        assert!(workbook.worksheet_rows(0).unwrap().is_empty());
    }
}
