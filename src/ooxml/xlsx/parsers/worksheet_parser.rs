//! Parser for Excel worksheet XML files.
//!
//! Reads `<sheetData>` into a sparse row/column map of cell values. Shared
//! string indices are resolved against the workbook's shared strings table
//! while parsing.

use std::collections::BTreeMap;

use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::text::push_reference;
use crate::ooxml::xlsx::shared_strings::SharedStrings;
use crate::sheet::CellValue;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Sparse cells keyed by 1-based row, then 1-based column.
pub type SheetCells = BTreeMap<u32, BTreeMap<u32, CellValue>>;

/// A `<c>` element being read.
#[derive(Default)]
struct PendingCell {
    col: u32,
    cell_type: Option<String>,
    value: Option<String>,
    inline: Option<String>,
}

/// Which text-bearing child of `<c>` the reader is in.
#[derive(Clone, Copy, PartialEq, Eq)]
enum TextTarget {
    None,
    Value,
    Inline,
}

/// Parse worksheet XML content to extract cell data.
pub fn parse_worksheet_xml(xml: &[u8], shared_strings: &SharedStrings) -> Result<SheetCells> {
    let mut reader = Reader::from_reader(xml);
    let mut cells = SheetCells::new();

    let mut row_num = 0u32;
    let mut last_col = 0u32;
    let mut cell: Option<PendingCell> = None;
    let mut target = TextTarget::None;
    let mut in_phonetic = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| OoxmlError::Xml(e.to_string()))?;

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                match e.local_name().as_ref() {
                    b"row" => {
                        row_num = row_number(e)?.unwrap_or(row_num + 1);
                        last_col = 0;
                    },
                    b"c" => {
                        let pending = start_cell(e, last_col)?;
                        last_col = pending.col;
                        if is_empty {
                            finish_cell(&mut cells, row_num, pending, shared_strings)?;
                        } else {
                            cell = Some(pending);
                        }
                    },
                    b"v" if cell.is_some() && !is_empty => target = TextTarget::Value,
                    b"t" if cell.is_some() && !is_empty && !in_phonetic => target = TextTarget::Inline,
                    b"rPh" if !is_empty => in_phonetic = true,
                    _ => {},
                }
            },
            Event::End(ref e) => match e.local_name().as_ref() {
                b"c" => {
                    if let Some(pending) = cell.take() {
                        finish_cell(&mut cells, row_num, pending, shared_strings)?;
                    }
                    target = TextTarget::None;
                },
                b"v" | b"t" => target = TextTarget::None,
                b"rPh" => in_phonetic = false,
                _ => {},
            },
            Event::Text(ref t) if target != TextTarget::None => {
                let text = std::str::from_utf8(t)?;
                if let Some(pending) = cell.as_mut() {
                    pending.text_mut(target).push_str(text);
                }
            },
            Event::CData(ref t) if target != TextTarget::None => {
                let text = std::str::from_utf8(t)?;
                if let Some(pending) = cell.as_mut() {
                    pending.text_mut(target).push_str(text);
                }
            },
            Event::GeneralRef(ref r) if target != TextTarget::None => {
                if let Some(pending) = cell.as_mut() {
                    push_reference(pending.text_mut(target), r)?;
                }
            },
            Event::Eof => break,
            _ => {},
        }
    }

    Ok(cells)
}

impl PendingCell {
    fn text_mut(&mut self, target: TextTarget) -> &mut String {
        match target {
            TextTarget::Inline => self.inline.get_or_insert_with(String::new),
            _ => self.value.get_or_insert_with(String::new),
        }
    }
}

fn row_number(e: &BytesStart<'_>) -> Result<Option<u32>> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"r" {
            return Ok(atoi_simd::parse::<u32>(&attr.value).ok());
        }
    }
    Ok(None)
}

/// Read the attributes of `<c>`. Cells without a reference follow the previous one.
fn start_cell(e: &BytesStart<'_>, last_col: u32) -> Result<PendingCell> {
    let mut pending = PendingCell {
        col: last_col + 1,
        ..Default::default()
    };

    for attr in e.attributes() {
        let attr = attr?;
        match attr.key.as_ref() {
            b"r" => {
                let reference = attr.unescape_value()?;
                pending.col = reference_to_coords(&reference)?.0;
            },
            b"t" => pending.cell_type = Some(attr.unescape_value()?.into_owned()),
            _ => {},
        }
    }

    Ok(pending)
}

fn finish_cell(cells: &mut SheetCells, row: u32, pending: PendingCell, shared_strings: &SharedStrings) -> Result<()> {
    let value = match (pending.cell_type.as_deref(), pending.value, pending.inline) {
        (Some("inlineStr"), _, Some(text)) => CellValue::String(text),
        (Some("s"), Some(v), _) => {
            let index = atoi_simd::parse::<usize>(v.trim().as_bytes())
                .map_err(|_| OoxmlError::InvalidFormat(format!("invalid shared string index '{}'", v)))?;
            let text = shared_strings.get(index).ok_or_else(|| {
                OoxmlError::InvalidFormat(format!("shared string index {} out of range", index))
            })?;
            CellValue::String(text.to_string())
        },
        (Some("str") | Some("d"), Some(v), _) => CellValue::String(v),
        (Some("b"), Some(v), _) => match v.trim() {
            "1" | "true" => CellValue::Bool(true),
            "0" | "false" => CellValue::Bool(false),
            _ => CellValue::Error("Invalid boolean value".to_string()),
        },
        (Some("e"), Some(v), _) => CellValue::Error(v),
        (_, Some(v), _) => {
            let v = v.trim();
            if let Ok(int_val) = atoi_simd::parse::<i64>(v.as_bytes()) {
                CellValue::Int(int_val)
            } else if let Ok(float_val) = fast_float2::parse::<f64, _>(v) {
                CellValue::Float(float_val)
            } else {
                CellValue::String(v.to_string())
            }
        },
        _ => return Ok(()),
    };

    cells.entry(row).or_default().insert(pending.col, value);
    Ok(())
}

/// Convert an Excel reference (e.g. `"B12"`, `"$AA$3"`) to 1-based (column, row).
pub fn reference_to_coords(reference: &str) -> Result<(u32, u32)> {
    let invalid = || OoxmlError::InvalidFormat(format!("Invalid reference: {}", reference));
    let bytes: Vec<u8> = reference.bytes().filter(|&b| b != b'$').collect();

    let col_str_end = bytes
        .iter()
        .position(|b| b.is_ascii_digit())
        .ok_or_else(invalid)?;
    if col_str_end == 0 {
        return Err(invalid());
    }

    // Column letters to number (A=1, B=2, ..., Z=26, AA=27, etc.)
    let mut col_num = 0u32;
    for &byte in &bytes[..col_str_end] {
        if !byte.is_ascii_alphabetic() {
            return Err(invalid());
        }
        col_num = col_num
            .checked_mul(26)
            .and_then(|n| n.checked_add((byte.to_ascii_uppercase() - b'A' + 1) as u32))
            .ok_or_else(invalid)?;
    }

    let row_num = atoi_simd::parse::<u32>(&bytes[col_str_end..]).map_err(|_| invalid())?;

    Ok((col_num, row_num))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings() -> SharedStrings {
        SharedStrings::parse(br#"<sst><si><t>Gene</t></si><si><t>Value</t></si><si><t>TP53</t></si></sst>"#)
            .unwrap()
    }

    #[test]
    fn test_reference_to_coords() {
        assert_eq!(reference_to_coords("A1").unwrap(), (1, 1));
        assert_eq!(reference_to_coords("Z9").unwrap(), (26, 9));
        assert_eq!(reference_to_coords("AA10").unwrap(), (27, 10));
        assert_eq!(reference_to_coords("$B$3").unwrap(), (2, 3));
        assert!(reference_to_coords("12").is_err());
        assert!(reference_to_coords("A").is_err());
    }

    #[test]
    fn test_cell_types() {
        let xml = br#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>
<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c></row>
<row r="2"><c r="A2" t="s"><v>2</v></c><c r="B2"><v>1.5</v></c><c r="C2"><v>7</v></c></row>
<row r="3"><c r="A3" t="inlineStr"><is><t>MY&amp;C</t></is></c><c r="B3" t="e"><v>#N/A</v></c><c r="C3" t="b"><v>1</v></c></row>
<row r="5"><c r="A5" t="str"><f>A1</f><v>Gene</v></c><c r="B5" s="1"/></row>
</sheetData></worksheet>"#;

        let cells = parse_worksheet_xml(xml, &strings()).unwrap();
        assert_eq!(cells[&1][&1], CellValue::String("Gene".into()));
        assert_eq!(cells[&2][&1], CellValue::String("TP53".into()));
        assert_eq!(cells[&2][&2], CellValue::Float(1.5));
        assert_eq!(cells[&2][&3], CellValue::Int(7));
        assert_eq!(cells[&3][&1], CellValue::String("MY&C".into()));
        assert_eq!(cells[&3][&2], CellValue::Error("#N/A".into()));
        assert_eq!(cells[&3][&3], CellValue::Bool(true));
        assert_eq!(cells[&5][&1], CellValue::String("Gene".into()));
        assert!(!cells[&5].contains_key(&2));
        assert!(!cells.contains_key(&4));
    }

    #[test]
    fn test_cells_without_reference() {
        let xml = br#"<worksheet><sheetData><row><c t="s"><v>0</v></c><c><v>3</v></c></row><row><c><v>4</v></c></row></sheetData></worksheet>"#;
        let cells = parse_worksheet_xml(xml, &strings()).unwrap();
        assert_eq!(cells[&1][&1], CellValue::String("Gene".into()));
        assert_eq!(cells[&1][&2], CellValue::Int(3));
        assert_eq!(cells[&2][&1], CellValue::Int(4));
    }

    #[test]
    fn test_shared_string_out_of_range() {
        let xml = br#"<worksheet><sheetData><row r="1"><c r="A1" t="s"><v>9</v></c></row></sheetData></worksheet>"#;
        assert!(matches!(
            parse_worksheet_xml(xml, &strings()),
            Err(OoxmlError::InvalidFormat(_))
        ));
    }
}
