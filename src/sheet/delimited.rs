//! Comma-separated input tables.

use std::io::Read;
use std::path::Path;

use crate::common::error::Result;
use crate::sheet::table::Table;
use crate::sheet::types::CellValue;

/// Read a CSV file whose first record is the header.
pub fn read_csv_path(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path)?;
    read_csv(file)
}

/// Read CSV from any reader. Fields stay text; blank lines are skipped and
/// short records are padded.
pub fn read_csv<R: Read>(reader: R) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let is_first = rows.is_empty();
        rows.push(
            record
                .iter()
                .enumerate()
                .map(|(i, field)| {
                    let field = if is_first && i == 0 {
                        field.trim_start_matches('\u{feff}')
                    } else {
                        field
                    };
                    if field.is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::String(field.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(Table::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv() {
        let data = "Gene,Value\nGeneA,0\n\"GeneB, iso2\",5\n\nGeneC\nGeneD,NA\n";
        let table = read_csv(data.as_bytes()).unwrap();

        assert_eq!(table.headers(), ["Gene", "Value"]);
        assert_eq!(table.rows().len(), 4);

        let values = table.entity_values("Gene", "Value").unwrap();
        assert_eq!(values.get("GeneB, iso2"), Some(Some(5.0)));
        assert_eq!(values.get("GeneC"), Some(None));
        assert_eq!(values.get("GeneD"), Some(None));
    }

    #[test]
    fn test_utf8_bom_header() {
        let data = "\u{feff}Gene,Value\nTP53,1.5\n";
        let table = read_csv(data.as_bytes()).unwrap();
        assert_eq!(table.column_index("Gene").unwrap(), 0);
    }
}
