//! Multi-sheet binary workbook import (xlsx, xls, xlsb, ods) via calamine.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use log::debug;

use rowdeck_model::{normalize_rows, RawRecord, SheetCollection, SheetData};

/// Import every sheet of a workbook, in workbook order, into a fresh
/// collection with the first sheet active.
///
/// Per sheet, the first row supplies the record keys and every later row
/// becomes one record; missing cells default to empty strings. Headers exist
/// only where records do: a sheet with no rows past the first — or no rows at
/// all — stays in the collection with empty headers and no rows.
pub fn import(path: &Path) -> Result<SheetCollection, String> {
    let mut workbook: Sheets<_> = open_workbook_auto(path)
        .map_err(|e| format!("Failed to open workbook: {}", e))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let mut sheets: Vec<(String, SheetData)> = Vec::with_capacity(sheet_names.len());

    for sheet_name in &sheet_names {
        let range = workbook
            .worksheet_range(sheet_name)
            .map_err(|e| format!("Failed to read sheet '{}': {}", sheet_name, e))?;

        let mut rows = range.rows();

        let raw_headers: Vec<String> = match rows.next() {
            Some(first) => first.iter().map(cell_to_string).collect(),
            None => Vec::new(),
        };

        let raw_rows: Vec<RawRecord> = rows
            .map(|cells| {
                raw_headers
                    .iter()
                    .enumerate()
                    .map(|(i, header)| {
                        let value = cells.get(i).map(cell_to_string).unwrap_or_default();
                        (header.clone(), value)
                    })
                    .collect()
            })
            .collect();

        // A header row with nothing under it carries no records, so it
        // contributes no headers either.
        let data = if raw_rows.is_empty() {
            SheetData::default()
        } else {
            normalize_rows(&raw_headers, &raw_rows)
        };
        debug!(
            "imported sheet '{}': {} columns, {} rows",
            sheet_name,
            data.headers.len(),
            data.rows.len()
        );
        sheets.push((sheet_name.clone(), data));
    }

    let active = sheet_names.first().cloned();
    let mut collection = SheetCollection::new();
    // Single swap: the collection never mixes old and new sheets.
    collection.replace_all(sheets, active);
    Ok(collection)
}

/// Display form of a workbook cell. All values are treated as strings
/// downstream, so this is the one place typed cells flatten out.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => {
            // Integers without a decimal point
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        Data::Int(n) => format!("{}", n),
        Data::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        Data::Error(e) => format!("#{:?}", e),
        Data::DateTime(dt) => format!("{}", dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}
