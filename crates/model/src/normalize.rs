//! Row normalization: raw adapter output -> canonical rows.

use crate::collection::SheetData;
use crate::key::sanitize_header;
use crate::row::{CanonicalRow, RawRecord};

/// Normalize one sheet's worth of adapter output.
///
/// Headers are sanitized in place and define column order; duplicates after
/// sanitization keep their positions. Each cell is looked up under the
/// original (pre-sanitized) header first, then under the sanitized header —
/// the workbook and text adapters key records by original header text while
/// the remote adapter already keys by sanitized header. Absent cells become
/// empty strings. Total: no input shape is an error.
pub fn normalize_rows(raw_headers: &[String], raw_rows: &[RawRecord]) -> SheetData {
    let headers: Vec<String> = raw_headers.iter().map(|h| sanitize_header(h)).collect();

    let rows = raw_rows
        .iter()
        .map(|raw| {
            CanonicalRow::from_pairs(headers.iter().enumerate().map(|(i, header)| {
                let value = raw
                    .get(&raw_headers[i])
                    .or_else(|| raw.get(header))
                    .unwrap_or("");
                (header.clone(), value.to_string())
            }))
        })
        .collect();

    SheetData { headers, rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> RawRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn sanitizes_headers_and_keys_rows_by_them() {
        let raw_headers = vec!["  Descrição ".to_string(), "Custo  Médio".to_string()];
        let rows = vec![record(&[
            ("  Descrição ", "Arroz"),
            ("Custo  Médio", "22,10"),
        ])];

        let sheet = normalize_rows(&raw_headers, &rows);
        assert_eq!(sheet.headers, vec!["Descrição", "Custo Médio"]);
        assert_eq!(sheet.rows[0].value("Descrição"), "Arroz");
        assert_eq!(sheet.rows[0].values(), &["Arroz", "22,10"]);
    }

    #[test]
    fn falls_back_to_sanitized_header_key() {
        // Remote-shaped input: already keyed by the sanitized header.
        let raw_headers = vec![" Custo ".to_string()];
        let rows = vec![record(&[("Custo", "10")])];

        let sheet = normalize_rows(&raw_headers, &rows);
        assert_eq!(sheet.rows[0].value("Custo"), "10");
    }

    #[test]
    fn absent_cells_become_empty_strings() {
        let raw_headers = vec!["a".to_string(), "b".to_string()];
        let rows = vec![record(&[("a", "1")])];

        let sheet = normalize_rows(&raw_headers, &rows);
        assert_eq!(sheet.rows[0].value("b"), "");
        assert_eq!(sheet.rows[0].values(), &["1", ""]);
    }

    #[test]
    fn empty_input_yields_empty_sheet() {
        let sheet = normalize_rows(&[], &[]);
        assert!(sheet.headers.is_empty());
        assert!(sheet.rows.is_empty());
    }

    #[test]
    fn normalization_is_idempotent() {
        let raw_headers = vec!["Descrição".to_string(), "Custo".to_string()];
        let rows = vec![
            record(&[("Descrição", "Arroz"), ("Custo", "10")]),
            record(&[("Descrição", "Feijão"), ("Custo", "8")]),
        ];

        let once = normalize_rows(&raw_headers, &rows);
        let again_rows: Vec<RawRecord> = once
            .rows
            .iter()
            .map(|row| {
                row.data()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect()
            })
            .collect();
        let twice = normalize_rows(&once.headers, &again_rows);

        assert_eq!(once, twice);
    }
}
