// Semicolon-delimited text import

use std::io::Read;
use std::path::Path;

use rowdeck_model::{normalize_rows, sanitize_header, RawRecord, SheetData};

const DELIMITER: u8 = b';';

pub fn import(path: &Path) -> Result<SheetData, String> {
    let content = read_file_as_utf8(path)?;
    Ok(parse(&content))
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let mut file = std::fs::File::open(path).map_err(|e| e.to_string())?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| e.to_string())?;

    // Try UTF-8 first; on failure, recover the buffer from the error
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            // Fall back to Windows-1252 (common for spreadsheet-exported text)
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

/// Parse semicolon-delimited text into a normalized sheet.
///
/// Lines are trimmed and blank lines dropped anywhere in the file; the first
/// surviving line is the header row. Fields are trimmed. Empty content yields
/// an empty sheet, never an error.
pub fn parse(content: &str) -> SheetData {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        return SheetData::default();
    }

    let joined = lines.join("\n");
    // Quoting off: fields split plainly on the delimiter, so a double quote
    // is just another character and never groups delimiters.
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .quoting(false)
        .from_reader(joined.as_bytes());

    let mut records = reader.records();

    let raw_headers: Vec<String> = match records.next() {
        Some(Ok(record)) => record.iter().map(sanitize_header).collect(),
        _ => return SheetData::default(),
    };

    let raw_rows: Vec<RawRecord> = records
        .filter_map(|result| result.ok())
        .map(|record| {
            raw_headers
                .iter()
                .enumerate()
                .map(|(i, header)| {
                    let value = record.get(i).unwrap_or("");
                    (header.clone(), value.to_string())
                })
                .collect()
        })
        .collect();

    normalize_rows(&raw_headers, &raw_rows)
}
