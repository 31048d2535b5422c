//! Lazy per-sheet loading on top of the remote client.

use log::debug;

use rowdeck_model::{normalize_rows, sanitize_header, RawRecord, SheetData};

use crate::client::{RemoteError, SheetsClient};

/// Opens a remote file, discovers its sheet names once, and fetches each
/// sheet's values only when asked — selecting a sheet never eagerly pulls
/// the others.
pub struct RemoteSheetAdapter {
    client: SheetsClient,
    file_id: String,
    sheet_names: Vec<String>,
}

impl RemoteSheetAdapter {
    pub fn open(client: SheetsClient, file_id: impl Into<String>) -> Result<Self, RemoteError> {
        let file_id = file_id.into();
        let sheet_names = client.list_sheet_names(&file_id)?;
        debug!("remote file {}: {} sheets", file_id, sheet_names.len());
        Ok(Self {
            client,
            file_id,
            sheet_names,
        })
    }

    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    /// Fetch and normalize one sheet.
    pub fn load_sheet(&self, sheet_name: &str) -> Result<SheetData, RemoteError> {
        let values = self.client.get_values(&self.file_id, sheet_name)?;
        Ok(sheet_from_values(&values))
    }
}

/// Build a normalized sheet from a row-major 2D value array: the first row is
/// headers, later rows are zipped positionally into records keyed by the
/// sanitized header. Missing trailing cells default to empty strings.
pub fn sheet_from_values(values: &[Vec<String>]) -> SheetData {
    let Some((first, rest)) = values.split_first() else {
        return SheetData::default();
    };

    let raw_headers: Vec<String> = first.iter().map(|h| sanitize_header(h)).collect();

    let raw_rows: Vec<RawRecord> = rest
        .iter()
        .map(|cells| {
            raw_headers
                .iter()
                .enumerate()
                .map(|(i, header)| {
                    let value = cells.get(i).map(String::as_str).unwrap_or("");
                    (header.clone(), value.to_string())
                })
                .collect()
        })
        .collect();

    normalize_rows(&raw_headers, &raw_rows)
}
