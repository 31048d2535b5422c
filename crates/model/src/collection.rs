use serde::{Deserialize, Serialize};

use crate::row::CanonicalRow;

/// One named sheet's normalized content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetData {
    pub headers: Vec<String>,
    pub rows: Vec<CanonicalRow>,
}

/// Named sheets in insertion order, plus the name of the active one.
///
/// `active` is a reference by name, not ownership: it may point at a sheet
/// that was since replaced or never existed, and lookups through it simply
/// miss. Invariant (maintained by `normalize_rows`): every row in a sheet has
/// exactly that sheet's headers as its data keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetCollection {
    sheets: Vec<(String, SheetData)>,
    active: Option<String>,
}

impl SheetCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a sheet. A replaced sheet keeps its position.
    pub fn set_sheet(&mut self, name: impl Into<String>, data: SheetData) {
        let name = name.into();
        match self.sheets.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = data,
            None => self.sheets.push((name, data)),
        }
    }

    pub fn get_sheet(&self, name: &str) -> Option<&SheetData> {
        self.sheets
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, data)| data)
    }

    /// Sheet names in insertion order.
    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(|(n, _)| n.as_str())
    }

    pub fn active_sheet_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn set_active_sheet(&mut self, name: Option<String>) {
        self.active = name;
    }

    /// The active sheet's content, if the active name resolves.
    pub fn active_sheet(&self) -> Option<&SheetData> {
        self.active_sheet_name().and_then(|n| self.get_sheet(n))
    }

    /// The active sheet's rows, or empty when nothing is active.
    pub fn active_rows(&self) -> &[CanonicalRow] {
        self.active_sheet().map(|s| s.rows.as_slice()).unwrap_or(&[])
    }

    /// Replace every sheet and the active name in one step. Used by workbook
    /// ingestion so the collection never holds a mix of old and new sheets.
    pub fn replace_all(&mut self, sheets: Vec<(String, SheetData)>, active: Option<String>) {
        self.sheets = sheets;
        self.active = active;
    }

    pub fn clear(&mut self) {
        self.sheets.clear();
        self.active = None;
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}
