// File ingestion adapters

pub mod text;
pub mod workbook;

use std::path::Path;

use rowdeck_model::SheetCollection;

/// Extensions routed to the workbook adapter; everything else is treated as
/// delimited text.
const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xls", "xlsb", "ods"];

/// Import a file into a sheet collection, routing on extension.
///
/// Text files become a single sheet named after the file stem; workbooks
/// contribute one sheet per worksheet. Either way the first sheet is active.
pub fn import_file(path: &Path) -> Result<SheetCollection, String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if WORKBOOK_EXTENSIONS.contains(&ext.as_str()) {
        return workbook::import(path);
    }

    let sheet = text::import(path)?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dados")
        .to_string();

    let mut collection = SheetCollection::new();
    collection.replace_all(vec![(name.clone(), sheet)], Some(name));
    Ok(collection)
}
