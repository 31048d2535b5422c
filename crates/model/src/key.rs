//! Header label machinery: sanitizing, diacritic/case-insensitive key
//! normalization, fuzzy field resolution, and slugs.
//!
//! Source files disagree on how a column is spelled — "Custo Médio",
//! "CUSTO_MEDIO" and "custo medio" all name the same thing. Lookups go
//! through `normalize_key` so all three spellings land on one key.

use std::collections::HashMap;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::row::CanonicalRow;

/// Default candidate keys for the description-like column, in priority order.
pub const DESCRIPTION_KEYS: &[&str] = &[
    "Descrição",
    "Descricao",
    "Description",
    "Item",
    "Tarefa",
    "Task",
];

/// Collapse consecutive whitespace to a single space and trim the ends.
pub fn sanitize_header(label: &str) -> String {
    label.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Canonical lookup form of a label: lowercased, canonically decomposed,
/// combining marks stripped, then all spaces and underscores removed.
pub fn normalize_key(label: &str) -> String {
    label
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| !c.is_whitespace() && *c != '_')
        .collect()
}

/// Map each of the row's keys to itself under `normalize_key`.
///
/// Two distinct original keys can normalize identically; the later key (in
/// column order) wins, matching plain object-map construction in the source
/// data model.
fn normalized_key_map(row: &CanonicalRow) -> HashMap<String, &str> {
    let mut map = HashMap::new();
    for key in row.keys() {
        map.insert(normalize_key(key), key);
    }
    map
}

/// Resolve the first candidate whose normalized form names a column of `row`,
/// returning that column's value. `candidates` is a priority list: the first
/// match wins even if a later candidate would hit a different column.
/// Returns "" when nothing matches.
pub fn resolve<'a, S: AsRef<str>>(row: &'a CanonicalRow, candidates: &[S]) -> &'a str {
    let map = normalized_key_map(row);
    for candidate in candidates {
        if let Some(original) = map.get(&normalize_key(candidate.as_ref())).copied() {
            return row.value(original);
        }
    }
    ""
}

/// Lowercase, strip diacritics, and replace whitespace runs with a hyphen.
/// Used to build stable-ish identifiers out of free text.
pub fn slug(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join("-")
}
