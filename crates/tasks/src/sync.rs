//! Derives the sheet-owned part of the todo list from canonical rows.

use chrono::Utc;
use log::debug;

use rowdeck_model::key::DESCRIPTION_KEYS;
use rowdeck_model::{normalize_key, resolve, slug, CanonicalRow};

use crate::list::TodoList;
use crate::todo::{Todo, TodoOrigin};

const SYNC_LABEL: &str = "Sync from sheet";

/// Fallback scope used when no sheet is active.
const DEFAULT_SCOPE: &str = "sheet";

/// Sync using the default description-column candidates.
pub fn sync(list: &mut TodoList, rows: &[CanonicalRow], active_sheet: Option<&str>) {
    sync_with_keys(list, rows, active_sheet, DESCRIPTION_KEYS);
}

/// Replace the sheet-derived todos from `rows`, matching prior items by
/// source id so their status and creation time survive a reload. Manual
/// todos are never touched: they keep their relative order after the derived
/// block. Rows whose resolved description is blank are skipped.
///
/// The source id embeds the row index, so inserting or removing a row in the
/// middle of the sheet re-keys every row after it — those todos come back as
/// fresh Pending items. Known instability, kept for compatibility with the
/// original identity scheme.
pub fn sync_with_keys<S: AsRef<str>>(
    list: &mut TodoList,
    rows: &[CanonicalRow],
    active_sheet: Option<&str>,
    description_keys: &[S],
) {
    let scope = match active_sheet {
        Some(name) => normalize_key(name),
        None => DEFAULT_SCOPE.to_string(),
    };

    let manual: Vec<Todo> = list
        .todos()
        .iter()
        .filter(|t| t.is_manual())
        .cloned()
        .collect();

    if rows.is_empty() {
        debug!("sync: no rows, dropping sheet-derived todos");
        list.replace_with(SYNC_LABEL, manual);
        return;
    }

    let prior: Vec<Todo> = list
        .todos()
        .iter()
        .filter(|t| t.origin == TodoOrigin::Sheet)
        .cloned()
        .collect();

    let now = Utc::now();
    let mut derived: Vec<Todo> = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let text = resolve(row, description_keys).trim().to_string();
        if text.is_empty() {
            continue;
        }

        let source_id = format!("{}-{}-{}", scope, slug(&text), i);
        let mut todo = match prior.iter().find(|t| t.source_id == source_id) {
            Some(existing) => {
                let mut carried = Todo::from_sheet(source_id, text);
                carried.id = existing.id.clone();
                carried.status = existing.status;
                carried.created_at = existing.created_at;
                carried
            }
            None => Todo::from_sheet(source_id, text),
        };
        todo.updated_at = now;
        derived.push(todo);
    }

    debug!(
        "sync: {} derived todos ({} carried over), {} manual kept",
        derived.len(),
        derived.iter().filter(|t| t.created_at < now).count(),
        manual.len()
    );

    derived.extend(manual);
    list.replace_with(SYNC_LABEL, derived);
}
