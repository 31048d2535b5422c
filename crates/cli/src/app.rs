//! Application state: sheets, todos, filter text, and the store that mirrors
//! them.
//!
//! One explicit state object instead of ambient globals. Every mutating
//! operation persists the affected blob before returning; persistence is
//! best-effort and never fails the operation.

use std::path::Path;

use rowdeck_model::key::DESCRIPTION_KEYS;
use rowdeck_model::{filter_rows, CanonicalRow, SheetCollection};
use rowdeck_remote::{RemoteError, RemoteSheetAdapter, SheetsClient};
use rowdeck_store::Store;
use rowdeck_tasks::{sync, TodoCommand, TodoList};

pub struct AppState {
    pub sheets: SheetCollection,
    pub todos: TodoList,
    pub filter: String,
    store: Store,
}

impl AppState {
    /// Restore state from the store; anything absent starts empty.
    pub fn load(store: Store) -> Self {
        let sheets = store.load_sheets().unwrap_or_default();
        let (todos, filter) = store
            .load_todos()
            .map(|blob| blob.into_list())
            .unwrap_or_default();
        Self {
            sheets,
            todos,
            filter,
            store,
        }
    }

    /// Import a local file (delimited text or workbook), replacing the whole
    /// collection at once.
    pub fn import_file(&mut self, path: &Path) -> Result<(), String> {
        let collection = rowdeck_io::import_file(path)?;
        self.sheets = collection;
        self.store.save_sheets(&self.sheets);
        Ok(())
    }

    /// Import one sheet of a remote file. On failure the in-memory state is
    /// left untouched; the error is surfaced once to the caller.
    pub fn import_remote(
        &mut self,
        client: SheetsClient,
        file_id: &str,
        sheet_name: Option<&str>,
    ) -> Result<(), RemoteError> {
        let adapter = RemoteSheetAdapter::open(client, file_id)?;
        let name = match sheet_name {
            Some(name) => name.to_string(),
            None => match adapter.sheet_names().first() {
                Some(first) => first.clone(),
                None => {
                    self.sheets = SheetCollection::new();
                    self.store.save_sheets(&self.sheets);
                    return Ok(());
                }
            },
        };

        let data = adapter.load_sheet(&name)?;
        self.sheets
            .replace_all(vec![(name.clone(), data)], Some(name));
        self.store.save_sheets(&self.sheets);
        Ok(())
    }

    /// Switch the active sheet by name. Unknown names report false.
    pub fn use_sheet(&mut self, name: &str) -> bool {
        if self.sheets.get_sheet(name).is_none() {
            return false;
        }
        self.sheets.set_active_sheet(Some(name.to_string()));
        self.store.save_sheets(&self.sheets);
        true
    }

    /// Search the active sheet. An empty query returns every row. The query
    /// is remembered as the current filter.
    pub fn search(&mut self, query: &str, fields: &[Vec<String>]) -> Vec<CanonicalRow> {
        self.filter = query.to_string();
        let rows = filter_rows(self.sheets.active_rows(), query, fields)
            .into_iter()
            .cloned()
            .collect();
        self.store.save_todos(&self.todos, &self.filter);
        rows
    }

    pub fn default_fields() -> Vec<Vec<String>> {
        vec![DESCRIPTION_KEYS.iter().map(|s| s.to_string()).collect()]
    }

    /// Re-derive sheet todos from the active sheet's rows.
    pub fn sync_todos(&mut self) {
        let rows = self.sheets.active_rows().to_vec();
        sync(&mut self.todos, &rows, self.sheets.active_sheet_name());
        self.store.save_todos(&self.todos, &self.filter);
    }

    /// Apply a todo command and persist. Reports whether anything changed.
    pub fn todo(&mut self, command: TodoCommand) -> bool {
        let applied = self.todos.apply(command);
        if applied {
            self.store.save_todos(&self.todos, &self.filter);
        }
        applied
    }

    /// Undo the last todo mutation. Returns the undone label, if any.
    pub fn undo_todo(&mut self) -> Option<String> {
        let label = self.todos.undo();
        if label.is_some() {
            self.store.save_todos(&self.todos, &self.filter);
        }
        label
    }

    /// Forget stored sheet state and the in-memory collection.
    pub fn clear_sheets(&mut self) {
        self.sheets.clear();
        self.store.clear_sheets();
    }
}
