//! Durable key/value snapshots of sheet and todo state.
//!
//! Two independently keyed JSON blobs under one directory. Everything here is
//! synchronous and best-effort: writes that fail are logged and skipped,
//! reads that fail (missing file, bad JSON) report "absent" — callers start
//! from empty state. Nothing in this crate returns an error to the caller.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

use rowdeck_model::{CanonicalRow, SheetCollection, SheetData};
use rowdeck_tasks::{Todo, TodoList, UndoLog};

const SHEETS_FILE: &str = "sheets.json";
const TODOS_FILE: &str = "todos.json";

/// Persisted sheet state. `headers`/`rows` duplicate the active sheet for
/// cheap access; `all_sheets_data` is authoritative.
///
/// The map-shaped parts of the blob (`all_sheets_data`, and `data` inside
/// each row) are encoded as ordered `[key, value]` pair lists rather than
/// JSON objects, preserving sheet and column order across reloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetsBlob {
    pub headers: Vec<String>,
    pub rows: Vec<CanonicalRow>,
    pub all_sheets_data: Vec<(String, SheetData)>,
    pub current_sheet_name: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl SheetsBlob {
    pub fn from_collection(collection: &SheetCollection) -> Self {
        let active = collection.active_sheet();
        Self {
            headers: active.map(|s| s.headers.clone()).unwrap_or_default(),
            rows: active.map(|s| s.rows.clone()).unwrap_or_default(),
            all_sheets_data: collection
                .sheet_names()
                .map(|name| {
                    (
                        name.to_string(),
                        collection.get_sheet(name).cloned().unwrap_or_default(),
                    )
                })
                .collect(),
            current_sheet_name: collection.active_sheet_name().map(String::from),
            timestamp: Utc::now(),
        }
    }

    pub fn into_collection(self) -> SheetCollection {
        let mut collection = SheetCollection::new();
        collection.replace_all(self.all_sheets_data, self.current_sheet_name);
        collection
    }
}

/// Persisted todo state, including the undo history and the last filter text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoBlob {
    pub todos: Vec<Todo>,
    pub history: UndoLog,
    pub filter: String,
    pub timestamp: DateTime<Utc>,
}

impl TodoBlob {
    pub fn into_list(self) -> (TodoList, String) {
        (TodoList::from_parts(self.todos, self.history), self.filter)
    }
}

/// Best-effort file-backed store.
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Store under the platform data directory.
    pub fn default_location() -> Self {
        let dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rowdeck");
        Self::new(dir)
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    pub fn save_sheets(&self, collection: &SheetCollection) {
        let blob = SheetsBlob::from_collection(collection);
        self.write(SHEETS_FILE, &blob);
    }

    pub fn load_sheets(&self) -> Option<SheetCollection> {
        self.read::<SheetsBlob>(SHEETS_FILE).map(SheetsBlob::into_collection)
    }

    pub fn clear_sheets(&self) {
        let path = self.dir.join(SHEETS_FILE);
        if path.exists() {
            if let Err(e) = fs::remove_file(&path) {
                warn!("failed to clear {}: {}", path.display(), e);
            }
        }
    }

    pub fn save_todos(&self, list: &TodoList, filter: &str) {
        let blob = TodoBlob {
            todos: list.todos().to_vec(),
            history: list.history().clone(),
            filter: filter.to_string(),
            timestamp: Utc::now(),
        };
        self.write(TODOS_FILE, &blob);
    }

    pub fn load_todos(&self) -> Option<TodoBlob> {
        self.read(TODOS_FILE)
    }

    // ── Internal helpers ────────────────────────────────────────────

    fn write<T: Serialize>(&self, file: &str, value: &T) {
        if let Err(e) = self.try_write(file, value) {
            warn!("skipping write of {}: {}", file, e);
        }
    }

    fn try_write<T: Serialize>(&self, file: &str, value: &T) -> Result<(), String> {
        fs::create_dir_all(&self.dir).map_err(|e| e.to_string())?;
        let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
        fs::write(self.dir.join(file), json).map_err(|e| e.to_string())
    }

    fn read<T: for<'de> Deserialize<'de>>(&self, file: &str) -> Option<T> {
        let contents = fs::read_to_string(self.dir.join(file)).ok()?;
        match serde_json::from_str(&contents) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("ignoring corrupt {}: {}", file, e);
                None
            }
        }
    }
}
