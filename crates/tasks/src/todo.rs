use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoStatus {
    Pending,
    Done,
    Archived,
}

/// Who owns a todo's existence: sheet-derived items belong to the sync engine
/// and are replaced wholesale on every sync; manual items are only ever
/// touched by explicit commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoOrigin {
    Sheet,
    Manual,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    /// Stable merge key. For sheet-derived items this encodes
    /// scope + slug(text) + row index; for manual items it equals `id`.
    pub source_id: String,
    pub origin: TodoOrigin,
    pub text: String,
    pub status: TodoStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// A manually entered todo with a fresh identity.
    pub fn manual(text: impl Into<String>) -> Self {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        Self {
            id: id.clone(),
            source_id: id,
            origin: TodoOrigin::Manual,
            text: text.into(),
            status: TodoStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// A freshly materialized sheet-derived todo. The id doubles as the
    /// source id; at most one sheet todo carries a given source id at a time.
    pub fn from_sheet(source_id: impl Into<String>, text: impl Into<String>) -> Self {
        let source_id = source_id.into();
        let now = Utc::now();
        Self {
            id: source_id.clone(),
            source_id,
            origin: TodoOrigin::Sheet,
            text: text.into(),
            status: TodoStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_manual(&self) -> bool {
        self.origin == TodoOrigin::Manual
    }
}
