//! Snapshot-based, single-level undo history.
//!
//! Every mutation pushes a deep copy of the todo collection *before* the
//! change. Undo pops the most recent snapshot; there is no redo — a popped
//! snapshot is gone.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::todo::Todo;

/// Bounded history depth. On overflow the oldest entry is evicted.
pub const HISTORY_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Human-readable description of the operation this snapshot precedes.
    pub label: String,
    pub snapshot: Vec<Todo>,
    pub taken_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UndoLog {
    entries: VecDeque<HistoryEntry>,
}

impl UndoLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the pre-mutation state. Called exactly once, synchronously,
    /// before each mutating operation applies its change.
    pub fn before(&mut self, label: impl Into<String>, todos: &[Todo]) {
        if self.entries.len() >= HISTORY_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(HistoryEntry {
            label: label.into(),
            snapshot: todos.to_vec(),
            taken_at: Utc::now(),
        });
    }

    /// Pop the most recent snapshot, or None when the log is empty.
    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop_back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todos(n: usize) -> Vec<Todo> {
        (0..n).map(|i| Todo::manual(format!("item {i}"))).collect()
    }

    #[test]
    fn pop_returns_most_recent_first() {
        let mut log = UndoLog::new();
        log.before("first", &todos(1));
        log.before("second", &todos(2));

        assert_eq!(log.pop().unwrap().label, "second");
        assert_eq!(log.pop().unwrap().label, "first");
        assert!(log.pop().is_none());
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut log = UndoLog::new();
        for i in 0..HISTORY_CAPACITY + 5 {
            log.before(format!("op {i}"), &[]);
        }

        assert_eq!(log.len(), HISTORY_CAPACITY);
        // The five oldest entries are gone
        assert_eq!(log.entries().next().unwrap().label, "op 5");
        assert_eq!(log.pop().unwrap().label, format!("op {}", HISTORY_CAPACITY + 4));
    }

    #[test]
    fn snapshot_is_independent_of_later_mutation() {
        let mut list = todos(1);
        let mut log = UndoLog::new();
        log.before("edit", &list);

        list[0].text = "changed".to_string();
        assert_eq!(log.pop().unwrap().snapshot[0].text, "item 0");
    }
}
