//! The todo collection and its uniform mutation path.
//!
//! Every way the collection changes — including sheet sync — is a command
//! that snapshots the current state into the undo log before applying.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::history::UndoLog;
use crate::todo::{Todo, TodoStatus};

/// An explicit mutation of the todo collection.
#[derive(Debug, Clone, PartialEq)]
pub enum TodoCommand {
    Add { text: String },
    SetStatus { id: String, status: TodoStatus },
    Edit { id: String, new_text: String },
    Remove { id: String },
}

impl TodoCommand {
    pub fn label(&self) -> &'static str {
        match self {
            TodoCommand::Add { .. } => "Add todo",
            TodoCommand::SetStatus { status, .. } => match status {
                TodoStatus::Pending => "Reopen todo",
                TodoStatus::Done => "Complete todo",
                TodoStatus::Archived => "Archive todo",
            },
            TodoCommand::Edit { .. } => "Edit todo",
            TodoCommand::Remove { .. } => "Remove todo",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TodoList {
    todos: Vec<Todo>,
    history: UndoLog,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(todos: Vec<Todo>, history: UndoLog) -> Self {
        Self { todos, history }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn history(&self) -> &UndoLog {
        &self.history
    }

    pub fn find(&self, id: &str) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// Apply a command. Id-based commands targeting an unknown id are no-ops
    /// (no snapshot, no change) and report `false`.
    pub fn apply(&mut self, command: TodoCommand) -> bool {
        match &command {
            TodoCommand::SetStatus { id, .. }
            | TodoCommand::Edit { id, .. }
            | TodoCommand::Remove { id } => {
                if self.find(id).is_none() {
                    return false;
                }
            }
            TodoCommand::Add { .. } => {}
        }

        self.history.before(command.label(), &self.todos);

        match command {
            TodoCommand::Add { text } => {
                self.todos.push(Todo::manual(text));
            }
            TodoCommand::SetStatus { id, status } => {
                if let Some(todo) = self.todos.iter_mut().find(|t| t.id == id) {
                    todo.status = status;
                    todo.updated_at = Utc::now();
                }
            }
            TodoCommand::Edit { id, new_text } => {
                if let Some(todo) = self.todos.iter_mut().find(|t| t.id == id) {
                    todo.text = new_text;
                    todo.updated_at = Utc::now();
                }
            }
            TodoCommand::Remove { id } => {
                self.todos.retain(|t| t.id != id);
            }
        }
        true
    }

    /// Snapshot-then-replace used by the sync engine, going through the same
    /// undo path as the explicit commands.
    pub(crate) fn replace_with(&mut self, label: &str, todos: Vec<Todo>) {
        self.history.before(label, &self.todos);
        self.todos = todos;
    }

    /// Revert the collection to the state before the last mutation. Returns
    /// the undone operation's label, or None when there is no history.
    pub fn undo(&mut self) -> Option<String> {
        let entry = self.history.pop()?;
        self.todos = entry.snapshot;
        Some(entry.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_undo_restores_exact_state() {
        let mut list = TodoList::new();
        list.apply(TodoCommand::Add {
            text: "comprar arroz".to_string(),
        });
        let before = list.todos().to_vec();

        list.apply(TodoCommand::Add {
            text: "comprar feijão".to_string(),
        });
        assert_eq!(list.todos().len(), 2);

        assert_eq!(list.undo().as_deref(), Some("Add todo"));
        assert_eq!(list.todos(), before.as_slice());
    }

    #[test]
    fn undo_on_empty_history_is_a_noop() {
        let mut list = TodoList::new();
        assert!(list.undo().is_none());
        assert!(list.todos().is_empty());
    }

    #[test]
    fn unknown_id_is_a_noop_without_snapshot() {
        let mut list = TodoList::new();
        let applied = list.apply(TodoCommand::Remove {
            id: "nope".to_string(),
        });

        assert!(!applied);
        assert!(list.history().is_empty());
    }

    #[test]
    fn set_status_and_edit_touch_updated_at_only() {
        let mut list = TodoList::new();
        list.apply(TodoCommand::Add {
            text: "lavar louça".to_string(),
        });
        let id = list.todos()[0].id.clone();
        let created = list.todos()[0].created_at;

        assert!(list.apply(TodoCommand::SetStatus {
            id: id.clone(),
            status: TodoStatus::Done,
        }));
        assert!(list.apply(TodoCommand::Edit {
            id: id.clone(),
            new_text: "lavar a louça".to_string(),
        }));

        let todo = list.find(&id).unwrap();
        assert_eq!(todo.status, TodoStatus::Done);
        assert_eq!(todo.text, "lavar a louça");
        assert_eq!(todo.created_at, created);
    }

    #[test]
    fn each_mutation_snapshots_once() {
        let mut list = TodoList::new();
        list.apply(TodoCommand::Add { text: "a".to_string() });
        list.apply(TodoCommand::Add { text: "b".to_string() });
        let id = list.todos()[0].id.clone();
        list.apply(TodoCommand::Remove { id });

        assert_eq!(list.history().len(), 3);
    }

    #[test]
    fn undo_twice_walks_back_two_mutations() {
        let mut list = TodoList::new();
        list.apply(TodoCommand::Add { text: "a".to_string() });
        let after_first = list.todos().to_vec();
        list.apply(TodoCommand::Add { text: "b".to_string() });
        let id = list.todos()[1].id.clone();
        list.apply(TodoCommand::Remove { id });

        list.undo();
        list.undo();
        assert_eq!(list.todos(), after_first.as_slice());
    }
}
