pub mod history;
pub mod list;
pub mod sync;
pub mod todo;

pub use history::{HistoryEntry, UndoLog, HISTORY_CAPACITY};
pub use list::{TodoCommand, TodoList};
pub use sync::{sync, sync_with_keys};
pub use todo::{Todo, TodoOrigin, TodoStatus};
