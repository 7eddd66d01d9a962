pub mod enums;
pub mod task;
pub mod views;

pub use enums::{Filter, Priority, UiMode};
pub use task::{TaskPatch, TaskRecord};
pub use views::{active_count, compare_records, parse_deadline, visible_records};
