use super::enums::Priority;
use chrono::{DateTime, Local, NaiveDate};

/// In-memory representation of one to-do item
#[derive(Debug, Clone)]
pub struct TaskRecord {
    /// Row id assigned by storage on creation
    pub id: i64,
    /// Display name
    pub name: String,
    /// Whether the task is done
    pub completed: bool,
    /// Priority level
    pub priority: Priority,
    /// Optional due date (day granularity)
    pub deadline: Option<NaiveDate>,
    /// When the task was created (never modified)
    pub created_at: DateTime<Local>,
    /// Refreshed on every mutation
    pub updated_at: DateTime<Local>,
}

impl TaskRecord {
    /// A task is active when it is not completed
    pub fn is_active(&self) -> bool {
        !self.completed
    }
}

/// Partial update for a task. Unset fields are left untouched.
///
/// `deadline` is doubly optional: `None` leaves the deadline as it is,
/// `Some(None)` explicitly clears it, `Some(Some(date))` sets it.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub name: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    pub deadline: Option<Option<NaiveDate>>,
}

impl TaskPatch {
    pub fn completed(value: bool) -> Self {
        Self {
            completed: Some(value),
            ..Self::default()
        }
    }
}
