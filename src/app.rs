use crate::domain::{
    active_count, parse_deadline, visible_records, Filter, Priority, TaskPatch, TaskRecord, UiMode,
};
use crate::persistence::{Database, TaskRepository};
use anyhow::{Context, Result};
use std::collections::HashMap;

/// Input form state for adding or editing a task
#[derive(Debug, Clone)]
pub struct InputFormState {
    pub name: String,
    pub priority: Priority,
    pub deadline: String,
    pub editing_field: usize, // 0 = name, 1 = priority, 2 = deadline
    /// Some(id) when editing an existing task, None when adding
    pub editing: Option<i64>,
}

/// Main application state. Owns the in-memory task collection for the
/// session; the repository owns the durable copy. After every mutation the
/// filtered view and active count are recomputed from the full collection.
pub struct AppState {
    repo: TaskRepository,
    pub tasks: HashMap<i64, TaskRecord>,
    pub filter: Filter,
    pub visible: Vec<TaskRecord>,
    pub active_count: usize,
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
}

impl AppState {
    /// Load every task from storage and derive the initial view
    pub fn new(db: Database, filter: Filter) -> Result<Self> {
        let repo = TaskRepository::new(db);
        let tasks: HashMap<i64, TaskRecord> = repo
            .all()
            .context("Failed to load tasks")?
            .into_iter()
            .map(|task| (task.id, task))
            .collect();

        let mut app = Self {
            repo,
            tasks,
            filter,
            visible: Vec::new(),
            active_count: 0,
            selected_index: 0,
            ui_mode: UiMode::Normal,
            input_form: None,
        };
        app.refresh_view();
        Ok(app)
    }

    /// Recompute the filtered view and active count from the full collection
    fn refresh_view(&mut self) {
        self.visible = visible_records(&self.tasks, self.filter);
        self.active_count = active_count(&self.tasks);

        if self.selected_index >= self.visible.len() {
            self.selected_index = self.visible.len().saturating_sub(1);
        }
    }

    /// Add a task. A name that is empty after trimming is silently ignored.
    /// A deadline that does not parse as YYYY-MM-DD is treated as absent.
    pub fn add(&mut self, name: &str, priority: Priority, deadline_input: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(());
        }

        let deadline = parse_deadline(deadline_input);
        let task = self
            .repo
            .create(name, priority, deadline)
            .context("Failed to create task")?;

        self.tasks.insert(task.id, task);
        self.refresh_view();
        Ok(())
    }

    /// Persist a new completion state for a task
    pub fn set_completed(&mut self, id: i64, completed: bool) -> Result<()> {
        let updated = self
            .repo
            .update(id, &TaskPatch::completed(completed))
            .context("Failed to update task")?;

        match updated {
            Some(task) => {
                self.tasks.insert(task.id, task);
            }
            None => {
                // Row no longer exists in storage; drop our copy too
                self.tasks.remove(&id);
            }
        }
        self.refresh_view();
        Ok(())
    }

    /// Apply a patch to an existing task
    pub fn edit(&mut self, id: i64, patch: &TaskPatch) -> Result<()> {
        let updated = self.repo.update(id, patch).context("Failed to update task")?;

        match updated {
            Some(task) => {
                self.tasks.insert(task.id, task);
            }
            None => {
                self.tasks.remove(&id);
            }
        }
        self.refresh_view();
        Ok(())
    }

    /// Delete a task. Deleting an unknown id is a no-op.
    pub fn delete(&mut self, id: i64) -> Result<()> {
        self.repo.delete(id).context("Failed to delete task")?;
        self.tasks.remove(&id);
        self.refresh_view();
        Ok(())
    }

    /// Delete every completed task
    pub fn clear_completed(&mut self) -> Result<()> {
        let completed_ids: Vec<i64> = self
            .tasks
            .values()
            .filter(|task| task.completed)
            .map(|task| task.id)
            .collect();

        for id in completed_ids {
            self.repo.delete(id).context("Failed to delete task")?;
            self.tasks.remove(&id);
        }
        self.refresh_view();
        Ok(())
    }

    /// Change the active filter. Does not touch storage.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.refresh_view();
    }

    pub fn cycle_filter(&mut self) {
        self.set_filter(self.filter.next());
    }

    // --- selection ---

    pub fn selected_task(&self) -> Option<&TaskRecord> {
        self.visible.get(self.selected_index)
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.visible.len() {
            self.selected_index += 1;
        }
    }

    /// Toggle completion of the selected task
    pub fn toggle_selected(&mut self) -> Result<()> {
        if let Some(task) = self.selected_task() {
            let (id, completed) = (task.id, task.completed);
            self.set_completed(id, !completed)?;
        }
        Ok(())
    }

    /// Delete the selected task
    pub fn delete_selected(&mut self) -> Result<()> {
        if let Some(task) = self.selected_task() {
            let id = task.id;
            self.delete(id)?;
        }
        Ok(())
    }

    // --- input form ---

    /// Open an empty form for adding a task
    pub fn start_add_task(&mut self) {
        self.input_form = Some(InputFormState {
            name: String::new(),
            priority: Priority::Low,
            deadline: String::new(),
            editing_field: 0,
            editing: None,
        });
        self.ui_mode = UiMode::AddingTask;
    }

    /// Open the form prefilled with the selected task
    pub fn start_edit_task(&mut self) {
        if let Some(task) = self.selected_task() {
            self.input_form = Some(InputFormState {
                name: task.name.clone(),
                priority: task.priority,
                deadline: task
                    .deadline
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
                editing_field: 0,
                editing: Some(task.id),
            });
            self.ui_mode = UiMode::EditingTask;
        }
    }

    pub fn cancel_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Submit the open form.
    ///
    /// On add, a malformed deadline means no deadline. On edit, an empty
    /// deadline field clears the stored deadline; a malformed non-empty one
    /// leaves it untouched. An empty name on edit leaves the name untouched.
    pub fn submit_form(&mut self) -> Result<()> {
        let Some(form) = self.input_form.take() else {
            return Ok(());
        };
        self.ui_mode = UiMode::Normal;

        match form.editing {
            None => self.add(&form.name, form.priority, &form.deadline),
            Some(id) => {
                let mut patch = TaskPatch {
                    priority: Some(form.priority),
                    ..TaskPatch::default()
                };

                let name = form.name.trim();
                if !name.is_empty() {
                    patch.name = Some(name.to_string());
                }

                let deadline = form.deadline.trim();
                if deadline.is_empty() {
                    patch.deadline = Some(None);
                } else if let Some(date) = parse_deadline(deadline) {
                    patch.deadline = Some(Some(date));
                }

                self.edit(id, &patch)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn test_app() -> AppState {
        AppState::new(Database::in_memory().unwrap(), Filter::All).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_add_rejects_whitespace_name() {
        let mut app = test_app();
        app.add("   ", Priority::High, "").unwrap();
        app.add("\t\n", Priority::Low, "2025-01-01").unwrap();

        assert!(app.tasks.is_empty());
        assert!(app.visible.is_empty());
        assert_eq!(app.active_count, 0);
    }

    #[test]
    fn test_add_trims_name_and_sets_defaults() {
        let mut app = test_app();
        app.add("  Buy milk  ", Priority::Medium, "").unwrap();

        assert_eq!(app.tasks.len(), 1);
        let task = app.visible.first().unwrap();
        assert_eq!(task.name, "Buy milk");
        assert!(!task.completed);
        assert_eq!(task.deadline, None);
        assert_eq!(app.active_count, 1);
    }

    #[test]
    fn test_add_with_malformed_deadline() {
        let mut app = test_app();
        app.add("Vague", Priority::Low, "someday").unwrap();
        assert_eq!(app.visible[0].deadline, None);
    }

    #[test]
    fn test_complete_scenario() {
        let mut app = test_app();
        app.add("Buy milk", Priority::High, "2025-01-01").unwrap();

        let task = app.visible[0].clone();
        assert!(task.id > 0);
        assert!(!task.completed);
        assert_eq!(task.created_at, task.updated_at);
        assert_eq!(app.active_count, 1);

        app.set_completed(task.id, true).unwrap();
        assert_eq!(app.active_count, 0);

        app.set_filter(Filter::Completed);
        assert!(app.visible.iter().any(|t| t.id == task.id));

        app.set_filter(Filter::Active);
        assert!(!app.visible.iter().any(|t| t.id == task.id));
    }

    #[test]
    fn test_active_count_is_filter_independent() {
        let mut app = test_app();
        app.add("one", Priority::Low, "").unwrap();
        app.add("two", Priority::Low, "").unwrap();
        let id = app.visible[0].id;
        app.set_completed(id, true).unwrap();

        for filter in Filter::all() {
            app.set_filter(*filter);
            assert_eq!(app.active_count, 1);
        }
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut app = test_app();
        app.add("Doomed", Priority::Low, "").unwrap();
        let id = app.visible[0].id;

        app.delete(id).unwrap();
        assert!(app.tasks.is_empty());

        // Second delete of the same id is a no-op
        app.delete(id).unwrap();
        assert!(app.tasks.is_empty());
        assert_eq!(app.active_count, 0);
    }

    #[test]
    fn test_clear_completed_keeps_active() {
        let mut app = test_app();
        app.add("keep", Priority::Low, "").unwrap();
        app.add("done one", Priority::Low, "").unwrap();
        app.add("done two", Priority::Low, "").unwrap();

        let done_ids: Vec<i64> = app
            .visible
            .iter()
            .filter(|t| t.name.starts_with("done"))
            .map(|t| t.id)
            .collect();
        for id in done_ids {
            app.set_completed(id, true).unwrap();
        }
        assert_eq!(app.active_count, 1);

        app.clear_completed().unwrap();

        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.visible[0].name, "keep");
        assert_eq!(app.active_count, 1);
    }

    #[test]
    fn test_edit_form_malformed_deadline_is_preserved() {
        let mut app = test_app();
        app.add("Dated", Priority::Low, "2025-03-01").unwrap();
        let id = app.visible[0].id;

        app.start_edit_task();
        app.input_form.as_mut().unwrap().deadline = "not a date".to_string();
        app.submit_form().unwrap();

        assert_eq!(app.tasks[&id].deadline, Some(date("2025-03-01")));
        assert!(app.input_form.is_none());
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_edit_form_empty_deadline_clears() {
        let mut app = test_app();
        app.add("Dated", Priority::Low, "2025-03-01").unwrap();
        let id = app.visible[0].id;

        app.start_edit_task();
        app.input_form.as_mut().unwrap().deadline = String::new();
        app.submit_form().unwrap();

        assert_eq!(app.tasks[&id].deadline, None);
    }

    #[test]
    fn test_edit_form_changes_name_and_priority() {
        let mut app = test_app();
        app.add("Original", Priority::Low, "").unwrap();
        let id = app.visible[0].id;

        app.start_edit_task();
        {
            let form = app.input_form.as_mut().unwrap();
            form.name = "Renamed".to_string();
            form.priority = Priority::High;
        }
        app.submit_form().unwrap();

        let task = &app.tasks[&id];
        assert_eq!(task.name, "Renamed");
        assert_eq!(task.priority, Priority::High);
        assert!(task.updated_at >= task.created_at);
    }

    #[test]
    fn test_submit_add_form_with_empty_name_creates_nothing() {
        let mut app = test_app();
        app.start_add_task();
        app.input_form.as_mut().unwrap().name = "  ".to_string();
        app.submit_form().unwrap();

        assert!(app.tasks.is_empty());
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_visible_order_follows_priority() {
        let mut app = test_app();
        app.add("low", Priority::Low, "").unwrap();
        app.add("high", Priority::High, "").unwrap();
        app.add("medium", Priority::Medium, "").unwrap();

        let names: Vec<&str> = app.visible.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["high", "medium", "low"]);
    }

    #[test]
    fn test_selection_stays_in_bounds_after_delete() {
        let mut app = test_app();
        app.add("one", Priority::Low, "").unwrap();
        app.add("two", Priority::Low, "").unwrap();

        app.selected_index = 1;
        app.delete_selected().unwrap();
        assert_eq!(app.selected_index, 0);

        app.delete_selected().unwrap();
        assert!(app.visible.is_empty());
        assert!(app.selected_task().is_none());
    }

    #[test]
    fn test_state_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todos.db");

        {
            let db = Database::open(&path).unwrap();
            let mut app = AppState::new(db, Filter::All).unwrap();
            app.add("persisted", Priority::High, "2025-01-01").unwrap();
        }

        let db = Database::open(&path).unwrap();
        let app = AppState::new(db, Filter::All).unwrap();
        assert_eq!(app.tasks.len(), 1);
        let task = app.visible.first().unwrap();
        assert_eq!(task.name, "persisted");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.deadline, Some(date("2025-01-01")));
    }
}
