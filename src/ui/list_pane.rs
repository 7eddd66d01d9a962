use crate::app::AppState;
use crate::domain::{Priority, TaskRecord};
use crate::ui::styles::{
    border_style, deadline_style, default_style, done_style, high_priority_style,
    low_priority_style, medium_priority_style, overdue_style, selected_style, title_style,
};
use chrono::Local;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render the task list pane
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let items: Vec<ListItem> = app
        .visible
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let line = create_task_line(task);
            let style = if idx == app.selected_index {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let title = format!(" Slate — {} ", Local::now().format("%a %b %d"));
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(list, area);
}

/// Create a single line for a task
/// Format: [x] 🔥🔥 Buy milk  · due 2025-01-01
fn create_task_line(task: &TaskRecord) -> Line<'static> {
    let mut spans = Vec::new();

    let checkbox = if task.completed { "[x] " } else { "[ ] " };
    spans.push(Span::raw(checkbox.to_string()));

    let priority_style = match task.priority {
        Priority::High => high_priority_style(),
        Priority::Medium => medium_priority_style(),
        Priority::Low => low_priority_style(),
    };
    spans.push(Span::styled(task.priority.badge().to_string(), priority_style));
    spans.push(Span::raw(" ".to_string()));

    if task.completed {
        spans.push(Span::styled(task.name.clone(), done_style()));
    } else {
        spans.push(Span::raw(task.name.clone()));
    }

    if let Some(deadline) = task.deadline {
        let overdue = !task.completed && deadline < Local::now().date_naive();
        let style = if overdue { overdue_style() } else { deadline_style() };
        spans.push(Span::raw("  ".to_string()));
        spans.push(Span::styled(
            format!("· due {}", deadline.format("%Y-%m-%d")),
            style,
        ));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(name: &str, completed: bool, deadline: Option<NaiveDate>) -> TaskRecord {
        let now = Local::now();
        TaskRecord {
            id: 1,
            name: name.to_string(),
            completed,
            priority: Priority::Medium,
            deadline,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_create_task_line_contains_name() {
        let line = create_task_line(&record("Buy milk", false, None));
        let line_str = format!("{:?}", line);
        assert!(line_str.contains("Buy milk"));
        assert!(line_str.contains("[ ]"));
    }

    #[test]
    fn test_completed_task_line_is_checked() {
        let line = create_task_line(&record("Done thing", true, None));
        let line_str = format!("{:?}", line);
        assert!(line_str.contains("[x]"));
    }

    #[test]
    fn test_deadline_shown() {
        let deadline = NaiveDate::from_ymd_opt(2025, 1, 1);
        let line = create_task_line(&record("Dated", false, deadline));
        let line_str = format!("{:?}", line);
        assert!(line_str.contains("2025-01-01"));
    }
}
