use crate::app::AppState;
use crate::domain::{Filter, UiMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

/// Handle keyboard input events. Returns true if the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTask | UiMode::EditingTask => handle_input_form_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_selection_up();
            Ok(false)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection_down();
            Ok(false)
        }

        // Toggle completion of the selected task
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.toggle_selected()?;
            Ok(false)
        }

        // Add task
        KeyCode::Char('a') => {
            app.start_add_task();
            Ok(false)
        }

        // Edit selected task
        KeyCode::Char('e') | KeyCode::Char('E') => {
            app.start_edit_task();
            Ok(false)
        }

        // Delete selected task
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => {
            app.delete_selected()?;
            Ok(false)
        }

        // Clear all completed tasks
        KeyCode::Char('C') => {
            app.clear_completed()?;
            Ok(false)
        }

        // Filter tabs
        KeyCode::Tab => {
            app.cycle_filter();
            Ok(false)
        }
        KeyCode::Char('1') => {
            app.set_filter(Filter::All);
            Ok(false)
        }
        KeyCode::Char('2') => {
            app.set_filter(Filter::Active);
            Ok(false)
        }
        KeyCode::Char('3') => {
            app.set_filter(Filter::Completed);
            Ok(false)
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Esc => Ok(true),

        _ => Ok(false),
    }
}

/// Handle keys while the add/edit form is open
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.cancel_form();
            return Ok(false);
        }
        KeyCode::Enter => {
            app.submit_form()?;
            return Ok(false);
        }
        _ => {}
    }

    let Some(form) = app.input_form.as_mut() else {
        return Ok(false);
    };

    match key.code {
        // Move between fields
        KeyCode::Tab | KeyCode::Down => {
            form.editing_field = (form.editing_field + 1) % 3;
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.editing_field = (form.editing_field + 2) % 3;
        }

        // Priority field cycles with left/right
        KeyCode::Left if form.editing_field == 1 => {
            form.priority = form.priority.prev();
        }
        KeyCode::Right if form.editing_field == 1 => {
            form.priority = form.priority.next();
        }

        // Text entry into name/deadline fields
        KeyCode::Char(c) => match form.editing_field {
            0 => form.name.push(c),
            2 => form.deadline.push(c),
            _ => {}
        },
        KeyCode::Backspace => match form.editing_field {
            0 => {
                form.name.pop();
            }
            2 => {
                form.deadline.pop();
            }
            _ => {}
        },

        _ => {}
    }

    Ok(false)
}
