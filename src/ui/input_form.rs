use crate::app::AppState;
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the input form for adding/editing a task
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(form) = &app.input_form {
        let modal_area = create_modal_area(area);

        // Clear the area behind the form
        f.render_widget(Clear, modal_area);

        let title_text = if form.editing.is_some() {
            " Edit Task "
        } else {
            " Add Task "
        };

        let mut lines = Vec::new();

        // Name field
        lines.push(Line::raw(""));
        lines.push(Line::raw(field_label("Name:", form.editing_field == 0)));
        lines.push(text_field_line(&form.name, form.editing_field == 0));
        lines.push(Line::raw(""));

        // Priority field
        lines.push(Line::raw(field_label(
            "Priority (←/→ to change):",
            form.editing_field == 1,
        )));
        lines.push(Line::from(vec![
            Span::raw("> "),
            Span::styled(
                format!("{} {}", form.priority.badge(), form.priority.as_str()),
                modal_title_style(),
            ),
        ]));
        lines.push(Line::raw(""));

        // Deadline field
        lines.push(Line::raw(field_label(
            "Deadline (YYYY-MM-DD, optional):",
            form.editing_field == 2,
        )));
        lines.push(text_field_line(&form.deadline, form.editing_field == 2));
        lines.push(Line::raw(""));

        lines.push(Line::raw(
            "Tab to switch fields  ·  Enter to submit  ·  Esc to cancel",
        ));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(title_text, modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}

fn field_label(label: &str, editing: bool) -> String {
    if editing {
        format!("{label} (editing)")
    } else {
        label.to_string()
    }
}

fn text_field_line(value: &str, editing: bool) -> Line<'static> {
    Line::from(vec![
        Span::raw("> "),
        Span::styled(value.to_string(), modal_title_style()),
        if editing {
            Span::styled("█", modal_title_style()) // Cursor
        } else {
            Span::raw("")
        },
    ])
}
