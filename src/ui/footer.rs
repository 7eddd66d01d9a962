use crate::app::AppState;
use crate::ui::styles::footer_style;
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

/// Render the footer counter ("N items left")
pub fn render_footer(f: &mut Frame, app: &AppState, area: Rect) {
    let text = items_left_text(app.active_count);
    let paragraph = Paragraph::new(Line::raw(format!(" {text}"))).style(footer_style());
    f.render_widget(paragraph, area);
}

fn items_left_text(count: usize) -> String {
    if count == 1 {
        "1 item left".to_string()
    } else {
        format!("{count} items left")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_left_plural() {
        assert_eq!(items_left_text(0), "0 items left");
        assert_eq!(items_left_text(1), "1 item left");
        assert_eq!(items_left_text(2), "2 items left");
    }
}
