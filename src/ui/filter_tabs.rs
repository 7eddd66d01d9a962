use crate::app::AppState;
use crate::domain::Filter;
use crate::ui::styles::{active_tab_style, tab_style};
use ratatui::{layout::Rect, text::Line, widgets::Tabs, Frame};

/// Render the All / Active / Completed filter tabs
pub fn render_filter_tabs(f: &mut Frame, app: &AppState, area: Rect) {
    let titles: Vec<Line> = Filter::all()
        .iter()
        .map(|filter| Line::from(filter.label()))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.filter.index())
        .style(tab_style())
        .highlight_style(active_tab_style())
        .divider("·");

    f.render_widget(tabs, area);
}
