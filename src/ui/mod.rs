pub mod filter_tabs;
pub mod footer;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod styles;

use crate::app::AppState;
use filter_tabs::render_filter_tabs;
use footer::render_footer;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use ratatui::Frame;

/// Main render function - draws the entire UI as a pure function of state
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, layout.keybindings_area);
    render_filter_tabs(f, app, layout.tabs_area);
    render_list_pane(f, app, layout.list_area);
    render_footer(f, app, layout.footer_area);

    // Render input form on top if active
    if app.input_form.is_some() {
        render_input_form(f, app, size);
    }
}
