mod footer;
mod header;
mod input_panel;
mod output_panel;

use ratatui::prelude::*;

use crate::tui::app::App;

pub fn draw_ui(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Compact header
            Constraint::Length(7), // Typed text + layer status
            Constraint::Min(8),    // Event log
            Constraint::Length(2), // Footer
        ])
        .split(frame.area());

    header::render(frame, app, root[0]);
    input_panel::render(frame, app, root[1]);
    output_panel::render(frame, app, root[2]);
    footer::render(frame, app, root[3]);
}
