use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::tui::theme::theme;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();

    let display_path = app.layout_path.display().to_string();
    let len = display_path.chars().count();
    let path_display = if len > 45 {
        format!("...{}", display_path.chars().skip(len - 42).collect::<String>())
    } else {
        display_path
    };

    let armed = app.pending_dead_key().is_some();
    let state_label = match app.pending_dead_key() {
        Some(trigger) => format!("ARMED {}", trigger),
        None => "IDLE".to_string(),
    };

    let line = Line::from(vec![
        // App name
        Span::styled("kbdlayer ", t.text_primary().add_modifier(Modifier::BOLD)),
        // Dead-key badge
        Span::styled(format!("[{}] ", state_label), t.state_badge(armed)),
        // Layout path
        Span::styled(path_display, t.text_muted()),
        Span::raw(" "),
        Span::styled("Esc:quit", t.key_hint()),
    ]);

    let header = Paragraph::new(line).alignment(Alignment::Left);

    frame.render_widget(header, area);
}
