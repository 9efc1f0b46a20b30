use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use crate::tui::app::{App, Pane};
use crate::tui::theme::theme;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();
    let focused = app.focused_pane == Pane::Input;

    let block = Block::default()
        .title(t.panel_title("INPUT", focused))
        .borders(Borders::ALL)
        .border_style(t.panel_border(focused))
        .border_type(if focused {
            BorderType::Thick
        } else {
            BorderType::Plain
        });

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Split into: layer status (1) + typed text (remaining)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    let status_line = Line::from(vec![
        Span::styled("Layer: ", t.text_muted()),
        Span::styled(app.layer.clone(), t.text_secondary()),
        Span::styled("  Caps: ", t.text_muted()),
        Span::styled(
            if app.caps { "on" } else { "off" },
            t.toggle(app.caps),
        ),
        Span::styled("  Dead key: ", t.text_muted()),
        Span::styled(
            app.pending_dead_key().unwrap_or("-").to_string(),
            t.toggle(app.pending_dead_key().is_some()),
        ),
    ]);
    frame.render_widget(Paragraph::new(status_line), chunks[0]);

    let mut spans = vec![Span::styled(app.text.clone(), t.text_primary())];
    if focused {
        spans.push(Span::styled("_", t.key_hint()));
    }
    let text = Paragraph::new(Line::from(spans)).wrap(Wrap { trim: false });
    frame.render_widget(text, chunks[1]);
}
