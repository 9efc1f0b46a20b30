use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Pane};
use crate::tui::theme::{theme, Theme};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();

    let line1 = match app.focused_pane {
        Pane::Input => Line::styled(format!("Status: {}", app.status), t.status_message()),
        Pane::Output => {
            Line::styled(format!("Event log ~ {} entries", app.log.len()), t.text_muted())
        }
    };

    let footer = Paragraph::new(vec![line1, key_hints(app, t)]);
    frame.render_widget(footer, area);
}

fn key_hints(app: &App, t: &Theme) -> Line<'static> {
    let pane_style = |pane: Pane| {
        if app.focused_pane == pane {
            t.key_hint()
        } else {
            t.text_muted()
        }
    };

    Line::from(vec![
        Span::styled("Tab", t.key_hint()),
        Span::styled(":", t.text_muted()),
        Span::styled("Input", pane_style(Pane::Input)),
        Span::styled("/", t.text_muted()),
        Span::styled("Log", pane_style(Pane::Output)),
        Span::styled("  ", t.text_muted()),
        Span::styled("F2", t.key_hint()),
        Span::styled(":caps  ", t.text_muted()),
        Span::styled("Enter", t.key_hint()),
        Span::styled(":commit line  ", t.text_muted()),
        Span::styled("Del", t.key_hint()),
        Span::styled(":clear  ", t.text_muted()),
        Span::styled("Esc", t.key_hint()),
        Span::styled(":quit", t.text_muted()),
    ])
}
