use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::tui::app::{App, EntryKind, LogEntry, Pane};
use crate::tui::theme::{theme, Theme};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();
    let focused = app.focused_pane == Pane::Output;

    let block = Block::default()
        .title(t.panel_title("EVENT LOG", focused))
        .borders(Borders::ALL)
        .border_style(t.panel_border(focused))
        .border_type(if focused {
            BorderType::Thick
        } else {
            BorderType::Plain
        });

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.log.is_empty() {
        let empty = Paragraph::new(Line::styled(
            "No key presses yet. Type in the input panel.",
            t.text_muted(),
        ));
        frame.render_widget(empty, inner);
        return;
    }

    // One entry per row; keep the scrolled-to entry on the last visible row
    let rows = inner.height as usize;
    let last = app.log_scroll.min(app.log.len() - 1);
    let first = (last + 1).saturating_sub(rows);

    let lines: Vec<Line> = app.log[first..=last]
        .iter()
        .map(|entry| entry_line(entry, t))
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn entry_line<'a>(entry: &'a LogEntry, t: &Theme) -> Line<'a> {
    let mut spans = Vec::with_capacity(4);
    if let Some(layer) = &entry.layer {
        spans.push(Span::styled(format!("{:<14}", layer), t.text_muted()));
    }
    if let Some(code) = &entry.code {
        spans.push(Span::styled(format!("{:<14}", code), t.text_secondary()));
    }

    let value = match &entry.kind {
        EntryKind::Text(text) => format!("{:?}", text),
        EntryKind::Composed(text) => format!("{:?} composed", text),
        EntryKind::DeadKey(trigger) => format!("{} waiting", trigger),
        EntryKind::Unmapped => "not in layout".to_string(),
        EntryKind::Line(text) => format!("> {}", text),
    };
    spans.push(Span::styled(value, t.entry(&entry.kind)));
    Line::from(spans)
}
