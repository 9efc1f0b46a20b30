mod palette;

use ratatui::prelude::*;

use crate::tui::app::EntryKind;
pub use palette::{Palette, MOCHA};

/// Styles shared by the panels, derived from one palette
pub struct Theme {
    pub palette: Palette,
}

impl Theme {
    pub const fn new(palette: Palette) -> Self {
        Self { palette }
    }

    fn fg(&self, color: Color) -> Style {
        Style::default().fg(color)
    }

    pub fn text_primary(&self) -> Style {
        self.fg(self.palette.text)
    }

    pub fn text_secondary(&self) -> Style {
        self.fg(self.palette.subtext)
    }

    pub fn text_muted(&self) -> Style {
        self.fg(self.palette.overlay)
    }

    pub fn key_hint(&self) -> Style {
        self.fg(self.palette.blue).add_modifier(Modifier::BOLD)
    }

    pub fn status_message(&self) -> Style {
        self.fg(self.palette.yellow)
    }

    pub fn toggle(&self, on: bool) -> Style {
        self.fg(if on { self.palette.green } else { self.palette.overlay })
    }

    /// Header badge for the dead-key state machine
    pub fn state_badge(&self, armed: bool) -> Style {
        let bg = if armed { self.palette.peach } else { self.palette.green };
        Style::default()
            .fg(Color::Black)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn panel_border(&self, focused: bool) -> Style {
        if focused {
            self.fg(self.palette.blue).add_modifier(Modifier::BOLD)
        } else {
            self.fg(self.palette.surface)
        }
    }

    pub fn panel_title(&self, title: &str, focused: bool) -> Line<'static> {
        let style = if focused {
            self.key_hint()
        } else {
            self.text_muted()
        };
        Line::styled(format!(" {} ", title), style)
    }

    /// Style of the value part of an event log entry
    pub fn entry(&self, kind: &EntryKind) -> Style {
        match kind {
            EntryKind::Text(_) => self.fg(self.palette.green),
            EntryKind::Composed(_) => self.fg(self.palette.mauve).add_modifier(Modifier::BOLD),
            EntryKind::DeadKey(_) => self.fg(self.palette.peach).add_modifier(Modifier::ITALIC),
            EntryKind::Unmapped => self.fg(self.palette.red),
            EntryKind::Line(_) => self.text_primary().add_modifier(Modifier::BOLD),
        }
    }
}

static THEME: Theme = Theme::new(MOCHA);

pub fn theme() -> &'static Theme {
    &THEME
}
