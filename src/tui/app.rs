use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::event::{KeyCode as TermKey, KeyModifiers};
use kbdlayer_core::{KeyEvent, Layout, Settings, TransformEngine, TransformResult};

use crate::tui::keymap::terminal_to_event;

const MAX_LOG_ENTRIES: usize = 800;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Pane {
    Input,
    Output,
}

/// What a logged key press turned into
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EntryKind {
    /// Plain layer value
    Text(String),
    /// Result of a dead-key sequence
    Composed(String),
    /// The press armed (or re-armed) a dead key
    DeadKey(String),
    /// No layer defines the key; the terminal's own character was kept
    Unmapped,
    /// Enter moved the typed text into the log
    Line(String),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogEntry {
    /// Physical key, absent for committed lines
    pub code: Option<String>,
    /// Layer selected by the modifiers, when the layer display is on
    pub layer: Option<String>,
    pub kind: EntryKind,
}

pub struct App {
    pub focused_pane: Pane,
    pub layout_path: PathBuf,
    pub engine: TransformEngine,
    pub caps: bool,
    /// Text committed so far
    pub text: String,
    /// Layer of the last key event
    pub layer: String,
    pub status: String,
    pub log: Vec<LogEntry>,
    pub log_scroll: usize,
    show_layer: bool,
}

impl App {
    pub fn new(layout_path: &Path, settings: &Settings) -> Result<Self> {
        let layout = Layout::from_path(layout_path)
            .with_context(|| format!("Failed to load layout {}", layout_path.display()))?;
        let engine = TransformEngine::with_config(Arc::new(layout), settings.to_transform_config());

        Ok(Self {
            focused_pane: Pane::Input,
            layout_path: layout_path.to_path_buf(),
            engine,
            caps: false,
            text: String::new(),
            layer: "default".to_string(),
            status: "Ready".to_string(),
            log: vec![],
            log_scroll: 0,
            show_layer: settings.show_layer(),
        })
    }

    pub fn set_status<S: Into<String>>(&mut self, msg: S) {
        self.status = msg.into();
    }

    fn push_log(&mut self, entry: LogEntry) {
        self.log.push(entry);
        if self.log.len() > MAX_LOG_ENTRIES {
            let overflow = self.log.len() - MAX_LOG_ENTRIES;
            self.log.drain(0..overflow);
        }
        // Follow the newest entry
        self.log_scroll = self.log.len().saturating_sub(1);
    }

    pub fn cycle_pane(&mut self) {
        self.focused_pane = match self.focused_pane {
            Pane::Input => Pane::Output,
            Pane::Output => Pane::Input,
        };
    }

    pub fn toggle_caps(&mut self) {
        self.caps = !self.caps;
        self.set_status(if self.caps { "Caps lock on" } else { "Caps lock off" });
    }

    pub fn pending_dead_key(&self) -> Option<&str> {
        self.engine.pending_dead_key()
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    /// Drop the typed text and any pending dead key
    pub fn clear(&mut self) {
        self.text.clear();
        self.engine.reset();
        self.set_status("Cleared");
    }

    pub fn newline(&mut self) {
        if !self.text.is_empty() {
            let line = std::mem::take(&mut self.text);
            self.push_log(LogEntry {
                code: None,
                layer: None,
                kind: EntryKind::Line(line),
            });
        }
    }

    /// Feed a terminal key press through the layout
    pub fn type_key(&mut self, key: TermKey, modifiers: KeyModifiers) {
        match terminal_to_event(key, modifiers, self.caps) {
            Some(event) => self.process(&event),
            None => self.set_status(format!("{:?} has no US-QWERTY position", key)),
        }
    }

    fn process(&mut self, event: &KeyEvent) {
        self.layer = self.engine.active_layer(&event.modifiers);
        let result = self.engine.process_event(event);

        let kind = match result {
            TransformResult::Text(text) => {
                self.text.push_str(&text);
                EntryKind::Text(text)
            }
            TransformResult::Composed(text) => {
                self.text.push_str(&text);
                EntryKind::Composed(text)
            }
            TransformResult::Suppress => {
                EntryKind::DeadKey(self.pending_dead_key().unwrap_or_default().to_string())
            }
            TransformResult::Unmapped => {
                if let Some(text) = &event.text {
                    self.text.push_str(text);
                }
                EntryKind::Unmapped
            }
            TransformResult::Ignored => return,
        };

        self.push_log(LogEntry {
            code: Some(event.code.to_string()),
            layer: self.show_layer.then(|| self.layer.clone()),
            kind,
        });
    }
}
