// Kbdlayer IME Host Adapter
//
// Connects the transform engine to a host input-method API: the host
// reports focus changes and key events, resolved text is committed to the
// focused input context through a `CommitSink`.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::input::KeyEvent;
use crate::layout::Layout;
use crate::transform::{TransformConfig, TransformEngine, TransformResult};

/// Host identifier of a focused input context
pub type ContextId = i32;

/// Error type for commit operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SinkError {
    #[error("input context {0} is not available")]
    ContextGone(ContextId),

    #[error("commit rejected: {0}")]
    Rejected(String),
}

/// Receives resolved text for an input context
pub trait CommitSink {
    fn commit(&mut self, context: ContextId, text: &str) -> Result<(), SinkError>;
}

/// A committed string, as recorded by `MemorySink`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub context: ContextId,
    pub text: String,
}

/// Sink that keeps every commit in memory.
///
/// Clones share the same buffer, so a harness can keep one handle while the
/// host owns another.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    commits: Arc<Mutex<Vec<Commit>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commits(&self) -> Vec<Commit> {
        self.commits.lock().clone()
    }

    /// Concatenated text committed to one context
    pub fn text_for(&self, context: ContextId) -> String {
        self.commits
            .lock()
            .iter()
            .filter(|c| c.context == context)
            .map(|c| c.text.as_str())
            .collect()
    }

    pub fn clear(&self) {
        self.commits.lock().clear();
    }
}

impl CommitSink for MemorySink {
    fn commit(&mut self, context: ContextId, text: &str) -> Result<(), SinkError> {
        self.commits.lock().push(Commit {
            context,
            text: text.to_string(),
        });
        Ok(())
    }
}

/// Input-method host with one engine session per input context.
pub struct ImeHost<S: CommitSink> {
    layout: Arc<Layout>,
    config: TransformConfig,
    sessions: HashMap<ContextId, TransformEngine>,
    focused: Option<ContextId>,
    sink: S,
}

impl<S: CommitSink> ImeHost<S> {
    pub fn new(layout: Arc<Layout>, sink: S) -> Self {
        Self::with_config(layout, TransformConfig::default(), sink)
    }

    pub fn with_config(layout: Arc<Layout>, config: TransformConfig, sink: S) -> Self {
        Self {
            layout,
            config,
            sessions: HashMap::new(),
            focused: None,
            sink,
        }
    }

    pub fn focused(&self) -> Option<ContextId> {
        self.focused
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Session of a context while it is focused
    pub fn session(&self, context: ContextId) -> Option<&TransformEngine> {
        self.sessions.get(&context)
    }

    /// An input context gained focus
    pub fn focus(&mut self, context: ContextId) {
        log::debug!("Focus on input context {}", context);
        let layout = &self.layout;
        let config = &self.config;
        self.sessions
            .entry(context)
            .or_insert_with(|| TransformEngine::with_config(Arc::clone(layout), config.clone()));
        self.focused = Some(context);
    }

    /// An input context lost focus; its session and pending dead key are dropped
    pub fn blur(&mut self, context: ContextId) {
        log::debug!("Blur on input context {}", context);
        self.sessions.remove(&context);
        if self.focused == Some(context) {
            self.focused = None;
        }
    }

    /// Handle a key event; returns whether the host should swallow it.
    pub fn key_event(&mut self, event: &KeyEvent) -> bool {
        if !event.is_press() {
            return false;
        }
        let Some(context) = self.focused else {
            return false;
        };
        let Some(session) = self.sessions.get_mut(&context) else {
            return false;
        };

        let text = match session.process_event(event) {
            TransformResult::Ignored => return false,
            TransformResult::Suppress => return true,
            TransformResult::Composed(text) | TransformResult::Text(text) => text,
            TransformResult::Unmapped => match &event.text {
                Some(text) => text.clone(),
                None => return false,
            },
        };

        if let Err(e) = self.sink.commit(context, &text) {
            log::error!("Failed to commit {:?} to context {}: {}", text, context, e);
        }
        true
    }
}
