// Kbdlayer Transform Engine
// Full key-event pipeline: layer resolution followed by dead-key composition
//
// One engine is one input session. Sessions that share a layout share the
// `Arc<Layout>` but never their dead-key state.

use std::sync::Arc;
use std::time::Duration;

use crate::input::KeyEvent;
use crate::layout::Layout;
use crate::modifier::ModifierSet;
use crate::resolver::{LayerResolver, Resolved};
use crate::transform::deadkeys::{DeadKeyState, Outcome};

/// Configuration for transform engine
#[derive(Debug, Clone, Default)]
pub struct TransformConfig {
    /// Drop a pending dead key after this long; `None` keeps it forever
    pub dead_key_timeout: Option<Duration>,
}

/// Result of transforming a single key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformResult {
    /// Key-up or other event the engine does not handle
    Ignored,
    /// No layer in the fallback chain defines the key
    Unmapped,
    /// Dead key armed or advanced, nothing to commit
    Suppress,
    /// Dead-key composition finished with this text
    Composed(String),
    /// Plain layer value
    Text(String),
}

impl TransformResult {
    /// Text to commit, if any
    pub fn output(&self) -> Option<&str> {
        match self {
            TransformResult::Composed(text) | TransformResult::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn into_output(self) -> Option<String> {
        match self {
            TransformResult::Composed(text) | TransformResult::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<Outcome> for TransformResult {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Suppressed => TransformResult::Suppress,
            Outcome::Composed(text) => TransformResult::Composed(text),
            Outcome::Passthrough(text) => TransformResult::Text(text),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransformEngine {
    resolver: LayerResolver,
    deadkeys: DeadKeyState,
}

impl TransformEngine {
    /// Create a new transform engine over a shared layout
    pub fn new(layout: Arc<Layout>) -> Self {
        Self::with_config(layout, TransformConfig::default())
    }

    pub fn with_config(layout: Arc<Layout>, config: TransformConfig) -> Self {
        let mut deadkeys = DeadKeyState::new();
        deadkeys.set_timeout(config.dead_key_timeout);
        Self {
            resolver: LayerResolver::new(layout),
            deadkeys,
        }
    }

    pub fn layout(&self) -> &Arc<Layout> {
        self.resolver.layout()
    }

    /// Layer a modifier state selects
    pub fn active_layer(&self, modifiers: &ModifierSet) -> String {
        modifiers.layer_name()
    }

    /// Whether a dead-key sequence is pending
    pub fn is_armed(&self) -> bool {
        self.deadkeys.is_active()
    }

    pub fn pending_dead_key(&self) -> Option<&str> {
        self.deadkeys.pending_trigger()
    }

    /// Drop any pending dead-key sequence
    pub fn reset(&mut self) {
        self.deadkeys.clear();
    }

    /// Process a single key event
    ///
    /// This is the main entry point for event processing. Releases are
    /// ignored, unmapped keys leave the dead-key state untouched.
    pub fn process_event(&mut self, event: &KeyEvent) -> TransformResult {
        if !event.action.is_pressed() {
            return TransformResult::Ignored;
        }

        let Some(Resolved { value, layer }) =
            self.resolver.resolve(event.code.as_str(), &event.modifiers)
        else {
            log::debug!("{} unmapped on layer '{}'", event.code, event.modifiers);
            return TransformResult::Unmapped;
        };

        log::debug!("{} on layer '{}' -> {:?}", event.code, layer, value);
        let layout = Arc::clone(self.resolver.layout());
        self.deadkeys.resolve(&layout, &value, &layer).into()
    }

    /// Resolve an event to the string to commit, or `None`
    pub fn resolve(&mut self, event: &KeyEvent) -> Option<String> {
        self.process_event(event).into_output()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::modifier::Modifier;

    fn engine() -> TransformEngine {
        let layout = Layout::from_json(
            r#"{
            "layers": {
                "default": { "KeyE": "e", "KeyA": "a", "Equal": "´", "BracketRight": "¨" },
                "shift": { "KeyE": "E", "Equal": "`" }
            },
            "deadKeys": { "default": ["´"], "shift": ["`"] },
            "transforms": {
                "´": { "e": "é", "E": "É", " ": "´" },
                "`": { "e": "è", " ": "`" }
            }
        }"#,
        )
        .unwrap();
        TransformEngine::new(Arc::new(layout))
    }

    #[test]
    fn test_transform_engine_passthrough() {
        let mut engine = engine();
        let result = engine.process_event(&KeyEvent::new("KeyA"));
        assert_eq!(result, TransformResult::Text("a".into()));
        assert!(!engine.is_armed());
    }

    #[test]
    fn test_dead_key_then_shifted_letter() {
        let mut engine = engine();
        assert_eq!(engine.process_event(&KeyEvent::new("Equal")), TransformResult::Suppress);
        let shifted_e = KeyEvent::new("KeyE").with_modifier(Modifier::Shift);
        assert_eq!(engine.process_event(&shifted_e), TransformResult::Composed("É".into()));
    }

    #[test]
    fn test_dead_key_on_shift_layer() {
        let mut engine = engine();
        let grave = KeyEvent::new("Equal").with_modifier(Modifier::Shift);
        assert_eq!(engine.resolve(&grave), None);
        assert_eq!(engine.pending_dead_key(), Some("`"));
        assert_eq!(engine.resolve(&KeyEvent::new("KeyE")), Some("è".into()));
    }

    #[test]
    fn test_dead_key_detection_uses_starting_layer() {
        let mut engine = engine();
        // caps falls back to default for Equal, but "´" is only a dead key on "default"
        let caps_acute = KeyEvent::new("Equal").with_modifier(Modifier::Caps);
        assert_eq!(engine.resolve(&caps_acute), Some("´".into()));
        assert!(!engine.is_armed());
    }

    #[test]
    fn test_release_is_ignored_and_keeps_state() {
        let mut engine = engine();
        engine.process_event(&KeyEvent::new("Equal"));
        let release = KeyEvent::new("Equal").with_action(Action::Release);
        assert_eq!(engine.process_event(&release), TransformResult::Ignored);
        assert!(engine.is_armed());
    }

    #[test]
    fn test_unmapped_key_keeps_pending_dead_key() {
        let mut engine = engine();
        engine.process_event(&KeyEvent::new("Equal"));
        assert_eq!(engine.process_event(&KeyEvent::new("F5")), TransformResult::Unmapped);
        assert!(engine.is_armed());
        assert_eq!(engine.resolve(&KeyEvent::new("KeyE")), Some("é".into()));
    }

    #[test]
    fn test_space_after_dead_key_commits_accent() {
        let mut engine = engine();
        engine.process_event(&KeyEvent::new("Equal"));
        assert_eq!(engine.resolve(&KeyEvent::new("Space")), Some("´".into()));
        assert!(!engine.is_armed());
    }

    #[test]
    fn test_reset_drops_pending_sequence() {
        let mut engine = engine();
        engine.process_event(&KeyEvent::new("Equal"));
        engine.reset();
        assert_eq!(engine.resolve(&KeyEvent::new("KeyE")), Some("e".into()));
    }

    #[test]
    fn test_repeat_is_processed_like_press() {
        let mut engine = engine();
        let repeat = KeyEvent::new("KeyE").with_action(Action::Repeat);
        assert_eq!(engine.resolve(&repeat), Some("e".into()));
    }
}
