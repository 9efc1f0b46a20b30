// Kbdlayer Input Event
// A single raw key event as delivered by the host

use crate::action::Action;
use crate::key::KeyCode;
use crate::modifier::{Modifier, ModifierSet};

/// A physical key event with the modifier state at the time it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: ModifierSet,
    pub action: Action,
    /// Text the host would insert on its own, used when the layout has no
    /// mapping for the key
    pub text: Option<String>,
}

impl KeyEvent {
    /// A key press with no modifiers
    pub fn new(code: impl Into<KeyCode>) -> Self {
        Self {
            code: code.into(),
            modifiers: ModifierSet::none(),
            action: Action::Press,
            text: None,
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.set(modifier, true);
        self
    }

    pub fn with_modifiers(mut self, modifiers: ModifierSet) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn is_press(&self) -> bool {
        self.action.is_pressed()
    }
}
