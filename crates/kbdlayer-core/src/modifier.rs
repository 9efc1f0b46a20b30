// Kbdlayer Modifier System
// The four modifier flags and how they combine into a layer name

use std::fmt;

use strum::IntoEnumIterator;
use strum_macros::{EnumIter, EnumString};

use crate::layer::DEFAULT_LAYER;

/// Separator between modifier tokens in a layer name
pub const LAYER_SEPARATOR: char = '+';

/// A modifier that participates in layer selection.
///
/// Declaration order is the canonical order tokens appear in a layer name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Modifier {
    #[strum(to_string = "caps", serialize = "capslock", serialize = "caps_lock")]
    Caps,
    #[strum(to_string = "ctrl", serialize = "control")]
    Ctrl,
    #[strum(to_string = "alt", serialize = "option", serialize = "altgr")]
    Alt,
    #[strum(to_string = "shift")]
    Shift,
}

impl Modifier {
    /// Token used for this modifier inside a layer name
    pub fn token(self) -> &'static str {
        match self {
            Modifier::Caps => "caps",
            Modifier::Ctrl => "ctrl",
            Modifier::Alt => "alt",
            Modifier::Shift => "shift",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// The modifier state captured from a single input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModifierSet {
    pub caps: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl ModifierSet {
    /// No modifiers active
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with(mut self, modifier: Modifier) -> Self {
        self.set(modifier, true);
        self
    }

    pub fn set(&mut self, modifier: Modifier, active: bool) {
        match modifier {
            Modifier::Caps => self.caps = active,
            Modifier::Ctrl => self.ctrl = active,
            Modifier::Alt => self.alt = active,
            Modifier::Shift => self.shift = active,
        }
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Caps => self.caps,
            Modifier::Ctrl => self.ctrl,
            Modifier::Alt => self.alt,
            Modifier::Shift => self.shift,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.caps || self.ctrl || self.alt || self.shift)
    }

    /// Active modifiers in canonical order
    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        Modifier::iter().filter(|m| self.contains(*m))
    }

    /// Derive the layer name: active tokens in `caps, ctrl, alt, shift`
    /// order joined by `+`, or `default` when nothing is held.
    pub fn layer_name(&self) -> String {
        if self.is_empty() {
            return DEFAULT_LAYER.to_string();
        }
        self.iter()
            .map(Modifier::token)
            .collect::<Vec<_>>()
            .join(&LAYER_SEPARATOR.to_string())
    }
}

impl FromIterator<Modifier> for ModifierSet {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        let mut set = ModifierSet::none();
        for modifier in iter {
            set.set(modifier, true);
        }
        set
    }
}

impl fmt::Display for ModifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.layer_name())
    }
}
