// Kbdlayer Event String Parser
// Parses event strings like "caps+shift+KeyE" into structured key events

use std::str::FromStr;

use crate::action::Action;
use crate::key::KeyCode;
use crate::modifier::{Modifier, ModifierSet};

use super::KeyEvent;

/// Suffix marking a key release, e.g. `KeyE:up`
const RELEASE_SUFFIX: &str = ":up";

/// Errors that can occur during event parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventParseError {
    #[error("event string cannot be empty")]
    EmptyInput,

    #[error("unknown modifier: '{0}'")]
    UnknownModifier(String),

    #[error("event string has no key after the modifiers")]
    MissingKey,

    #[error("event string cannot end with '+'")]
    TrailingSeparator,
}

/// Parse an event string like "caps+shift+KeyE" into a key event
///
/// Everything before the last `+` must be a modifier (`caps`, `ctrl`, `alt`,
/// `shift` or an alias); the last part is the key code, which may also be
/// written as an ISO position (`D03`). A trailing `:up` makes it a release.
///
/// # Examples
/// ```
/// use kbdlayer_core::input::parse_event_string;
/// let event = parse_event_string("shift+KeyE").unwrap();
/// assert_eq!(event.code.as_str(), "KeyE");
/// assert_eq!(event.modifiers.layer_name(), "shift");
/// ```
pub fn parse_event_string(exp: &str) -> Result<KeyEvent, EventParseError> {
    let trimmed = exp.trim();
    if trimmed.is_empty() {
        return Err(EventParseError::EmptyInput);
    }

    let (body, action) = match trimmed.strip_suffix(RELEASE_SUFFIX) {
        Some(body) => (body, Action::Release),
        None => (trimmed, Action::Press),
    };

    if body.ends_with('+') {
        return Err(EventParseError::TrailingSeparator);
    }

    let parts: Vec<&str> = body.split('+').map(str::trim).collect();
    let (key_str, modifier_parts) = match parts.split_last() {
        Some((key, rest)) if !key.is_empty() => (*key, rest),
        _ => return Err(EventParseError::EmptyInput),
    };

    if Modifier::from_str(key_str).is_ok() {
        return Err(EventParseError::MissingKey);
    }

    let mut modifiers = ModifierSet::none();
    for part in modifier_parts {
        let modifier = Modifier::from_str(part)
            .map_err(|_| EventParseError::UnknownModifier(part.to_string()))?;
        modifiers.set(modifier, true);
    }

    Ok(KeyEvent::new(KeyCode::from_identifier(key_str))
        .with_modifiers(modifiers)
        .with_action(action))
}
