// Kbdlayer Key Type
// Physical key-code identifiers (W3C `KeyboardEvent.code` names) and ISO positions

use std::borrow::Borrow;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Key code of the space bar
pub const SPACE: &str = "Space";

/// Represents a single physical key.
///
/// The value is an opaque platform identifier such as `"KeyE"` or
/// `"BracketLeft"`; the engine never interprets it beyond equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(String);

impl KeyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The space bar
    pub fn space() -> Self {
        Self(SPACE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_space(&self) -> bool {
        self.0 == SPACE
    }

    /// Build a key code from an identifier that may be an ISO position.
    ///
    /// `"D03"` becomes `"KeyE"`; anything that is not a known ISO position
    /// is kept verbatim.
    pub fn from_identifier(ident: &str) -> Self {
        match iso_position_to_code(ident) {
            Some(code) => Self(code.to_string()),
            None => Self(ident.to_string()),
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KeyCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl From<String> for KeyCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl Borrow<str> for KeyCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Row E: number row, `E00` is the key left of `1`
const ROW_E: [&str; 13] = [
    "Backquote", "Digit1", "Digit2", "Digit3", "Digit4", "Digit5", "Digit6", "Digit7", "Digit8",
    "Digit9", "Digit0", "Minus", "Equal",
];

/// Row D starts at `D01`
const ROW_D: [&str; 12] = [
    "KeyQ", "KeyW", "KeyE", "KeyR", "KeyT", "KeyY", "KeyU", "KeyI", "KeyO", "KeyP",
    "BracketLeft", "BracketRight",
];

/// Row C starts at `C01`
const ROW_C: [&str; 12] = [
    "KeyA", "KeyS", "KeyD", "KeyF", "KeyG", "KeyH", "KeyJ", "KeyK", "KeyL", "Semicolon",
    "Quote", "Backslash",
];

/// Row B: `B00` is the extra ISO key left of `Z`
const ROW_B: [&str; 11] = [
    "IntlBackslash", "KeyZ", "KeyX", "KeyC", "KeyV", "KeyB", "KeyN", "KeyM", "Comma", "Period",
    "Slash",
];

static ISO_POSITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([EDCB])(\d{2})$").expect("ISO position pattern is valid")
});

/// Translate an ISO 9995 key position (`E00`, `D01`, `C12`, `B10`, ...) to
/// the physical key-code name.
pub fn iso_position_to_code(position: &str) -> Option<&'static str> {
    let caps = ISO_POSITION.captures(position)?;
    let column: usize = caps[2].parse().ok()?;

    let (row, first_column): (&[&'static str], usize) = match &caps[1] {
        "E" => (&ROW_E, 0),
        "D" => (&ROW_D, 1),
        "C" => (&ROW_C, 1),
        "B" => (&ROW_B, 0),
        _ => return None,
    };

    column
        .checked_sub(first_column)
        .and_then(|index| row.get(index))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_rows_map_to_codes() {
        assert_eq!(iso_position_to_code("E00"), Some("Backquote"));
        assert_eq!(iso_position_to_code("E12"), Some("Equal"));
        assert_eq!(iso_position_to_code("D01"), Some("KeyQ"));
        assert_eq!(iso_position_to_code("D03"), Some("KeyE"));
        assert_eq!(iso_position_to_code("C12"), Some("Backslash"));
        assert_eq!(iso_position_to_code("B00"), Some("IntlBackslash"));
        assert_eq!(iso_position_to_code("B10"), Some("Slash"));
    }

    #[test]
    fn test_iso_out_of_range() {
        assert_eq!(iso_position_to_code("D00"), None);
        assert_eq!(iso_position_to_code("C13"), None);
        assert_eq!(iso_position_to_code("B11"), None);
        assert_eq!(iso_position_to_code("A01"), None);
        assert_eq!(iso_position_to_code("KeyE"), None);
    }

    #[test]
    fn test_from_identifier_keeps_plain_codes() {
        assert_eq!(KeyCode::from_identifier("KeyE").as_str(), "KeyE");
        assert_eq!(KeyCode::from_identifier("D03").as_str(), "KeyE");
        assert!(KeyCode::from_identifier("Space").is_space());
    }
}
