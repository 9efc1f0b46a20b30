use crossterm::event::{KeyCode as TermKey, KeyModifiers};
use kbdlayer_core::{KeyCode, KeyEvent, Modifier};

/// Unshifted and shifted characters of a US-QWERTY key, by physical code.
const US_QWERTY: &[(&str, char, char)] = &[
    ("Backquote", '`', '~'),
    ("Digit1", '1', '!'),
    ("Digit2", '2', '@'),
    ("Digit3", '3', '#'),
    ("Digit4", '4', '$'),
    ("Digit5", '5', '%'),
    ("Digit6", '6', '^'),
    ("Digit7", '7', '&'),
    ("Digit8", '8', '*'),
    ("Digit9", '9', '('),
    ("Digit0", '0', ')'),
    ("Minus", '-', '_'),
    ("Equal", '=', '+'),
    ("KeyQ", 'q', 'Q'),
    ("KeyW", 'w', 'W'),
    ("KeyE", 'e', 'E'),
    ("KeyR", 'r', 'R'),
    ("KeyT", 't', 'T'),
    ("KeyY", 'y', 'Y'),
    ("KeyU", 'u', 'U'),
    ("KeyI", 'i', 'I'),
    ("KeyO", 'o', 'O'),
    ("KeyP", 'p', 'P'),
    ("BracketLeft", '[', '{'),
    ("BracketRight", ']', '}'),
    ("KeyA", 'a', 'A'),
    ("KeyS", 's', 'S'),
    ("KeyD", 'd', 'D'),
    ("KeyF", 'f', 'F'),
    ("KeyG", 'g', 'G'),
    ("KeyH", 'h', 'H'),
    ("KeyJ", 'j', 'J'),
    ("KeyK", 'k', 'K'),
    ("KeyL", 'l', 'L'),
    ("Semicolon", ';', ':'),
    ("Quote", '\'', '"'),
    ("Backslash", '\\', '|'),
    ("KeyZ", 'z', 'Z'),
    ("KeyX", 'x', 'X'),
    ("KeyC", 'c', 'C'),
    ("KeyV", 'v', 'V'),
    ("KeyB", 'b', 'B'),
    ("KeyN", 'n', 'N'),
    ("KeyM", 'm', 'M'),
    ("Comma", ',', '<'),
    ("Period", '.', '>'),
    ("Slash", '/', '?'),
];

/// Physical key and shift state that type `c` on a US-QWERTY keyboard
pub fn char_to_code(c: char) -> Option<(&'static str, bool)> {
    if c == ' ' {
        return Some(("Space", false));
    }
    US_QWERTY.iter().find_map(|&(code, plain, shifted)| {
        if c == plain {
            Some((code, false))
        } else if c == shifted {
            Some((code, true))
        } else {
            None
        }
    })
}

/// Turn a terminal key press into a layout key event.
///
/// The terminal reports characters, not physical keys, so the key is
/// recovered from the US-QWERTY table. Caps-lock is not visible to the
/// terminal and is supplied by the caller.
pub fn terminal_to_event(key: TermKey, modifiers: KeyModifiers, caps: bool) -> Option<KeyEvent> {
    let TermKey::Char(c) = key else {
        return None;
    };
    let (code, shifted) = char_to_code(c)?;

    let mut event = KeyEvent::new(KeyCode::new(code)).with_text(c.to_string());
    event.modifiers.set(Modifier::Shift, shifted || modifiers.contains(KeyModifiers::SHIFT));
    event.modifiers.set(Modifier::Alt, modifiers.contains(KeyModifiers::ALT));
    event.modifiers.set(Modifier::Ctrl, modifiers.contains(KeyModifiers::CONTROL));
    event.modifiers.set(Modifier::Caps, caps);
    Some(event)
}
