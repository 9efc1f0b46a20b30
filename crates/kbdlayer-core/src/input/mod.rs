// Kbdlayer Input Layer
// Raw key events and the textual event notation used by the harnesses

pub mod event;
pub mod parser;

pub use event::KeyEvent;
pub use parser::{parse_event_string, EventParseError};
