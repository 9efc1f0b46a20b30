// Kbdlayer Core Library
// Modifier-layer key resolution and dead-key composition

pub mod action;
pub mod host;
pub mod input;
pub mod key;
pub mod layer;
pub mod layout;
pub mod modifier;
pub mod resolver;
pub mod settings;
pub mod transform;

pub use action::Action;
pub use host::{Commit, CommitSink, ContextId, ImeHost, MemorySink, SinkError};
pub use input::{parse_event_string, EventParseError, KeyEvent};
pub use key::{iso_position_to_code, KeyCode};
pub use layer::{fallback_layers, DEFAULT_LAYER};
pub use layout::{Layer, Layout, LayoutError, LayoutFormat};
pub use modifier::{Modifier, ModifierSet};
pub use resolver::{LayerResolver, Resolved};
pub use settings::{default_settings_content, Settings, SettingsError};
pub use transform::{
    DeadKeyState, Outcome, TransformConfig, TransformEngine, TransformNode, TransformResult,
    TransformTable,
};
