// Kbdlayer Transform Module
// Dead-key composition tables, session state and the event pipeline

pub mod deadkeys;
pub mod engine;
pub mod table;

pub use deadkeys::{DeadKeyState, Outcome};
pub use engine::{TransformConfig, TransformEngine, TransformResult};
pub use table::{TransformNode, TransformTable, FALLBACK_ENTRY};
