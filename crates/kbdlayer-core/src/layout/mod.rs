// Kbdlayer Layout Descriptor
// Read-only key tables, dead-key sets and transforms for one keyboard layout

pub mod parser;

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::key::KeyCode;
use crate::layer::DEFAULT_LAYER;
use crate::transform::TransformTable;

pub use parser::{LayoutDoc, LayoutError, LayoutFormat};

/// Key table for a single modifier layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    name: String,
    keys: IndexMap<KeyCode, String>,
}

impl Layer {
    pub fn new(name: impl Into<String>, keys: IndexMap<KeyCode, String>) -> Self {
        Self {
            name: name.into(),
            keys,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Output for a key code, if this layer defines it
    pub fn get(&self, code: &str) -> Option<&str> {
        self.keys.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&KeyCode, &str)> {
        self.keys.iter().map(|(k, v)| (k, v.as_str()))
    }
}

/// A validated layout descriptor.
///
/// Built once from a descriptor document and never mutated afterwards, so
/// it can be shared between any number of engine sessions.
#[derive(Debug, Clone)]
pub struct Layout {
    layers: IndexMap<String, Layer>,
    dead_keys: HashMap<String, HashSet<String>>,
    transforms: HashMap<String, Arc<TransformTable>>,
    space: HashMap<String, String>,
}

impl Layout {
    pub(crate) fn from_parts(
        layers: IndexMap<String, Layer>,
        dead_keys: HashMap<String, HashSet<String>>,
        transforms: HashMap<String, Arc<TransformTable>>,
        space: HashMap<String, String>,
    ) -> Self {
        Self {
            layers,
            dead_keys,
            transforms,
            space,
        }
    }

    /// Load a layout descriptor file (JSON, or TOML by `.toml` extension)
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LayoutError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        log::debug!("Loading layout from {}", path.display());
        Self::parse(&content, LayoutFormat::from_path(path))
    }

    pub fn parse(content: &str, format: LayoutFormat) -> Result<Self, LayoutError> {
        LayoutDoc::parse(content, format)?.to_layout()
    }

    pub fn from_json(content: &str) -> Result<Self, LayoutError> {
        Self::parse(content, LayoutFormat::Json)
    }

    pub fn from_toml(content: &str) -> Result<Self, LayoutError> {
        Self::parse(content, LayoutFormat::Toml)
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.get(name)
    }

    /// The always-present `default` layer
    pub fn default_layer(&self) -> Option<&Layer> {
        self.layers.get(DEFAULT_LAYER)
    }

    /// Layer names in descriptor order
    pub fn layer_names(&self) -> impl Iterator<Item = &str> {
        self.layers.keys().map(String::as_str)
    }

    /// Whether `value` arms a dead key when produced on `layer`
    pub fn is_dead_key(&self, layer: &str, value: &str) -> bool {
        self.dead_keys
            .get(layer)
            .is_some_and(|set| set.contains(value))
    }

    /// Dead-key triggers registered for a layer
    pub fn dead_keys(&self, layer: &str) -> Option<&HashSet<String>> {
        self.dead_keys.get(layer)
    }

    pub fn has_dead_keys(&self) -> bool {
        self.dead_keys.values().any(|set| !set.is_empty())
    }

    /// Composition table for a dead-key trigger
    pub fn transform(&self, trigger: &str) -> Option<&Arc<TransformTable>> {
        self.transforms.get(trigger)
    }

    pub fn transform_count(&self) -> usize {
        self.transforms.len()
    }

    /// Longest dead-key chain any transform table allows (0 without transforms)
    pub fn max_transform_depth(&self) -> usize {
        self.transforms
            .values()
            .map(|table| table.depth())
            .max()
            .unwrap_or(0)
    }

    /// Space bar override for a layer
    pub fn space(&self, layer: &str) -> Option<&str> {
        self.space.get(layer).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pure_resolver_layout_has_no_dead_keys() {
        let layout = Layout::from_json(r#"{ "layers": { "default": { "KeyA": "a" } } }"#).unwrap();
        assert!(!layout.has_dead_keys());
        assert_eq!(layout.transform_count(), 0);
        assert_eq!(layout.max_transform_depth(), 0);
        assert!(!layout.is_dead_key("default", "a"));
        assert_eq!(layout.default_layer().unwrap().get("KeyA"), Some("a"));
        assert_eq!(layout.space("default"), None);
    }

    #[test]
    fn test_max_transform_depth() {
        let layout = Layout::from_json(
            r#"{
            "layers": { "default": {} },
            "transforms": {
                "`": { "e": "è" },
                "¨": { "u": "ü", "´": { "u": "ǘ" } }
            }
        }"#,
        )
        .unwrap();
        assert_eq!(layout.max_transform_depth(), 2);
    }

    #[test]
    fn test_layer_names_keep_descriptor_order() {
        let layout = Layout::from_json(
            r#"{ "layers": { "alt": {}, "shift": {}, "default": {}, "caps": {} } }"#,
        )
        .unwrap();
        let names: Vec<&str> = layout.layer_names().collect();
        assert_eq!(names, vec!["alt", "shift", "default", "caps"]);
    }

    #[test]
    fn test_from_missing_path_is_io_error() {
        let err = Layout::from_path("/nonexistent/kbdlayer/layout.json").unwrap_err();
        assert!(matches!(err, LayoutError::Io(_)));
    }
}
