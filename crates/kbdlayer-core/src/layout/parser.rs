// Kbdlayer Layout Parser - JSON/TOML with Serde
// Parses layout descriptors into the validated `Layout` model

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Deserialize;

use super::{Layer, Layout};
use crate::key::KeyCode;
use crate::layer::DEFAULT_LAYER;
use crate::transform::{TransformNode, TransformTable};

/// Layout loading errors
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(String),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("layout has no 'default' layer")]
    MissingDefaultLayer,

    #[error("layer '{layer}' maps key '{key}' to a table; layer values must be strings")]
    NestedLayerValue { layer: String, key: String },

    #[error("dead key '{trigger}' in layer '{layer}' has no transform table")]
    MissingTransform { layer: String, trigger: String },

    #[error("transform for '{trigger}' must be a table, found a plain string")]
    InvalidTransform { trigger: String },

    #[error("layer '{layer}' defines key '{key}' more than once")]
    DuplicateKey { layer: String, key: String },
}

/// On-disk format of a layout descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutFormat {
    Json,
    Toml,
}

impl LayoutFormat {
    /// Pick a format from the file extension; anything unknown is read as JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => LayoutFormat::Toml,
            _ => LayoutFormat::Json,
        }
    }
}

/// Root of a layout descriptor document
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct LayoutDoc {
    /// Layer name -> key identifier -> output
    #[serde(default)]
    pub layers: IndexMap<String, IndexMap<String, Option<RawLayerValue>>>,

    /// Layer name -> values that arm a dead key
    #[serde(default, rename = "deadKeys", alias = "dead_keys")]
    pub dead_keys: IndexMap<String, Vec<String>>,

    /// Dead-key trigger -> composition table
    #[serde(default)]
    pub transforms: IndexMap<String, RawTransform>,

    /// Layer name -> space bar output
    #[serde(default)]
    pub space: IndexMap<String, String>,
}

/// Output side of a layer entry
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawLayerValue {
    Text(String),
    Table(IndexMap<String, RawTransform>),
}

/// A transform entry as written in the descriptor
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawTransform {
    Terminal(String),
    Table(IndexMap<String, RawTransform>),
}

impl LayoutDoc {
    pub fn from_json(content: &str) -> Result<Self, LayoutError> {
        serde_json::from_str(content).map_err(|e| LayoutError::JsonParse(e.to_string()))
    }

    pub fn from_toml(content: &str) -> Result<Self, LayoutError> {
        toml::from_str(content).map_err(|e| LayoutError::TomlParse(e.to_string()))
    }

    pub fn parse(content: &str, format: LayoutFormat) -> Result<Self, LayoutError> {
        match format {
            LayoutFormat::Json => Self::from_json(content),
            LayoutFormat::Toml => Self::from_toml(content),
        }
    }

    /// Validate and convert to the runtime layout
    pub fn to_layout(&self) -> Result<Layout, LayoutError> {
        if !self.layers.contains_key(DEFAULT_LAYER) {
            return Err(LayoutError::MissingDefaultLayer);
        }

        let mut layers = IndexMap::with_capacity(self.layers.len());
        for (name, entries) in &self.layers {
            let mut keys = IndexMap::with_capacity(entries.len());
            for (ident, value) in entries {
                match value {
                    // Unassigned keys are emitted as null or "" by layout generators
                    None => continue,
                    Some(RawLayerValue::Text(text)) if text.is_empty() => continue,
                    Some(RawLayerValue::Text(text)) => {
                        // ISO positions fold into key names, so D03 and KeyE collide
                        let code = KeyCode::from_identifier(ident);
                        if keys.insert(code.clone(), text.clone()).is_some() {
                            return Err(LayoutError::DuplicateKey {
                                layer: name.clone(),
                                key: code.to_string(),
                            });
                        }
                    }
                    Some(RawLayerValue::Table(_)) => {
                        return Err(LayoutError::NestedLayerValue {
                            layer: name.clone(),
                            key: ident.clone(),
                        });
                    }
                }
            }
            log::trace!("Layer '{}' loaded with {} keys", name, keys.len());
            layers.insert(name.clone(), Layer::new(name.clone(), keys));
        }

        let mut transforms = HashMap::with_capacity(self.transforms.len());
        for (trigger, raw) in &self.transforms {
            match raw {
                RawTransform::Table(entries) => {
                    transforms.insert(trigger.clone(), Arc::new(convert_table(entries)));
                }
                RawTransform::Terminal(_) => {
                    return Err(LayoutError::InvalidTransform {
                        trigger: trigger.clone(),
                    });
                }
            }
        }

        let mut dead_keys = HashMap::with_capacity(self.dead_keys.len());
        for (layer, triggers) in &self.dead_keys {
            if !layers.contains_key(layer) {
                log::warn!(
                    "Dead keys declared for layer '{}' which has no key table",
                    layer
                );
            }
            let mut set = HashSet::with_capacity(triggers.len());
            for trigger in triggers {
                if !transforms.contains_key(trigger) {
                    return Err(LayoutError::MissingTransform {
                        layer: layer.clone(),
                        trigger: trigger.clone(),
                    });
                }
                set.insert(trigger.clone());
            }
            dead_keys.insert(layer.clone(), set);
        }

        // An empty override means "no override", same as for layer values
        let space = self
            .space
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(layer, value)| (layer.clone(), value.clone()))
            .collect();

        log::debug!(
            "Layout converted: {} layers, {} dead-key layers, {} transforms",
            layers.len(),
            dead_keys.len(),
            transforms.len()
        );

        Ok(Layout::from_parts(layers, dead_keys, transforms, space))
    }
}

fn convert_table(entries: &IndexMap<String, RawTransform>) -> TransformTable {
    entries
        .iter()
        .map(|(input, raw)| {
            let node = match raw {
                RawTransform::Terminal(value) => TransformNode::Terminal(value.clone()),
                RawTransform::Table(nested) => {
                    TransformNode::Continuation(Arc::new(convert_table(nested)))
                }
            };
            (input.clone(), node)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "layers": {
            "default": { "KeyE": "e", "Equal": "´", "KeyX": null, "KeyY": "" },
            "shift": { "D03": "E" }
        },
        "deadKeys": { "default": ["´"] },
        "transforms": {
            "´": { "e": "é", " ": "´", "^": { "e": "ế" } }
        },
        "space": { "shift": "\u00a0" }
    }"#;

    #[test]
    fn test_parse_json_descriptor() {
        let doc = LayoutDoc::from_json(MINIMAL).unwrap();
        assert_eq!(doc.layers.len(), 2);
        assert_eq!(doc.dead_keys["default"], vec!["´".to_string()]);

        let layout = doc.to_layout().unwrap();
        assert_eq!(layout.layer("default").unwrap().get("KeyE"), Some("e"));
        assert_eq!(layout.layer("shift").unwrap().get("KeyE"), Some("E"));
        assert_eq!(layout.space("shift"), Some("\u{a0}"));
    }

    #[test]
    fn test_null_and_empty_values_are_dropped() {
        let layout = LayoutDoc::from_json(MINIMAL).unwrap().to_layout().unwrap();
        let default = layout.layer("default").unwrap();
        assert_eq!(default.get("KeyX"), None);
        assert_eq!(default.get("KeyY"), None);
        assert_eq!(default.len(), 2);
    }

    #[test]
    fn test_nested_transforms_become_continuations() {
        let layout = LayoutDoc::from_json(MINIMAL).unwrap().to_layout().unwrap();
        let acute = layout.transform("´").unwrap();
        assert!(acute.get("e").unwrap().is_terminal());
        assert!(matches!(acute.get("^"), Some(TransformNode::Continuation(_))));
        assert_eq!(acute.depth(), 2);
    }

    #[test]
    fn test_parse_toml_descriptor() {
        let toml = r#"
[layers.default]
KeyE = "e"
Equal = "´"

[dead_keys]
default = ["´"]

[transforms."´"]
e = "é"
" " = "´"
"#;
        let layout = LayoutDoc::from_toml(toml).unwrap().to_layout().unwrap();
        assert!(layout.is_dead_key("default", "´"));
        assert_eq!(layout.transform("´").unwrap().fallback(), Some("´"));
    }

    #[test]
    fn test_missing_default_layer_is_rejected() {
        let err = LayoutDoc::from_json(r#"{ "layers": { "shift": { "KeyE": "E" } } }"#)
            .unwrap()
            .to_layout()
            .unwrap_err();
        assert!(matches!(err, LayoutError::MissingDefaultLayer));
    }

    #[test]
    fn test_dead_key_without_transform_is_rejected() {
        let err = LayoutDoc::from_json(
            r#"{ "layers": { "default": {} }, "deadKeys": { "default": ["`"] } }"#,
        )
        .unwrap()
        .to_layout()
        .unwrap_err();
        assert!(matches!(err, LayoutError::MissingTransform { .. }));
    }

    #[test]
    fn test_string_transform_is_rejected() {
        let err = LayoutDoc::from_json(
            r#"{ "layers": { "default": {} }, "transforms": { "`": "x" } }"#,
        )
        .unwrap()
        .to_layout()
        .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidTransform { .. }));
    }

    #[test]
    fn test_table_in_layer_is_rejected() {
        let err = LayoutDoc::from_json(
            r#"{ "layers": { "default": { "KeyE": { "e": "é" } } } }"#,
        )
        .unwrap()
        .to_layout()
        .unwrap_err();
        assert!(matches!(err, LayoutError::NestedLayerValue { .. }));
    }

    #[test]
    fn test_iso_position_and_key_name_collide() {
        let err = LayoutDoc::from_json(r#"{ "layers": { "default": { "KeyE": "e", "D03": "x" } } }"#)
            .unwrap()
            .to_layout()
            .unwrap_err();
        match err {
            LayoutError::DuplicateKey { layer, key } => {
                assert_eq!(layer, "default");
                assert_eq!(key, "KeyE");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_same_key_on_different_layers_is_fine() {
        let layout = LayoutDoc::from_json(
            r#"{ "layers": { "default": { "KeyE": "e" }, "shift": { "D03": "E" } } }"#,
        )
        .unwrap()
        .to_layout()
        .unwrap();
        assert_eq!(layout.layer("shift").unwrap().get("KeyE"), Some("E"));
    }

    #[test]
    fn test_empty_space_override_is_dropped() {
        let layout = LayoutDoc::from_json(
            r#"{ "layers": { "default": {} }, "space": { "default": "", "shift": "_" } }"#,
        )
        .unwrap()
        .to_layout()
        .unwrap();
        assert_eq!(layout.space("default"), None);
        assert_eq!(layout.space("shift"), Some("_"));
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let err = LayoutDoc::from_json(r#"{ "layers": {}, "modes": {} }"#).unwrap_err();
        assert!(matches!(err, LayoutError::JsonParse(_)));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(LayoutFormat::from_path(Path::new("se.toml")), LayoutFormat::Toml);
        assert_eq!(LayoutFormat::from_path(Path::new("se.json")), LayoutFormat::Json);
        assert_eq!(LayoutFormat::from_path(Path::new("se")), LayoutFormat::Json);
    }
}
