// Kbdlayer Layer Resolver
// Maps a key code and modifier set to the raw layer value

use std::sync::Arc;

use crate::key::SPACE;
use crate::layer::fallback_layers;
use crate::layout::Layout;
use crate::modifier::ModifierSet;

const DEFAULT_SPACE: &str = " ";

/// A value found by the resolver, together with the layer the event selected.
///
/// `layer` is always the starting layer derived from the modifiers, even
/// when the value came from a fallback layer: dead-key detection is keyed
/// on the layer the user is actually in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub value: String,
    pub layer: String,
}

#[derive(Debug, Clone)]
pub struct LayerResolver {
    layout: Arc<Layout>,
}

impl LayerResolver {
    pub fn new(layout: Arc<Layout>) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &Arc<Layout> {
        &self.layout
    }

    /// Resolve a key press; `None` when no layer in the chain defines the key.
    pub fn resolve(&self, code: &str, modifiers: &ModifierSet) -> Option<Resolved> {
        let layer = modifiers.layer_name();
        let value = self.lookup(code, &layer)?.to_string();
        Some(Resolved { value, layer })
    }

    /// Look a key up starting from an explicit layer name
    pub fn lookup<'a>(&'a self, code: &str, layer: &str) -> Option<&'a str> {
        if code == SPACE {
            return Some(self.layout.space(layer).unwrap_or(DEFAULT_SPACE));
        }

        for candidate in fallback_layers(layer) {
            let Some(table) = self.layout.layer(candidate) else {
                continue;
            };
            if let Some(value) = table.get(code) {
                log::trace!("{} resolved in layer '{}' (from '{}')", code, candidate, layer);
                return Some(value);
            }
        }

        log::trace!("{} not defined in any fallback of '{}'", code, layer);
        None
    }
}
