// Kbdlayer Layer Names
// Layer naming helpers and the modifier fallback chain

use smallvec::SmallVec;

use crate::modifier::{Modifier, LAYER_SEPARATOR};

/// Layer used when no modifier is held, and the last resort of every chain
pub const DEFAULT_LAYER: &str = "default";

const CAPS_LAYER: &str = "caps";
const SHIFT_LAYER: &str = "shift";

/// Ordered list of layers to consult for a key; never longer than four.
pub type FallbackChain<'a> = SmallVec<[&'a str; 4]>;

/// Check whether a layer name contains a modifier component.
///
/// Components are the `+`-separated tokens, so `"shift"` is a component of
/// `"caps+shift"` but not of a hypothetical `"shiftlock"`.
pub fn has_component(layer: &str, modifier: Modifier) -> bool {
    layer
        .split(LAYER_SEPARATOR)
        .any(|token| token == modifier.token())
}

/// Derive the fallback chain for a starting layer.
///
/// The chain is the layer itself, then `caps` and `shift` when the layer
/// carries those components (and is not already that single layer), and
/// finally `default`.
pub fn fallback_layers(layer: &str) -> FallbackChain<'_> {
    let mut chain = FallbackChain::new();
    chain.push(layer);

    if layer == DEFAULT_LAYER {
        return chain;
    }

    if has_component(layer, Modifier::Caps) && layer != CAPS_LAYER {
        chain.push(CAPS_LAYER);
    }

    if has_component(layer, Modifier::Shift) && layer != SHIFT_LAYER {
        chain.push(SHIFT_LAYER);
    }

    chain.push(DEFAULT_LAYER);
    chain
}
