//! Layered lookup of a key's handler

use super::table::BindingTable;
use super::types::KeyChord;
use crate::binding::HandlerRef;

/// Find the handler for `key` in an ordered stack of layers
///
/// Layers are ordered most specific first. The first layer with an exact
/// entry for `key` wins; only if no layer has one does the first layer with
/// a `Default` entry win. Returns `None` when neither exists.
pub fn resolve(key: &KeyChord, layers: &[&BindingTable]) -> Option<HandlerRef> {
    layers
        .iter()
        .find_map(|layer| layer.get(key))
        .or_else(|| layers.iter().find_map(|layer| layer.default_handler()))
        .cloned()
}
