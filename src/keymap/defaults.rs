//! Default keybindings for the editor
//!
//! The standard keymap ships embedded in the binary (keymap.yaml at the
//! crate root) and falls back to hardcoded layers if it fails to parse.

use std::path::Path;
use std::sync::Arc;

use super::config::{load_keymap_file, parse_keymap_yaml};
use super::keymap::Keymap;
use super::types::{KeyChord, KeyCode};
use crate::binding::{DefaultInsert, HandlerRef, ResetMode};

/// Default keymap YAML embedded at compile time
const DEFAULT_KEYMAP_YAML: &str = include_str!("../../keymap.yaml");

/// Get the embedded default keymap YAML content
pub fn get_default_keymap_yaml() -> &'static str {
    DEFAULT_KEYMAP_YAML
}

/// Load and merge keymaps: defaults + user overrides
///
/// Loading order (each layer overrides the previous, table by table):
/// 1. Embedded default keymap (compiled into binary)
/// 2. The user keymap at `user_path`, if given and present
///
/// A user keymap that fails to load is logged and skipped.
pub fn load_default_keymap(user_path: Option<&Path>) -> Keymap {
    let mut keymap = match parse_keymap_yaml(DEFAULT_KEYMAP_YAML) {
        Ok(k) => {
            tracing::info!("Loaded embedded default keymap ({} bindings)", k.len());
            k
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse embedded keymap: {}, using hardcoded defaults",
                e
            );
            default_keymap()
        }
    };

    if let Some(path) = user_path.filter(|p| p.exists()) {
        match load_keymap_file(path) {
            Ok(user) => {
                tracing::info!(
                    "Merging user keymap from {} ({} bindings)",
                    path.display(),
                    user.len()
                );
                keymap.merge(&user);
            }
            Err(e) => {
                tracing::warn!("Failed to load user keymap from {}: {}", path.display(), e);
            }
        }
    }

    keymap
}

/// Hardcoded fallback layers
///
/// The insert layer's `Default` entry classifies every key with the basic
/// keymap; Escape leaves any mode.
pub fn default_keymap() -> Keymap {
    let mut keymap = Keymap::new();
    keymap
        .insert
        .bind(KeyChord::DEFAULT, Arc::new(DefaultInsert) as HandlerRef);
    keymap.global.bind(
        KeyChord::key(KeyCode::Escape),
        Arc::new(ResetMode) as HandlerRef,
    );
    keymap
}
