//! Configurable keyboard mapping system
//!
//! This module provides a data-driven keybinding system that:
//! - Maps key chords to handlers through ordered binding layers
//! - Falls back to a table's `Default` entry when no layer binds the key
//! - Enables user customization via YAML config files
//!
//! # Architecture
//!
//! ```text
//! crossterm::KeyEvent → KeyChord → resolve(layers) → Handler
//! ```
//!
//! # Loading Keymaps
//!
//! ```ignore
//! // Embedded defaults merged with the user's keymap.yaml
//! let keymap = load_default_keymap(Some(&path));
//!
//! // Or load a single YAML file
//! let keymap = load_keymap_file(Path::new("keymap.yaml"))?;
//! ```

mod config;
mod crossterm_adapter;
mod defaults;
#[allow(clippy::module_inception)]
mod keymap;
mod resolve;
mod table;
mod types;

pub use config::{
    load_keymap_file, parse_handler, parse_key_string, parse_keymap_yaml, BindingConfig,
    KeymapConfig, KeymapError,
};
pub use crossterm_adapter::keychord_from_crossterm;
pub use defaults::{default_keymap, get_default_keymap_yaml, load_default_keymap};
pub use keymap::Keymap;
pub use resolve::resolve;
pub use table::BindingTable;
pub use types::{KeyChord, KeyCode, Modifiers};
