//! chordline - key-binding execution engine for an interactive line editor
//!
//! Key presses are resolved against ordered binding layers, the chosen
//! handler runs in an isolated execution frame whose output is relayed as
//! notifications, and its outcome becomes at most one editor action.

pub mod action;
pub mod binding;
pub mod cli;
pub mod config;
pub mod config_paths;
pub mod editor;
pub mod eval;
pub mod keymap;
pub mod tracing;

// Re-export commonly used types
pub use action::Action;
pub use binding::{call_binding, BindingContext, Handler, HandlerRef};
pub use config::EngineConfig;
pub use editor::{App, KeyEvent, Notes, ReadResult, State};
pub use keymap::{resolve, BindingTable, KeyChord, Keymap};
