//! Editor-side collaborators of the binding engine: state, modes, the key
//! event handed to handlers, and the loop that drives them

mod app;
pub mod basic;
mod event;
mod keys;
mod mode;
mod notes;
mod state;

pub use app::{App, AppError, ReadResult};
pub use event::KeyEvent;
pub use keys::{KeySource, ScriptedKeys, TerminalKeys};
pub use mode::{Mode, ModeSet, TableMode};
pub use notes::{Notes, Notify};
pub use state::{CodeBuffer, State};
