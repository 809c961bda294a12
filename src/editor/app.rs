//! The editor's key loop
//!
//! Single-threaded: one key is resolved, invoked and fully drained before
//! the next key is read, so at most one handler is ever running.

use std::io;
use std::sync::Arc;

use thiserror::Error;

use super::event::KeyEvent;
use super::keys::KeySource;
use super::notes::{Notes, Notify};
use super::state::State;
use crate::action::Action;
use crate::binding::{call_binding, key_handler, BindingContext, HandlerRef};
use crate::eval::FrameError;
use crate::keymap::{BindingTable, KeyChord, Keymap};

/// How a read ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadResult {
    /// The user committed this line
    Code(String),
    /// The user ended input, or the key source ran dry
    Eof,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error("reading keys: {0}")]
    Input(#[from] io::Error),
}

pub struct App {
    keymap: Keymap,
    state: State,
    notes: Arc<Notes>,
    ctx: BindingContext,
}

impl App {
    pub fn new(keymap: Keymap, notes: Arc<Notes>, ctx: BindingContext) -> Self {
        let state = State::with_modes(Arc::clone(&notes), keymap.mode_set());
        Self {
            keymap,
            state,
            notes,
            ctx,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    pub fn notes(&self) -> &Arc<Notes> {
        &self.notes
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// Handler for `key` given the current mode
    ///
    /// Layers, most specific first: the active mode's table, insert, global.
    pub fn handler_for(&self, key: &KeyChord) -> HandlerRef {
        let mut layers: Vec<&BindingTable> = Vec::with_capacity(3);
        if let Some(mode) = self.state.mode() {
            layers.push(mode.bindings());
        }
        layers.push(&self.keymap.insert);
        layers.push(&self.keymap.global);
        key_handler(key, &layers)
    }

    /// Fully process one key and return the single action to apply
    ///
    /// A commit requested through the event is used when the handler itself
    /// produced no action.
    pub fn handle_key(&mut self, key: KeyChord) -> Result<Action, FrameError> {
        let handler = self.handler_for(&key);
        let notifier: Arc<dyn Notify> = self.notes.clone();
        let mut event = KeyEvent::new(key, &mut self.state);
        let action = call_binding(&self.ctx, notifier, handler.as_ref(), &mut event)?;

        Ok(match (action, event.commit_request()) {
            (Action::NoAction, Some(requested)) => requested,
            (action, _) => action,
        })
    }

    /// Read keys until the user commits a line or ends input
    pub fn read_code(&mut self, keys: &mut dyn KeySource) -> Result<ReadResult, AppError> {
        while let Some(key) = keys.next_key()? {
            match self.handle_key(key)? {
                Action::NoAction => {}
                Action::CommitCode => {
                    self.state.set_mode(None);
                    let code = self.state.buffer.take();
                    tracing::debug!(%code, "committed");
                    return Ok(ReadResult::Code(code));
                }
                Action::CommitEof => {
                    tracing::debug!("end of input");
                    return Ok(ReadResult::Eof);
                }
            }
        }
        Ok(ReadResult::Eof)
    }
}
