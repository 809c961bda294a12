//! The single argument passed to a key handler

use super::state::State;
use crate::action::Action;
use crate::keymap::KeyChord;

/// A key press as seen by its handler
///
/// Gives access to the editor state and to the two commit requests. A
/// commit requested here is applied by the editor loop after the handler
/// returns; it is the explicit counterpart of failing with an action cause.
#[derive(Debug)]
pub struct KeyEvent<'a> {
    key: KeyChord,
    state: &'a mut State,
    commit: Option<Action>,
}

impl<'a> KeyEvent<'a> {
    pub fn new(key: KeyChord, state: &'a mut State) -> Self {
        Self {
            key,
            state,
            commit: None,
        }
    }

    /// The key that was pressed
    pub fn key(&self) -> KeyChord {
        self.key
    }

    pub fn state(&mut self) -> &mut State {
        &mut *self.state
    }

    /// Accept the current buffer as a command
    pub fn commit_code(&mut self) {
        self.commit = Some(Action::CommitCode);
    }

    /// End input
    pub fn commit_eof(&mut self) {
        self.commit = Some(Action::CommitEof);
    }

    /// Commit requested by the handler, if any
    pub fn commit_request(&self) -> Option<Action> {
        self.commit
    }
}
