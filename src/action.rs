//! Control result of a key binding invocation

use std::fmt;

/// What the editor loop should do after a key has been handled.
///
/// This is the only result of an invocation the loop observes; at most one
/// action is applied per key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Action {
    /// Keep reading keys
    #[default]
    NoAction,
    /// Accept the current buffer as a command
    CommitCode,
    /// Signal end of input
    CommitEof,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::NoAction => write!(f, "no-action"),
            Action::CommitCode => write!(f, "commit-code"),
            Action::CommitEof => write!(f, "commit-eof"),
        }
    }
}
