//! Built-in handlers usable directly or as fallback layers

use super::Handler;
use crate::action::Action;
use crate::editor::{basic, KeyEvent};
use crate::eval::{Cause, Frame};

/// Requests end-of-input
#[derive(Debug, Clone, Copy)]
pub struct CommitEof;

impl Handler for CommitEof {
    fn call(&self, _fm: &mut Frame, event: &mut KeyEvent<'_>) -> Result<(), Cause> {
        event.commit_eof();
        Ok(())
    }

    fn name(&self) -> &str {
        "commit-eof"
    }
}

/// Requests the buffer be accepted as a command
#[derive(Debug, Clone, Copy)]
pub struct CommitCode;

impl Handler for CommitCode {
    fn call(&self, _fm: &mut Frame, event: &mut KeyEvent<'_>) -> Result<(), Cause> {
        event.commit_code();
        Ok(())
    }

    fn name(&self) -> &str {
        "commit-code"
    }
}

/// Default behavior of insert mode: let the basic keymap decide
#[derive(Debug, Clone, Copy)]
pub struct DefaultInsert;

impl Handler for DefaultInsert {
    fn call(&self, _fm: &mut Frame, event: &mut KeyEvent<'_>) -> Result<(), Cause> {
        let key = event.key();
        match basic::classify(key, event.state()) {
            Action::CommitCode => event.commit_code(),
            Action::CommitEof => event.commit_eof(),
            Action::NoAction => {}
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "default-insert"
    }
}

/// Leaves any secondary mode and goes back to plain insertion
#[derive(Debug, Clone, Copy)]
pub struct ResetMode;

impl Handler for ResetMode {
    fn call(&self, _fm: &mut Frame, event: &mut KeyEvent<'_>) -> Result<(), Cause> {
        event.state().set_mode(None);
        Ok(())
    }

    fn name(&self) -> &str {
        "reset-mode"
    }
}

/// Enters a named mode from the keymap
#[derive(Debug, Clone)]
pub struct StartMode {
    mode: String,
    label: String,
}

impl StartMode {
    pub fn new(mode: impl Into<String>) -> Self {
        let mode = mode.into();
        let label = format!("mode:{}", mode);
        Self { mode, label }
    }
}

impl Handler for StartMode {
    fn call(&self, _fm: &mut Frame, event: &mut KeyEvent<'_>) -> Result<(), Cause> {
        if event.state().enter_mode(&self.mode) {
            Ok(())
        } else {
            Err(Cause::fail(format!("no such mode: {}", self.mode)))
        }
    }

    fn name(&self) -> &str {
        &self.label
    }
}
