//! Typed failure causes and the tagged result of running a handler

use std::any::Any;

use thiserror::Error;

use crate::action::Action;

/// Why a handler (or any callable run in a frame) stopped early.
///
/// `Control`, `Break` and `Continue` are signals rather than errors: they are
/// consumed by the binding layer and by the iteration builtins and never shown
/// to the user as text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Cause {
    /// Short-circuit request for an editor action
    #[error("{0}")]
    Control(Action),
    /// Stop the enclosing iteration
    #[error("break")]
    Break,
    /// Skip to the next element of the enclosing iteration
    #[error("continue")]
    Continue,
    /// Any other failure raised by user code
    #[error("{0}")]
    Fail(String),
}

impl Cause {
    /// Generic failure with a message
    pub fn fail(message: impl Into<String>) -> Self {
        Cause::Fail(message.into())
    }
}

impl From<std::io::Error> for Cause {
    fn from(e: std::io::Error) -> Self {
        Cause::Fail(e.to_string())
    }
}

/// Result of running one handler inside an execution frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Handler returned normally
    Completed,
    /// Handler failed with an action signal
    ControlAction(Action),
    /// Handler failed for any other reason; carries the user-facing message
    Failed(String),
}

impl Outcome {
    /// Tag the result of a call
    pub fn from_result(result: Result<(), Cause>) -> Self {
        match result {
            Ok(()) => Outcome::Completed,
            Err(Cause::Control(action)) => Outcome::ControlAction(action),
            Err(cause) => Outcome::Failed(cause.to_string()),
        }
    }

    /// Tag a call that unwound instead of returning
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };
        Outcome::Failed(format!("handler panicked: {}", message))
    }
}
