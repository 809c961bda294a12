//! Key handlers and their invocation
//!
//! # Flow
//!
//! ```text
//! KeyChord ─▶ key_handler(layers) ─▶ Handler
//!          ─▶ call_binding: ExecutionFrame + OutputRelay ─▶ Outcome
//!          ─▶ translate ─▶ Action (+ optional "[binding error]" note)
//! ```
//!
//! A handler never makes `call_binding` fail; only the host being unable to
//! set up a frame does.

mod handlers;
mod translate;

use std::sync::Arc;

pub use handlers::{CommitCode, CommitEof, DefaultInsert, ResetMode, StartMode};
pub use translate::{translate, BINDING_ERROR_PREFIX};

use crate::action::Action;
use crate::editor::{KeyEvent, Notify};
use crate::eval::{Cause, ExecutionFrame, Frame, FrameError};
use crate::keymap::{resolve, BindingTable, KeyChord};

/// User-programmable behavior bound to a key
///
/// Called with the key event as its only argument. Output goes to the
/// frame's ports; failing with a [`Cause`] is how a handler reports errors
/// or requests an action without touching editor state.
pub trait Handler: Send + Sync {
    fn call(&self, fm: &mut Frame, event: &mut KeyEvent<'_>) -> Result<(), Cause>;

    /// Short name for logs and keymap dumps
    fn name(&self) -> &str {
        "<fn>"
    }
}

/// Shared handle to a handler, as stored in binding tables
pub type HandlerRef = Arc<dyn Handler>;

struct FnHandler<F>(F);

impl<F> Handler for FnHandler<F>
where
    F: Fn(&mut Frame, &mut KeyEvent<'_>) -> Result<(), Cause> + Send + Sync,
{
    fn call(&self, fm: &mut Frame, event: &mut KeyEvent<'_>) -> Result<(), Cause> {
        (self.0)(fm, event)
    }
}

/// Wrap a closure as a handler
pub fn handler_fn<F>(f: F) -> HandlerRef
where
    F: Fn(&mut Frame, &mut KeyEvent<'_>) -> Result<(), Cause> + Send + Sync + 'static,
{
    Arc::new(FnHandler(f))
}

/// Runs when no layer has a binding for the key
#[derive(Debug, Clone, Copy)]
pub struct Unbound;

pub const UNBOUND_PREFIX: &str = "Unbound: ";

impl Handler for Unbound {
    fn call(&self, _fm: &mut Frame, event: &mut KeyEvent<'_>) -> Result<(), Cause> {
        let note = format!("{}{}", UNBOUND_PREFIX, event.key());
        event.state().add_note(note);
        Ok(())
    }

    fn name(&self) -> &str {
        "unbound"
    }
}

/// Pick the handler for `key`, falling back to [`Unbound`]
pub fn key_handler(key: &KeyChord, layers: &[&BindingTable]) -> HandlerRef {
    resolve(key, layers).unwrap_or_else(|| Arc::new(Unbound))
}

/// Values fixed at startup that every binding invocation needs
#[derive(Debug, Clone)]
pub struct BindingContext {
    source: Arc<str>,
}

impl BindingContext {
    pub const DEFAULT_SOURCE: &'static str = "[editor binding]";

    pub fn new(source: impl Into<Arc<str>>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Source tag given to frames running key handlers
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl Default for BindingContext {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SOURCE)
    }
}

/// Invoke `handler` for `event` and translate the result into an [`Action`]
///
/// Does not return until the handler has finished and all of its output has
/// been delivered to `notifier`.
pub fn call_binding(
    ctx: &BindingContext,
    notifier: Arc<dyn Notify>,
    handler: &dyn Handler,
    event: &mut KeyEvent<'_>,
) -> Result<Action, FrameError> {
    let span = tracing::debug_span!("binding", key = %event.key(), handler = handler.name());
    let _guard = span.enter();

    let exec = ExecutionFrame::new(Arc::clone(&ctx.source), Arc::clone(&notifier))
        .inspect_err(|e| tracing::error!("{}", e))?;
    let outcome = exec.call(handler, event);
    tracing::debug!(?outcome, "handler returned");

    Ok(translate(outcome, notifier.as_ref()))
}
