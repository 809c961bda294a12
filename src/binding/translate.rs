//! Turning a handler's outcome into an editor action

use crate::action::Action;
use crate::editor::Notify;
use crate::eval::Outcome;

pub const BINDING_ERROR_PREFIX: &str = "[binding error] ";

/// Map an outcome to the action the editor loop applies
///
/// Action signals pass through silently. Every other failure becomes exactly
/// one `[binding error]` notification and no action.
pub fn translate(outcome: Outcome, notifier: &dyn Notify) -> Action {
    match outcome {
        Outcome::Completed => Action::NoAction,
        Outcome::ControlAction(action) => action,
        Outcome::Failed(message) => {
            tracing::warn!("binding failed: {}", message);
            notifier.notify(format!("{}{}", BINDING_ERROR_PREFIX, message));
            Action::NoAction
        }
    }
}
