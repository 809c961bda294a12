//! Running handlers: execution frames, their output relay, typed failure
//! causes, and the small builtins and scripts handlers are written with

pub mod builtins;
mod cause;
mod frame;
mod relay;
mod script;
mod value;

pub use cause::{Cause, Outcome};
pub use frame::{ExecutionFrame, Frame, FrameError, Ports};
pub use relay::{OutputRelay, BYTES_ERROR_PREFIX, BYTES_OUT_PREFIX, VALUE_OUT_PREFIX};
pub use script::{Script, Step};
pub use value::{from_yaml, repr, Value};
