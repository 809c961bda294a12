//! Execution frames: the isolated context a handler runs in

use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::SyncSender;
use std::sync::Arc;

use os_pipe::PipeWriter;
use thiserror::Error;

use super::cause::{Cause, Outcome};
use super::relay::OutputRelay;
use super::value::Value;
use crate::binding::Handler;
use crate::editor::{KeyEvent, Notify};

/// The host cannot provide the I/O primitives a frame needs
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("cannot create byte port: {0}")]
    Pipe(#[source] io::Error),
    #[error("cannot start output relay: {0}")]
    Spawn(#[source] io::Error),
}

/// Output handles of a frame: one value port and the byte port, which is
/// wired to both the secondary and tertiary output.
#[derive(Debug)]
pub struct Ports {
    values: Option<SyncSender<Value>>,
    out: Option<PipeWriter>,
    err: Option<PipeWriter>,
}

impl Ports {
    pub(crate) fn new(values: SyncSender<Value>, out: PipeWriter, err: PipeWriter) -> Self {
        Self {
            values: Some(values),
            out: Some(out),
            err: Some(err),
        }
    }

    /// Send one value; blocks until the value drain takes it
    pub fn put(&mut self, value: Value) -> Result<(), Cause> {
        let tx = self
            .values
            .as_ref()
            .ok_or_else(|| Cause::fail("value port is closed"))?;
        tx.send(value)
            .map_err(|_| Cause::fail("value port has no reader"))
    }

    /// Write raw bytes to the secondary output
    pub fn write_out(&mut self, bytes: &[u8]) -> Result<(), Cause> {
        let out = self
            .out
            .as_mut()
            .ok_or_else(|| Cause::fail("byte port is closed"))?;
        out.write_all(bytes)?;
        Ok(())
    }

    /// Write raw bytes to the tertiary output
    pub fn write_err(&mut self, bytes: &[u8]) -> Result<(), Cause> {
        let err = self
            .err
            .as_mut()
            .ok_or_else(|| Cause::fail("byte port is closed"))?;
        err.write_all(bytes)?;
        Ok(())
    }

    /// Duplicate every open handle, for a forked frame
    pub fn try_clone(&self) -> io::Result<Ports> {
        Ok(Ports {
            values: self.values.clone(),
            out: self.out.as_ref().map(PipeWriter::try_clone).transpose()?,
            err: self.err.as_ref().map(PipeWriter::try_clone).transpose()?,
        })
    }

    /// Drop every handle; idempotent
    pub fn close(&mut self) {
        self.values = None;
        self.out = None;
        self.err = None;
    }

    pub fn is_closed(&self) -> bool {
        self.values.is_none() && self.out.is_none() && self.err.is_none()
    }
}

/// The context handed to a running handler
///
/// Frames have no input: a binding reads its argument from the key event,
/// not from a pipeline.
#[derive(Debug)]
pub struct Frame {
    source: Arc<str>,
    label: String,
    ports: Ports,
}

impl Frame {
    pub fn new(source: Arc<str>, ports: Ports) -> Self {
        Self {
            source,
            label: "top".to_string(),
            ports,
        }
    }

    /// Source tag of the code running in this frame, e.g. `[editor binding]`
    pub fn source(&self) -> &str {
        &self.source
    }

    /// What this frame was forked for
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Output a structured value
    pub fn put(&mut self, value: Value) -> Result<(), Cause> {
        self.ports.put(value)
    }

    /// Output text with a trailing newline
    pub fn echo(&mut self, line: &str) -> Result<(), Cause> {
        self.ports.write_out(format!("{}\n", line).as_bytes())
    }

    /// Output text as-is
    pub fn print(&mut self, text: &str) -> Result<(), Cause> {
        self.ports.write_out(text.as_bytes())
    }

    /// Output text with a trailing newline on the error port
    pub fn eprint(&mut self, line: &str) -> Result<(), Cause> {
        self.ports.write_err(format!("{}\n", line).as_bytes())
    }

    pub fn ports_mut(&mut self) -> &mut Ports {
        &mut self.ports
    }

    /// A child frame sharing this frame's outputs
    pub fn fork(&self, label: &str) -> Result<Frame, Cause> {
        Ok(Frame {
            source: Arc::clone(&self.source),
            label: label.to_string(),
            ports: self.ports.try_clone()?,
        })
    }

    /// Close this frame's handles on the shared outputs
    pub fn close(&mut self) {
        self.ports.close();
    }
}

/// A frame together with the relay draining it
///
/// Created right before a handler runs and consumed by [`ExecutionFrame::run`].
/// Teardown closes the ports and then waits for both drains. It runs exactly
/// once on every path out, including a handler panic or the frame being
/// dropped without running.
pub struct ExecutionFrame {
    frame: Frame,
    relay: Option<OutputRelay>,
}

impl ExecutionFrame {
    pub fn new(source: Arc<str>, notifier: Arc<dyn Notify>) -> Result<Self, FrameError> {
        let (ports, relay) = OutputRelay::start(notifier)?;
        Ok(Self {
            frame: Frame::new(source, ports),
            relay: Some(relay),
        })
    }

    /// Run `f` in the frame, then tear the frame down
    ///
    /// Returns only after every notification produced by `f` has been
    /// delivered.
    pub fn run<F>(mut self, f: F) -> Outcome
    where
        F: FnOnce(&mut Frame) -> Result<(), Cause>,
    {
        let result = panic::catch_unwind(AssertUnwindSafe(|| f(&mut self.frame)));
        self.teardown();
        match result {
            Ok(result) => Outcome::from_result(result),
            Err(payload) => Outcome::from_panic(payload),
        }
    }

    /// Call a key handler with `event` as its only argument
    pub fn call(self, handler: &dyn Handler, event: &mut KeyEvent<'_>) -> Outcome {
        self.run(|fm| handler.call(fm, event))
    }

    fn teardown(&mut self) {
        self.frame.close();
        if let Some(relay) = self.relay.take() {
            relay.join();
        }
    }
}

impl Drop for ExecutionFrame {
    fn drop(&mut self) {
        self.teardown();
    }
}
