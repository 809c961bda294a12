//! Notification sink shared by handlers and output relays

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Something that accepts notification lines
///
/// Called concurrently by the two drains of an output relay, so
/// implementations must be thread-safe.
pub trait Notify: Send + Sync {
    fn notify(&self, note: String);
}

type Sink = Box<dyn Fn(&str) + Send + Sync>;

#[derive(Default)]
struct Log {
    notes: Vec<String>,
}

/// The editor's notification log
///
/// Optionally forwards each note to a sink as it arrives, which is how the
/// binary shows output while a handler is still running.
#[derive(Default)]
pub struct Notes {
    log: Mutex<Log>,
    sink: Option<Sink>,
}

impl Notes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log that also forwards every note to `sink`
    pub fn with_sink(sink: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self {
            log: Mutex::default(),
            sink: Some(Box::new(sink)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Log> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of every note so far
    pub fn snapshot(&self) -> Vec<String> {
        self.lock().notes.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget everything
    pub fn clear(&self) {
        self.lock().notes.clear();
    }
}

impl Notify for Notes {
    fn notify(&self, note: String) {
        if let Some(sink) = &self.sink {
            sink(&note);
        }
        self.lock().notes.push(note);
    }
}

impl std::fmt::Debug for Notes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notes")
            .field("len", &self.len())
            .field("sink", &self.sink.is_some())
            .finish()
    }
}
