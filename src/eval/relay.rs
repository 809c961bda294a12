//! Output relay: turns a frame's value and byte output into notifications
//!
//! A handler writes to its ports synchronously from inside its own call.
//! The value port is a rendezvous channel and the byte port is an OS pipe,
//! so without a reader running at the same time a chatty handler would
//! block forever on its own output. [`OutputRelay::start`] therefore spawns
//! one drain thread per port before the handler runs:
//!
//! ```text
//! handler ──put──▶ sync_channel(0) ──▶ value drain ──▶ "[value out] …"
//! handler ──write─▶ os_pipe ─────────▶ byte drain  ──▶ "[bytes out] …"
//! ```
//!
//! Shutdown is "close, then join": dropping every sender/writer wakes the
//! drains at end of input, and [`OutputRelay::join`] waits for both so no
//! notification arrives after the invocation is over.

use std::io::{self, BufRead, BufReader, Read};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use super::frame::{FrameError, Ports};
use super::value::{repr, Value};
use crate::editor::Notify;

pub const VALUE_OUT_PREFIX: &str = "[value out] ";
pub const BYTES_OUT_PREFIX: &str = "[bytes out] ";
pub const BYTES_ERROR_PREFIX: &str = "[bytes error] ";

/// The two running drain threads of one execution frame
pub struct OutputRelay {
    values: JoinHandle<()>,
    bytes: JoinHandle<()>,
}

impl OutputRelay {
    /// Create a fresh pair of ports and start draining them into `notifier`
    ///
    /// Failing to create the pipe or spawn a drain means the host cannot do
    /// basic I/O; that is reported as a [`FrameError`] rather than a handler
    /// failure.
    pub fn start(notifier: Arc<dyn Notify>) -> Result<(Ports, OutputRelay), FrameError> {
        let (value_tx, value_rx) = mpsc::sync_channel::<Value>(0);
        let (reader, writer) = os_pipe::pipe().map_err(FrameError::Pipe)?;
        let err_writer = writer.try_clone().map_err(FrameError::Pipe)?;

        let value_notifier = Arc::clone(&notifier);
        let values = thread::Builder::new()
            .name("relay-values".into())
            .spawn(move || drain_values(value_rx, value_notifier.as_ref()))
            .map_err(FrameError::Spawn)?;

        let bytes = thread::Builder::new()
            .name("relay-bytes".into())
            .spawn(move || drain_bytes(reader, notifier.as_ref()))
            .map_err(FrameError::Spawn)?;

        tracing::trace!("output relay started");
        Ok((
            Ports::new(value_tx, writer, err_writer),
            OutputRelay { values, bytes },
        ))
    }

    /// Wait for both drains to finish
    ///
    /// Every port handle must already be closed, otherwise this blocks until
    /// the last writer goes away.
    pub fn join(self) {
        if self.values.join().is_err() {
            tracing::error!("value drain panicked");
        }
        if self.bytes.join().is_err() {
            tracing::error!("byte drain panicked");
        }
        tracing::trace!("output relay finished");
    }
}

/// Relay every value until all senders are gone
pub(crate) fn drain_values(rx: Receiver<Value>, notifier: &dyn Notify) {
    for value in rx {
        notifier.notify(format!("{}{}", VALUE_OUT_PREFIX, repr(&value)));
    }
}

/// Relay byte output line by line until end of stream
///
/// A trailing unterminated line is still relayed. Read errors other than
/// end of stream end the drain with one `[bytes error]` notification.
pub(crate) fn drain_bytes(reader: impl Read, notifier: &dyn Notify) {
    let mut reader = BufReader::new(reader);
    let mut line = Vec::new();
    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => break,
            Ok(_) => {
                if line.last() == Some(&b'\n') {
                    line.pop();
                }
                notifier.notify(format!(
                    "{}{}",
                    BYTES_OUT_PREFIX,
                    String::from_utf8_lossy(&line)
                ));
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                if !line.is_empty() {
                    notifier.notify(format!(
                        "{}{}",
                        BYTES_OUT_PREFIX,
                        String::from_utf8_lossy(&line)
                    ));
                }
                notifier.notify(format!("{}{}", BYTES_ERROR_PREFIX, e));
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::Notes;
    use serde_json::json;
    use std::io::Cursor;

    /// Reader that yields some bytes and then fails
    struct FailingReader {
        data: Cursor<Vec<u8>>,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.data.read(buf)?;
            if n == 0 {
                Err(io::Error::other("pipe broke"))
            } else {
                Ok(n)
            }
        }
    }

    #[test]
    fn test_drain_bytes_splits_lines() {
        let notes = Notes::new();
        drain_bytes(Cursor::new(b"one\ntwo\n\nthree".to_vec()), &notes);
        assert_eq!(
            notes.snapshot(),
            vec![
                "[bytes out] one",
                "[bytes out] two",
                "[bytes out] ",
                "[bytes out] three",
            ]
        );
    }

    #[test]
    fn test_drain_bytes_no_partial_when_terminated() {
        let notes = Notes::new();
        drain_bytes(Cursor::new(b"done\n".to_vec()), &notes);
        assert_eq!(notes.snapshot(), vec!["[bytes out] done"]);
    }

    #[test]
    fn test_drain_bytes_reports_error() {
        let notes = Notes::new();
        let reader = FailingReader {
            data: Cursor::new(b"ok\npartial".to_vec()),
        };
        drain_bytes(reader, &notes);
        assert_eq!(
            notes.snapshot(),
            vec![
                "[bytes out] ok",
                "[bytes out] partial",
                "[bytes error] pipe broke",
            ]
        );
    }

    #[test]
    fn test_drain_values_in_order() {
        let notes = Notes::new();
        let (tx, rx) = mpsc::sync_channel(0);
        let producer = thread::spawn(move || {
            for v in [json!(1), json!("two"), json!([3])] {
                tx.send(v).unwrap();
            }
        });
        drain_values(rx, &notes);
        producer.join().unwrap();
        assert_eq!(
            notes.snapshot(),
            vec!["[value out] 1", "[value out] \"two\"", "[value out] [3]"]
        );
    }

    #[test]
    fn test_relay_finishes_after_ports_close() {
        let notes = Arc::new(Notes::new());
        let (mut ports, relay) = OutputRelay::start(notes.clone()).unwrap();
        ports.put(json!({"a": 1})).unwrap();
        ports.write_out(b"hello\nwor").unwrap();
        ports.write_err(b"ld\n").unwrap();
        ports.close();
        relay.join();

        let mut got = notes.snapshot();
        got.sort();
        assert_eq!(
            got,
            vec!["[bytes out] hello", "[bytes out] world", "[value out] {\"a\":1}"]
        );
    }
}
