//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use chordline::binding::{call_binding, BindingContext, Handler, HandlerRef};
use chordline::editor::{KeyEvent, Notes, Notify, State};
use chordline::eval::BYTES_OUT_PREFIX;
use chordline::keymap::{parse_keymap_yaml, BindingTable, KeyChord, Keymap};
use chordline::{Action, App};

/// Build a table from `(key, handler)` pairs
pub fn table(bindings: Vec<(KeyChord, HandlerRef)>) -> BindingTable {
    BindingTable::with_bindings(bindings)
}

/// Fresh editor state with its own notification log
pub fn test_state() -> (State, Arc<Notes>) {
    let notes = Arc::new(Notes::new());
    (State::new(Arc::clone(&notes)), notes)
}

/// Invoke `handler` for `key` the way the editor loop does
///
/// Returns the translated action and every notification in arrival order.
pub fn invoke(handler: &dyn Handler, key: KeyChord) -> (Action, Vec<String>) {
    let (mut state, notes) = test_state();
    let action = invoke_with_state(handler, key, &mut state, notes.clone());
    (action, notes.snapshot())
}

/// Invoke `handler` against an existing state, relaying into `notifier`
pub fn invoke_with_state(
    handler: &dyn Handler,
    key: KeyChord,
    state: &mut State,
    notifier: Arc<dyn Notify>,
) -> Action {
    let mut event = KeyEvent::new(key, state);
    let action = call_binding(&BindingContext::default(), notifier, handler, &mut event)
        .expect("frame setup");
    match (action, event.commit_request()) {
        (Action::NoAction, Some(requested)) => requested,
        (action, _) => action,
    }
}

/// Editor loop over a keymap written in YAML
pub fn app_from_yaml(yaml: &str) -> App {
    let keymap = parse_keymap_yaml(yaml).expect("keymap should parse");
    app_with_keymap(keymap)
}

pub fn app_with_keymap(keymap: Keymap) -> App {
    App::new(keymap, Arc::new(Notes::new()), BindingContext::default())
}

/// Notes with the given prefix, prefix stripped
pub fn with_prefix(notes: &[String], prefix: &str) -> Vec<String> {
    notes
        .iter()
        .filter_map(|n| n.strip_prefix(prefix))
        .map(str::to_string)
        .collect()
}

/// Notifier that takes its time with every byte-port line
///
/// Used to check that an invocation does not return before its output has
/// been delivered.
#[derive(Default)]
pub struct SlowNotes {
    delay: Duration,
    log: Mutex<Vec<String>>,
}

impl SlowNotes {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            log: Mutex::default(),
        }
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

impl Notify for SlowNotes {
    fn notify(&self, note: String) {
        if note.starts_with(BYTES_OUT_PREFIX) {
            thread::sleep(self.delay);
        }
        self.log.lock().unwrap().push(note);
    }
}
