//! Mutable editor state seen by key handlers

use std::sync::Arc;

use super::mode::{Mode, ModeSet};
use super::notes::{Notes, Notify};

/// The line being edited and the cursor ("dot") in it
///
/// `dot` is a byte offset and always sits on a char boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeBuffer {
    pub content: String,
    pub dot: usize,
}

impl CodeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer with the dot at the end of `content`
    pub fn with_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
            dot: content.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn insert_at_dot(&mut self, text: &str) {
        self.content.insert_str(self.dot, text);
        self.dot += text.len();
    }

    /// Delete the char before the dot; false at the start of the buffer
    pub fn delete_before_dot(&mut self) -> bool {
        let Some((idx, _)) = self.content[..self.dot].char_indices().next_back() else {
            return false;
        };
        self.content.replace_range(idx..self.dot, "");
        self.dot = idx;
        true
    }

    pub fn move_left(&mut self) {
        if let Some((idx, _)) = self.content[..self.dot].char_indices().next_back() {
            self.dot = idx;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.content[self.dot..].chars().next() {
            self.dot += c.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.dot = 0;
    }

    pub fn move_end(&mut self) {
        self.dot = self.content.len();
    }

    /// Take the content, leaving an empty buffer
    pub fn take(&mut self) -> String {
        self.dot = 0;
        std::mem::take(&mut self.content)
    }
}

/// Editor state a handler may mutate through its key event
#[derive(Debug)]
pub struct State {
    pub buffer: CodeBuffer,
    mode: Option<Arc<dyn Mode>>,
    modes: ModeSet,
    notes: Arc<Notes>,
}

impl State {
    pub fn new(notes: Arc<Notes>) -> Self {
        Self {
            buffer: CodeBuffer::new(),
            mode: None,
            modes: ModeSet::new(),
            notes,
        }
    }

    /// State whose `mode:<name>` handlers can reach `modes`
    pub fn with_modes(notes: Arc<Notes>, modes: ModeSet) -> Self {
        Self {
            modes,
            ..Self::new(notes)
        }
    }

    pub fn notes(&self) -> &Arc<Notes> {
        &self.notes
    }

    pub fn add_note(&self, note: impl Into<String>) {
        self.notes.notify(note.into());
    }

    /// Currently active mode; `None` means plain insertion
    pub fn mode(&self) -> Option<&Arc<dyn Mode>> {
        self.mode.as_ref()
    }

    pub fn set_mode(&mut self, mode: Option<Arc<dyn Mode>>) {
        match &mode {
            Some(m) => tracing::debug!(mode = m.name(), "entering mode"),
            None => tracing::debug!("resetting mode"),
        }
        self.mode = mode;
    }

    /// Activate a registered mode; false if no mode has that name
    pub fn enter_mode(&mut self, name: &str) -> bool {
        match self.modes.get(name).cloned() {
            Some(mode) => {
                self.set_mode(Some(mode));
                true
            }
            None => false,
        }
    }

    pub fn modes(&self) -> &ModeSet {
        &self.modes
    }
}
