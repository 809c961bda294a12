//! Where key presses come from

use std::collections::VecDeque;
use std::io;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;

use crate::keymap::{keychord_from_crossterm, parse_key_string, KeyChord, KeymapError};

/// A stream of key presses, read one at a time by the editor loop
pub trait KeySource {
    /// Next key, or `None` when the source is exhausted
    fn next_key(&mut self) -> io::Result<Option<KeyChord>>;
}

/// Replays a fixed list of keys
#[derive(Debug, Clone, Default)]
pub struct ScriptedKeys {
    keys: VecDeque<KeyChord>,
}

impl ScriptedKeys {
    pub fn new(keys: impl IntoIterator<Item = KeyChord>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// Parse one key string per line (`ctrl+x`, `enter`, `a`)
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn parse(text: &str) -> Result<Self, KeymapError> {
        let keys = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(parse_key_string)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(keys))
    }

    /// Keys for typing `text` literally
    pub fn typing(text: &str) -> Self {
        Self::new(text.chars().map(KeyChord::char))
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeys {
    fn next_key(&mut self) -> io::Result<Option<KeyChord>> {
        Ok(self.keys.pop_front())
    }
}

/// Reads keys from the terminal in raw mode
///
/// Raw mode is restored when this is dropped.
pub struct TerminalKeys {
    _private: (),
}

impl TerminalKeys {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalKeys {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            tracing::warn!("Failed to restore terminal mode: {}", e);
        }
    }
}

impl KeySource for TerminalKeys {
    fn next_key(&mut self) -> io::Result<Option<KeyChord>> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(chord) = keychord_from_crossterm(&key) {
                        return Ok(Some(chord));
                    }
                    tracing::trace!(?key, "ignoring unmapped key");
                }
                _ => {}
            }
        }
    }
}
