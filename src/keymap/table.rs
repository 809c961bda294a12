//! Binding tables: one layer of key to handler mappings

use std::collections::BTreeMap;
use std::fmt;

use super::types::KeyChord;
use crate::binding::HandlerRef;

/// Maps key chords to handlers; keys are unique
///
/// The entry under [`KeyChord::DEFAULT`] is the fallback of this layer.
#[derive(Clone, Default)]
pub struct BindingTable {
    entries: BTreeMap<KeyChord, HandlerRef>,
}

impl BindingTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from `(key, handler)` pairs; later pairs win
    pub fn with_bindings(bindings: impl IntoIterator<Item = (KeyChord, HandlerRef)>) -> Self {
        let mut table = Self::new();
        for (key, handler) in bindings {
            table.bind(key, handler);
        }
        table
    }

    /// Bind `key`, returning the handler it replaces
    pub fn bind(&mut self, key: KeyChord, handler: HandlerRef) -> Option<HandlerRef> {
        self.entries.insert(key, handler)
    }

    /// Exact entry for `key`
    pub fn get(&self, key: &KeyChord) -> Option<&HandlerRef> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &KeyChord) -> bool {
        self.entries.contains_key(key)
    }

    /// The `Default` entry, if any
    pub fn default_handler(&self) -> Option<&HandlerRef> {
        self.entries.get(&KeyChord::DEFAULT)
    }

    /// Copy every binding of `other` into this table, overriding by key
    pub fn merge(&mut self, other: &BindingTable) {
        for (key, handler) in &other.entries {
            self.entries.insert(*key, handler.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for BindingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.entries
                    .iter()
                    .map(|(key, handler)| (key.to_string(), handler.name().to_string())),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{CommitCode, CommitEof, ResetMode};
    use std::sync::Arc;

    #[test]
    fn test_bind_replaces() {
        let mut table = BindingTable::new();
        assert!(table.bind(KeyChord::ctrl('d'), Arc::new(CommitEof)).is_none());
        let old = table.bind(KeyChord::ctrl('d'), Arc::new(CommitCode));
        assert_eq!(old.map(|h| h.name().to_string()).as_deref(), Some("commit-eof"));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&KeyChord::ctrl('d')).unwrap().name(), "commit-code");
    }

    #[test]
    fn test_default_entry() {
        let table = BindingTable::with_bindings([(KeyChord::DEFAULT, Arc::new(ResetMode) as HandlerRef)]);
        assert_eq!(table.default_handler().unwrap().name(), "reset-mode");
        assert!(table.get(&KeyChord::char('a')).is_none());
    }

    #[test]
    fn test_merge_overrides() {
        let mut base = BindingTable::with_bindings([
            (KeyChord::ctrl('d'), Arc::new(CommitEof) as HandlerRef),
            (KeyChord::ctrl('j'), Arc::new(CommitCode) as HandlerRef),
        ]);
        let user = BindingTable::with_bindings([(KeyChord::ctrl('d'), Arc::new(ResetMode) as HandlerRef)]);
        base.merge(&user);
        assert_eq!(base.len(), 2);
        assert_eq!(base.get(&KeyChord::ctrl('d')).unwrap().name(), "reset-mode");
    }

    #[test]
    fn test_debug_lists_handler_names() {
        let table = BindingTable::with_bindings([(KeyChord::ctrl('d'), Arc::new(CommitEof) as HandlerRef)]);
        assert_eq!(format!("{:?}", table), "{\"Ctrl-D\": \"commit-eof\"}");
    }
}
