//! Keymap struct holding every binding layer the editor knows about

use std::collections::BTreeMap;
use std::sync::Arc;

use super::table::BindingTable;
use crate::editor::{Mode, ModeSet, TableMode};

/// All binding layers loaded from keymap files
///
/// At dispatch time the stack is the active mode's table (if any), then
/// `insert`, then `global`.
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    /// Plain insertion layer
    pub insert: BindingTable,
    /// Least specific layer, consulted in every mode
    pub global: BindingTable,
    /// Tables of named modes
    pub modes: BTreeMap<String, BindingTable>,
}

impl Keymap {
    /// Create an empty keymap
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay `other` on top of this keymap, table by table
    pub fn merge(&mut self, other: &Keymap) {
        self.insert.merge(&other.insert);
        self.global.merge(&other.global);
        for (name, table) in &other.modes {
            self.modes.entry(name.clone()).or_default().merge(table);
        }
    }

    /// The named modes as editor modes
    pub fn mode_set(&self) -> ModeSet {
        self.modes
            .iter()
            .map(|(name, table)| {
                let mode: Arc<dyn Mode> = Arc::new(TableMode::new(name.clone(), table.clone()));
                (name.clone(), mode)
            })
            .collect()
    }

    /// Total number of bindings across all layers
    pub fn len(&self) -> usize {
        self.insert.len()
            + self.global.len()
            + self.modes.values().map(BindingTable::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
