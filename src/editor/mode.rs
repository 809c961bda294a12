//! Editor modes
//!
//! A mode is an editor state with its own binding table. While a mode is
//! active its table is the most specific layer, so keys it does not bind
//! (exactly or through a `Default` entry) fall through to insert mode and
//! the global layer.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::keymap::BindingTable;

pub trait Mode: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Layer installed while this mode is active
    fn bindings(&self) -> &BindingTable;
}

/// Mode defined entirely by a keymap table
#[derive(Debug, Clone)]
pub struct TableMode {
    name: String,
    table: BindingTable,
}

impl TableMode {
    pub fn new(name: impl Into<String>, table: BindingTable) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }
}

impl Mode for TableMode {
    fn name(&self) -> &str {
        &self.name
    }

    fn bindings(&self) -> &BindingTable {
        &self.table
    }
}

/// Modes available to `mode:<name>` handlers, by name
pub type ModeSet = BTreeMap<String, Arc<dyn Mode>>;
