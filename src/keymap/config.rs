//! YAML configuration parsing for keymaps
//!
//! Parses keymap.yaml files into binding layers.
//!
//! ```yaml
//! insert:
//!   - key: default
//!     handler: default-insert
//! global:
//!   - key: escape
//!     handler: reset-mode
//! modes:
//!   completion:
//!     - key: tab
//!       run:
//!         - echo: "next candidate"
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use super::keymap::Keymap;
use super::table::BindingTable;
use super::types::{KeyChord, KeyCode, Modifiers};
use crate::binding::{
    CommitCode, CommitEof, DefaultInsert, HandlerRef, ResetMode, StartMode, Unbound,
};
use crate::eval::Script;

/// Root structure of a keymap YAML file
#[derive(Debug, Default, Deserialize)]
pub struct KeymapConfig {
    #[serde(default)]
    pub insert: Vec<BindingConfig>,
    #[serde(default)]
    pub global: Vec<BindingConfig>,
    #[serde(default)]
    pub modes: BTreeMap<String, Vec<BindingConfig>>,
}

/// A single binding entry from YAML
#[derive(Debug, Deserialize)]
pub struct BindingConfig {
    pub key: String,
    /// Name of a built-in handler
    #[serde(default)]
    pub handler: Option<String>,
    /// Script steps, as an alternative to `handler`
    #[serde(default)]
    pub run: Option<serde_yaml::Value>,
    #[serde(default)]
    pub platform: Option<String>,
}

/// Errors that can occur when parsing keymaps
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeymapError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    #[error("Invalid handler: {0}")]
    InvalidHandler(String),
    #[error("Invalid script for {key}: {message}")]
    InvalidScript { key: String, message: String },
}

/// Load a keymap from a YAML file
pub fn load_keymap_file(path: &Path) -> Result<Keymap, KeymapError> {
    let content = std::fs::read_to_string(path).map_err(|e| KeymapError::IoError(e.to_string()))?;

    parse_keymap_yaml(&content)
}

/// Parse a keymap from a YAML string
pub fn parse_keymap_yaml(yaml: &str) -> Result<Keymap, KeymapError> {
    let config: KeymapConfig =
        serde_yaml::from_str(yaml).map_err(|e| KeymapError::ParseError(e.to_string()))?;

    let mut modes = BTreeMap::new();
    for (name, entries) in config.modes {
        modes.insert(name, build_table(entries)?);
    }

    Ok(Keymap {
        insert: build_table(config.insert)?,
        global: build_table(config.global)?,
        modes,
    })
}

fn build_table(entries: Vec<BindingConfig>) -> Result<BindingTable, KeymapError> {
    let current_platform = get_current_platform();
    let mut table = BindingTable::new();

    for entry in entries {
        // Skip if platform-specific and doesn't match current platform
        if let Some(ref platform) = entry.platform {
            if platform != current_platform {
                continue;
            }
        }

        let key = parse_key_string(&entry.key)?;
        let handler = match (entry.handler, entry.run) {
            (Some(name), None) => parse_handler(&name)?,
            (None, Some(steps)) => {
                let script = Script::from_yaml(&steps).map_err(|message| {
                    KeymapError::InvalidScript {
                        key: entry.key.clone(),
                        message,
                    }
                })?;
                Arc::new(script) as HandlerRef
            }
            (Some(_), Some(_)) => {
                return Err(KeymapError::InvalidHandler(format!(
                    "{} has both a handler and a script",
                    entry.key
                )))
            }
            (None, None) => {
                return Err(KeymapError::InvalidHandler(format!(
                    "{} has no handler",
                    entry.key
                )))
            }
        };

        if table.bind(key, handler).is_some() {
            tracing::debug!("Duplicate binding for {}, keeping the later one", key);
        }
    }

    Ok(table)
}

/// Parse a key string like "ctrl+shift+x" into a KeyChord
///
/// `default` names the fallback entry of a table.
pub fn parse_key_string(key_str: &str) -> Result<KeyChord, KeymapError> {
    let key_str = key_str.trim();
    if key_str.eq_ignore_ascii_case("default") {
        return Ok(KeyChord::DEFAULT);
    }

    let (mod_part, key_part) = match key_str.strip_suffix("++") {
        Some(rest) => (Some(rest), "+"),
        None => match key_str.rsplit_once('+') {
            Some((mods, key)) if !key.is_empty() => (Some(mods), key),
            _ => (None, key_str),
        },
    };

    if key_part.is_empty() {
        return Err(KeymapError::InvalidKey(format!(
            "No key found in binding: {}",
            key_str
        )));
    }

    let mut mods = Modifiers::NONE;
    for part in mod_part.into_iter().flat_map(|m| m.split('+')) {
        mods = mods
            | match part.to_lowercase().as_str() {
                "ctrl" | "control" => Modifiers::CTRL,
                "shift" => Modifiers::SHIFT,
                "alt" | "option" | "opt" => Modifiers::ALT,
                "meta" | "super" | "win" | "cmd" => Modifiers::META,
                _ => {
                    return Err(KeymapError::InvalidKey(format!(
                        "Unknown modifier '{}' in binding: {}",
                        part, key_str
                    )))
                }
            };
    }

    Ok(KeyChord::new(parse_key_code(key_part)?, mods))
}

/// Parse a key code from string
fn parse_key_code(key: &str) -> Result<KeyCode, KeymapError> {
    // Single character, case preserved
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    let lower = key.to_lowercase();
    if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
        if (1..=24).contains(&n) {
            return Ok(KeyCode::F(n));
        }
    }

    match lower.as_str() {
        "enter" | "return" => Ok(KeyCode::Enter),
        "escape" | "esc" => Ok(KeyCode::Escape),
        "tab" => Ok(KeyCode::Tab),
        "backspace" | "back" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "space" => Ok(KeyCode::Char(' ')),

        "up" | "arrowup" => Ok(KeyCode::Up),
        "down" | "arrowdown" => Ok(KeyCode::Down),
        "left" | "arrowleft" => Ok(KeyCode::Left),
        "right" | "arrowright" => Ok(KeyCode::Right),

        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pageup" | "pgup" => Ok(KeyCode::PageUp),
        "pagedown" | "pgdown" | "pgdn" => Ok(KeyCode::PageDown),
        "insert" | "ins" => Ok(KeyCode::Insert),

        _ => Err(KeymapError::InvalidKey(format!("Unknown key: {}", key))),
    }
}

/// Parse a built-in handler name
///
/// `mode:<name>` enters the named mode; `unbound` explicitly shadows a key
/// bound in a less specific layer.
pub fn parse_handler(name: &str) -> Result<HandlerRef, KeymapError> {
    let trimmed = name.trim();
    // Only the keyword is case-insensitive; mode names are used verbatim
    if let Some((keyword, mode)) = trimmed.split_once(':') {
        let mode = mode.trim();
        if !keyword.trim().eq_ignore_ascii_case("mode") || mode.is_empty() {
            return Err(KeymapError::InvalidHandler(name.to_string()));
        }
        return Ok(Arc::new(StartMode::new(mode)));
    }

    let normalized = trimmed.to_lowercase().replace('_', "-");

    let handler: HandlerRef = match normalized.as_str() {
        "commit-eof" => Arc::new(CommitEof),
        "commit-code" => Arc::new(CommitCode),
        "default-insert" => Arc::new(DefaultInsert),
        "reset-mode" => Arc::new(ResetMode),
        "unbound" => Arc::new(Unbound),
        _ => return Err(KeymapError::InvalidHandler(name.to_string())),
    };
    Ok(handler)
}

/// Get the current platform identifier
fn get_current_platform() -> &'static str {
    if cfg!(target_os = "macos") {
        "macos"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else {
        "linux"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_keys() {
        assert_eq!(parse_key_string("a").unwrap(), KeyChord::char('a'));
        assert_eq!(parse_key_string("A").unwrap(), KeyChord::char('A'));
        assert_eq!(parse_key_string("ctrl+x").unwrap(), KeyChord::ctrl('x'));
        assert_eq!(parse_key_string("Ctrl+X").unwrap(), KeyChord::ctrl('x'));
        assert_eq!(parse_key_string("alt+b").unwrap(), KeyChord::alt('b'));
        assert_eq!(parse_key_string("shift+a").unwrap(), KeyChord::char('A'));
    }

    #[test]
    fn test_parse_named_keys() {
        assert_eq!(
            parse_key_string("enter").unwrap(),
            KeyChord::key(KeyCode::Enter)
        );
        assert_eq!(
            parse_key_string("ESC").unwrap(),
            KeyChord::key(KeyCode::Escape)
        );
        assert_eq!(parse_key_string("f12").unwrap(), KeyChord::key(KeyCode::F(12)));
        assert_eq!(parse_key_string("space").unwrap(), KeyChord::char(' '));
        assert_eq!(
            parse_key_string("shift+tab").unwrap(),
            KeyChord::new(KeyCode::Tab, Modifiers::SHIFT)
        );
    }

    #[test]
    fn test_parse_plus_key() {
        assert_eq!(parse_key_string("+").unwrap(), KeyChord::char('+'));
        assert_eq!(
            parse_key_string("alt++").unwrap(),
            KeyChord::new(KeyCode::Char('+'), Modifiers::ALT)
        );
    }

    #[test]
    fn test_parse_default_key() {
        assert_eq!(parse_key_string("default").unwrap(), KeyChord::DEFAULT);
        assert_eq!(parse_key_string("Default").unwrap(), KeyChord::DEFAULT);
    }

    #[test]
    fn test_parse_invalid_keys() {
        assert!(parse_key_string("ctrl+").is_err());
        assert!(parse_key_string("hyper+x").is_err());
        assert!(parse_key_string("f25").is_err());
        assert!(parse_key_string("notakey").is_err());
    }

    #[test]
    fn test_parse_handler_names() {
        assert_eq!(parse_handler("commit-eof").unwrap().name(), "commit-eof");
        assert_eq!(parse_handler("Commit_Code").unwrap().name(), "commit-code");
        assert_eq!(parse_handler("mode:history").unwrap().name(), "mode:history");
        assert_eq!(parse_handler("unbound").unwrap().name(), "unbound");
        assert_eq!(
            parse_handler("Mode: search_History").unwrap().name(),
            "mode:search_History"
        );
        assert!(parse_handler("mode:").is_err());
        assert!(parse_handler("node:history").is_err());
        assert!(parse_handler("explode").is_err());
    }

    #[test]
    fn test_entry_needs_exactly_one_handler() {
        let both = "insert:\n  - key: a\n    handler: commit-eof\n    run: [commit-code]\n";
        assert!(matches!(
            parse_keymap_yaml(both),
            Err(KeymapError::InvalidHandler(_))
        ));

        let neither = "insert:\n  - key: a\n";
        assert!(matches!(
            parse_keymap_yaml(neither),
            Err(KeymapError::InvalidHandler(_))
        ));
    }

    #[test]
    fn test_later_entry_wins() {
        let yaml = "global:\n  - key: ctrl+d\n    handler: commit-eof\n  - key: ctrl+d\n    handler: commit-code\n";
        let keymap = parse_keymap_yaml(yaml).unwrap();
        assert_eq!(keymap.global.len(), 1);
        assert_eq!(
            keymap.global.get(&KeyChord::ctrl('d')).unwrap().name(),
            "commit-code"
        );
    }

    #[test]
    fn test_platform_filter() {
        let yaml = "global:\n  - key: f1\n    handler: commit-eof\n    platform: plan9\n";
        let keymap = parse_keymap_yaml(yaml).unwrap();
        assert!(keymap.global.is_empty());
    }
}
