//! Engine configuration persistence
//!
//! Stores user preferences in `~/.config/chordline/config.yaml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::binding::BindingContext;

/// Engine configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Console log filter used when RUST_LOG is unset (e.g., "warn", "chordline=debug")
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Keymap file to use instead of `~/.config/chordline/keymap.yaml`
    #[serde(default)]
    pub keymap: Option<PathBuf>,
    /// Source tag of the frames key handlers run in
    #[serde(default = "default_binding_source")]
    pub binding_source: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_binding_source() -> String {
    BindingContext::DEFAULT_SOURCE.to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            keymap: None,
            binding_source: default_binding_source(),
        }
    }
}

impl EngineConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        Self::load_from(&path)
    }

    /// Load config from `path`, falling back to defaults when it is missing
    /// or unreadable
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to `path`
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// The user keymap to merge over the embedded one
    pub fn keymap_path(&self) -> Option<PathBuf> {
        self.keymap
            .clone()
            .or_else(crate::config_paths::keymap_file)
    }

    pub fn binding_context(&self) -> BindingContext {
        BindingContext::new(self.binding_source.as_str())
    }
}
