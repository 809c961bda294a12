//! Command-line argument parsing for the editor
//!
//! Supports:
//! - Choosing the keymap file
//! - Replaying keys from a file instead of reading the terminal
//! - Overriding the log level

use clap::Parser;
use std::path::PathBuf;

use crate::config::EngineConfig;

/// A line editor driven by configurable key bindings
#[derive(Parser, Debug)]
#[command(
    name = "chordline",
    version,
    about = "A line editor driven by configurable key bindings"
)]
pub struct CliArgs {
    /// Keymap file merged over the embedded defaults
    #[arg(long, value_name = "PATH")]
    pub keymap: Option<PathBuf>,

    /// Replay keys from a file, one key string per line, instead of reading the terminal
    #[arg(long, value_name = "FILE")]
    pub keys: Option<PathBuf>,

    /// Console log filter (e.g. "debug", "chordline::binding=debug")
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Config file to use instead of ~/.config/chordline/config.yaml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Where keys come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    /// Interactive terminal in raw mode
    Terminal,
    /// Key strings read from a file
    Replay(PathBuf),
}

/// Configuration derived from CLI arguments and the config file
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub engine: EngineConfig,
    pub input: InputMode,
}

impl CliArgs {
    /// Load the config file named on the command line, or the default one
    pub fn load_engine_config(&self) -> EngineConfig {
        match &self.config {
            Some(path) => EngineConfig::load_from(path),
            None => EngineConfig::load(),
        }
    }

    /// Combine CLI args with the loaded config; CLI flags win
    pub fn into_config(self, mut engine: EngineConfig) -> Result<StartupConfig, String> {
        if let Some(keymap) = self.keymap {
            engine.keymap = Some(keymap);
        }
        if let Some(level) = self.log_level {
            engine.log_level = level;
        }

        let input = match self.keys {
            Some(path) if !path.is_file() => {
                return Err(format!("Key file not found: {}", path.display()))
            }
            Some(path) => InputMode::Replay(path),
            None => InputMode::Terminal,
        };

        Ok(StartupConfig { engine, input })
    }
}
