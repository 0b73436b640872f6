//! Editor configuration.
//!
//! Settings are read from a TOML file. Every section carries
//! `#[serde(default)]`, so a file only needs the keys it changes:
//!
//! ```toml
//! [editor]
//! tab_stop = 8
//! save_extension = "txt"
//!
//! [keyboard.bindings]
//! "ctrl+g" = "find"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main editor configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Editor behavior settings
    pub editor: EditorConfig,

    /// Terminal input settings
    pub terminal: TerminalConfig,

    /// Keyboard settings
    pub keyboard: KeyboardConfig,
}

impl Config {
    /// Loads config from the default location, falling back to defaults
    /// when the file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads config from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the editor cannot run with.
    ///
    /// A zero read timeout turns every read into a busy poll and splits
    /// escape sequences; a zero message timeout hides the prompts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.terminal.read_timeout_tenths == 0 {
            return Err(ConfigError::Invalid {
                key: "terminal.read_timeout_tenths",
                reason: "must be at least 1",
            });
        }
        if self.editor.message_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "editor.message_timeout_secs",
                reason: "must be at least 1",
            });
        }
        if self.editor.tab_stop == 0 {
            return Err(ConfigError::Invalid {
                key: "editor.tab_stop",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Returns the default config file path.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("quill").join("config.toml"))
    }
}

/// Editor behavior configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Tab width in display columns
    pub tab_stop: usize,

    /// Extra Ctrl-Q presses required to quit with unsaved changes
    pub quit_times: usize,

    /// Seconds a status message stays visible
    pub message_timeout_secs: u64,

    /// Extension appended to names chosen at the save-as prompt
    pub save_extension: Option<String>,
}

impl EditorConfig {
    /// Status message lifetime as a `Duration`.
    pub fn message_timeout(&self) -> Duration {
        Duration::from_secs(self.message_timeout_secs)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_stop: quill_buffer::DEFAULT_TAB_STOP,
            quit_times: 2,
            message_timeout_secs: 5,
            save_extension: None,
        }
    }
}

/// Terminal input configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Read timeout in tenths of a second
    pub read_timeout_tenths: u8,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            read_timeout_tenths: 1,
        }
    }
}

/// Keyboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardConfig {
    /// Custom key bindings, e.g. `"ctrl+g" = "find"`
    pub bindings: HashMap<String, String>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {reason}")]
    Invalid {
        key: &'static str,
        reason: &'static str,
    },
}
