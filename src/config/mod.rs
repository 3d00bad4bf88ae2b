//! Configuration system for iacline.
//!
//! This module provides the configuration structure for iacline with sensible
//! defaults and support for serialization/deserialization via serde.
//! Configuration is loaded from a TOML file and merged with command-line
//! arguments.
//!
//! # Example
//!
//! ```
//! use iacline::config::Config;
//!
//! let config = Config::default();
//! assert_eq!(config.default_start_line, 1);
//! assert!(config.fallback_on_error);
//!
//! let custom = Config {
//!     output_format: "json".to_string(),
//!     ..Config::default()
//! };
//! ```

use serde::{Deserialize, Serialize};

/// Configuration for the iacline application.
///
/// # Fields
///
/// * `default_start_line` - Fallback line when none is given (default: 1)
/// * `normalize_line_endings` - Convert `\r\n` to `\n` before parsing (default: true)
/// * `output_format` - "text" or "json" (default: "text")
/// * `fallback_on_error` - Report the start line instead of failing when a
///   path or document is invalid (default: true)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Fallback line when the caller gives none
    #[serde(default = "default_start_line")]
    pub default_start_line: usize,

    /// Convert Windows line endings before parsing
    #[serde(default = "default_normalize_line_endings")]
    pub normalize_line_endings: bool,

    /// Output format: "text" or "json"
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// Report the start line instead of failing on invalid paths or documents
    #[serde(default = "default_fallback_on_error")]
    pub fallback_on_error: bool,
}

fn default_start_line() -> usize {
    1
}

fn default_normalize_line_endings() -> bool {
    true
}

fn default_output_format() -> String {
    "text".to_string()
}

fn default_fallback_on_error() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_start_line: default_start_line(),
            normalize_line_endings: default_normalize_line_endings(),
            output_format: default_output_format(),
            fallback_on_error: default_fallback_on_error(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/iacline/config.toml` on all platforms.
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("iacline");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Loads configuration from `path`, falling back to defaults.
    pub fn load_from(path: &std::path::Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
                log::warn!("ignoring invalid config {}: {}", path.display(), err);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &std::path::Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }
}
