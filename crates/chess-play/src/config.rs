//! Configuration file loading for the terminal shell.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Display and logging preferences for `chess-play`.
///
/// Every key is optional; a missing key takes its default.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PlayConfig {
    /// Draw pieces with Unicode chess glyphs instead of letters.
    #[serde(default = "default_true")]
    pub unicode_pieces: bool,
    /// Print the legal destinations after `moves <square>`, and after each
    /// rejected move of a piece.
    #[serde(default = "default_true")]
    pub show_destinations: bool,
    /// Filter directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for PlayConfig {
    fn default() -> Self {
        PlayConfig {
            unicode_pieces: true,
            show_destinations: true,
            log_level: default_log_level(),
        }
    }
}

impl PlayConfig {
    /// Loads the configuration from `path`.
    ///
    /// If the file does not exist, returns the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default configuration path: `chess-play.toml` in the
    /// current working directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from("chess-play.toml")
    }
}
