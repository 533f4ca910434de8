//! Engine configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use proven_log::Level;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Engine configuration, usually read from a TOML file.
///
/// ```toml
/// level = "info"
///
/// [modules]
/// net = "debug"
/// "net.dht" = "trace"
///
/// [[appenders]]
/// kind = "stderr"
///
/// [[appenders]]
/// kind = "file"
/// path = "logs/node.log"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Threshold for modules without an entry in `modules`
    #[serde(default = "default_level")]
    pub level: Level,
    /// Per-module thresholds
    #[serde(default)]
    pub modules: IndexMap<String, Level>,
    /// Output destinations
    #[serde(default)]
    pub appenders: Vec<AppenderConfig>,
}

/// One output destination.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AppenderConfig {
    /// Standard error
    Stderr,
    /// Standard output
    Stdout,
    /// A file; parent directories are created as needed
    File {
        /// Path of the file
        path: PathBuf,
        /// Append to an existing file instead of truncating it
        #[serde(default = "default_append")]
        append: bool,
    },
}

const fn default_level() -> Level {
    Level::Info
}

const fn default_append() -> bool {
    true
}

impl EngineConfig {
    /// Console output at `level`, plus `file` when given.
    #[must_use]
    pub fn basic(level: Level, file: Option<PathBuf>) -> Self {
        let mut appenders = vec![AppenderConfig::Stderr];
        if let Some(path) = file {
            appenders.push(AppenderConfig::File { path, append: true });
        }
        Self {
            level,
            modules: IndexMap::new(),
            appenders,
        }
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid configuration.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).map_err(|e| Error::Io("error reading engine config", e))?;
        Self::from_toml_str(&text)
    }

    /// Paths of all file appenders, in declaration order.
    pub fn file_paths(&self) -> impl Iterator<Item = &Path> {
        self.appenders.iter().filter_map(|appender| match appender {
            AppenderConfig::File { path, .. } => Some(path.as_path()),
            AppenderConfig::Stderr | AppenderConfig::Stdout => None,
        })
    }
}
