//! Core logger trait

use std::path::PathBuf;

use crate::{Level, Record, Result, Settings};

/// Logging backend.
///
/// Call sites check [`Logger::is_enabled`] before building a message, so it
/// must be cheap. Every other method may block on I/O.
pub trait Logger: Send + Sync + 'static {
    /// Whether records from `module` at `level` would be written.
    fn is_enabled(&self, module: &str, level: Level) -> bool;

    /// Directory holding this logger's files for `module`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::LogFolderUnavailable`] when the backend has no
    /// file destination, or an I/O error if the folder cannot be created.
    fn log_folder(&self, module: &str) -> Result<PathBuf>;

    /// Writes a record.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be written.
    fn write(&self, record: &Record<'_>) -> Result<()>;

    /// Sets the threshold for every module.
    fn set_level(&self, level: Level);

    /// Applies the `logging` section of `settings`.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be applied by this backend.
    fn set_levels(&self, settings: &Settings) -> Result<()>;

    /// Flush any buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if buffered output cannot be written.
    fn flush(&self) -> Result<()> {
        Ok(())
    }
}
