//! Error types for the logging facade.

use thiserror::Error;

/// Result type for logger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by loggers.
///
/// Bad format strings and unknown level ranks never show up here; both are
/// recovered inside the formatter and [`crate::display_name`].
#[derive(Debug, Error)]
pub enum Error {
    /// Backend-specific failure.
    #[error("backend error: {0}")]
    Backend(String),

    /// I/O operation on the log destination failed.
    #[error("{0}: {1}")]
    Io(&'static str, #[source] std::io::Error),

    /// No file-backed destination is configured.
    #[error("unable to get log folder: no file destination configured")]
    LogFolderUnavailable,

    /// Configuration could not be parsed.
    #[error("invalid logging settings: {0}")]
    Settings(#[from] toml::de::Error),

    /// A level name in configuration is not recognised.
    #[error("unknown log level: {0}")]
    UnknownLevelName(String),
}
