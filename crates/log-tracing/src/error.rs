use thiserror::Error;

/// Result type for adapter construction
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building the engine.
#[derive(Debug, Error)]
pub enum Error {
    /// IO operation failed.
    #[error("{0}: {1}")]
    Io(&'static str, #[source] std::io::Error),

    /// Engine configuration could not be parsed.
    #[error("invalid engine configuration: {0}")]
    ParseConfig(#[from] toml::de::Error),
}

impl From<Error> for proven_log::Error {
    fn from(error: Error) -> Self {
        match error {
            Error::Io(context, source) => Self::Io(context, source),
            Error::ParseConfig(e) => Self::Backend(e.to_string()),
        }
    }
}
