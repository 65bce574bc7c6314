use thiserror::Error;

/// Top-level error type for sqlscope.
///
/// Subsystem crates define their own error types (gateway, export) and
/// convert into this one at the boundary so `?` works across crates.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScopeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for ScopeError {
    fn from(err: toml::de::Error) -> Self {
        ScopeError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for ScopeError {
    fn from(err: toml::ser::Error) -> Self {
        ScopeError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for ScopeError {
    fn from(err: serde_json::Error) -> Self {
        ScopeError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for sqlscope operations.
pub type Result<T> = std::result::Result<T, ScopeError>;
