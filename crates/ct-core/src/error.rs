//! Error types for comment-thread

use thiserror::Error;

/// Main error type for comment-thread
#[derive(Debug, Error)]
pub enum ThreadError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Post identifier rejected
    #[error("Invalid post ID: {0:?}")]
    InvalidPostId(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unsupported schema version
    #[error("Unsupported schema version: {0}")]
    UnsupportedSchemaVersion(u32),

    /// Storage backend failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ThreadError>,
    },
}

impl ThreadError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ThreadError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Whether the error was caused by bad caller input rather than
    /// a failing backend
    pub fn is_client_error(&self) -> bool {
        match self {
            ThreadError::InvalidPostId(_) | ThreadError::Validation(_) => true,
            ThreadError::WithContext { source, .. } => source.is_client_error(),
            _ => false,
        }
    }
}

impl From<toml::de::Error> for ThreadError {
    fn from(err: toml::de::Error) -> Self {
        ThreadError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for ThreadError {
    fn from(err: toml::ser::Error) -> Self {
        ThreadError::Toml(err.to_string())
    }
}

/// Result type alias for comment-thread
pub type Result<T> = std::result::Result<T, ThreadError>;
