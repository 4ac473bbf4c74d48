//! Dispatch and configuration errors.

use thiserror::Error;

/// Errors produced while invoking an operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    /// No direct, inherited, primitive or default implementation applies.
    #[error("no implementation of `{operation}` matches receiver of type {receiver}")]
    NoImplementationFound {
        /// The operation that was invoked.
        operation: String,
        /// The receiver's observed type or kind (`null` for the null value).
        receiver: String,
    },

    /// An implementation reported a failure of its own.
    #[error("{0}")]
    Raised(String),
}

impl DispatchError {
    /// Creates an error raised from inside an implementation.
    pub fn raised(message: impl Into<String>) -> Self {
        DispatchError::Raised(message.into())
    }
}

/// Dispatch result type.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Errors produced while loading a namespace configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}
