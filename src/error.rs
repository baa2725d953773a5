//! Error types for the Stratus validation core

use thiserror::Error;

/// Main error type for Stratus operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Validation error for external API resources
    #[error("validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Create a validation error with the given message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a serialization error with the given message
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}
