//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Policy file could not be parsed
    #[error("Invalid policy file: {0}")]
    InvalidPolicy(#[from] serde_yaml::Error),

    /// Reload requested without a policy file
    #[error("No policy file configured")]
    NoPolicyFile,
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
