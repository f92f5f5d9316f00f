//! Error types for the imputation library.

use thiserror::Error;

/// Result type for imputation operations.
pub type Result<T> = std::result::Result<T, ImputeError>;

/// Error types for imputation operations.
#[derive(Error, Debug)]
pub enum ImputeError {
    #[error("Unsupported input kind: {0}")]
    UnsupportedInputKind(String),

    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    #[error("Invalid boundary policy: '{0}'")]
    InvalidBoundaryPolicy(String),

    #[error("Invalid weighting: '{0}'")]
    InvalidWeighting(String),

    #[error("Invalid option '{param}' = '{value}': {reason}")]
    InvalidOption {
        param: String,
        value: String,
        reason: String,
    },

    #[error("Incompatible options: {0}")]
    IncompatibleOptions(String),

    #[error("Insufficient points: need at least {needed} observations, got {got}")]
    InsufficientPoints { needed: usize, got: usize },
}
