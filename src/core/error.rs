//! Custom error types for the switchboard engine
//!
//! Provides a unified error handling system across all modules.
//!
//! Expected business conditions (no matching records, a self-correctable
//! classifier miss) never become errors — they stay in the transcript as
//! flagged messages. Only contract, configuration, and infrastructure
//! failures surface through this type.

use thiserror::Error;

use crate::integrations::IntegrationTag;

/// Main error type for engine operations
#[derive(Error, Debug)]
pub enum EngineError {
    /// Malformed input to the turn entry point
    #[error("validation error: {0}")]
    Validation(String),

    /// A requested integration has no stored credentials
    #[error("not authenticated with the {integration} integration; authenticate before trying again")]
    Authentication { integration: IntegrationTag },

    /// The classifier selected an action the current agent does not declare
    #[error("classifier contract violation: {0}")]
    Contract(String),

    /// Unrecoverable engine failure (unknown handle, step budget exhausted)
    #[error("system error: {0}")]
    System(String),

    /// Classifier transport or response-shape failure
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a contract-violation error
    pub fn contract(msg: impl Into<String>) -> Self {
        Self::Contract(msg.into())
    }

    /// Create a system error
    pub fn system(msg: impl Into<String>) -> Self {
        Self::System(msg.into())
    }

    /// Create a classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
