//! Error types for riskcheck
//!
//! Library code returns these; the binary edge wraps them in `anyhow`.

use thiserror::Error;

/// Raised when the active question's input cannot be captured.
///
/// Always recoverable: the wizard stays on the same step and re-prompts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("required answer missing for '{question}'")]
    MissingAnswer { question: String },

    #[error("'{value}' is not an option of '{question}'")]
    UnknownOption { question: String, value: String },
}

impl ValidationError {
    /// Id of the question that failed to capture
    pub fn question(&self) -> &str {
        match self {
            Self::MissingAnswer { question } | Self::UnknownOption { question, .. } => question,
        }
    }
}

/// Main error type for riskcheck
#[derive(Error, Debug)]
pub enum RiskCheckError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Export error: {message}")]
    Export { message: String },

    #[error("Logging error: {message}")]
    Logging { message: String },
}

impl From<serde_json::Error> for RiskCheckError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for RiskCheckError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RiskCheckError>;
