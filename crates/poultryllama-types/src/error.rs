use thiserror::Error;

use crate::llm::LlmError;

/// Errors from a single chat turn.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The request was rejected before touching any conversation state.
    #[error("{0}")]
    Validation(String),

    /// The completion call failed. The user turn is already committed.
    #[error("LLM Error: {0}")]
    Provider(#[from] LlmError),
}

/// Errors raised while assembling configuration at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    MissingSecret(String),

    #[error("failed to read config file {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("failed to parse config file {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
