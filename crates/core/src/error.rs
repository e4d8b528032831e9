//! Error types for RegioWizard.
//!
//! One enum covers every failure category of the answering engine. Content
//! insufficiency ("the model found nothing") is deliberately absent: it is an
//! answer state handled by the fallback path, not an error.

use thiserror::Error;

/// Unified error type for RegioWizard.
///
/// All fallible functions return `Result<T, AppError>`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport or provider errors from a language or embedding model
    #[error("LLM error: {0}")]
    Llm(String),

    /// Source document could not be loaded or parsed
    #[error("Document error: {0}")]
    Document(String),

    /// Corpus index could not be built
    #[error("Index error: {0}")]
    Index(String),

    /// Query against a built index failed
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// Answer synthesis failed (model call error, auth, quota)
    #[error("Synthesis error: {0}")]
    Synthesis(String),

    /// Prompt rendering errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
