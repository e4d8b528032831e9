//! RegioWizard Core Library
//!
//! This crate provides the foundational utilities shared by every RegioWizard crate:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration management, including the answering engine tunables

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::{AppConfig, EmbeddingSettings, LocalizedList, RagSettings};
pub use error::{AppError, AppResult};
