//! Prompt system for RegioWizard.
//!
//! This crate provides:
//! - The `Language` tag used for every user-visible string
//! - A bilingual message catalog (greeting, intros, sentinel answer, labels)
//! - Handlebars rendering of the grounded QA prompt

pub mod builder;
pub mod catalog;
pub mod types;

// Re-export main types
pub use builder::{build_qa_prompt, QA_TEMPLATE};
pub use catalog::MessageCatalog;
pub use types::{BuiltPrompt, BuiltPromptMetadata, Language, MessageKind};
