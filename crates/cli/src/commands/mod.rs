//! Command handlers for the RegioWizard CLI.
//!
//! Each command lives in its own submodule.

pub mod ask;
pub mod chat;
pub mod index;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use chat::ChatCommand;
pub use index::IndexCommand;
