//! Embedding engine for the corpus index.
//!
//! Provider-agnostic embedding generation. The same provider instance
//! embeds the chunks at build time and the queries afterwards.

pub mod provider;
pub mod providers;

pub use provider::{create_provider, EmbeddingProvider};
pub use providers::{OllamaEmbeddingProvider, TrigramProvider};
