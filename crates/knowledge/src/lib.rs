//! Corpus knowledge and answering for RegioWizard.
//!
//! Loads the town's source document once, splits it into overlapping
//! chunks, embeds them into an in-memory index and answers questions from
//! the nearest chunks.

pub mod chunk;
pub mod corpus;
pub mod embeddings;
pub mod parser;
pub mod rag;
pub mod retriever;
pub mod types;
pub mod vector_index;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use corpus::{CorpusIndex, CorpusIndexCache};
pub use embeddings::{create_provider, EmbeddingProvider};
pub use rag::{
    Answer, AnswerEngine, ChatSession, ConversationLog, JsonlConversationLog, LogEntry,
    MemoryConversationLog, Provenance, Role,
};
pub use retriever::Retriever;
pub use types::{Chunk, DocumentPage, IndexStats, ScoredChunk};
