//! Core types for the corpus index.

use serde::{Deserialize, Serialize};

/// Text extracted from one page of the source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentPage {
    /// Page number (1-indexed)
    pub number: u32,

    /// Extracted page text
    pub text: String,
}

/// A contiguous span of source text, the unit of retrieval.
///
/// Chunks are produced once during indexing and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk text content
    pub text: String,

    /// Position in the whole document (0-indexed)
    pub order: usize,

    /// Page the chunk was cut from (1-indexed)
    pub page: u32,
}

/// A chunk paired with its similarity to a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk: Chunk,

    /// Cosine similarity, higher is more relevant
    pub score: f32,
}

/// Statistics about a built corpus index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Pages read from the document
    pub pages: usize,

    /// Chunks stored in the index
    pub chunks: usize,

    /// Embedding provider used for every vector
    pub embedding_provider: String,

    /// Embedding model used for every vector
    pub embedding_model: String,

    /// Vector dimensions
    pub dimensions: usize,

    /// Time spent building, in milliseconds
    pub duration_ms: u64,
}
