//! Vector index abstraction for corpus chunks.
//!
//! Defines a trait for nearest-neighbour storage and the in-memory cosine
//! implementation the corpus index uses.

use crate::types::{Chunk, ScoredChunk};
use regio_core::{AppError, AppResult};
use std::cmp::Ordering;

/// Trait for vector index backends.
///
/// Implementations must support:
/// - Inserting chunks with their embeddings
/// - Searching for the top-k most similar vectors
/// - Reporting their size
pub trait VectorIndex: Send + Sync {
    /// Insert a chunk with its embedding.
    fn insert(&mut self, chunk: Chunk, embedding: Vec<f32>) -> AppResult<()>;

    /// Search for the top-k most similar chunks to the query embedding.
    ///
    /// Returns chunks ordered by descending similarity score. Equal scores
    /// keep insertion order.
    fn search(&self, query_embedding: &[f32], top_k: usize) -> AppResult<Vec<ScoredChunk>>;

    /// Number of stored chunks.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Exhaustive cosine-similarity index held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryIndex {
    dimensions: usize,
    entries: Vec<(Chunk, Vec<f32>)>,
}

impl InMemoryIndex {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            entries: Vec::new(),
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Stored chunks in insertion order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.entries.iter().map(|(chunk, _)| chunk)
    }
}

impl VectorIndex for InMemoryIndex {
    fn insert(&mut self, chunk: Chunk, embedding: Vec<f32>) -> AppResult<()> {
        if embedding.len() != self.dimensions {
            return Err(AppError::Index(format!(
                "Embedding for chunk {} has {} dimensions, index expects {}",
                chunk.order,
                embedding.len(),
                self.dimensions
            )));
        }

        self.entries.push((chunk, embedding));
        Ok(())
    }

    fn search(&self, query_embedding: &[f32], top_k: usize) -> AppResult<Vec<ScoredChunk>> {
        if query_embedding.len() != self.dimensions {
            return Err(AppError::Retrieval(format!(
                "Query embedding has {} dimensions, index expects {}",
                query_embedding.len(),
                self.dimensions
            )));
        }

        let mut results: Vec<ScoredChunk> = self
            .entries
            .iter()
            .map(|(chunk, embedding)| ScoredChunk {
                chunk: chunk.clone(),
                score: cosine_similarity(query_embedding, embedding),
            })
            .collect();

        // Stable sort, so ties stay in insertion order
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        results.truncate(top_k);

        Ok(results)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Cosine similarity of two equally long vectors. Zero vectors score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
