//! Corpus index construction and the process-wide build-once cache.

use crate::chunk::{chunk_pages, ChunkConfig};
use crate::embeddings::EmbeddingProvider;
use crate::parser;
use crate::types::{Chunk, DocumentPage, IndexStats, ScoredChunk};
use crate::vector_index::{InMemoryIndex, VectorIndex};
use regio_core::{AppError, AppResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::OnceCell;

/// Chunks of the source document with their embeddings.
///
/// Read-only once built. The embedding provider that produced the vectors
/// is kept so queries land in the same embedding space.
#[derive(Debug)]
pub struct CorpusIndex {
    index: InMemoryIndex,
    provider: Arc<dyn EmbeddingProvider>,
    stats: IndexStats,
}

impl CorpusIndex {
    /// Load, chunk and embed a document.
    pub async fn build(
        document_path: &Path,
        config: &ChunkConfig,
        provider: Arc<dyn EmbeddingProvider>,
    ) -> AppResult<Self> {
        let pages = parser::load_pages(document_path)?;
        Self::from_pages(&pages, config, provider).await
    }

    /// Chunk and embed already extracted pages.
    ///
    /// Fails as a whole if any chunk cannot be embedded.
    pub async fn from_pages(
        pages: &[DocumentPage],
        config: &ChunkConfig,
        provider: Arc<dyn EmbeddingProvider>,
    ) -> AppResult<Self> {
        let start = Instant::now();
        let chunks = chunk_pages(pages, config);

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = if texts.is_empty() {
            Vec::new()
        } else {
            provider.embed_batch(&texts).await.map_err(|e| {
                AppError::Index(format!(
                    "Failed to embed {} chunks with {} ({}): {}",
                    texts.len(),
                    provider.provider_name(),
                    provider.model_name(),
                    e
                ))
            })?
        };

        if embeddings.len() != chunks.len() {
            return Err(AppError::Index(format!(
                "Embedding provider returned {} vectors for {} chunks",
                embeddings.len(),
                chunks.len()
            )));
        }

        let mut index = InMemoryIndex::new(provider.dimensions());
        for (chunk, embedding) in chunks.into_iter().zip(embeddings) {
            index.insert(chunk, embedding)?;
        }

        let stats = IndexStats {
            pages: pages.len(),
            chunks: index.len(),
            embedding_provider: provider.provider_name().to_string(),
            embedding_model: provider.model_name().to_string(),
            dimensions: provider.dimensions(),
            duration_ms: start.elapsed().as_millis() as u64,
        };

        tracing::info!(
            "Built corpus index: {} chunks from {} pages with {} ({}) in {}ms",
            stats.chunks,
            stats.pages,
            stats.embedding_provider,
            stats.embedding_model,
            stats.duration_ms
        );

        Ok(Self {
            index,
            provider,
            stats,
        })
    }

    /// Top-k chunks for a query, most similar first.
    pub async fn search(&self, query: &str, top_k: usize) -> AppResult<Vec<ScoredChunk>> {
        if self.index.is_empty() {
            return Ok(Vec::new());
        }

        let query_embedding = self.provider.embed(query).await.map_err(|e| {
            AppError::Retrieval(format!("Failed to embed query: {}", e))
        })?;

        self.index.search(&query_embedding, top_k)
    }

    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    /// Indexed chunks in document order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.index.chunks()
    }
}

/// Lazily built, shared corpus index.
///
/// The first caller of [`CorpusIndexCache::ensure_built`] builds the index;
/// concurrent callers wait for that build and every later caller gets the
/// same instance. A failed build leaves the cache empty, so the next call
/// tries again from scratch.
#[derive(Debug)]
pub struct CorpusIndexCache {
    document_path: PathBuf,
    config: ChunkConfig,
    provider: Arc<dyn EmbeddingProvider>,
    cell: OnceCell<Arc<CorpusIndex>>,
}

impl CorpusIndexCache {
    pub fn new(
        document_path: impl Into<PathBuf>,
        config: ChunkConfig,
        provider: Arc<dyn EmbeddingProvider>,
    ) -> Self {
        Self {
            document_path: document_path.into(),
            config,
            provider,
            cell: OnceCell::new(),
        }
    }

    /// Return the index, building it on first use.
    pub async fn ensure_built(&self) -> AppResult<Arc<CorpusIndex>> {
        let index = self
            .cell
            .get_or_try_init(|| async {
                tracing::info!("Building corpus index from {:?}", self.document_path);
                CorpusIndex::build(&self.document_path, &self.config, Arc::clone(&self.provider))
                    .await
                    .map(Arc::new)
            })
            .await?;

        Ok(Arc::clone(index))
    }

    pub fn is_built(&self) -> bool {
        self.cell.initialized()
    }

    pub fn document_path(&self) -> &Path {
        &self.document_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::TrigramProvider;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn trigram() -> Arc<dyn EmbeddingProvider> {
        Arc::new(TrigramProvider::new(128))
    }

    fn corpus_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".txt").unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[tokio::test]
    async fn test_build_records_stats() {
        let file = corpus_file("Das Rathaus liegt am Koblenzer Platz.\x0CDer Kurpark liegt am Rhein.");
        let index = CorpusIndex::build(file.path(), &ChunkConfig::default(), trigram())
            .await
            .unwrap();

        let stats = index.stats();
        assert_eq!(stats.pages, 2);
        assert_eq!(stats.chunks, 2);
        assert_eq!(stats.embedding_provider, "trigram");
        assert_eq!(stats.dimensions, 128);
        assert_eq!(index.chunks().map(|c| c.page).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_search_ranks_matching_chunk_first() {
        let file = corpus_file("Das Rathaus liegt am Koblenzer Platz.\x0CDer Kurpark liegt am Rhein.");
        let index = CorpusIndex::build(file.path(), &ChunkConfig::default(), trigram())
            .await
            .unwrap();

        let results = index.search("Wo ist der Kurpark?", 2).await.unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].chunk.text.contains("Kurpark"));
        assert!(results[0].score >= results[1].score);
    }

    #[tokio::test]
    async fn test_empty_corpus_searches_to_nothing() {
        let file = corpus_file("");
        let index = CorpusIndex::build(file.path(), &ChunkConfig::default(), trigram())
            .await
            .unwrap();

        assert_eq!(index.stats().chunks, 0);
        assert!(index.search("Rathaus", 3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cache_builds_once() {
        let file = corpus_file("Der Kurpark liegt am Rhein.");
        let cache = CorpusIndexCache::new(file.path(), ChunkConfig::default(), trigram());

        assert!(!cache.is_built());
        let first = cache.ensure_built().await.unwrap();
        let second = cache.ensure_built().await.unwrap();

        assert!(cache.is_built());
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_failed_build_leaves_cache_empty() {
        let cache = CorpusIndexCache::new(
            "/nonexistent/bad_breisig_docs.txt",
            ChunkConfig::default(),
            trigram(),
        );

        let result = cache.ensure_built().await;
        assert!(matches!(result, Err(AppError::Document(_))));
        assert!(!cache.is_built());
    }
}
