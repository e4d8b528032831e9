//! Top-k retrieval over the cached corpus index.

use crate::corpus::CorpusIndexCache;
use crate::types::ScoredChunk;
use regio_core::AppResult;
use std::sync::Arc;

/// Returns the chunks nearest to a query, building the index on first use.
#[derive(Debug, Clone)]
pub struct Retriever {
    cache: Arc<CorpusIndexCache>,
}

impl Retriever {
    pub fn new(cache: Arc<CorpusIndexCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<CorpusIndexCache> {
        &self.cache
    }

    /// At most `k` chunks ordered by descending similarity.
    ///
    /// Never mutates the index; the same query against the same index
    /// always yields the same result.
    pub async fn retrieve(&self, query: &str, k: usize) -> AppResult<Vec<ScoredChunk>> {
        let index = self.cache.ensure_built().await?;
        let results = index.search(query, k).await?;

        tracing::debug!(
            "Retrieved {} chunks (k = {}, best score: {:.3})",
            results.len(),
            k,
            results.first().map(|r| r.score).unwrap_or(0.0)
        );

        Ok(results)
    }
}
