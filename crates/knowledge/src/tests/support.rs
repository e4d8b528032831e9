//! Test doubles and fixtures shared by the scenario tests.

use crate::embeddings::{EmbeddingProvider, TrigramProvider};
use crate::rag::AnswerEngine;
use regio_core::{AppResult, RagSettings};
use regio_llm::ScriptedClient;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

/// Pages of a small town document.
pub const TOWN_PAGES: [&str; 4] = [
    "Bad Breisig liegt am Rhein im Landkreis Ahrweiler. Die Stadt ist bekannt für ihre Thermalquellen und den Kurpark.",
    "Der Stadtrat von Bad Breisig besteht aus mehreren Fraktionen.\n\nIm Stadtrat vertreten sind:\n• CDU Fraktion\n• SPD Fraktion\n• FWG Gruppe Breisig\n\nDer Stadtrat tagt im Rathaus.",
    "Das Rathaus befindet sich am Koblenzer Platz. Der Bürgermeister leitet die Verwaltung.",
    "Der Wochenmarkt findet jeden Donnerstag auf dem Marktplatz statt.",
];

/// Trigram embeddings that count how often they are asked for.
#[derive(Debug)]
pub struct CountingProvider {
    inner: TrigramProvider,
    batches: AtomicUsize,
    texts: AtomicUsize,
}

impl CountingProvider {
    pub fn new() -> Self {
        Self {
            inner: TrigramProvider::new(256),
            batches: AtomicUsize::new(0),
            texts: AtomicUsize::new(0),
        }
    }

    /// Calls to `embed_batch`, including single embeddings.
    pub fn batch_calls(&self) -> usize {
        self.batches.load(Ordering::SeqCst)
    }

    /// Texts embedded across all calls.
    pub fn embedded_texts(&self) -> usize {
        self.texts.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for CountingProvider {
    fn provider_name(&self) -> &str {
        "counting"
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        self.batches.fetch_add(1, Ordering::SeqCst);
        self.texts.fetch_add(texts.len(), Ordering::SeqCst);
        self.inner.embed_batch(texts).await
    }
}

/// A document written to a temporary directory, pages joined by form feed.
pub struct CorpusFile {
    _dir: TempDir,
    pub path: PathBuf,
}

pub fn corpus_file(pages: &[&str]) -> CorpusFile {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad_breisig_docs.txt");
    std::fs::write(&path, pages.join("\x0C")).unwrap();
    CorpusFile { _dir: dir, path }
}

/// Engine, model stub and embedding counter wired together.
pub struct Harness {
    pub engine: AnswerEngine,
    pub llm: Arc<ScriptedClient>,
    pub embedder: Arc<CountingProvider>,
    _corpus: CorpusFile,
}

pub fn harness(pages: &[&str], llm: ScriptedClient) -> Harness {
    let corpus = corpus_file(pages);
    let llm = Arc::new(llm);
    let embedder = Arc::new(CountingProvider::new());

    let engine = AnswerEngine::new(
        &RagSettings::default(),
        &corpus.path,
        llm.clone(),
        "gpt-3.5-turbo",
        embedder.clone(),
    )
    .unwrap();

    Harness {
        engine,
        llm,
        embedder,
        _corpus: corpus,
    }
}
