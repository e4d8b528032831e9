//! RAG answering orchestration.
//!
//! One query runs through greeting detection, language detection,
//! retrieval, synthesis, political-group extraction and the fallback, in
//! that order. Each later stage may replace the text of an earlier one.

use crate::chunk::ChunkConfig;
use crate::corpus::CorpusIndexCache;
use crate::embeddings::{create_provider, EmbeddingProvider};
use crate::rag::fallback::FallbackResolver;
use crate::rag::intent::{Intent, IntentClassifier};
use crate::rag::language::LanguageDetector;
use crate::rag::postprocess::PoliticalGroupExtractor;
use crate::rag::synthesize::AnswerSynthesizer;
use crate::rag::types::{Answer, Provenance};
use crate::retriever::Retriever;
use regio_core::{AppConfig, AppError, AppResult, RagSettings};
use regio_llm::{create_client, LlmClient};
use regio_prompt::{build_qa_prompt, Language, MessageCatalog, MessageKind};
use std::path::PathBuf;
use std::sync::Arc;

/// Answers questions about the town from its source document.
#[derive(Debug)]
pub struct AnswerEngine {
    catalog: MessageCatalog,
    detector: LanguageDetector,
    intents: IntentClassifier,
    retriever: Retriever,
    synthesizer: AnswerSynthesizer,
    extractor: PoliticalGroupExtractor,
    fallback: FallbackResolver,
    top_k: usize,
}

impl AnswerEngine {
    /// Assemble an engine from its collaborators.
    ///
    /// Nothing is loaded here; the corpus index is built on the first
    /// question.
    pub fn new(
        settings: &RagSettings,
        document_path: impl Into<PathBuf>,
        llm: Arc<dyn LlmClient>,
        model: impl Into<String>,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> AppResult<Self> {
        settings.validate()?;

        let cache = Arc::new(CorpusIndexCache::new(
            document_path,
            ChunkConfig::from_settings(settings),
            embedder,
        ));

        Ok(Self {
            catalog: MessageCatalog::new(settings.town_name.clone())?,
            detector: LanguageDetector::from_settings(settings),
            intents: IntentClassifier::from_settings(settings),
            retriever: Retriever::new(cache),
            synthesizer: AnswerSynthesizer::new(llm, model, settings.temperature),
            extractor: PoliticalGroupExtractor::from_settings(settings)?,
            fallback: FallbackResolver::from_settings(settings),
            top_k: settings.top_k,
        })
    }

    /// Build the engine with the model and embedding providers named in the
    /// configuration.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        config.validate()?;

        let provider = config.provider.as_str();
        let api_key = config.resolve_api_key(provider);
        let endpoint = config.provider_endpoint(provider);

        let llm = create_client(
            provider,
            endpoint.as_deref(),
            api_key.as_deref(),
            config.provider_timeout(provider),
        )
        .map_err(|e| AppError::Config(format!("Failed to create LLM client: {}", e)))?;

        let mut embedding = config.rag.embedding.clone();
        if embedding.provider == "ollama" && embedding.endpoint.is_none() {
            embedding.endpoint = config.provider_endpoint("ollama");
        }
        let embedder = create_provider(&embedding)?;

        tracing::info!(
            "Answer engine using {} ({}) with {} embeddings ({})",
            llm.provider_name(),
            config.model,
            embedder.provider_name(),
            embedder.model_name()
        );

        Self::new(
            &config.rag,
            config.document_path(),
            llm,
            config.model.clone(),
            embedder,
        )
    }

    /// Shared corpus cache, for eager building and statistics.
    pub fn corpus(&self) -> &Arc<CorpusIndexCache> {
        self.retriever.cache()
    }

    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    /// Answer one query.
    ///
    /// Only transport and index failures are errors; every other query gets
    /// a non-empty text.
    pub async fn answer(&self, query: &str) -> AppResult<String> {
        self.answer_detailed(query).await.map(|answer| answer.text)
    }

    /// Answer one query and report which stage produced the text.
    pub async fn answer_detailed(&self, query: &str) -> AppResult<Answer> {
        if let Intent::Greeting(language) = self.intents.classify(query) {
            tracing::info!("Answered greeting ({})", language.tag());
            return Ok(Answer {
                text: self.catalog.get(language, MessageKind::Greeting).to_string(),
                provenance: Provenance::Greeting,
                language,
            });
        }

        let language = self.detector.detect_language(query);

        let sources = self.retriever.retrieve(query, self.top_k).await?;

        // Nothing to ground an answer on, so the model is not asked
        if sources.is_empty() {
            tracing::info!("No chunks retrieved ({}), answering not found", language.tag());
            return Ok(Answer {
                text: self.catalog.get(language, MessageKind::NotFound).to_string(),
                provenance: Provenance::NotFound,
                language,
            });
        }

        let passages: Vec<&str> = sources.iter().map(|s| s.chunk.text.as_str()).collect();
        let prompt = build_qa_prompt(&self.catalog, language, &passages, query)?;

        let synthesis = self.synthesizer.synthesize(&prompt, sources).await?;
        let mut text = synthesis.answer;
        let mut provenance = Provenance::Synthesized;

        if self.extractor.is_triggered(query) {
            let groups = self.extractor.extract(&synthesis.sources);
            if !groups.is_empty() {
                tracing::debug!("Extracted {} political group lines", groups.len());
                text = self.catalog.introduce(
                    language,
                    MessageKind::PoliticalGroupsIntro,
                    &groups.join("\n"),
                );
                provenance = Provenance::Extracted;
            }
        }

        if self.fallback.is_insufficient(&text) {
            (text, provenance) = self.resolve_fallback(query, language).await?;
        }

        tracing::info!("Answered question ({}, {})", language.tag(), provenance.as_str());

        Ok(Answer {
            text,
            provenance,
            language,
        })
    }

    async fn resolve_fallback(
        &self,
        query: &str,
        language: Language,
    ) -> AppResult<(String, Provenance)> {
        let chunks = self.retriever.retrieve(query, self.fallback.k()).await?;
        let passages = self.fallback.passages(&chunks);

        if passages.is_empty() {
            return Ok((
                self.catalog.get(language, MessageKind::NotFound).to_string(),
                Provenance::NotFound,
            ));
        }

        Ok((
            self.catalog
                .introduce(language, MessageKind::FallbackIntro, &passages.join("\n\n")),
            Provenance::Fallback,
        ))
    }
}
