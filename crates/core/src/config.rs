//! Configuration management for RegioWizard.
//!
//! Configuration is layered, later sources winning:
//! - Built-in defaults
//! - Config file (`.regio/config.yaml` in the workspace, or `REGIO_CONFIG`)
//! - Environment variables
//! - Command-line flags
//!
//! Besides provider selection, the file carries a `rag` section with every
//! tunable of the answering engine (chunking, retrieval depth, keyword sets,
//! sentinel phrases).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Providers the completion factory knows how to build.
pub const KNOWN_PROVIDERS: [&str; 2] = ["openai", "ollama"];

/// Providers the embedding factory knows how to build.
pub const KNOWN_EMBEDDING_PROVIDERS: [&str; 2] = ["ollama", "trigram"];

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .regio/ and, by default, the document)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Completion provider ("openai" or "ollama")
    pub provider: String,

    /// Completion model identifier
    pub model: String,

    /// API key for the completion provider
    pub api_key: Option<String>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Provider configurations from config.yaml
    pub llm: Option<LlmConfig>,

    /// Answering engine tunables
    pub rag: RagSettings,
}

/// LLM configuration from config.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(rename = "activeProvider")]
    pub active_provider: String,

    pub providers: HashMap<String, ProviderConfig>,
}

/// Provider-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderConfig {
    OpenAI {
        #[serde(rename = "apiKeyEnv")]
        api_key_env: String,
        model: String,
        endpoint: Option<String>,
    },
    Ollama {
        endpoint: String,
        model: String,
        timeout: Option<u64>,
    },
}

/// A list of strings kept per supported language.
///
/// Only German and English variants exist; every other language uses the
/// English list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalizedList {
    #[serde(default)]
    pub de: Vec<String>,
    #[serde(default)]
    pub en: Vec<String>,
}

impl LocalizedList {
    /// Build a list from string literals.
    pub fn new(de: &[&str], en: &[&str]) -> Self {
        Self {
            de: de.iter().map(|s| s.to_string()).collect(),
            en: en.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Entries for a two-letter language tag.
    pub fn for_tag(&self, tag: &str) -> &[String] {
        if tag.eq_ignore_ascii_case("de") {
            &self.de
        } else {
            &self.en
        }
    }

    /// Iterate over `(tag, entry)` pairs, German first.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.de
            .iter()
            .map(|s| ("de", s.as_str()))
            .chain(self.en.iter().map(|s| ("en", s.as_str())))
    }
}

/// Embedding model selection.
///
/// The same provider and model must serve indexing and querying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmbeddingSettings {
    /// "ollama" or "trigram"
    pub provider: String,

    /// Model identifier (provider-specific)
    pub model: String,

    /// Embedding vector dimensions
    pub dimensions: usize,

    /// Optional endpoint override for remote providers
    pub endpoint: Option<String>,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            model: "all-minilm".to_string(),
            dimensions: 384,
            endpoint: None,
        }
    }
}

/// Tunables of the retrieval-augmented answering engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RagSettings {
    /// Source document, relative paths resolve against the workspace
    pub document_path: PathBuf,

    /// Town name used in greetings, instructions and list intros
    pub town_name: String,

    /// Target chunk size in characters
    pub chunk_size: usize,

    /// Overlap between neighbouring chunks in characters
    pub chunk_overlap: usize,

    /// Boundary separators, tried in order
    pub separators: Vec<String>,

    /// Chunks retrieved for answer synthesis
    pub top_k: usize,

    /// Chunks retrieved by the fallback path
    pub fallback_k: usize,

    /// Characters of each chunk surfaced by the fallback path
    pub fallback_prefix_chars: usize,

    /// Sampling temperature for synthesis
    pub temperature: f32,

    /// Greeting tokens per language
    pub greetings: LocalizedList,

    /// Query keywords that trigger political-group extraction
    pub political_keywords: Vec<String>,

    /// Organization names recognised in bulleted list items
    pub organization_tokens: Vec<String>,

    /// Lowercase phrases that mark a model answer as "not found"
    pub not_found_phrases: LocalizedList,

    /// Languages the detector chooses between (two-letter tags)
    pub detection_languages: Vec<String>,

    /// Tag used whenever detection fails
    pub default_language: String,

    /// Embedding model used for both indexing and queries
    pub embedding: EmbeddingSettings,
}

impl Default for RagSettings {
    fn default() -> Self {
        Self {
            document_path: PathBuf::from("bad_breisig_docs.pdf"),
            town_name: "Bad Breisig".to_string(),
            chunk_size: 600,
            chunk_overlap: 300,
            separators: ["\n\n", "\n", ".", "•"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            top_k: 12,
            fallback_k: 3,
            fallback_prefix_chars: 300,
            temperature: 0.0,
            greetings: LocalizedList::new(
                &["hallo", "servus", "moin"],
                &["hi", "hello", "hey", "greetings"],
            ),
            political_keywords: ["partei", "gruppierung", "gruppen", "parties", "political"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            organization_tokens: ["Gruppe", "CDU", "SPD", "FDP", "Union", "Junge Union", "AsF"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            not_found_phrases: LocalizedList::new(&["nicht im kontext"], &["not found"]),
            detection_languages: vec!["de".to_string(), "en".to_string()],
            default_language: "en".to_string(),
            embedding: EmbeddingSettings::default(),
        }
    }
}

impl RagSettings {
    /// Check internal consistency of the tunables.
    pub fn validate(&self) -> AppResult<()> {
        if self.chunk_size == 0 {
            return Err(AppError::Config("rag.chunkSize must be positive".to_string()));
        }

        if self.chunk_overlap >= self.chunk_size {
            return Err(AppError::Config(format!(
                "rag.chunkOverlap ({}) must be smaller than rag.chunkSize ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }

        if self.top_k == 0 || self.fallback_k == 0 {
            return Err(AppError::Config(
                "rag.topK and rag.fallbackK must be positive".to_string(),
            ));
        }

        if !KNOWN_EMBEDDING_PROVIDERS.contains(&self.embedding.provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown embedding provider: {}. Supported: {}",
                self.embedding.provider,
                KNOWN_EMBEDDING_PROVIDERS.join(", ")
            )));
        }

        if self.embedding.dimensions == 0 {
            return Err(AppError::Config(
                "rag.embedding.dimensions must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    llm: Option<LlmConfig>,
    logging: Option<LoggingConfig>,
    rag: Option<RagSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            provider: "openai".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            api_key: None,
            log_level: None,
            verbose: false,
            no_color: false,
            llm: None,
            rag: RagSettings::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, config file and environment variables.
    ///
    /// Environment variables:
    /// - `REGIO_WORKSPACE`: Override workspace path
    /// - `REGIO_CONFIG`: Path to config file
    /// - `REGIO_PROVIDER`: Completion provider
    /// - `REGIO_MODEL`: Completion model
    /// - `REGIO_API_KEY`: API key
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(workspace) = std::env::var("REGIO_WORKSPACE") {
            config.workspace = PathBuf::from(workspace);
        }

        if let Ok(config_file) = std::env::var("REGIO_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| config.regio_dir().join("config.yaml"));

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        if let Ok(provider) = std::env::var("REGIO_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("REGIO_MODEL") {
            config.model = model;
        }

        config.api_key = std::env::var("REGIO_API_KEY").ok();

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        if let Some(llm) = config_file.llm {
            result.provider = llm.active_provider.clone();

            if let Some(provider_config) = llm.providers.get(&llm.active_provider) {
                result.model = match provider_config {
                    ProviderConfig::OpenAI { model, .. } => model.clone(),
                    ProviderConfig::Ollama { model, .. } => model.clone(),
                };
            }

            result.llm = Some(llm);
        }

        if let Some(rag) = config_file.rag {
            result.rag = rag;
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables and the config file.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(workspace) = workspace {
            self.workspace = workspace;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(provider) = provider {
            self.provider = provider;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the .regio directory.
    pub fn regio_dir(&self) -> PathBuf {
        self.workspace.join(".regio")
    }

    /// Ensure the .regio directory exists.
    pub fn ensure_regio_dir(&self) -> AppResult<()> {
        let regio_dir = self.regio_dir();
        if !regio_dir.exists() {
            std::fs::create_dir_all(&regio_dir).map_err(|e| {
                AppError::Config(format!("Failed to create .regio directory: {}", e))
            })?;
        }
        Ok(())
    }

    /// Path of the JSONL conversation log.
    pub fn conversation_log_path(&self) -> PathBuf {
        self.regio_dir().join("conversation.jsonl")
    }

    /// Absolute path of the source document.
    pub fn document_path(&self) -> PathBuf {
        if self.rag.document_path.is_absolute() {
            self.rag.document_path.clone()
        } else {
            self.workspace.join(&self.rag.document_path)
        }
    }

    /// Get a provider's configuration from config.yaml.
    pub fn get_provider_config(&self, provider: &str) -> Option<&ProviderConfig> {
        self.llm.as_ref().and_then(|llm| llm.providers.get(provider))
    }

    /// Endpoint override for a provider, if configured.
    pub fn provider_endpoint(&self, provider: &str) -> Option<String> {
        match self.get_provider_config(provider)? {
            ProviderConfig::OpenAI { endpoint, .. } => endpoint.clone(),
            ProviderConfig::Ollama { endpoint, .. } => Some(endpoint.clone()),
        }
    }

    /// Request timeout for a provider, if configured.
    pub fn provider_timeout(&self, provider: &str) -> Option<u64> {
        match self.get_provider_config(provider)? {
            ProviderConfig::Ollama { timeout, .. } => *timeout,
            ProviderConfig::OpenAI { .. } => None,
        }
    }

    /// Resolve the API key for a provider.
    ///
    /// `REGIO_API_KEY` wins, then the provider's `apiKeyEnv`, then
    /// `OPENAI_API_KEY` for the OpenAI provider.
    pub fn resolve_api_key(&self, provider: &str) -> Option<String> {
        if let Some(ref key) = self.api_key {
            return Some(key.clone());
        }

        if let Some(ProviderConfig::OpenAI { api_key_env, .. }) = self.get_provider_config(provider)
        {
            if let Ok(key) = std::env::var(api_key_env) {
                return Some(key);
            }
        }

        if provider == "openai" {
            return std::env::var("OPENAI_API_KEY").ok();
        }

        None
    }

    /// Validate configuration for the active provider and the engine tunables.
    pub fn validate(&self) -> AppResult<()> {
        let provider = self.provider.as_str();

        if !KNOWN_PROVIDERS.contains(&provider) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        if provider == "openai" && self.resolve_api_key(provider).is_none() {
            return Err(AppError::Config(
                "OpenAI provider requires an API key (REGIO_API_KEY, apiKeyEnv or OPENAI_API_KEY)"
                    .to_string(),
            ));
        }

        self.rag.validate()
    }
}
