//! LLM integration crate for RegioWizard.
//!
//! Provider-agnostic completion interface used by the answer synthesizer.
//!
//! # Providers
//! - **OpenAI**: chat completions (default, as deployed)
//! - **Ollama**: local LLM runtime
//! - **Scripted**: fixed replies for offline runs and tests
//!
//! # Example
//! ```no_run
//! use regio_llm::{LlmClient, LlmRequest, providers::OllamaClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OllamaClient::new();
//! let request = LlmRequest::new("Hallo!", "llama3.2").with_temperature(0.0);
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;

// Re-export main types
pub use client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::create_client;
pub use providers::{OllamaClient, OpenAiClient, ScriptedClient};
