//! Index command handler.
//!
//! Builds the corpus index once and reports what went into it.

use clap::Args;
use regio_core::{AppConfig, AppResult};
use regio_knowledge::AnswerEngine;

/// Build the corpus index and show statistics
#[derive(Args, Debug)]
pub struct IndexCommand {
    /// Print the first characters of every chunk
    #[arg(long)]
    pub show_chunks: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl IndexCommand {
    /// Execute the index command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing index command");

        let engine = AnswerEngine::from_config(config)?;
        let index = engine.corpus().ensure_built().await?;
        let stats = index.stats();

        if self.json {
            let output = serde_json::json!({
                "document": engine.corpus().document_path(),
                "stats": stats,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        println!("Document:   {}", engine.corpus().document_path().display());
        println!("Pages:      {}", stats.pages);
        println!("Chunks:     {}", stats.chunks);
        println!(
            "Embeddings: {}/{} ({} dimensions)",
            stats.embedding_provider, stats.embedding_model, stats.dimensions
        );
        println!("Built in:   {} ms", stats.duration_ms);

        if self.show_chunks {
            println!();
            for chunk in index.chunks() {
                let preview: String = chunk.text.chars().take(80).collect();
                println!(
                    "[{:>4}] p.{:<3} {}",
                    chunk.order,
                    chunk.page,
                    preview.replace('\n', " ")
                );
            }
        }

        Ok(())
    }
}
