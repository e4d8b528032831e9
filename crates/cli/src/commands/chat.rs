//! Chat command handler.
//!
//! Reads questions line by line from stdin and records the conversation to
//! the JSONL log in the workspace.

use clap::Args;
use regio_core::{AppConfig, AppResult};
use regio_knowledge::{
    AnswerEngine, ChatSession, ConversationLog, JsonlConversationLog, MemoryConversationLog,
};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Interactive question and answer session
#[derive(Args, Debug)]
pub struct ChatCommand {
    /// Do not record the conversation
    #[arg(long)]
    pub no_log: bool,
}

impl ChatCommand {
    /// Execute the chat command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing chat command");

        let engine = Arc::new(AnswerEngine::from_config(config)?);

        if self.no_log {
            run_loop(&ChatSession::new(engine, MemoryConversationLog::new())).await
        } else {
            let log = JsonlConversationLog::new(config.conversation_log_path());
            tracing::debug!("Conversation log: {:?}", log.path());
            run_loop(&ChatSession::new(engine, log)).await
        }
    }
}

/// Read-eval loop. A failed answer prints an error line and the loop goes on.
async fn run_loop<L: ConversationLog>(session: &ChatSession<L>) -> AppResult<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    prompt()?;
    while let Some(line) = lines.next_line().await? {
        let query = line.trim();
        if query.is_empty() {
            prompt()?;
            continue;
        }

        match session.submit(query).await {
            Ok(answer) => println!("{}\n", answer),
            Err(e) => {
                tracing::error!("Answering failed: {}", e);
                println!("Error: {}\n", e);
            }
        }
        prompt()?;
    }

    println!();
    Ok(())
}

fn prompt() -> AppResult<()> {
    print!("> ");
    std::io::stdout().flush()?;
    Ok(())
}
