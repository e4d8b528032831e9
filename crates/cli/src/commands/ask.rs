//! Ask command handler.
//!
//! Answers a single question about the town and exits.

use clap::Args;
use regio_core::{AppConfig, AppError, AppResult};
use regio_knowledge::AnswerEngine;
use std::path::PathBuf;

/// Ask one question about the town
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: Option<String>,

    /// Read the question from a file
    #[arg(short, long, conflicts_with = "question")]
    pub file: Option<PathBuf>,

    /// Output as JSON, including provenance and language
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");

        let question = self.get_question()?;
        tracing::debug!("Question: {}", question);

        let engine = AnswerEngine::from_config(config)?;
        let answer = engine.answer_detailed(&question).await?;

        if self.json {
            let output = serde_json::json!({
                "answer": answer.text,
                "provenance": answer.provenance.as_str(),
                "language": answer.language.tag(),
                "model": config.model,
                "provider": config.provider,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", answer.text);
        }

        Ok(())
    }

    /// Get the question from the argument or the file.
    fn get_question(&self) -> AppResult<String> {
        if let Some(ref question) = self.question {
            return Ok(question.clone());
        }

        match self.file {
            Some(ref path) => std::fs::read_to_string(path).map_err(|e| {
                AppError::Config(format!("Failed to read question file {:?}: {}", path, e))
            }),
            None => Err(AppError::Config("No question provided".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(question: Option<&str>, file: Option<PathBuf>) -> AskCommand {
        AskCommand {
            question: question.map(str::to_string),
            file,
            json: false,
        }
    }

    #[test]
    fn test_question_from_argument() {
        let cmd = command(Some("Wo liegt Bad Breisig?"), None);
        assert_eq!(cmd.get_question().unwrap(), "Wo liegt Bad Breisig?");
    }

    #[test]
    fn test_missing_question_is_config_error() {
        let cmd = command(None, None);
        assert!(matches!(cmd.get_question(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_unreadable_question_file() {
        let cmd = command(None, Some(PathBuf::from("/nonexistent/question.txt")));
        assert!(matches!(cmd.get_question(), Err(AppError::Config(_))));
    }
}
