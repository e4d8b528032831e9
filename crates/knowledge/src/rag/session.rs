//! Conversation logging around the answer engine.
//!
//! The log is write-only from the engine's point of view: history is kept
//! for the user, never fed back into retrieval.

use crate::rag::engine::AnswerEngine;
use chrono::{DateTime, Utc};
use regio_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Author of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One line of the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub role: Role,
    pub content: String,
    pub at: DateTime<Utc>,
}

impl LogEntry {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            at: Utc::now(),
        }
    }
}

/// Append-only sink of conversation entries.
pub trait ConversationLog: Send + Sync {
    fn append(&self, entry: LogEntry) -> AppResult<()>;

    /// Every entry so far, oldest first.
    fn entries(&self) -> AppResult<Vec<LogEntry>>;
}

/// Conversation log held in memory.
#[derive(Debug, Default)]
pub struct MemoryConversationLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryConversationLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConversationLog for MemoryConversationLog {
    fn append(&self, entry: LogEntry) -> AppResult<()> {
        self.entries
            .lock()
            .map_err(|_| AppError::Other("Conversation log lock poisoned".to_string()))?
            .push(entry);
        Ok(())
    }

    fn entries(&self) -> AppResult<Vec<LogEntry>> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .map_err(|_| AppError::Other("Conversation log lock poisoned".to_string()))
    }
}

/// Conversation log stored as one JSON object per line.
#[derive(Debug, Clone)]
pub struct JsonlConversationLog {
    path: PathBuf,
}

impl JsonlConversationLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConversationLog for JsonlConversationLog {
    fn append(&self, entry: LogEntry) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                AppError::Other(format!("Failed to open {:?}: {}", self.path, e))
            })?;

        let json_line = serde_json::to_string(&entry)?;

        writeln!(file, "{}", json_line).map_err(|e| {
            AppError::Other(format!("Failed to write to {:?}: {}", self.path, e))
        })?;

        tracing::debug!("Logged {:?} entry to {:?}", entry.role, self.path);
        Ok(())
    }

    fn entries(&self) -> AppResult<Vec<LogEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)
            .map_err(|e| AppError::Other(format!("Failed to open {:?}: {}", self.path, e)))?;

        let mut entries = Vec::new();
        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line).map_err(|e| {
                AppError::Serialization(format!(
                    "Failed to parse line {} of {:?}: {}",
                    line_num + 1,
                    self.path,
                    e
                ))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }
}

/// A conversation: every query and its answer go to the log.
pub struct ChatSession<L: ConversationLog> {
    engine: Arc<AnswerEngine>,
    log: L,
}

impl<L: ConversationLog> ChatSession<L> {
    pub fn new(engine: Arc<AnswerEngine>, log: L) -> Self {
        Self { engine, log }
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    /// Log the query, answer it, log the answer.
    ///
    /// When answering fails only the query is logged and the error is
    /// returned for the caller to show.
    pub async fn submit(&self, query: &str) -> AppResult<String> {
        self.log.append(LogEntry::new(Role::User, query))?;

        let answer = self.engine.answer(query).await?;

        self.log.append(LogEntry::new(Role::Assistant, answer.clone()))?;
        Ok(answer)
    }
}
