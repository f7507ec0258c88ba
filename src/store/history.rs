//! Conversation history persistence
//!
//! Ordered transcript of role-tagged messages, serialized as a JSON array
//! and rewritten in full on every save.

use crate::chat::ChatMessage;
use crate::errors::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File-backed conversation history
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    messages: Vec<ChatMessage>,
}

impl HistoryStore {
    /// Open a history store, loading any existing transcript.
    ///
    /// A missing or unreadable file yields an empty history rather than
    /// an error.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let messages = Self::load(&path);
        Self { path, messages }
    }

    fn load(path: &Path) -> Vec<ChatMessage> {
        if !path.exists() {
            debug!(path = %path.display(), "history file not found, starting empty");
            return Vec::new();
        }
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(messages) => messages,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "history file corrupt, starting empty");
                    Vec::new()
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "history file unreadable, starting empty");
                Vec::new()
            }
        }
    }

    /// Persist the full transcript, replacing the file contents
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.messages)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Replace the oldest messages with a single summary message, keeping
    /// the most recent `keep` messages intact
    pub fn replace_oldest_with_summary(&mut self, keep: usize, summary: ChatMessage) {
        if self.messages.len() <= keep {
            return;
        }
        let recent = self.messages.split_off(self.messages.len() - keep);
        self.messages = std::iter::once(summary).chain(recent).collect();
    }
}
