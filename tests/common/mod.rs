//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Builder for creating pre-populated data directories
pub struct StudioDirBuilder {
    temp_dir: TempDir,
}

impl StudioDirBuilder {
    /// Create a new builder with an empty data directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Get the path to the data directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write transcript.json with the given JSON content
    pub fn with_transcript(self, json: &str) -> Self {
        fs::write(self.temp_dir.path().join("transcript.json"), json)
            .expect("Failed to write transcript.json");
        self
    }

    /// Write transcript.json from message builders
    pub fn with_messages(self, messages: &[MessageBuilder]) -> Self {
        let entries = messages.iter().map(|m| m.to_json()).collect::<Vec<_>>().join(",");
        let json = format!("[{}]", entries);
        self.with_transcript(&json)
    }

    /// Write instructions.json with the given JSON content
    pub fn with_instructions(self, json: &str) -> Self {
        fs::write(self.temp_dir.path().join("instructions.json"), json)
            .expect("Failed to write instructions.json");
        self
    }

    /// Write title.txt
    pub fn with_title(self, title: &str) -> Self {
        fs::write(self.temp_dir.path().join("title.txt"), title)
            .expect("Failed to write title.txt");
        self
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for StudioDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for transcript.json message entries
pub struct MessageBuilder {
    role: String,
    content: String,
    conversation_id: Option<String>,
}

impl MessageBuilder {
    pub fn new(role: &str, content: &str) -> Self {
        Self { role: role.to_string(), content: content.to_string(), conversation_id: None }
    }

    pub fn user(content: &str, conversation_id: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: content.to_string(),
            conversation_id: Some(conversation_id.to_string()),
        }
    }

    pub fn assistant(content: &str, conversation_id: &str) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.to_string(),
            conversation_id: Some(conversation_id.to_string()),
        }
    }

    pub fn to_json(&self) -> String {
        match &self.conversation_id {
            Some(cid) => format!(
                r#"{{"role":"{}","content":"{}","conversationId":"{}"}}"#,
                self.role, self.content, cid
            ),
            None => format!(r#"{{"role":"{}","content":"{}"}}"#, self.role, self.content),
        }
    }
}
