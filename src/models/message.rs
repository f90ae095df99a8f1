use serde::{Deserialize, Serialize};

/// Message role. The set is closed: import validation relies on unknown
/// role strings failing deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

/// A single transcript turn.
///
/// `conversation_id` is an opaque token pairing a user turn with its
/// assistant reply. It is never interpreted beyond equality comparison and
/// round-trips through persistence and import/export unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(
        rename = "conversationId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub conversation_id: Option<String>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into(), conversation_id: None }
    }

    pub fn with_conversation_id(
        role: Role,
        content: impl Into<String>,
        conversation_id: impl Into<String>,
    ) -> Self {
        Self { role, content: content.into(), conversation_id: Some(conversation_id.into()) }
    }
}

/// A standalone system directive, edited independently of the transcript.
/// Instructions are prepended to the transcript as system messages on export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuxiliaryInstruction {
    pub id: String,
    pub content: String,
}

impl AuxiliaryInstruction {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self { id: id.into(), content: content.into() }
    }
}
