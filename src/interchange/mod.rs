//! Import/export document handling.
//!
//! The interchange format is a JSON value in one of two shapes:
//!
//! - a bare array of messages, or
//! - an object `{"title": ..., "messages": [...]}`
//!
//! Import accepts both; export always emits the object form, with auxiliary
//! instructions reinterpreted as system-role messages prepended to the
//! transcript. Validation is atomic: one malformed element rejects the whole
//! document and the caller's state stays untouched.

use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde_json::Value;

use crate::models::{Message, Role};

/// Title assigned when importing the bare-array form.
pub const ARRAY_IMPORT_TITLE: &str = "Imported Chat";
/// Title assigned when the object form carries no title.
pub const UNTITLED_IMPORT_TITLE: &str = "Imported Chat (No Title)";

/// A validated import, split the way the editor consumes it: system-role
/// entries become auxiliary instruction contents, the rest the transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedDocument {
    pub title: String,
    pub system_contents: Vec<String>,
    pub messages: Vec<Message>,
}

/// The export document shape. Always object form.
#[derive(Debug, Clone, Serialize)]
pub struct ExportDocument {
    pub title: String,
    pub messages: Vec<Message>,
}

impl ExportDocument {
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize export document")
    }
}

/// Parse and validate an import document.
///
/// Every element must carry a recognized role and string content; the closed
/// [`Role`] enum enforces the role set during the typed decode. Any violation
/// fails the whole import with no partial result.
pub fn parse_import(json: &str) -> Result<ImportedDocument> {
    let value: Value = serde_json::from_str(json).context("Import file is not valid JSON")?;

    let (title, raw_messages) = match value {
        Value::Array(items) => (ARRAY_IMPORT_TITLE.to_string(), items),
        Value::Object(mut map) => {
            let title = match map.get("title") {
                Some(Value::String(t)) => t.clone(),
                _ => UNTITLED_IMPORT_TITLE.to_string(),
            };
            match map.remove("messages") {
                Some(Value::Array(items)) => (title, items),
                Some(_) => bail!("Invalid import format: messages must be an array"),
                None => bail!("Invalid import format: missing messages array"),
            }
        }
        _ => bail!("Invalid import format: expected an array or an object with messages"),
    };

    let messages: Vec<Message> = raw_messages
        .into_iter()
        .map(|item| {
            serde_json::from_value::<Message>(item)
                .context("Invalid message format in import file")
        })
        .collect::<Result<_>>()?;

    let (system, transcript): (Vec<Message>, Vec<Message>) =
        messages.into_iter().partition(|m| m.role == Role::System);

    let system_contents = system
        .into_iter()
        .filter(|m| !m.content.trim().is_empty())
        .map(|m| m.content)
        .collect();

    Ok(ImportedDocument { title, system_contents, messages: transcript })
}
