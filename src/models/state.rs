use serde::{Deserialize, Serialize};

use super::{AuxiliaryInstruction, Message};

/// Default title for a fresh or reset editor.
pub const DEFAULT_TITLE: &str = "Untitled Chat";

/// A fully self-contained snapshot of the editor at one point in time:
/// transcript, auxiliary instructions, and title.
///
/// Snapshots are what the history log stores. All fields are owned, so
/// `Clone` is the deep copy the isolation contract requires: a stored
/// snapshot never aliases live editor state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorState {
    pub messages: Vec<Message>,
    pub instructions: Vec<AuxiliaryInstruction>,
    pub title: String,
}

impl EditorState {
    pub fn new(
        messages: Vec<Message>,
        instructions: Vec<AuxiliaryInstruction>,
        title: impl Into<String>,
    ) -> Self {
        Self { messages, instructions, title: title.into() }
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self { messages: Vec::new(), instructions: Vec::new(), title: DEFAULT_TITLE.to_string() }
    }
}
