//! The editor session: the single owner of all mutable state.
//!
//! [`Session`] is the context object constructed once at startup and handed to
//! whichever front end drives it. It owns the [`TranscriptModel`], the
//! auxiliary instruction list, the title, the [`HistoryLog`], and the
//! [`Storage`] handle. Nothing else holds a mutable reference to any of them.
//!
//! Every logical user action maps to exactly one method here. Each mutating
//! method applies the change, re-synchronizes the three persisted records,
//! and calls [`Session::capture_state`] exactly once, so the bounded history
//! never fills with redundant entries. Undo/redo replace the visible state
//! wholesale from a snapshot, with no incremental diffing, and re-persist
//! without capturing.

use anyhow::Result;
use uuid::Uuid;

use crate::history::HistoryLog;
use crate::interchange::{ExportDocument, ImportedDocument, parse_import};
use crate::models::{AuxiliaryInstruction, EditorState, Message, Role, state::DEFAULT_TITLE};
use crate::storage::Storage;
use crate::transcript::{DropAnchor, TranscriptModel};

pub struct Session {
    transcript: TranscriptModel,
    instructions: Vec<AuxiliaryInstruction>,
    title: String,
    history: HistoryLog<EditorState>,
    storage: Storage,
}

impl Session {
    /// Load the persisted records and record the initial snapshot.
    pub fn open(storage: Storage) -> Result<Self> {
        let transcript = TranscriptModel::from_messages(storage.load_transcript()?);
        let instructions = storage.load_instructions()?;
        let title = storage.load_title()?;

        let mut session =
            Session { transcript, instructions, title, history: HistoryLog::new(), storage };
        session.capture_state();
        Ok(session)
    }

    pub fn transcript(&self) -> &TranscriptModel {
        &self.transcript
    }

    pub fn instructions(&self) -> &[AuxiliaryInstruction] {
        &self.instructions
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Opaque per-turn-pair token. Only ever compared for equality.
    fn generate_conversation_id() -> String {
        Uuid::new_v4().simple().to_string()
    }

    fn generate_instruction_id() -> String {
        let id = Uuid::new_v4().simple().to_string();
        format!("sys_{}", &id[..6])
    }

    /// Submit a user turn. Returns the fresh conversation id so the caller
    /// can author the paired assistant reply, or `None` when the trimmed
    /// content is empty.
    pub fn submit_user_turn(&mut self, content: &str) -> Result<Option<String>> {
        let content = content.trim();
        if content.is_empty() {
            return Ok(None);
        }

        let conversation_id = Self::generate_conversation_id();
        self.transcript.append(Message::with_conversation_id(
            Role::User,
            content,
            conversation_id.clone(),
        ));
        self.sync_after_mutation()?;
        Ok(Some(conversation_id))
    }

    /// Save the assistant reply paired with `conversation_id`. Empty trimmed
    /// content is a no-op.
    pub fn save_assistant_reply(&mut self, conversation_id: &str, content: &str) -> Result<()> {
        let content = content.trim();
        if content.is_empty() {
            return Ok(());
        }
        self.transcript.append(Message::with_conversation_id(
            Role::Assistant,
            content,
            conversation_id,
        ));
        self.sync_after_mutation()
    }

    /// Replace message content in place. Empty or out-of-range edits are
    /// no-ops and leave the history untouched.
    pub fn edit_message(&mut self, index: usize, new_content: &str) -> Result<()> {
        let trimmed = new_content.trim();
        if trimmed.is_empty() || index >= self.transcript.len() {
            return Ok(());
        }
        if self.transcript.messages()[index].content == trimmed {
            return Ok(());
        }
        self.transcript.edit_content(index, new_content);
        self.sync_after_mutation()
    }

    /// Delete the message at `index` and everything after it. Destructive
    /// cascade; the front end confirms with the user before calling this.
    pub fn delete_from(&mut self, index: usize) -> Result<()> {
        if index >= self.transcript.len() {
            return Ok(());
        }
        self.transcript.delete_from(index);
        self.sync_after_mutation()
    }

    /// Reorder after a drag of the given conversation; see
    /// [`TranscriptModel::reorder_by_drag_target`].
    pub fn reorder_conversation(
        &mut self,
        moved_conversation_id: &str,
        target_y: f64,
        anchors: &[DropAnchor],
    ) -> Result<()> {
        self.transcript.reorder_by_drag_target(moved_conversation_id, target_y, anchors);
        self.sync_after_mutation()
    }

    /// Set the title; an empty trimmed title restores the default.
    pub fn set_title(&mut self, title: &str) -> Result<()> {
        let title = title.trim();
        self.title = if title.is_empty() { DEFAULT_TITLE.to_string() } else { title.to_string() };
        self.sync_after_mutation()
    }

    /// Add an auxiliary instruction, returning its generated id. Empty
    /// trimmed content is a no-op returning `None`.
    pub fn add_instruction(&mut self, content: &str) -> Result<Option<String>> {
        let content = content.trim();
        if content.is_empty() {
            return Ok(None);
        }
        let id = Self::generate_instruction_id();
        self.instructions.push(AuxiliaryInstruction::new(id.clone(), content));
        self.sync_after_mutation()?;
        Ok(Some(id))
    }

    pub fn edit_instruction(&mut self, index: usize, new_content: &str) -> Result<()> {
        let trimmed = new_content.trim();
        if trimmed.is_empty() || index >= self.instructions.len() {
            return Ok(());
        }
        self.instructions[index].content = trimmed.to_string();
        self.sync_after_mutation()
    }

    pub fn delete_instruction(&mut self, index: usize) -> Result<()> {
        if index >= self.instructions.len() {
            return Ok(());
        }
        self.instructions.remove(index);
        self.sync_after_mutation()
    }

    /// Move an instruction to a new position in the list.
    pub fn move_instruction(&mut self, from: usize, to: usize) -> Result<()> {
        if from >= self.instructions.len() || from == to {
            return Ok(());
        }
        let instruction = self.instructions.remove(from);
        let to = to.min(self.instructions.len());
        self.instructions.insert(to, instruction);
        self.sync_after_mutation()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Restore the previous snapshot wholesale. Returns whether anything was
    /// applied; calls past the boundary are no-ops.
    pub fn undo(&mut self) -> Result<bool> {
        match self.history.undo() {
            Some(state) => {
                self.apply_state(state)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn redo(&mut self) -> Result<bool> {
        match self.history.redo() {
            Some(state) => {
                self.apply_state(state)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Validate and import a JSON document, fully replacing transcript,
    /// instructions, and title. Validation failures leave state untouched.
    pub fn import_json(&mut self, json: &str) -> Result<()> {
        let document = parse_import(json)?;
        self.import_document(document)
    }

    pub fn import_document(&mut self, document: ImportedDocument) -> Result<()> {
        self.title = document.title;
        self.instructions = document
            .system_contents
            .into_iter()
            .map(|content| AuxiliaryInstruction::new(Self::generate_instruction_id(), content))
            .collect();
        self.transcript.replace(document.messages);
        self.sync_after_mutation()
    }

    /// Clear everything and restore the default title.
    pub fn reset(&mut self) -> Result<()> {
        self.transcript.clear();
        self.instructions.clear();
        self.title = DEFAULT_TITLE.to_string();
        self.sync_after_mutation()
    }

    /// Assemble the export document: instructions reinterpreted as system
    /// messages prepended to the transcript, always object form.
    pub fn export_document(&self) -> ExportDocument {
        ExportDocument {
            title: self.title.clone(),
            messages: self.transcript.export_ordered(&self.instructions),
        }
    }

    fn apply_state(&mut self, state: EditorState) -> Result<()> {
        self.transcript.replace(state.messages);
        self.instructions = state.instructions;
        self.title = state.title;
        self.persist_all()
    }

    fn sync_after_mutation(&mut self) -> Result<()> {
        self.persist_all()?;
        self.capture_state();
        Ok(())
    }

    fn persist_all(&self) -> Result<()> {
        self.storage.save_transcript(self.transcript.messages())?;
        self.storage.save_instructions(&self.instructions)?;
        self.storage.save_title(&self.title)?;
        Ok(())
    }

    /// Snapshot assembly: the single synchronization point between live state
    /// and the history log. Instructions with empty trimmed content are
    /// in-progress edits and stay out of the snapshot.
    fn capture_state(&mut self) {
        let state = EditorState::new(
            self.transcript.to_messages(),
            self.instructions
                .iter()
                .filter(|inst| !inst.content.trim().is_empty())
                .cloned()
                .collect(),
            self.title.clone(),
        );
        self.history.push(&state);
    }
}
