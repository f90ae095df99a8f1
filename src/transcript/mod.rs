//! Ordered message sequence with conversation pairing and drag reordering.
//!
//! [`TranscriptModel`] owns the transcript: an ordered `Vec<Message>` where a
//! user turn and its assistant reply share a conversation id. It provides:
//!
//! - **Append/edit/delete**: edit is an in-place content swap, delete is a
//!   destructive cascade truncating the sequence from the given position
//! - **Drag reordering**: a pure geometric reduction over [`DropAnchor`]
//!   positions picks the insertion point, then the sequence is rebuilt from
//!   the resulting user-message order so every pair stays contiguous
//! - **Export ordering**: auxiliary instructions prepended as system messages
//!
//! Operations referencing a position not in the sequence are no-ops, never
//! errors. At most one user and one assistant message may carry a given
//! conversation id; feeding in duplicates is a caller error.

use crate::models::{AuxiliaryInstruction, Message, Role};

/// On-screen reference geometry of an existing user message, used to decide
/// where a dragged conversation should be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct DropAnchor {
    pub conversation_id: String,
    /// Top edge of the anchor, in the same vertical coordinate space as the
    /// drag position.
    pub top: f64,
    pub height: f64,
}

impl DropAnchor {
    pub fn new(conversation_id: impl Into<String>, top: f64, height: f64) -> Self {
        Self { conversation_id: conversation_id.into(), top, height }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranscriptModel {
    messages: Vec<Message>,
}

impl TranscriptModel {
    pub fn new() -> Self {
        Self { messages: Vec::new() }
    }

    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn to_messages(&self) -> Vec<Message> {
        self.messages.clone()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Replace the whole sequence (undo/redo and import apply state wholesale).
    pub fn replace(&mut self, messages: Vec<Message>) {
        self.messages = messages;
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Replace the content of the message at `index` in place. No-op when the
    /// trimmed replacement is empty or the index is out of range.
    pub fn edit_content(&mut self, index: usize, new_content: &str) {
        let trimmed = new_content.trim();
        if trimmed.is_empty() {
            return;
        }
        if let Some(message) = self.messages.get_mut(index) {
            message.content = trimmed.to_string();
        }
    }

    /// Truncate the sequence at and after `index`: the message there and every
    /// later message are removed, regardless of pairing. This is a cascade,
    /// not a single delete; callers confirm with the user before invoking it.
    /// Out-of-range indices are no-ops.
    pub fn delete_from(&mut self, index: usize) {
        if index < self.messages.len() {
            self.messages.truncate(index);
        }
    }

    /// Reorder the transcript after a drag of the conversation identified by
    /// `moved_conversation_id`.
    ///
    /// `anchors` holds the on-screen geometry of every *other* user message in
    /// visual order. The insertion anchor is the candidate whose vertical
    /// center lies below `target_y` with the smallest such distance; when no
    /// anchor qualifies the moved conversation goes to the end. The sequence
    /// is then rebuilt from the new user-message order: each user message is
    /// emitted followed by its paired assistant message if one exists.
    ///
    /// Messages without a conversation id, and assistant messages whose
    /// pairing user message is gone, are dropped from the reconstruction.
    /// This mirrors the reference behavior; see DESIGN.md.
    pub fn reorder_by_drag_target(
        &mut self,
        moved_conversation_id: &str,
        target_y: f64,
        anchors: &[DropAnchor],
    ) {
        let mut ordered_ids: Vec<&str> =
            anchors.iter().map(|a| a.conversation_id.as_str()).collect();
        match insertion_index(target_y, anchors) {
            Some(index) => ordered_ids.insert(index, moved_conversation_id),
            None => ordered_ids.push(moved_conversation_id),
        }

        self.messages = rebuild_paired(&self.messages, &ordered_ids);
    }

    /// Messages in export order: each non-empty auxiliary instruction mapped
    /// to a system-role message, concatenated before the transcript.
    pub fn export_ordered(&self, instructions: &[AuxiliaryInstruction]) -> Vec<Message> {
        let mut ordered: Vec<Message> = instructions
            .iter()
            .filter(|inst| !inst.content.trim().is_empty())
            .map(|inst| Message::new(Role::System, inst.content.trim()))
            .collect();
        ordered.extend(self.messages.iter().cloned());
        ordered
    }
}

/// Pick the anchor whose vertical center is the closest one strictly below
/// the drag position: track the maximal strictly-negative
/// `target_y - top - height/2` over all candidates. `None` means the dragged
/// element belongs after every anchor.
fn insertion_index(target_y: f64, anchors: &[DropAnchor]) -> Option<usize> {
    let mut best: Option<(f64, usize)> = None;
    for (index, anchor) in anchors.iter().enumerate() {
        let offset = target_y - anchor.top - anchor.height / 2.0;
        if offset < 0.0 && best.is_none_or(|(best_offset, _)| offset > best_offset) {
            best = Some((offset, index));
        }
    }
    best.map(|(_, index)| index)
}

/// Rebuild a transcript from an ordered list of conversation ids: user
/// message first, paired assistant second. Duplicate ids are processed once;
/// ids with no surviving user message contribute nothing.
fn rebuild_paired(messages: &[Message], ordered_ids: &[&str]) -> Vec<Message> {
    let mut rebuilt = Vec::with_capacity(messages.len());
    let mut processed: Vec<&str> = Vec::with_capacity(ordered_ids.len());

    for &conversation_id in ordered_ids {
        if processed.contains(&conversation_id) {
            continue;
        }
        processed.push(conversation_id);

        let user = messages
            .iter()
            .find(|m| m.role == Role::User && m.conversation_id.as_deref() == Some(conversation_id));
        let Some(user) = user else { continue };

        rebuilt.push(user.clone());
        if let Some(assistant) = messages.iter().find(|m| {
            m.role == Role::Assistant && m.conversation_id.as_deref() == Some(conversation_id)
        }) {
            rebuilt.push(assistant.clone());
        }
    }

    rebuilt
}
