//! Transcript Studio - Hand-author simulated multi-turn chat transcripts
//!
//! This library provides the data model and state machinery behind the
//! `transcript-studio` editor: a transcript of role-tagged messages where
//! each user turn is paired with its assistant reply by a conversation id.
//! It supports:
//!
//! - Appending, editing, and cascade-deleting paired conversation turns
//! - Reordering whole conversations by a geometric drop-target algorithm
//! - Bounded undo/redo over full editor snapshots
//! - Importing and exporting portable JSON chat documents
//! - Persisting the transcript, instructions, and title as separate records
//!
//! # Example
//!
//! ```no_run
//! use transcript_studio::{Session, Storage};
//!
//! let storage = Storage::open("/tmp/my-chat")?;
//! let mut session = Session::open(storage)?;
//! if let Some(conversation_id) = session.submit_user_turn("Hello!")? {
//!     session.save_assistant_reply(&conversation_id, "Hi there.")?;
//! }
//! println!("{} messages", session.transcript().len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod clipboard;
pub mod help;
pub mod history;
pub mod interchange;
pub mod models;
pub mod session;
pub mod storage;
pub mod transcript;
pub mod tui;

// Re-export commonly used types
pub use history::{DEFAULT_HISTORY_BOUND, HistoryLog};
pub use interchange::{ExportDocument, ImportedDocument, parse_import};
pub use models::{AuxiliaryInstruction, DEFAULT_TITLE, EditorState, Message, Role};
pub use session::Session;
pub use storage::Storage;
pub use transcript::{DropAnchor, TranscriptModel};
