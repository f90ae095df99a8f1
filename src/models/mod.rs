//! Data models for the transcript editor.
//!
//! This module defines the data structures used throughout the application:
//!
//! - [`Role`] - Closed set of message roles (user/assistant/system)
//! - [`Message`] - A single transcript turn, optionally tagged with a conversation id
//! - [`AuxiliaryInstruction`] - A standalone system directive edited outside the transcript
//! - [`EditorState`] - Full snapshot of transcript + instructions + title
//!
//! All models use serde so the same types flow through persistence and
//! import/export without translation layers.

pub mod message;
pub mod state;

pub use message::{AuxiliaryInstruction, Message, Role};
pub use state::{DEFAULT_TITLE, EditorState};
