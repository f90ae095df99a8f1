//! Persisted editor state: three independent records with atomic writes.
//!
//! The editor keeps transcript, auxiliary instructions, and title as separate
//! records so each can be re-synchronized independently after every mutating
//! action:
//!
//! - `transcript.json` - ordered array of messages
//! - `instructions.json` - ordered array of auxiliary instructions
//! - `title.txt` - plain text
//!
//! Every write goes through a temp file + rename so a crash mid-write never
//! leaves a half-written record. Missing files load as defaults; malformed
//! JSON is an error the caller surfaces.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::models::{AuxiliaryInstruction, Message, state::DEFAULT_TITLE};

const TRANSCRIPT_FILENAME: &str = "transcript.json";
const INSTRUCTIONS_FILENAME: &str = "instructions.json";
const TITLE_FILENAME: &str = "title.txt";

#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    /// Open storage rooted at the platform data directory.
    pub fn open_default() -> Result<Self> {
        let base = dirs::data_dir().context("Failed to get platform data directory")?;
        Self::open(base.join("transcript-studio"))
    }

    /// Open storage rooted at `dir`, creating it if missing.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir).context("Failed to create data directory")?;
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn load_transcript(&self) -> Result<Vec<Message>> {
        let path = self.dir.join(TRANSCRIPT_FILENAME);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let json = fs::read_to_string(&path).context("Failed to read transcript record")?;
        serde_json::from_str(&json).context("Failed to parse transcript record")
    }

    pub fn save_transcript(&self, messages: &[Message]) -> Result<()> {
        let json =
            serde_json::to_string_pretty(messages).context("Failed to serialize transcript")?;
        self.write_atomic(TRANSCRIPT_FILENAME, &json)
    }

    pub fn load_instructions(&self) -> Result<Vec<AuxiliaryInstruction>> {
        let path = self.dir.join(INSTRUCTIONS_FILENAME);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let json = fs::read_to_string(&path).context("Failed to read instructions record")?;
        serde_json::from_str(&json).context("Failed to parse instructions record")
    }

    pub fn save_instructions(&self, instructions: &[AuxiliaryInstruction]) -> Result<()> {
        let json = serde_json::to_string_pretty(instructions)
            .context("Failed to serialize instructions")?;
        self.write_atomic(INSTRUCTIONS_FILENAME, &json)
    }

    pub fn load_title(&self) -> Result<String> {
        let path = self.dir.join(TITLE_FILENAME);
        if !path.exists() {
            return Ok(DEFAULT_TITLE.to_string());
        }
        let title = fs::read_to_string(&path).context("Failed to read title record")?;
        let title = title.trim_end_matches('\n').to_string();
        Ok(if title.is_empty() { DEFAULT_TITLE.to_string() } else { title })
    }

    pub fn save_title(&self, title: &str) -> Result<()> {
        self.write_atomic(TITLE_FILENAME, title)
    }

    /// Write via temp file + rename so readers never observe a partial record.
    fn write_atomic(&self, filename: &str, contents: &str) -> Result<()> {
        let path = self.dir.join(filename);
        let temp = self.dir.join(format!("{}.tmp", filename));
        fs::write(&temp, contents)
            .with_context(|| format!("Failed to write temp file for {}", filename))?;
        fs::rename(&temp, &path).with_context(|| format!("Failed to rename {}", filename))?;
        Ok(())
    }
}
