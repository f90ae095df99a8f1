//! Startup help text. Loaded once from `help.md` in the data directory; any
//! failure degrades to a built-in fallback instead of blocking startup.

use std::fs;
use std::path::Path;

pub const HELP_FILENAME: &str = "help.md";

const FALLBACK: &str = "\
Transcript Studio

Hand-author a simulated conversation: type a user turn, author the paired
assistant reply, and edit, move, or delete turns afterwards.

Keys:
  i          compose a user turn
  e          edit the selected message
  d          delete the selected message and everything after it
  m          move the selected conversation (Up/Down, Enter to drop)
  t          edit the title        s  add a system instruction
  Ctrl+Z     undo                  Ctrl+R  redo
  Ctrl+Y     copy the chat as JSON to the clipboard
  Ctrl+X     reset the chat (with confirmation)
  ?          toggle this help      q / Ctrl+C  quit
";

/// Read help content from `help.md` under `data_dir`, falling back to the
/// built-in text when the file is missing or unreadable.
pub fn load_help_content(data_dir: &Path) -> String {
    match fs::read_to_string(data_dir.join(HELP_FILENAME)) {
        Ok(content) if !content.trim().is_empty() => content,
        _ => FALLBACK.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_missing_file_uses_fallback() {
        let dir = TempDir::new().unwrap();
        let content = load_help_content(dir.path());
        assert!(content.contains("Transcript Studio"));
    }

    #[test]
    fn test_custom_help_file_wins() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(HELP_FILENAME), "# Custom help\n").unwrap();
        assert_eq!(load_help_content(dir.path()), "# Custom help\n");
    }

    #[test]
    fn test_empty_help_file_uses_fallback() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(HELP_FILENAME), "   \n").unwrap();
        assert!(load_help_content(dir.path()).contains("Transcript Studio"));
    }
}
