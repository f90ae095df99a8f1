//! Copy message text to the system clipboard.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Cap on copied text (1MB); a single message should never be near this.
const MAX_CLIPBOARD_SIZE: usize = 1024 * 1024;

/// Trait seam so tests can run without a system clipboard.
trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")?;
        Ok(())
    }
}

fn validate_clipboard_text(text: &str) -> Result<()> {
    if text.is_empty() {
        anyhow::bail!("Cannot copy empty text to clipboard");
    }
    if text.len() > MAX_CLIPBOARD_SIZE {
        anyhow::bail!(
            "Text too large for clipboard ({} bytes, max {})",
            text.len(),
            MAX_CLIPBOARD_SIZE
        );
    }
    Ok(())
}

#[cfg(test)]
fn copy_with_provider(text: &str, provider: &mut dyn ClipboardProvider) -> Result<()> {
    validate_clipboard_text(text)?;
    provider.set_text(text)?;
    Ok(())
}

/// Copy `text` to the system clipboard.
///
/// Fails when the text is empty or oversized, or when no clipboard is
/// available (headless environments). Callers surface the error as a status
/// message; nothing else depends on it.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    // Validate before touching the system clipboard for clearer errors in CI.
    validate_clipboard_text(text)?;

    let mut clipboard = SystemClipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}
