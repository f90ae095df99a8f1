//! Interactive terminal editor.
//!
//! - `app` — application state machine and event dispatch
//! - `events` — keyboard-to-action translation
//! - `layout` — pane geometry
//! - `rendering` — ratatui widget rendering

pub mod app;
pub mod events;
pub mod layout;
pub mod rendering;

use std::io;

use anyhow::{Context, Result};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

pub use app::App;

use crate::session::Session;

/// Run the editor until the user quits, restoring the terminal even when
/// the event loop fails.
pub fn run_interactive(session: Session, help_content: String) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw terminal mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(session, help_content);
    let result = app.run(&mut terminal);

    disable_raw_mode().context("Failed to disable raw terminal mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}
