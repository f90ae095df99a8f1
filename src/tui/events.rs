use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

/// User actions from keyboard events. Keys are interpreted differently while
/// a text field is active, so translation takes an `input_active` flag.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Cancel,
    Confirm,
    MoveUp,
    MoveDown,
    Compose,
    Edit,
    Delete,
    Move,
    EditTitle,
    AddInstruction,
    ToggleHelp,
    Undo,
    Redo,
    CopyToClipboard,
    Reset,
    Input(char),
    Backspace,
    NewLine,
    None,
}

/// Poll for keyboard events and convert to actions
pub fn poll_event(timeout: Duration, input_active: bool) -> anyhow::Result<Action> {
    if event::poll(timeout)?
        && let Event::Key(key) = event::read()?
    {
        return Ok(key_to_action(key, input_active));
    }
    Ok(Action::None)
}

fn key_to_action(key: KeyEvent, input_active: bool) -> Action {
    if input_active {
        return input_key_to_action(key);
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Esc, _) => Action::Cancel,
        (KeyCode::Enter, _) => Action::Confirm,

        // Navigation (arrows and vim-style)
        (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => Action::MoveUp,
        (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => Action::MoveDown,

        // Editing
        (KeyCode::Char('i'), KeyModifiers::NONE) => Action::Compose,
        (KeyCode::Char('e'), KeyModifiers::NONE) => Action::Edit,
        (KeyCode::Char('d'), KeyModifiers::NONE) => Action::Delete,
        (KeyCode::Char('m'), KeyModifiers::NONE) => Action::Move,
        (KeyCode::Char('t'), KeyModifiers::NONE) => Action::EditTitle,
        (KeyCode::Char('s'), KeyModifiers::NONE) => Action::AddInstruction,
        (KeyCode::Char('?'), _) => Action::ToggleHelp,

        // History and utilities
        (KeyCode::Char('z'), KeyModifiers::CONTROL) => Action::Undo,
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => Action::Redo,
        (KeyCode::Char('y'), KeyModifiers::CONTROL) => Action::CopyToClipboard,
        (KeyCode::Char('x'), KeyModifiers::CONTROL) => Action::Reset,

        _ => Action::None,
    }
}

fn input_key_to_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::Cancel,
        (KeyCode::Enter, KeyModifiers::ALT) => Action::NewLine,
        (KeyCode::Enter, _) => Action::Confirm,
        (KeyCode::Backspace, _) => Action::Backspace,
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Action::Input(c)
        }
        _ => Action::None,
    }
}
