//! Application state machine for the interactive editor.
//!
//! The `App` owns a [`Session`] and a [`Mode`]; every keyboard [`Action`]
//! funnels through `handle_action`, which mutates the session and reports
//! the outcome through a transient status message. All rendering state is
//! borrowed out via `render_state`, so the handler logic is testable
//! without a terminal.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;

use super::events::{Action, poll_event};
use super::rendering::{RenderState, render_ui};
use crate::clipboard::copy_to_clipboard;
use crate::models::Role;
use crate::session::Session;
use crate::transcript::DropAnchor;

const STATUS_DURATION: Duration = Duration::from_secs(3);
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Height of one list row in the synthetic drop geometry. Anchors are laid
/// out on a uniform grid; any positive value yields the same ordering.
const ROW_HEIGHT: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Browse,
    ComposeUser,
    ComposeAssistant { conversation_id: String },
    EditMessage { index: usize },
    ComposeInstruction,
    EditInstruction { index: usize },
    EditTitle,
    ConfirmDeleteMessage { index: usize },
    ConfirmDeleteInstruction { index: usize },
    ConfirmReset,
    MoveConversation { conversation_id: String, ghost_row: usize },
    MoveInstruction { from: usize, to: usize },
    Help,
}

impl Mode {
    /// Whether a text field is being edited (shows the input box).
    pub fn is_input_active(&self) -> bool {
        matches!(
            self,
            Mode::ComposeUser
                | Mode::ComposeAssistant { .. }
                | Mode::EditMessage { .. }
                | Mode::ComposeInstruction
                | Mode::EditInstruction { .. }
                | Mode::EditTitle
        )
    }

    /// Whether keystrokes should arrive as raw `Input` characters. Confirm
    /// prompts need this so `y`/`n` are not swallowed by browse bindings.
    fn captures_text(&self) -> bool {
        self.is_input_active()
            || matches!(
                self,
                Mode::ConfirmDeleteMessage { .. }
                    | Mode::ConfirmDeleteInstruction { .. }
                    | Mode::ConfirmReset
            )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MessageType {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

/// What the combined selection index points at: instructions come first,
/// then transcript messages.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Target {
    Instruction(usize),
    Message(usize),
}

pub struct App {
    session: Session,
    mode: Mode,
    selected: usize,
    input: String,
    status_message: Option<StatusMessage>,
    needs_redraw: bool,
    should_quit: bool,
    help_content: String,
}

impl App {
    pub fn new(session: Session, help_content: String) -> Self {
        Self {
            session,
            mode: Mode::Browse,
            selected: 0,
            input: String::new(),
            status_message: None,
            needs_redraw: true,
            should_quit: false,
            help_content,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Main event loop: draw when dirty, poll, dispatch. Handler errors are
    /// surfaced as status messages rather than tearing the UI down.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            if self.check_and_clear_expired_status() {
                self.needs_redraw = true;
            }

            if self.needs_redraw {
                let state = self.render_state();
                terminal.draw(|frame| render_ui(frame, &state))?;
                self.needs_redraw = false;
            }

            let action = poll_event(POLL_INTERVAL, self.mode.captures_text())?;
            if action == Action::None {
                continue;
            }
            if let Err(err) = self.handle_action(action) {
                self.set_status(format!("Error: {err:#}"), MessageType::Error);
            }
            self.needs_redraw = true;
        }
        Ok(())
    }

    pub fn render_state(&self) -> RenderState<'_> {
        RenderState {
            title: self.session.title(),
            instructions: self.session.instructions(),
            messages: self.session.transcript().messages(),
            selected: self.selected,
            mode: &self.mode,
            input: &self.input,
            status_message: self.status_message.as_ref(),
            can_undo: self.session.can_undo(),
            can_redo: self.session.can_redo(),
            help_content: &self.help_content,
        }
    }

    pub fn handle_action(&mut self, action: Action) -> Result<()> {
        if matches!(self.mode, Mode::Help) {
            self.mode = Mode::Browse;
            return Ok(());
        }
        if action == Action::Quit {
            self.should_quit = true;
            return Ok(());
        }

        match self.mode.clone() {
            Mode::Browse => self.handle_browse(action),
            Mode::ComposeUser => self.handle_compose_user(action),
            Mode::ComposeAssistant { conversation_id } => {
                self.handle_compose_assistant(action, &conversation_id)
            }
            Mode::EditMessage { index } => self.handle_edit_message(action, index),
            Mode::ComposeInstruction => self.handle_compose_instruction(action),
            Mode::EditInstruction { index } => self.handle_edit_instruction(action, index),
            Mode::EditTitle => self.handle_edit_title(action),
            Mode::ConfirmDeleteMessage { index } => {
                self.handle_confirm(action, |app| {
                    app.session.delete_from(index)?;
                    app.set_status("Deleted message and following", MessageType::Success);
                    Ok(())
                })
            }
            Mode::ConfirmDeleteInstruction { index } => {
                self.handle_confirm(action, |app| {
                    app.session.delete_instruction(index)?;
                    app.set_status("Instruction deleted", MessageType::Success);
                    Ok(())
                })
            }
            Mode::ConfirmReset => self.handle_confirm(action, |app| {
                app.session.reset()?;
                app.set_status("Chat reset", MessageType::Success);
                Ok(())
            }),
            Mode::MoveConversation { conversation_id, ghost_row } => {
                self.handle_move_conversation(action, conversation_id, ghost_row)
            }
            Mode::MoveInstruction { from, to } => {
                self.handle_move_instruction(action, from, to)
            }
            Mode::Help => Ok(()),
        }
    }

    fn handle_browse(&mut self, action: Action) -> Result<()> {
        match action {
            Action::MoveUp => {
                self.selected = self.selected.saturating_sub(1);
            }
            Action::MoveDown => {
                let total = self.selectable_count();
                if total > 0 && self.selected + 1 < total {
                    self.selected += 1;
                }
            }
            Action::Compose => {
                self.input.clear();
                self.mode = Mode::ComposeUser;
            }
            Action::Edit => match self.target() {
                Some(Target::Message(index)) => {
                    self.input =
                        self.session.transcript().messages()[index].content.clone();
                    self.mode = Mode::EditMessage { index };
                }
                Some(Target::Instruction(index)) => {
                    self.input = self.session.instructions()[index].content.clone();
                    self.mode = Mode::EditInstruction { index };
                }
                None => {}
            },
            Action::Delete => match self.target() {
                Some(Target::Message(index)) => {
                    self.mode = Mode::ConfirmDeleteMessage { index };
                }
                Some(Target::Instruction(index)) => {
                    self.mode = Mode::ConfirmDeleteInstruction { index };
                }
                None => {}
            },
            Action::Move => match self.target() {
                Some(Target::Message(index)) => self.begin_move_conversation(index),
                Some(Target::Instruction(index)) => {
                    self.mode = Mode::MoveInstruction { from: index, to: index };
                }
                None => {}
            },
            Action::EditTitle => {
                self.input = self.session.title().to_string();
                self.mode = Mode::EditTitle;
            }
            Action::AddInstruction => {
                self.input.clear();
                self.mode = Mode::ComposeInstruction;
            }
            Action::ToggleHelp => {
                self.mode = Mode::Help;
            }
            Action::Undo => {
                if self.session.undo()? {
                    self.set_status("Undo", MessageType::Success);
                } else {
                    self.set_status("Nothing to undo", MessageType::Error);
                }
                self.clamp_selection();
            }
            Action::Redo => {
                if self.session.redo()? {
                    self.set_status("Redo", MessageType::Success);
                } else {
                    self.set_status("Nothing to redo", MessageType::Error);
                }
                self.clamp_selection();
            }
            Action::CopyToClipboard => {
                let json = self.session.export_document().to_json_pretty()?;
                copy_to_clipboard(&json)?;
                self.set_status("Chat copied to clipboard", MessageType::Success);
            }
            Action::Reset => {
                self.mode = Mode::ConfirmReset;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_compose_user(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Confirm => {
                let content = std::mem::take(&mut self.input);
                match self.session.submit_user_turn(&content)? {
                    Some(conversation_id) => {
                        self.set_status(
                            "User turn added — now compose the reply",
                            MessageType::Success,
                        );
                        self.mode = Mode::ComposeAssistant { conversation_id };
                        self.select_last_message();
                    }
                    None => {
                        self.mode = Mode::Browse;
                    }
                }
            }
            other => self.handle_text_input(other),
        }
        Ok(())
    }

    fn handle_compose_assistant(&mut self, action: Action, conversation_id: &str) -> Result<()> {
        match action {
            Action::Confirm => {
                let content = std::mem::take(&mut self.input);
                self.session.save_assistant_reply(conversation_id, &content)?;
                self.set_status("Assistant reply added", MessageType::Success);
                self.mode = Mode::Browse;
                self.select_last_message();
            }
            other => self.handle_text_input(other),
        }
        Ok(())
    }

    fn handle_edit_message(&mut self, action: Action, index: usize) -> Result<()> {
        match action {
            Action::Confirm => {
                let content = std::mem::take(&mut self.input);
                self.session.edit_message(index, &content)?;
                self.set_status("Message updated", MessageType::Success);
                self.mode = Mode::Browse;
            }
            other => self.handle_text_input(other),
        }
        Ok(())
    }

    fn handle_compose_instruction(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Confirm => {
                let content = std::mem::take(&mut self.input);
                if self.session.add_instruction(&content)?.is_some() {
                    self.set_status("Instruction added", MessageType::Success);
                }
                self.mode = Mode::Browse;
            }
            other => self.handle_text_input(other),
        }
        Ok(())
    }

    fn handle_edit_instruction(&mut self, action: Action, index: usize) -> Result<()> {
        match action {
            Action::Confirm => {
                let content = std::mem::take(&mut self.input);
                self.session.edit_instruction(index, &content)?;
                self.set_status("Instruction updated", MessageType::Success);
                self.mode = Mode::Browse;
            }
            other => self.handle_text_input(other),
        }
        Ok(())
    }

    fn handle_edit_title(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Confirm => {
                let title = std::mem::take(&mut self.input);
                self.session.set_title(&title)?;
                self.set_status("Title updated", MessageType::Success);
                self.mode = Mode::Browse;
            }
            other => self.handle_text_input(other),
        }
        Ok(())
    }

    fn handle_confirm(
        &mut self,
        action: Action,
        apply: impl FnOnce(&mut Self) -> Result<()>,
    ) -> Result<()> {
        match action {
            Action::Input('y') | Action::Input('Y') | Action::Confirm => {
                apply(self)?;
                self.mode = Mode::Browse;
                self.clamp_selection();
            }
            Action::Input('n') | Action::Input('N') | Action::Cancel => {
                self.mode = Mode::Browse;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_move_conversation(
        &mut self,
        action: Action,
        conversation_id: String,
        ghost_row: usize,
    ) -> Result<()> {
        match action {
            Action::MoveUp => {
                self.mode = Mode::MoveConversation {
                    conversation_id,
                    ghost_row: ghost_row.saturating_sub(1),
                };
            }
            Action::MoveDown => {
                let max = self.anchor_count(&conversation_id);
                self.mode = Mode::MoveConversation {
                    conversation_id,
                    ghost_row: (ghost_row + 1).min(max),
                };
            }
            Action::Confirm => {
                let (target_y, anchors) = self.drop_geometry(&conversation_id, ghost_row);
                self.session.reorder_conversation(&conversation_id, target_y, &anchors)?;
                self.set_status("Conversation moved", MessageType::Success);
                self.mode = Mode::Browse;
                self.clamp_selection();
            }
            Action::Cancel => {
                self.mode = Mode::Browse;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_move_instruction(
        &mut self,
        action: Action,
        from: usize,
        to: usize,
    ) -> Result<()> {
        match action {
            Action::MoveUp => {
                self.mode = Mode::MoveInstruction { from, to: to.saturating_sub(1) };
            }
            Action::MoveDown => {
                let max = self.session.instructions().len().saturating_sub(1);
                self.mode = Mode::MoveInstruction { from, to: (to + 1).min(max) };
            }
            Action::Confirm => {
                self.session.move_instruction(from, to)?;
                self.set_status("Instruction moved", MessageType::Success);
                self.mode = Mode::Browse;
                self.selected = to;
            }
            Action::Cancel => {
                self.mode = Mode::Browse;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_text_input(&mut self, action: Action) {
        match action {
            Action::Input(c) => self.input.push(c),
            Action::Backspace => {
                self.input.pop();
            }
            Action::NewLine => self.input.push('\n'),
            Action::Cancel => {
                self.input.clear();
                self.mode = Mode::Browse;
            }
            _ => {}
        }
    }

    fn begin_move_conversation(&mut self, index: usize) {
        let message = &self.session.transcript().messages()[index];
        if message.role != Role::User {
            self.set_status("Select the user turn to move a conversation", MessageType::Error);
            return;
        }
        let Some(conversation_id) = message.conversation_id.clone() else {
            self.set_status("This message is not part of a conversation", MessageType::Error);
            return;
        };
        // Start the ghost where the conversation currently sits: its row
        // among the other movable user turns.
        let ghost_row = self.session.transcript().messages()[..index]
            .iter()
            .filter(|m| {
                m.role == Role::User
                    && m.conversation_id.is_some()
                    && m.conversation_id.as_deref() != Some(conversation_id.as_str())
            })
            .count();
        self.mode = Mode::MoveConversation { conversation_id, ghost_row };
    }

    /// Synthetic drop geometry for the current ghost position: every other
    /// user turn becomes an anchor on a uniform row grid, with rows at or
    /// below the ghost shifted down one. The drop target sits at the
    /// ghost row's midpoint.
    fn drop_geometry(
        &self,
        moved_conversation_id: &str,
        ghost_row: usize,
    ) -> (f64, Vec<DropAnchor>) {
        let mut anchors: Vec<DropAnchor> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        for message in self.session.transcript().messages() {
            if message.role != Role::User {
                continue;
            }
            let Some(cid) = message.conversation_id.as_deref() else { continue };
            if cid == moved_conversation_id || !seen.insert(cid) {
                continue;
            }
            let row = if anchors.len() >= ghost_row { anchors.len() + 1 } else { anchors.len() };
            anchors.push(DropAnchor::new(cid, row as f64 * ROW_HEIGHT, ROW_HEIGHT));
        }
        let target_y = ghost_row as f64 * ROW_HEIGHT + ROW_HEIGHT / 2.0;
        (target_y, anchors)
    }

    fn anchor_count(&self, moved_conversation_id: &str) -> usize {
        let mut seen: HashSet<&str> = HashSet::new();
        self.session
            .transcript()
            .messages()
            .iter()
            .filter(|m| m.role == Role::User)
            .filter_map(|m| m.conversation_id.as_deref())
            .filter(|cid| *cid != moved_conversation_id && seen.insert(cid))
            .count()
    }

    fn selectable_count(&self) -> usize {
        self.session.instructions().len() + self.session.transcript().len()
    }

    fn target(&self) -> Option<Target> {
        let instruction_count = self.session.instructions().len();
        if self.selected < instruction_count {
            Some(Target::Instruction(self.selected))
        } else {
            let index = self.selected - instruction_count;
            if index < self.session.transcript().len() {
                Some(Target::Message(index))
            } else {
                None
            }
        }
    }

    fn select_last_message(&mut self) {
        self.selected = self.selectable_count().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let total = self.selectable_count();
        if total == 0 {
            self.selected = 0;
        } else if self.selected >= total {
            self.selected = total - 1;
        }
    }

    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + STATUS_DURATION,
        });
    }

    fn check_and_clear_expired_status(&mut self) -> bool {
        if let Some(status) = &self.status_message
            && Instant::now() >= status.expires_at
        {
            self.status_message = None;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::storage::Storage;

    fn test_app() -> (App, TempDir) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        let session = Session::open(storage).unwrap();
        (App::new(session, "help".to_string()), dir)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_action(Action::Input(c)).unwrap();
        }
    }

    fn add_conversation(app: &mut App, user: &str, assistant: &str) {
        app.handle_action(Action::Compose).unwrap();
        type_text(app, user);
        app.handle_action(Action::Confirm).unwrap();
        assert!(matches!(app.mode(), Mode::ComposeAssistant { .. }));
        type_text(app, assistant);
        app.handle_action(Action::Confirm).unwrap();
    }

    #[test]
    fn test_quit_action() {
        let (mut app, _dir) = test_app();
        app.handle_action(Action::Quit).unwrap();
        assert!(app.should_quit());
    }

    #[test]
    fn test_compose_flow_creates_pair() {
        let (mut app, _dir) = test_app();
        add_conversation(&mut app, "hello", "hi there");

        let messages = app.session().transcript().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(messages[0].conversation_id, messages[1].conversation_id);
        assert!(messages[0].conversation_id.is_some());
    }

    #[test]
    fn test_compose_empty_user_turn_is_noop() {
        let (mut app, _dir) = test_app();
        app.handle_action(Action::Compose).unwrap();
        type_text(&mut app, "   ");
        app.handle_action(Action::Confirm).unwrap();

        assert_eq!(*app.mode(), Mode::Browse);
        assert!(app.session().transcript().is_empty());
    }

    #[test]
    fn test_cancel_compose_discards_input() {
        let (mut app, _dir) = test_app();
        app.handle_action(Action::Compose).unwrap();
        type_text(&mut app, "draft");
        app.handle_action(Action::Cancel).unwrap();

        assert_eq!(*app.mode(), Mode::Browse);
        assert!(app.session().transcript().is_empty());
    }

    #[test]
    fn test_edit_selected_message() {
        let (mut app, _dir) = test_app();
        add_conversation(&mut app, "hello", "hi");

        app.selected = 0;
        app.handle_action(Action::Edit).unwrap();
        assert_eq!(app.mode, Mode::EditMessage { index: 0 });
        assert_eq!(app.input, "hello");

        app.input.clear();
        type_text(&mut app, "hello again");
        app.handle_action(Action::Confirm).unwrap();
        assert_eq!(app.session().transcript().messages()[0].content, "hello again");
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let (mut app, _dir) = test_app();
        add_conversation(&mut app, "one", "two");

        app.selected = 0;
        app.handle_action(Action::Delete).unwrap();
        assert_eq!(app.mode, Mode::ConfirmDeleteMessage { index: 0 });

        app.handle_action(Action::Input('n')).unwrap();
        assert_eq!(app.session().transcript().len(), 2);

        app.handle_action(Action::Delete).unwrap();
        app.handle_action(Action::Input('y')).unwrap();
        assert!(app.session().transcript().is_empty());
    }

    #[test]
    fn test_move_conversation_to_front() {
        let (mut app, _dir) = test_app();
        add_conversation(&mut app, "first", "A1");
        add_conversation(&mut app, "second", "A2");

        // Select the second user turn (index 2 in the transcript).
        app.selected = 2;
        app.handle_action(Action::Move).unwrap();
        assert!(matches!(app.mode(), Mode::MoveConversation { ghost_row: 1, .. }));

        app.handle_action(Action::MoveUp).unwrap();
        app.handle_action(Action::Confirm).unwrap();

        let contents: Vec<&str> = app
            .session()
            .transcript()
            .messages()
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, vec!["second", "A2", "first", "A1"]);
    }

    #[test]
    fn test_move_conversation_cancel_keeps_order() {
        let (mut app, _dir) = test_app();
        add_conversation(&mut app, "first", "A1");
        add_conversation(&mut app, "second", "A2");

        app.selected = 2;
        app.handle_action(Action::Move).unwrap();
        app.handle_action(Action::MoveUp).unwrap();
        app.handle_action(Action::Cancel).unwrap();

        assert_eq!(app.session().transcript().messages()[0].content, "first");
    }

    #[test]
    fn test_move_on_assistant_message_rejected() {
        let (mut app, _dir) = test_app();
        add_conversation(&mut app, "hello", "hi");

        app.selected = 1;
        app.handle_action(Action::Move).unwrap();
        assert_eq!(*app.mode(), Mode::Browse);
        assert_eq!(app.status_message.as_ref().unwrap().message_type, MessageType::Error);
    }

    #[test]
    fn test_undo_redo_through_actions() {
        let (mut app, _dir) = test_app();
        add_conversation(&mut app, "hello", "hi");

        app.handle_action(Action::Undo).unwrap();
        assert_eq!(app.session().transcript().len(), 1);
        app.handle_action(Action::Undo).unwrap();
        assert!(app.session().transcript().is_empty());

        app.handle_action(Action::Redo).unwrap();
        assert_eq!(app.session().transcript().len(), 1);
    }

    #[test]
    fn test_undo_at_floor_reports_error() {
        let (mut app, _dir) = test_app();
        app.handle_action(Action::Undo).unwrap();
        assert_eq!(app.status_message.as_ref().unwrap().message_type, MessageType::Error);
    }

    #[test]
    fn test_title_edit() {
        let (mut app, _dir) = test_app();
        app.handle_action(Action::EditTitle).unwrap();
        assert_eq!(app.input, "Untitled Chat");

        app.input.clear();
        type_text(&mut app, "Planning Session");
        app.handle_action(Action::Confirm).unwrap();
        assert_eq!(app.session().title(), "Planning Session");
    }

    #[test]
    fn test_instruction_lifecycle() {
        let (mut app, _dir) = test_app();
        app.handle_action(Action::AddInstruction).unwrap();
        type_text(&mut app, "Be concise.");
        app.handle_action(Action::Confirm).unwrap();
        assert_eq!(app.session().instructions().len(), 1);

        // Instructions occupy the selection range before messages.
        app.selected = 0;
        app.handle_action(Action::Edit).unwrap();
        assert_eq!(app.input, "Be concise.");
        app.input.clear();
        type_text(&mut app, "Be very concise.");
        app.handle_action(Action::Confirm).unwrap();
        assert_eq!(app.session().instructions()[0].content, "Be very concise.");

        app.handle_action(Action::Delete).unwrap();
        app.handle_action(Action::Input('y')).unwrap();
        assert!(app.session().instructions().is_empty());
    }

    #[test]
    fn test_move_instruction() {
        let (mut app, _dir) = test_app();
        for content in ["first", "second", "third"] {
            app.handle_action(Action::AddInstruction).unwrap();
            type_text(&mut app, content);
            app.handle_action(Action::Confirm).unwrap();
        }

        app.selected = 2;
        app.handle_action(Action::Move).unwrap();
        assert_eq!(app.mode, Mode::MoveInstruction { from: 2, to: 2 });
        app.handle_action(Action::MoveUp).unwrap();
        app.handle_action(Action::MoveUp).unwrap();
        app.handle_action(Action::Confirm).unwrap();

        let contents: Vec<&str> =
            app.session().instructions().iter().map(|i| i.content.as_str()).collect();
        assert_eq!(contents, vec!["third", "first", "second"]);
    }

    #[test]
    fn test_reset_flow() {
        let (mut app, _dir) = test_app();
        add_conversation(&mut app, "hello", "hi");
        app.handle_action(Action::EditTitle).unwrap();
        app.input = "Custom".to_string();
        app.handle_action(Action::Confirm).unwrap();

        app.handle_action(Action::Reset).unwrap();
        assert_eq!(app.mode, Mode::ConfirmReset);
        app.handle_action(Action::Input('y')).unwrap();

        assert!(app.session().transcript().is_empty());
        assert_eq!(app.session().title(), "Untitled Chat");
        // Reset is itself undoable.
        app.handle_action(Action::Undo).unwrap();
        assert_eq!(app.session().transcript().len(), 2);
    }

    #[test]
    fn test_help_toggle() {
        let (mut app, _dir) = test_app();
        app.handle_action(Action::ToggleHelp).unwrap();
        assert_eq!(*app.mode(), Mode::Help);
        app.handle_action(Action::Input('x')).unwrap();
        assert_eq!(*app.mode(), Mode::Browse);
    }

    #[test]
    fn test_selection_clamped_after_delete() {
        let (mut app, _dir) = test_app();
        add_conversation(&mut app, "one", "two");
        app.selected = 1;
        app.handle_action(Action::Delete).unwrap();
        app.handle_action(Action::Input('y')).unwrap();
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_multiline_input() {
        let (mut app, _dir) = test_app();
        app.handle_action(Action::Compose).unwrap();
        type_text(&mut app, "line one");
        app.handle_action(Action::NewLine).unwrap();
        type_text(&mut app, "line two");
        app.handle_action(Action::Confirm).unwrap();
        app.handle_action(Action::Cancel).unwrap();

        assert_eq!(app.session().transcript().messages()[0].content, "line one\nline two");
    }

    #[test]
    fn test_expired_status_cleared() {
        let (mut app, _dir) = test_app();
        app.status_message = Some(StatusMessage {
            text: "old".to_string(),
            message_type: MessageType::Success,
            expires_at: Instant::now() - Duration::from_secs(1),
        });
        assert!(app.check_and_clear_expired_status());
        assert!(app.status_message.is_none());
    }
}
