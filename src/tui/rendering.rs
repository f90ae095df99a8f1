use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};

use super::app::{MessageType, Mode, StatusMessage};
use super::layout::EditorLayout;
use crate::models::{AuxiliaryInstruction, Message, Role};

const ACCENT: Color = Color::Rgb(16, 185, 129);
const MUTED: Color = Color::Rgb(113, 113, 122);
const BRIGHT: Color = Color::Rgb(250, 250, 250);
const BAR_BG: Color = Color::Rgb(24, 24, 27);

/// Borrowed view of everything the renderer needs for one frame.
pub struct RenderState<'a> {
    pub title: &'a str,
    pub instructions: &'a [AuxiliaryInstruction],
    pub messages: &'a [Message],
    pub selected: usize,
    pub mode: &'a Mode,
    pub input: &'a str,
    pub status_message: Option<&'a StatusMessage>,
    pub can_undo: bool,
    pub can_redo: bool,
    pub help_content: &'a str,
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let show_input = state.mode.is_input_active();
    let layout = EditorLayout::new(frame.area(), state.instructions.len(), show_input);

    render_title_bar(frame, layout.title_area, state);
    render_instructions(frame, layout.instructions_area, state);
    render_transcript(frame, layout.transcript_area, state);
    if let Some(input_area) = layout.input_area {
        render_input(frame, input_area, state);
    }
    render_status_bar(frame, layout.status_area, state);

    if matches!(state.mode, Mode::Help) {
        render_help_overlay(frame, state.help_content);
    }
}

fn render_title_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let mut spans = vec![
        Span::styled(format!(" {} ", state.title), Style::default().fg(BRIGHT).bg(ACCENT)),
        Span::raw("  "),
    ];
    if state.can_undo {
        spans.push(Span::styled("↶", Style::default().fg(BRIGHT)));
    } else {
        spans.push(Span::styled("↶", Style::default().fg(MUTED)));
    }
    spans.push(Span::raw(" "));
    if state.can_redo {
        spans.push(Span::styled("↷", Style::default().fg(BRIGHT)));
    } else {
        spans.push(Span::styled("↷", Style::default().fg(MUTED)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_instructions(frame: &mut Frame, area: Rect, state: &RenderState) {
    let items: Vec<ListItem> = if state.instructions.is_empty() {
        vec![ListItem::new("(no system instructions — press s to add one)")
            .style(Style::default().fg(MUTED))]
    } else {
        state
            .instructions
            .iter()
            .enumerate()
            .map(|(idx, instruction)| {
                let id_suffix = tail(&instruction.id, 6);
                let first_line = instruction.content.lines().next().unwrap_or("");
                let content = format!(" {} │ {}", id_suffix, first_line);
                ListItem::new(content).style(item_style(idx == state.selected))
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(MUTED))
            .title(" System Instructions "),
    );
    frame.render_widget(list, area);
}

fn render_transcript(frame: &mut Frame, area: Rect, state: &RenderState) {
    let items = if let Mode::MoveConversation { conversation_id, ghost_row } = state.mode {
        move_mode_items(state.messages, conversation_id, *ghost_row)
    } else {
        transcript_items(state)
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(MUTED))
            .title(" Transcript "),
    );
    frame.render_widget(list, area);
}

fn transcript_items(state: &RenderState) -> Vec<ListItem<'static>> {
    if state.messages.is_empty() {
        return vec![
            ListItem::new("(empty — press i to compose a user turn)")
                .style(Style::default().fg(MUTED)),
        ];
    }

    state
        .messages
        .iter()
        .enumerate()
        .map(|(idx, message)| {
            let combined_idx = state.instructions.len() + idx;
            let cid = message
                .conversation_id
                .as_deref()
                .map(|id| tail(id, 6))
                .unwrap_or_else(|| "------".to_string());
            let first_line = message.content.lines().next().unwrap_or("");
            let content =
                format!(" {:>9} │ {} │ {}", message.role.as_str(), cid, first_line);
            ListItem::new(content).style(item_style(combined_idx == state.selected))
        })
        .collect()
}

/// While moving a conversation: only the other user turns are shown, with a
/// ghost marker at the pending drop position. The row order here is exactly
/// the geometry the reorder algorithm receives on confirm.
fn move_mode_items(
    messages: &[Message],
    moved_conversation_id: &str,
    ghost_row: usize,
) -> Vec<ListItem<'static>> {
    let ghost_style = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);
    let moved_label = messages
        .iter()
        .find(|m| {
            m.role == Role::User && m.conversation_id.as_deref() == Some(moved_conversation_id)
        })
        .map(|m| m.content.lines().next().unwrap_or("").to_string())
        .unwrap_or_default();

    let mut items = Vec::new();
    let mut row = 0usize;
    for message in messages {
        if message.role != Role::User
            || message.conversation_id.is_none()
            || message.conversation_id.as_deref() == Some(moved_conversation_id)
        {
            continue;
        }
        if row == ghost_row {
            items.push(
                ListItem::new(format!(" ▶▶ {} ◀◀", moved_label)).style(ghost_style),
            );
        }
        let first_line = message.content.lines().next().unwrap_or("");
        items.push(
            ListItem::new(format!("      user │ {}", first_line))
                .style(Style::default().fg(MUTED)),
        );
        row += 1;
    }
    if ghost_row >= row {
        items.push(ListItem::new(format!(" ▶▶ {} ◀◀", moved_label)).style(ghost_style));
    }
    items
}

fn render_input(frame: &mut Frame, area: Rect, state: &RenderState) {
    let title = match state.mode {
        Mode::ComposeUser => " User turn ",
        Mode::ComposeAssistant { .. } => " Assistant reply ",
        Mode::EditMessage { .. } => " Edit message ",
        Mode::ComposeInstruction => " New instruction ",
        Mode::EditInstruction { .. } => " Edit instruction ",
        Mode::EditTitle => " Title ",
        _ => " Input ",
    };

    let paragraph = Paragraph::new(state.input)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT))
                .title(title),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let (text, style) = if let Some(message) = state.status_message {
        let fg = match message.message_type {
            MessageType::Success => ACCENT,
            MessageType::Error => Color::Rgb(239, 68, 68),
        };
        (format!(" {} ", message.text), Style::default().fg(fg).bg(BAR_BG))
    } else {
        let hint = match state.mode {
            Mode::Browse => {
                "i: compose | e: edit | d: delete | m: move | t: title | ?: help | q: quit"
            }
            Mode::ConfirmDeleteMessage { .. } => {
                "Delete this message and everything after it? y: confirm | n/Esc: cancel"
            }
            Mode::ConfirmDeleteInstruction { .. } => {
                "Delete this instruction? y: confirm | n/Esc: cancel"
            }
            Mode::ConfirmReset => {
                "Reset clears all messages and instructions. y: confirm | n/Esc: cancel"
            }
            Mode::MoveConversation { .. } | Mode::MoveInstruction { .. } => {
                "Up/Down: choose position | Enter: drop | Esc: cancel"
            }
            Mode::Help => "any key to close",
            _ => "Enter: save | Alt+Enter: newline | Esc: cancel",
        };
        (format!(" {} ", hint), Style::default().fg(BRIGHT).bg(BAR_BG))
    };

    frame.render_widget(Paragraph::new(text).style(style), area);
}

fn render_help_overlay(frame: &mut Frame, help_content: &str) {
    let area = centered_rect(frame.area(), 70, 80);
    frame.render_widget(Clear, area);

    let lines: Vec<Line> = help_content.lines().map(Line::from).collect();
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT))
                .title(" Help "),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn item_style(selected: bool) -> Style {
    if selected {
        Style::default().fg(BRIGHT).bg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED)
    }
}

fn tail(id: &str, n: usize) -> String {
    let chars: Vec<char> = id.chars().collect();
    let start = chars.len().saturating_sub(n);
    chars[start..].iter().collect()
}
