use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Editor pane layout
pub struct EditorLayout {
    pub title_area: Rect,
    pub instructions_area: Rect,
    pub transcript_area: Rect,
    pub input_area: Option<Rect>,
    pub status_area: Rect,
}

impl EditorLayout {
    /// Create the editor layout:
    /// - Title bar: top row
    /// - Instructions pane: sized to the instruction count (bordered)
    /// - Transcript: remaining space
    /// - Input box: 4 rows, only while a text field is active
    /// - Status bar: bottom row
    pub fn new(area: Rect, instruction_count: usize, show_input: bool) -> Self {
        // Bordered pane: entries + 2 border rows, capped so the transcript
        // always keeps room.
        let instruction_rows = (instruction_count as u16 + 2).clamp(3, area.height / 3);

        let mut constraints = vec![
            Constraint::Length(1),
            Constraint::Length(instruction_rows),
            Constraint::Min(3),
        ];
        if show_input {
            constraints.push(Constraint::Length(4));
        }
        constraints.push(Constraint::Length(1));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        Self {
            title_area: chunks[0],
            instructions_area: chunks[1],
            transcript_area: chunks[2],
            input_area: if show_input { Some(chunks[3]) } else { None },
            status_area: chunks[chunks.len() - 1],
        }
    }
}
