//! Tool picker — a grid of supported BI platforms.
//!
//! Only tools with a backend adapter open the configure screen; the rest
//! surface a "coming soon" notice and stay on the grid.

use bi4bi_core::{TOOLS, Tool};
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

const GRID_COLUMNS: usize = 3;

pub struct ChooseToolScreen {
    cursor: usize,
}

impl ChooseToolScreen {
    pub fn new() -> Self {
        Self { cursor: 0 }
    }

    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    fn move_cursor(&mut self, delta_row: isize, delta_col: isize) {
        let count = TOOLS.len() as isize;
        let cols = GRID_COLUMNS as isize;
        let mut row = self.cursor as isize / cols;
        let mut col = self.cursor as isize % cols;
        let rows = TOOLS.len().div_ceil(GRID_COLUMNS) as isize;

        row = (row + delta_row).rem_euclid(rows);
        col = (col + delta_col).rem_euclid(cols);

        // Clamp into the ragged last row
        let mut next = row * cols + col;
        if next >= count {
            next = if delta_row != 0 { col } else { count - 1 };
        }
        self.cursor = next as usize;
    }

    fn selected_tool(&self) -> &'static Tool {
        &TOOLS[self.cursor]
    }

    #[allow(clippy::unused_self)]
    fn render_tile(&self, frame: &mut Frame, area: Rect, tool: &Tool, selected: bool) {
        let border_style = if selected {
            theme::border_focused()
        } else {
            theme::border_default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let name_style = if selected {
            theme::grid_selected()
        } else {
            theme::grid_tile()
        };
        let status = if tool.adapter_key.is_some() {
            Span::styled("ready", Style::default().fg(theme::SUCCESS_GREEN))
        } else {
            Span::styled("coming soon", theme::key_hint())
        };

        let lines = vec![
            Line::from(Span::styled(tool.logo, theme::grid_tile())).alignment(Alignment::Center),
            Line::from(Span::styled(format!(" {} ", tool.name), name_style))
                .alignment(Alignment::Center),
            Line::from(status).alignment(Alignment::Center),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for ChooseToolScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(0, 1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, 0),
            KeyCode::Enter => {
                return Ok(Some(Action::SelectTool(self.selected_tool().name.to_string())));
            }
            KeyCode::Esc => return Ok(Some(Action::Back)),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Length(2), // heading
            Constraint::Min(1),    // grid
            Constraint::Length(1), // hints
        ])
        .split(area);

        frame.render_widget(
            Paragraph::new(Span::styled(
                "Which reporting tool do you use?",
                theme::title_style(),
            ))
            .alignment(Alignment::Center),
            layout[0],
        );

        // Grid: rows of three tiles
        let rows = TOOLS.len().div_ceil(GRID_COLUMNS);
        let row_constraints = vec![Constraint::Length(5); rows];
        let row_areas = Layout::vertical(row_constraints)
            .flex(ratatui::layout::Flex::Center)
            .split(layout[1]);

        for (row_idx, row_area) in row_areas.iter().enumerate() {
            let col_areas = Layout::horizontal(vec![Constraint::Length(26); GRID_COLUMNS])
                .flex(ratatui::layout::Flex::Center)
                .split(*row_area);
            for (col_idx, col_area) in col_areas.iter().enumerate() {
                let idx = row_idx * GRID_COLUMNS + col_idx;
                if let Some(tool) = TOOLS.get(idx) {
                    self.render_tile(frame, *col_area, tool, idx == self.cursor);
                }
            }
        }

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("\u{2190}\u{2191}\u{2193}\u{2192}", theme::key_hint_key()),
                Span::styled(" move  ", theme::key_hint()),
                Span::styled("Enter", theme::key_hint_key()),
                Span::styled(" select  ", theme::key_hint()),
                Span::styled("Esc", theme::key_hint_key()),
                Span::styled(" back", theme::key_hint()),
            ]))
            .alignment(Alignment::Center),
            layout[2],
        );
    }

    fn id(&self) -> &str {
        "choose_tool"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn cursor_wraps_horizontally() {
        let mut screen = ChooseToolScreen::new();
        screen.move_cursor(0, -1);
        assert_eq!(screen.cursor, 2);
        screen.move_cursor(0, 1);
        assert_eq!(screen.cursor, 0);
    }

    #[test]
    fn cursor_wraps_vertically_across_all_rows() {
        let mut screen = ChooseToolScreen::new();
        // Up from the first row lands on the last row, same column.
        screen.move_cursor(-1, 0);
        assert_eq!(screen.cursor, 6);
        screen.move_cursor(1, 0);
        assert_eq!(screen.cursor, 0);
    }

    #[test]
    fn cursor_clamps_into_ragged_last_row() {
        let mut screen = ChooseToolScreen::new();
        // Column 2, moving down from row 1 would land on index 8 which
        // does not exist with seven tools.
        screen.cursor = 5;
        screen.move_cursor(1, 0);
        assert!(screen.cursor < TOOLS.len());
    }

    #[test]
    fn enter_selects_the_highlighted_tool() {
        let mut screen = ChooseToolScreen::new();
        screen.cursor = TOOLS.len() - 1;
        let action = screen
            .handle_key_event(KeyEvent::from(KeyCode::Enter))
            .unwrap();
        match action {
            Some(Action::SelectTool(name)) => assert_eq!(name, TOOLS[TOOLS.len() - 1].name),
            other => panic!("unexpected action: {other:?}"),
        }
    }
}
