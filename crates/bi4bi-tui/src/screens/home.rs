//! Landing page — product banner plus a single call to action.

use chrono::Datelike;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::action::Action;
use crate::component::Component;
use crate::theme;

const BANNER: &str = r"
 _     _ _  _   _     _
| |__ (_) || | | |__ (_)
| '_ \| | || |_| '_ \| |
| |_) | |__   _| |_) | |
|_.__/|_|  |_| |_.__/|_|
";

pub struct HomeScreen;

impl HomeScreen {
    pub fn new() -> Self {
        Self
    }
}

impl Component for HomeScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Ok(Some(Action::Begin)),
            _ => Ok(None),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Min(1),    // top spacer
            Constraint::Length(7), // banner
            Constraint::Length(2), // tagline
            Constraint::Length(1), // spacer
            Constraint::Length(3), // call to action
            Constraint::Min(1),    // bottom spacer
            Constraint::Length(1), // footer
        ])
        .split(area);

        frame.render_widget(
            Paragraph::new(BANNER)
                .style(theme::title_style())
                .alignment(Alignment::Center),
            layout[1],
        );

        frame.render_widget(
            Paragraph::new(Line::from(vec![Span::styled(
                "BI report rationalization — connect your reporting tool to get started",
                Style::default().fg(theme::DIM_WHITE),
            )]))
            .alignment(Alignment::Center),
            layout[2],
        );

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(" Enter ", theme::grid_selected()),
                Span::styled(
                    "  Configure a Connection",
                    Style::default()
                        .fg(theme::BRAND_YELLOW)
                        .add_modifier(Modifier::BOLD),
                ),
            ]))
            .alignment(Alignment::Center),
            layout[4],
        );

        let year = chrono::Utc::now().year();
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("bi4bi \u{b7} {year}"),
                theme::key_hint(),
            ))
            .alignment(Alignment::Center),
            layout[6],
        );
    }

    fn id(&self) -> &str {
        "home"
    }
}
