//! Configure screen — credential form for the selected tool.
//!
//! Pre-populates from the saved credential record. Ctrl+T runs an async
//! connection test against the backend, Ctrl+S persists the form, and
//! Ctrl+O previews an optional report-inventory CSV. Esc cancels without
//! saving.

use std::path::Path;

use bi4bi_api::{ConnectionParams, ReportsClient};
use bi4bi_config::{CredentialRecord, CredentialStore};
use bi4bi_core::find_tool;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tokio::sync::mpsc::UnboundedSender;

use crate::action::{Action, Notification};
use crate::component::Component;
use crate::theme;
use crate::upload::{UploadPreview, preview_csv};

// ── Types ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigureState {
    Editing,
    Testing,
}

/// Which form field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigureField {
    Server,
    ApiVersion,
    TokenName,
    TokenSecret,
    SiteName,
    UploadPath,
}

impl ConfigureField {
    const ALL: [ConfigureField; 6] = [
        Self::Server,
        Self::ApiVersion,
        Self::TokenName,
        Self::TokenSecret,
        Self::SiteName,
        Self::UploadPath,
    ];
}

/// Result of the last connection test, shown inline.
#[derive(Debug, Clone)]
enum TestStatus {
    Passed,
    Failed(String),
}

// ── Component ────────────────────────────────────────────────────────

pub struct ConfigureScreen {
    action_tx: Option<UnboundedSender<Action>>,
    store: CredentialStore,
    client: ReportsClient,
    state: ConfigureState,
    active_field: ConfigureField,
    // The tool being configured
    tool_name: String,
    adapter_key: String,
    // Form data
    server_input: String,
    api_version_input: String,
    token_name_input: String,
    token_secret_input: String,
    site_name_input: String,
    upload_path_input: String,
    show_secret: bool,
    // Feedback
    form_error: Option<String>,
    test_status: Option<TestStatus>,
    upload_preview: Option<UploadPreview>,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl ConfigureScreen {
    pub fn new(store: CredentialStore, client: ReportsClient) -> Self {
        Self {
            action_tx: None,
            store,
            client,
            state: ConfigureState::Editing,
            active_field: ConfigureField::Server,
            tool_name: String::new(),
            adapter_key: String::new(),
            server_input: String::new(),
            api_version_input: String::new(),
            token_name_input: String::new(),
            token_secret_input: String::new(),
            site_name_input: String::new(),
            upload_path_input: String::new(),
            show_secret: false,
            form_error: None,
            test_status: None,
            upload_preview: None,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    /// Prepare the form for a tool: pick the adapter key and pre-populate
    /// every field from the saved record.
    fn open_for(&mut self, tool_name: &str) {
        self.tool_name = tool_name.to_string();
        self.adapter_key = find_tool(tool_name)
            .and_then(|tool| tool.adapter_key)
            .map_or_else(|| tool_name.to_lowercase(), str::to_owned);

        let record = self.store.load();
        self.server_input = record.server;
        self.api_version_input = record.api_version;
        self.token_name_input = record.token_name;
        self.token_secret_input = record.token_secret;
        self.site_name_input = record.site_name;

        self.state = ConfigureState::Editing;
        self.active_field = ConfigureField::Server;
        self.show_secret = false;
        self.form_error = None;
        self.test_status = None;
        self.upload_preview = None;
        self.upload_path_input.clear();
    }

    // ── Field navigation ─────────────────────────────────────────────

    fn focus_next(&mut self) {
        let pos = ConfigureField::ALL
            .iter()
            .position(|&f| f == self.active_field)
            .unwrap_or(0);
        self.active_field = ConfigureField::ALL[(pos + 1) % ConfigureField::ALL.len()];
    }

    fn focus_prev(&mut self) {
        let pos = ConfigureField::ALL
            .iter()
            .position(|&f| f == self.active_field)
            .unwrap_or(0);
        self.active_field =
            ConfigureField::ALL[(pos + ConfigureField::ALL.len() - 1) % ConfigureField::ALL.len()];
    }

    fn active_input_mut(&mut self) -> &mut String {
        match self.active_field {
            ConfigureField::Server => &mut self.server_input,
            ConfigureField::ApiVersion => &mut self.api_version_input,
            ConfigureField::TokenName => &mut self.token_name_input,
            ConfigureField::TokenSecret => &mut self.token_secret_input,
            ConfigureField::SiteName => &mut self.site_name_input,
            ConfigureField::UploadPath => &mut self.upload_path_input,
        }
    }

    // ── Validation & submission ──────────────────────────────────────

    fn validate(&self) -> std::result::Result<(), String> {
        if self.server_input.trim().is_empty() {
            return Err("Server cannot be empty".into());
        }
        if self.token_name_input.trim().is_empty() {
            return Err("Token name cannot be empty".into());
        }
        if self.token_secret_input.is_empty() {
            return Err("Token secret cannot be empty".into());
        }
        Ok(())
    }

    fn build_record(&self) -> CredentialRecord {
        let api_version = {
            let trimmed = self.api_version_input.trim();
            if trimmed.is_empty() {
                "3.17".to_string()
            } else {
                trimmed.to_string()
            }
        };
        CredentialRecord {
            server: self.server_input.trim().to_string(),
            api_version,
            token_name: self.token_name_input.trim().to_string(),
            token_secret: self.token_secret_input.clone(),
            site_name: self.site_name_input.trim().to_string(),
            site_url: String::new(),
        }
    }

    fn build_params(&self) -> ConnectionParams {
        let record = self.build_record();
        ConnectionParams {
            server: record.server,
            api_version: record.api_version,
            personal_access_token_name: record.token_name,
            personal_access_token_secret: record.token_secret,
            site_name: record.site_name,
        }
    }

    fn start_connection_test(&mut self) {
        self.state = ConfigureState::Testing;
        self.test_status = None;

        let Some(tx) = self.action_tx.clone() else {
            return;
        };
        let client = self.client.clone();
        let adapter = self.adapter_key.clone();
        let params = self.build_params();

        tokio::spawn(async move {
            let result = client
                .test_connection(&adapter, &params)
                .await
                .map_err(|e| format!("{e}"));
            let _ = tx.send(Action::TestResult(result));
        });
    }

    fn save_credentials(&mut self) -> Option<Action> {
        if let Err(msg) = self.validate() {
            self.form_error = Some(msg);
            return None;
        }
        match self.store.save(&self.build_record()) {
            Ok(()) => Some(Action::Notify(Notification::success(
                "Configuration saved!",
            ))),
            Err(e) => Some(Action::Notify(Notification::error(format!(
                "Failed to save configuration: {e}"
            )))),
        }
    }

    fn load_upload_preview(&mut self) -> Option<Action> {
        let raw = self.upload_path_input.trim();
        if raw.is_empty() {
            self.form_error = Some("Enter a CSV path to preview".into());
            return None;
        }
        let path = Path::new(raw);
        match preview_csv(path) {
            Ok(preview) => {
                let name = path
                    .file_name()
                    .map_or_else(|| raw.to_owned(), |n| n.to_string_lossy().into_owned());
                let rows = preview.total_rows;
                self.upload_preview = Some(preview);
                Some(Action::Notify(Notification::info(format!(
                    "{name}: {rows} rows"
                ))))
            }
            Err(e) => {
                self.upload_preview = None;
                Some(Action::Notify(Notification::error(e.to_string())))
            }
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render_centered_panel(&self, frame: &mut Frame, area: Rect) -> Rect {
        let panel_w = 64u16.min(area.width.saturating_sub(4));
        let panel_h = 36u16.min(area.height.saturating_sub(2));
        let x = (area.width.saturating_sub(panel_w)) / 2;
        let y = (area.height.saturating_sub(panel_h)) / 2;
        let panel = Rect::new(area.x + x, area.y + y, panel_w, panel_h);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            panel,
        );

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(format!("Configure {}", self.tool_name), theme::title_style()),
                Span::raw(" "),
            ]))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(panel);
        frame.render_widget(block, panel);
        inner
    }

    #[allow(clippy::unused_self)]
    fn render_input_field(
        &self,
        frame: &mut Frame,
        area: Rect,
        label: &str,
        value: &str,
        active: bool,
        masked: bool,
    ) {
        if area.height < 3 {
            return;
        }

        frame.render_widget(
            Paragraph::new(Span::styled(label, theme::field_label(active))),
            Rect::new(area.x, area.y, area.width, 1),
        );

        let display = if masked && !value.is_empty() {
            "\u{25CF}".repeat(value.chars().count())
        } else {
            value.to_string()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::field_border(active));

        let block_area = Rect::new(area.x, area.y + 1, area.width, 3.min(area.height - 1));
        let inner = block.inner(block_area);
        frame.render_widget(block, block_area);

        let text = if active {
            format!("{display}\u{2588}")
        } else {
            display
        };
        frame.render_widget(
            Paragraph::new(Span::styled(
                text,
                Style::default().fg(theme::BRAND_YELLOW),
            )),
            inner,
        );
    }

    fn render_editing(&self, frame: &mut Frame, area: Rect) {
        let fields_area = Rect::new(area.x + 1, area.y, area.width.saturating_sub(2), area.height);
        let chunks = Layout::vertical([
            Constraint::Length(4), // server
            Constraint::Length(4), // api version
            Constraint::Length(4), // token name
            Constraint::Length(4), // token secret
            Constraint::Length(4), // site name
            Constraint::Length(4), // upload path
            Constraint::Min(0),    // preview
        ])
        .split(fields_area);

        self.render_input_field(
            frame,
            chunks[0],
            "  Server",
            &self.server_input,
            self.active_field == ConfigureField::Server,
            false,
        );
        self.render_input_field(
            frame,
            chunks[1],
            "  API Version",
            &self.api_version_input,
            self.active_field == ConfigureField::ApiVersion,
            false,
        );
        self.render_input_field(
            frame,
            chunks[2],
            "  Personal Access Token Name",
            &self.token_name_input,
            self.active_field == ConfigureField::TokenName,
            false,
        );
        self.render_input_field(
            frame,
            chunks[3],
            "  Personal Access Token Secret",
            &self.token_secret_input,
            self.active_field == ConfigureField::TokenSecret,
            !self.show_secret,
        );
        self.render_input_field(
            frame,
            chunks[4],
            "  Site Name",
            &self.site_name_input,
            self.active_field == ConfigureField::SiteName,
            false,
        );
        self.render_input_field(
            frame,
            chunks[5],
            "  Report Inventory CSV (optional)",
            &self.upload_path_input,
            self.active_field == ConfigureField::UploadPath,
            false,
        );

        if let Some(ref preview) = self.upload_preview {
            self.render_preview(frame, chunks[6], preview);
        }
    }

    #[allow(clippy::unused_self)]
    fn render_preview(&self, frame: &mut Frame, area: Rect, preview: &UploadPreview) {
        if area.height < 3 {
            return;
        }

        let title = if preview.is_truncated() {
            format!(
                " {} rows (showing first {}) ",
                preview.total_rows,
                preview.rows.len()
            )
        } else {
            format!(" {} rows ", preview.total_rows)
        };
        let block = Block::default()
            .title(Span::styled(title, theme::field_label(false)))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![Line::from(Span::styled(
            preview.headers.join(" \u{2502} "),
            theme::title_style(),
        ))];
        for row in &preview.rows {
            lines.push(Line::from(Span::styled(
                row.join(" \u{2502} "),
                theme::grid_tile(),
            )));
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_testing(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(area);

        let throbber = throbber_widgets_tui::Throbber::default()
            .label("  Testing connection...")
            .style(Style::default().fg(theme::BRAND_YELLOW))
            .throbber_style(Style::default().fg(theme::BRAND_YELLOW_DIM));

        frame.render_stateful_widget(throbber, layout[1], &mut self.throbber_state.clone());

        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("  Connecting to {}", self.server_input.trim()),
                theme::key_hint(),
            )),
            layout[2],
        );
    }

    fn render_status_line(&self, frame: &mut Frame, area: Rect) {
        let line = if let Some(ref err) = self.form_error {
            Some(Span::styled(
                err.clone(),
                Style::default().fg(theme::ERROR_RED),
            ))
        } else {
            match self.test_status {
                Some(TestStatus::Passed) => Some(Span::styled(
                    "\u{2713} Connection successful!",
                    Style::default().fg(theme::SUCCESS_GREEN),
                )),
                Some(TestStatus::Failed(ref msg)) => Some(Span::styled(
                    format!("\u{2717} Connection failed: {msg}"),
                    Style::default().fg(theme::ERROR_RED),
                )),
                None => None,
            }
        };
        if let Some(span) = line {
            frame.render_widget(
                Paragraph::new(span).alignment(Alignment::Center),
                area,
            );
        }
    }

    fn render_key_hints(&self, frame: &mut Frame, area: Rect) {
        let hints = match self.state {
            ConfigureState::Editing => {
                if self.active_field == ConfigureField::TokenSecret {
                    "Ctrl+U reveal  Ctrl+T test  Ctrl+S save  Ctrl+O preview  Esc back"
                } else {
                    "Tab next  Ctrl+T test  Ctrl+S save  Ctrl+O preview  Esc back"
                }
            }
            ConfigureState::Testing => "Esc cancel",
        };
        frame.render_widget(
            Paragraph::new(Span::styled(hints, theme::key_hint())).alignment(Alignment::Center),
            area,
        );
    }
}

// ── Component impl ───────────────────────────────────────────────────

impl Component for ConfigureScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match self.state {
            ConfigureState::Testing => {
                if key.code == KeyCode::Esc {
                    self.state = ConfigureState::Editing;
                }
                return Ok(None);
            }
            ConfigureState::Editing => {}
        }

        // Any input clears the previous form error
        self.form_error = None;

        match key.code {
            KeyCode::Tab => self.focus_next(),
            KeyCode::BackTab => self.focus_prev(),
            KeyCode::Esc => return Ok(Some(Action::Back)),
            KeyCode::Enter => {
                if self.active_field == ConfigureField::UploadPath {
                    return Ok(self.load_upload_preview());
                }
                if let Err(msg) = self.validate() {
                    self.form_error = Some(msg);
                } else {
                    self.start_connection_test();
                }
            }
            KeyCode::Backspace => {
                self.active_input_mut().pop();
            }
            KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => match c {
                't' => {
                    if let Err(msg) = self.validate() {
                        self.form_error = Some(msg);
                    } else {
                        self.start_connection_test();
                    }
                }
                's' => return Ok(self.save_credentials()),
                'o' => return Ok(self.load_upload_preview()),
                'u' => self.show_secret = !self.show_secret,
                _ => {}
            },
            KeyCode::Char(c) => self.active_input_mut().push(c),
            _ => {}
        }

        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::OpenConfigure(tool_name) => {
                self.open_for(tool_name);
            }
            Action::TestResult(result) => {
                self.state = ConfigureState::Editing;
                match result {
                    Ok(()) => {
                        self.test_status = Some(TestStatus::Passed);
                        return Ok(Some(Action::Notify(Notification::success(
                            "Connection successful!",
                        ))));
                    }
                    Err(msg) => {
                        self.test_status = Some(TestStatus::Failed(msg.clone()));
                        return Ok(Some(Action::Notify(Notification::error(format!(
                            "Connection failed: {msg}"
                        )))));
                    }
                }
            }
            Action::Tick => {
                if self.state == ConfigureState::Testing {
                    self.throbber_state.calc_next();
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let inner = self.render_centered_panel(frame, area);

        let layout = Layout::vertical([
            Constraint::Length(1), // spacer
            Constraint::Min(1),    // content
            Constraint::Length(1), // status
            Constraint::Length(1), // hints
        ])
        .split(inner);

        self.render_status_line(frame, layout[2]);
        self.render_key_hints(frame, layout[3]);

        match self.state {
            ConfigureState::Editing => self.render_editing(frame, layout[1]),
            ConfigureState::Testing => self.render_testing(frame, layout[1]),
        }
    }

    fn id(&self) -> &str {
        "configure"
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn screen_in(dir: &TempDir) -> ConfigureScreen {
        let store = CredentialStore::new(dir.path().join("credentials.csv"));
        let client = ReportsClient::new(
            "http://localhost:8000".parse().expect("url"),
            Duration::from_secs(1),
        )
        .expect("client");
        ConfigureScreen::new(store, client)
    }

    #[test]
    fn opening_for_tableau_uses_its_adapter_key() {
        let dir = TempDir::new().expect("tempdir");
        let mut screen = screen_in(&dir);
        screen.open_for("Tableau");
        assert_eq!(screen.adapter_key, "tableau");
        assert_eq!(screen.api_version_input, "3.17");
    }

    #[test]
    fn opening_for_unknown_tool_lowercases_its_name() {
        let dir = TempDir::new().expect("tempdir");
        let mut screen = screen_in(&dir);
        screen.open_for("Qlik");
        assert_eq!(screen.adapter_key, "qlik");
    }

    #[test]
    fn open_pre_populates_from_the_saved_record() {
        let dir = TempDir::new().expect("tempdir");
        let store = CredentialStore::new(dir.path().join("credentials.csv"));
        store
            .save(&CredentialRecord {
                server: "srv1".into(),
                token_name: "tk".into(),
                token_secret: "sec".into(),
                ..CredentialRecord::default()
            })
            .expect("save");

        let mut screen = screen_in(&dir);
        screen.open_for("Tableau");
        assert_eq!(screen.server_input, "srv1");
        assert_eq!(screen.token_name_input, "tk");
        assert_eq!(screen.token_secret_input, "sec");
    }

    #[test]
    fn validation_requires_server_and_token_fields() {
        let dir = TempDir::new().expect("tempdir");
        let mut screen = screen_in(&dir);
        screen.open_for("Tableau");

        assert!(screen.validate().is_err());

        screen.server_input = "srv".into();
        screen.token_name_input = "tk".into();
        assert!(screen.validate().is_err());

        screen.token_secret_input = "sec".into();
        assert!(screen.validate().is_ok());
    }

    #[test]
    fn blank_api_version_defaults_when_building_the_record() {
        let dir = TempDir::new().expect("tempdir");
        let mut screen = screen_in(&dir);
        screen.open_for("Tableau");
        screen.api_version_input = "   ".into();
        assert_eq!(screen.build_record().api_version, "3.17");
    }

    #[test]
    fn tab_cycles_through_every_field() {
        let dir = TempDir::new().expect("tempdir");
        let mut screen = screen_in(&dir);
        screen.open_for("Tableau");
        for _ in 0..ConfigureField::ALL.len() {
            screen.focus_next();
        }
        assert_eq!(screen.active_field, ConfigureField::Server);
        screen.focus_prev();
        assert_eq!(screen.active_field, ConfigureField::UploadPath);
    }
}
