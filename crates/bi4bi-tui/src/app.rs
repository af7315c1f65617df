//! Application core — event loop, screen management, action dispatch.
//!
//! Navigation lives in [`bi4bi_core::NavigationState`]; this file owns the
//! terminal loop, maps key events to actions, and reconciles the deep-link
//! channel at the start of every render cycle.

use std::collections::HashMap;

use bi4bi_api::ReportsClient;
use bi4bi_config::CredentialStore;
use bi4bi_core::{NavigationState, QueryChannel, ScreenId};
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Span,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::action::{Action, Notification, NotificationLevel};
use crate::component::Component;
use crate::event::{Cadence, Event, EventPump};
use crate::screens::{ChooseToolScreen, ConfigureScreen, HomeScreen};
use crate::theme;
use crate::tui::Tui;

/// Top-level application state and event loop.
pub struct App {
    /// Navigation state machine; single source of truth for the screen.
    nav: NavigationState,
    /// Deep-link inbox, drained once per render cycle.
    channel: QueryChannel,
    /// Screen currently holding focus (trails `nav.current()`).
    shown: ScreenId,
    /// All screen components, keyed by ScreenId.
    screens: HashMap<ScreenId, Box<dyn Component>>,
    /// Whether the app should keep running.
    running: bool,
    /// Action sender — components can dispatch actions through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver — main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Active notification toast.
    notification: Option<Notification>,
}

impl App {
    pub fn new(
        nav: NavigationState,
        channel: QueryChannel,
        store: CredentialStore,
        client: ReportsClient,
    ) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let mut screens: HashMap<ScreenId, Box<dyn Component>> = HashMap::new();
        screens.insert(ScreenId::Home, Box::new(HomeScreen::new()));
        screens.insert(ScreenId::ChooseTool, Box::new(ChooseToolScreen::new()));
        screens.insert(
            ScreenId::Configure,
            Box::new(ConfigureScreen::new(store, client)),
        );

        let shown = nav.current();
        Self {
            nav,
            channel,
            shown,
            screens,
            running: true,
            action_tx,
            action_rx,
            notification: None,
        }
    }

    /// Initialize all screen components with the action sender.
    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
            debug!(screen = screen.id(), "mounted");
        }
        if let Some(screen) = self.screens.get_mut(&self.shown) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::enter()?;
        self.init_screens()?;

        // The CLI may have seeded the channel; adopt before the first frame.
        if self.nav.reconcile(&mut self.channel) {
            self.after_transition()?;
        }

        let mut events = EventPump::spawn(Cadence::default());

        info!("wizard event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            // Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        info!("wizard event loop ended");
        Ok(())
    }

    /// Map a key event to an action. The configure screen is a form and
    /// captures every key except Ctrl+C; elsewhere a few globals apply
    /// before delegating to the active screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.shown == ScreenId::Configure {
            if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
                return Ok(Some(Action::Quit));
            }
            if let Some(screen) = self.screens.get_mut(&ScreenId::Configure) {
                return screen.handle_key_event(key);
            }
            return Ok(None);
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::CONTROL, KeyCode::Char('h')) => return Ok(Some(Action::GoHome)),
            _ => {}
        }

        if let Some(screen) = self.screens.get_mut(&self.shown) {
            return screen.handle_key_event(key);
        }
        Ok(None)
    }

    /// Process a single action — update app state and propagate to screens.
    #[allow(clippy::too_many_lines)]
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Resize(..) => {
                // ratatui reflows on the next draw
            }

            Action::Tick => {
                if self
                    .notification
                    .as_ref()
                    .is_some_and(Notification::expired)
                {
                    self.notification = None;
                }
                // Throbber animation on the configure screen
                if self.shown == ScreenId::Configure {
                    if let Some(screen) = self.screens.get_mut(&ScreenId::Configure) {
                        let _ = screen.update(action);
                    }
                }
            }

            // Deep links always win: drain the channel before drawing.
            Action::Render => {
                if self.nav.reconcile(&mut self.channel) {
                    self.after_transition()?;
                }
            }

            // ── Navigation ───────────────────────────────────────────
            Action::Begin => {
                self.nav.begin();
                self.after_transition()?;
            }

            Action::SelectTool(name) => {
                self.nav.select_tool_named(name);
                self.after_transition()?;
            }

            Action::Back => {
                self.nav.back();
                self.after_transition()?;
            }

            Action::GoHome => {
                self.nav.home();
                self.after_transition()?;
            }

            // ── Configure screen pipeline ────────────────────────────
            Action::OpenConfigure(_) | Action::TestResult(_) => {
                if let Some(screen) = self.screens.get_mut(&ScreenId::Configure) {
                    if let Some(follow_up) = screen.update(action)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }

            // ── Notifications ────────────────────────────────────────
            Action::Notify(notification) => {
                self.notification = Some(notification.clone());
            }
        }

        Ok(())
    }

    /// Bookkeeping after any navigation transition: move focus, surface
    /// the one-shot "coming soon" notice, and tell the configure screen
    /// which tool it is editing.
    fn after_transition(&mut self) -> Result<()> {
        let current = self.nav.current();

        if let Some(name) = self.nav.take_notice() {
            self.action_tx.send(Action::Notify(Notification::warning(
                format!("{name} support is coming soon!"),
            )))?;
        }

        if current != self.shown {
            debug!(from = %self.shown, to = %current, "switching screen");
            if let Some(screen) = self.screens.get_mut(&self.shown) {
                screen.set_focused(false);
            }
            self.shown = current;
            if let Some(screen) = self.screens.get_mut(&self.shown) {
                screen.set_focused(true);
            }

            if current == ScreenId::Configure {
                // A deep link can land here without a grid selection;
                // the catalog default covers that case.
                let tool = self
                    .nav
                    .selected_tool()
                    .unwrap_or(bi4bi_core::DEFAULT_TOOL);
                self.action_tx
                    .send(Action::OpenConfigure(tool.to_owned()))?;
            }
        }

        Ok(())
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        if let Some(screen) = self.screens.get(&self.shown) {
            screen.render(frame, area);
        }
        self.render_notification(frame, area);
    }

    /// Toast in the top-right corner.
    fn render_notification(&self, frame: &mut Frame, area: Rect) {
        let Some(ref notification) = self.notification else {
            return;
        };

        let color = match notification.level {
            NotificationLevel::Info => theme::BRAND_YELLOW,
            NotificationLevel::Success => theme::SUCCESS_GREEN,
            NotificationLevel::Warning => theme::WARNING_AMBER,
            NotificationLevel::Error => theme::ERROR_RED,
        };

        let width = (notification.message.chars().count() as u16 + 4)
            .min(area.width.saturating_sub(2));
        let toast = Rect::new(
            area.x + area.width.saturating_sub(width + 1),
            area.y + 1,
            width,
            3,
        );

        frame.render_widget(Clear, toast);
        let block = Block::default()
            .style(Style::default().bg(theme::BG_HIGHLIGHT))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color));
        let inner = block.inner(toast);
        frame.render_widget(block, toast);
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(" {}", notification.message),
                Style::default().fg(color),
            )),
            inner,
        );
    }
}
