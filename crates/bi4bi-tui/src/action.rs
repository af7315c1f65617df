//! Actions flowing through the app's central mpsc channel.
//!
//! Screens never mutate navigation state directly — they emit actions, and
//! the app loop applies them to the state machine in order.

use std::time::{Duration, Instant};

/// Everything the app loop knows how to process.
#[derive(Debug, Clone)]
pub enum Action {
    /// Shut down the application.
    Quit,
    /// Periodic tick (toast expiry, throbber animation).
    Tick,
    /// Redraw the UI.
    Render,
    /// Terminal was resized.
    Resize(u16, u16),
    /// Leave the landing page for the tool grid.
    Begin,
    /// A tool tile was chosen on the grid (tool display name).
    SelectTool(String),
    /// Go back one screen.
    Back,
    /// Jump straight to the landing page.
    GoHome,
    /// The configure screen should load state for this tool.
    OpenConfigure(String),
    /// Result of an async connection test.
    TestResult(Result<(), String>),
    /// Show a toast notification.
    Notify(Notification),
}

/// Severity of a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient toast shown in the corner of the screen.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub created: Instant,
    pub ttl: Duration,
}

impl Notification {
    pub fn new(message: impl Into<String>, level: NotificationLevel) -> Self {
        Self {
            message: message.into(),
            level,
            created: Instant::now(),
            ttl: Duration::from_secs(4),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Error)
    }

    /// Whether the toast has outlived its time-to-live.
    pub fn expired(&self) -> bool {
        self.created.elapsed() >= self.ttl
    }
}
