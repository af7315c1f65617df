//! Brand palette and semantic styling for the wizard.

use ratatui::style::{Color, Modifier, Style};

// ── Core Palette ──────────────────────────────────────────────────────

pub const BRAND_YELLOW: Color = Color::Rgb(255, 209, 0); // #ffd100
pub const BRAND_YELLOW_DIM: Color = Color::Rgb(255, 192, 0); // #ffc000
pub const INK: Color = Color::Rgb(26, 26, 26); // #1a1a1a
pub const SUCCESS_GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const ERROR_RED: Color = Color::Rgb(255, 99, 99); // #ff6363
pub const WARNING_AMBER: Color = Color::Rgb(241, 250, 140); // #f1fa8c

// ── Extended Palette ──────────────────────────────────────────────────

pub const DIM_WHITE: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const BORDER_GRAY: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const BG_DARK: Color = Color::Rgb(30, 31, 41); // #1e1f29
pub const BG_HIGHLIGHT: Color = Color::Rgb(40, 42, 54); // #282a36

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default()
        .fg(BRAND_YELLOW)
        .add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(BRAND_YELLOW)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// The selected tile on the tool grid.
pub fn grid_selected() -> Style {
    Style::default()
        .fg(INK)
        .bg(BRAND_YELLOW)
        .add_modifier(Modifier::BOLD)
}

/// An unselected tile on the tool grid.
pub fn grid_tile() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Keyboard hint text in the status line.
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// The key part of a "key action" hint pair.
pub fn key_hint_key() -> Style {
    Style::default()
        .fg(BRAND_YELLOW_DIM)
        .add_modifier(Modifier::BOLD)
}

/// Form field label.
pub fn field_label(active: bool) -> Style {
    if active {
        Style::default().fg(BRAND_YELLOW)
    } else {
        Style::default().fg(DIM_WHITE)
    }
}

/// Form field border.
pub fn field_border(active: bool) -> Style {
    if active {
        Style::default().fg(BRAND_YELLOW)
    } else {
        Style::default().fg(BORDER_GRAY)
    }
}
