//! Color palette and style constants for the receiver screens.

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(14, 18, 32);
pub const C_PRIMARY: Color = Color::Rgb(210, 214, 225);
pub const C_SECONDARY: Color = Color::Rgb(122, 128, 150);
pub const C_MUTED: Color = Color::Rgb(70, 76, 96);
pub const C_ACCENT: Color = Color::Rgb(255, 184, 80);
pub const C_SELECTION_BG: Color = Color::Rgb(34, 44, 72);
pub const C_PANEL_BORDER: Color = Color::Rgb(44, 50, 72);
pub const C_OK: Color = Color::Rgb(80, 200, 120);
pub const C_MARK: Color = Color::Rgb(255, 95, 95);
pub const C_VALUE: Color = Color::Rgb(120, 170, 255);
pub const C_STANDBY: Color = Color::Rgb(120, 30, 30);

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_default() -> Style {
    Style::default().fg(C_PRIMARY)
}

pub fn style_secondary() -> Style {
    Style::default().fg(C_SECONDARY)
}

pub fn style_selected() -> Style {
    Style::default()
        .fg(C_ACCENT)
        .bg(C_SELECTION_BG)
        .add_modifier(Modifier::BOLD)
}
