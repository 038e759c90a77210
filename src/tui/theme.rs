//! Centralized Indigo & Amber color theme for the grantgen TUI.
//!
//! All color constants are RGB truecolor. Views import from here
//! instead of using inline `Color::*` literals.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

// ── Primary palette ─────────────────────────────────────────────────────────

/// Indigo — primary accent, active items, focused borders.
pub const PRIMARY: Color = Color::Rgb(0x5C, 0x6B, 0xC0);
/// Light indigo — highlights, hints, secondary focus.
pub const PRIMARY_LIGHT: Color = Color::Rgb(0x79, 0x86, 0xCB);

// ── Accent ──────────────────────────────────────────────────────────────────

/// Amber — calls to action, the submit hint, selected options.
pub const ACCENT: Color = Color::Rgb(0xFF, 0xB3, 0x00);

// ── Text ────────────────────────────────────────────────────────────────────

/// Primary text.
pub const TEXT: Color = Color::Rgb(0xE0, 0xE0, 0xE0);
/// Muted text — secondary labels, unfocused borders.
pub const TEXT_MUTED: Color = Color::Rgb(0x80, 0x80, 0x80);
/// Dim text — placeholders, disabled items.
pub const TEXT_DIM: Color = Color::Rgb(0x55, 0x55, 0x55);

// ── Semantic ────────────────────────────────────────────────────────────────

/// Error — failures, invalid keys.
pub const ERROR: Color = Color::Rgb(0xEF, 0x53, 0x50);
/// Success — script ready, key saved.
pub const SUCCESS: Color = Color::Rgb(0x66, 0xBB, 0x6A);
/// Warning — in-flight guard, degraded storage.
pub const WARNING: Color = Color::Rgb(0xFF, 0xA7, 0x26);
/// Info — neutral notices.
pub const INFO: Color = Color::Rgb(0x42, 0xA5, 0xF5);

// ── Style helpers ───────────────────────────────────────────────────────────

/// Primary-colored bold text (titles, active items).
pub fn title() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

/// Accent-colored bold text (keybinding hints, selections).
pub fn accent() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn error_text() -> Style {
    Style::default().fg(ERROR)
}

pub fn success_text() -> Style {
    Style::default().fg(SUCCESS)
}

/// Bordered block for the pane that currently has focus.
pub fn block_focused(title_text: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(PRIMARY))
        .title(format!(" {title_text} "))
        .title_style(title())
}

/// Bordered block for panes without focus.
pub fn block_default(title_text: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(TEXT_MUTED))
        .title(format!(" {title_text} "))
        .title_style(muted())
}
