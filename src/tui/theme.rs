//! Color theme for the LaunchDeck TUI.
//!
//! All color constants are RGB truecolor. Views import from here
//! instead of using inline `Color::*` literals.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

// ── Primary palette ─────────────────────────────────────────────────────────

/// Indigo: focused borders, selected rows, progress.
pub const PRIMARY: Color = Color::Rgb(0x5C, 0x6B, 0xC0);
/// Periwinkle: highlights and key hints.
pub const PRIMARY_LIGHT: Color = Color::Rgb(0x8C, 0x9E, 0xFF);
/// Deep indigo: selection background.
pub const PRIMARY_DARK: Color = Color::Rgb(0x28, 0x35, 0x93);

// ── Accent ──────────────────────────────────────────────────────────────────

/// Amber: the launch badge and modal borders.
pub const ACCENT: Color = Color::Rgb(0xFF, 0xB3, 0x00);

// ── Backgrounds ─────────────────────────────────────────────────────────────

pub const BG_BASE: Color = Color::Rgb(0x12, 0x14, 0x1F);
/// Header and tray background.
pub const BG_SURFACE: Color = Color::Rgb(0x1C, 0x1F, 0x30);

// ── Text ────────────────────────────────────────────────────────────────────

pub const TEXT: Color = Color::Rgb(0xE0, 0xE0, 0xE0);
/// Muted text: secondary labels, borders.
pub const TEXT_MUTED: Color = Color::Rgb(0x80, 0x80, 0x80);
/// Dim text: disabled items, faint hints.
pub const TEXT_DIM: Color = Color::Rgb(0x50, 0x50, 0x50);

// ── Semantic ────────────────────────────────────────────────────────────────

/// Error: destructive actions, failures.
pub const ERROR: Color = Color::Rgb(0xEF, 0x53, 0x50);
/// Success: confirmations, healthy status.
pub const SUCCESS: Color = Color::Rgb(0x66, 0xBB, 0x6A);
/// Warning: alerts, degraded status.
pub const WARNING: Color = Color::Rgb(0xFF, 0xA7, 0x26);
/// Info: informational highlights.
pub const INFO: Color = Color::Rgb(0x42, 0xA5, 0xF5);

// ── Domain ──────────────────────────────────────────────────────────────────

/// User chat bubbles.
pub const USER: Color = Color::Rgb(0x4D, 0xD0, 0xE1);
/// Assistant chat bubbles.
pub const ASSISTANT: Color = Color::Rgb(0xCE, 0x93, 0xD8);

// ── Style helpers ───────────────────────────────────────────────────────────

/// Bold accent text for modal titles and group headers.
pub fn title() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Section header style.
pub fn heading() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

/// Focused border style.
pub fn border_focused() -> Style {
    Style::default().fg(PRIMARY)
}

/// Unfocused border style.
pub fn border_default() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Highlighted/selected item.
pub fn highlight() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Muted label text.
pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

/// Dim text for disabled/faint items.
pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// The key half of a hint like `Enter:open`.
pub fn key_hint() -> Style {
    Style::default().fg(PRIMARY_LIGHT)
}

/// Inline validation or request error.
pub fn error() -> Style {
    Style::default().fg(ERROR)
}

/// Selected list row.
pub fn selected() -> Style {
    Style::default().fg(TEXT).bg(PRIMARY_DARK).add_modifier(Modifier::BOLD)
}

/// Filled progress segment.
pub fn progress_filled() -> Style {
    Style::default().fg(PRIMARY_LIGHT)
}

/// Empty progress segment.
pub fn progress_empty() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn user_label() -> Style {
    Style::default().fg(USER).add_modifier(Modifier::BOLD)
}

pub fn assistant_label() -> Style {
    Style::default().fg(ASSISTANT).add_modifier(Modifier::BOLD)
}

/// Status bar brand badge.
pub fn brand_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

// ── Block builders ──────────────────────────────────────────────────────────

/// A bordered block with focused styling.
pub fn block_focused(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_focused())
}
