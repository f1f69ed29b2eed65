//! Color palette and style constants for the tile grid.

use lumina_core::catalog::{Rgb, TextColor, TileCatalogEntry};
use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(18, 18, 18);
pub const C_ERROR: Color = Color::Rgb(255, 80, 80);
pub const C_MUTED: Color = Color::Rgb(72, 72, 88);
pub const C_SECONDARY: Color = Color::Rgb(115, 115, 138);
pub const C_PRIMARY: Color = Color::Rgb(210, 210, 225);
pub const C_PANEL_BORDER: Color = Color::Rgb(40, 40, 52);
pub const C_FOCUS_RING: Color = Color::Rgb(120, 100, 200); // vibrant purple, same as pane focus
pub const C_INPUT_BG: Color = Color::Rgb(20, 20, 32);
pub const C_INPUT_FG: Color = Color::Rgb(255, 200, 80);
pub const C_TOAST_INFO: Color = Color::Rgb(80, 160, 220);
pub const C_TOAST_SUCCESS: Color = Color::Rgb(80, 200, 120);
pub const C_TOAST_WARNING: Color = Color::Rgb(255, 184, 80);
pub const C_TOAST_ERROR: Color = Color::Rgb(255, 95, 95);
pub const C_MODE_GRID: Color = Color::Rgb(115, 115, 138);
pub const C_MODE_SPOTLIGHT: Color = Color::Rgb(180, 120, 220);
pub const C_MODE_CHAT: Color = Color::Rgb(255, 200, 80);
pub const C_USER_BUBBLE: Color = Color::Rgb(80, 160, 220);

/// Contribution heatmap, level 0 through 4.
pub const C_HEAT: [Color; 5] = [
    Color::Rgb(38, 38, 38),
    Color::Rgb(6, 78, 59),
    Color::Rgb(4, 120, 87),
    Color::Rgb(16, 185, 129),
    Color::Rgb(52, 211, 153),
];

// ── Tile colours ──────────────────────────────────────────────────────────────

pub fn rgb(c: Rgb) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

pub fn tile_bg(entry: &TileCatalogEntry) -> Color {
    rgb(entry.background())
}

pub fn tile_fg(entry: &TileCatalogEntry) -> Color {
    match entry.text_color {
        TextColor::White => Color::Rgb(255, 255, 255),
        TextColor::Black => Color::Rgb(0, 0, 0),
    }
}

/// Foreground at reduced emphasis, blended halfway toward the background.
pub fn tile_fg_dim(entry: &TileCatalogEntry) -> Color {
    let Rgb(br, bg, bb) = entry.background();
    let (fr, fg, fb) = match entry.text_color {
        TextColor::White => (255u16, 255u16, 255u16),
        TextColor::Black => (0, 0, 0),
    };
    let mix = |f: u16, b: u8| ((f + u16::from(b)) / 2) as u8;
    Color::Rgb(mix(fr, br), mix(fg, bg), mix(fb, bb))
}

pub fn style_tile(entry: &TileCatalogEntry) -> Style {
    Style::default().bg(tile_bg(entry)).fg(tile_fg(entry))
}

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}

pub fn style_focus_ring() -> Style {
    Style::default().fg(C_FOCUS_RING).add_modifier(Modifier::BOLD)
}

pub fn style_input() -> Style {
    Style::default().fg(C_INPUT_FG).bg(C_INPUT_BG)
}

pub fn style_error() -> Style {
    Style::default().fg(C_ERROR).add_modifier(Modifier::BOLD)
}
