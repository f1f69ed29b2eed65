//! Status bar: bottom line with mode and keybindings.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{C_MODE_CHAT, C_MODE_GRID, C_MODE_SPOTLIGHT, C_MUTED};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    /// Keys go to the chat input.
    Chat,
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, mode: InputMode, spotlight: bool) {
    let (label, color): (&str, Color) = match (mode, spotlight) {
        (InputMode::Chat, _) => ("CHAT", C_MODE_CHAT),
        (InputMode::Normal, true) => ("SPOTLIGHT", C_MODE_SPOTLIGHT),
        (InputMode::Normal, false) => ("GRID", C_MODE_GRID),
    };

    let keys = match (mode, spotlight) {
        (InputMode::Chat, _) => " type message  Enter send  Tab leave input  Esc close tile",
        (InputMode::Normal, true) => {
            " ←→↑↓/hjkl move  ←→ browse (gallery, projects, blog)  Enter open  y copy email  Esc/x close  ? help  q quit"
        }
        (InputMode::Normal, false) => {
            " ←→↑↓/hjkl move  Tab next  Enter open  K keys  ? help  q quit"
        }
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", label),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(keys, Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
