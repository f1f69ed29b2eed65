//! ChatInput: wraps tui-input for the chat region's message box.

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::theme::{style_input, C_INPUT_BG, C_MUTED};

pub enum InputAction {
    Submitted(String),
    Changed,
    None,
}

pub struct ChatInput {
    input: Input,
    placeholder: String,
}

impl ChatInput {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            input: Input::default(),
            placeholder: placeholder.into(),
        }
    }

    pub fn clear(&mut self) {
        self.input = Input::default();
    }

    /// Handle a key event. Enter hands the text over without clearing it;
    /// the caller clears once the send is accepted.
    pub fn handle_key(&mut self, key: KeyEvent) -> InputAction {
        match key.code {
            KeyCode::Enter => InputAction::Submitted(self.input.value().to_string()),
            _ => match self.input.handle_event(&Event::Key(key)) {
                Some(_) => InputAction::Changed,
                None => InputAction::None,
            },
        }
    }

    /// Render the input line into `area`. `active` shows the cursor;
    /// `enabled` false dims the prompt (send not possible right now).
    pub fn draw(&self, frame: &mut Frame, area: Rect, active: bool, enabled: bool) {
        if area.width < 3 || area.height == 0 {
            return;
        }
        let prompt = if enabled { "› " } else { "… " };
        let scroll = self
            .input
            .visual_scroll(area.width.saturating_sub(3) as usize);
        let value = self.input.value();
        let body = if value.is_empty() {
            Span::styled(self.placeholder.as_str(), Style::default().fg(C_MUTED))
        } else {
            let shown: String = value.chars().skip(scroll).collect();
            Span::styled(shown, style_input())
        };

        let paragraph = Paragraph::new(Line::from(vec![
            Span::styled(prompt, style_input()),
            body,
        ]))
        .style(Style::default().bg(C_INPUT_BG));
        frame.render_widget(paragraph, area);

        if active {
            let cursor_x = area.x + 2 + self.input.visual_cursor().saturating_sub(scroll) as u16;
            frame.set_cursor_position((cursor_x.min(area.x + area.width - 1), area.y));
        }
    }
}

impl Default for ChatInput {
    fn default() -> Self {
        Self::new("Ask me anything...")
    }
}
