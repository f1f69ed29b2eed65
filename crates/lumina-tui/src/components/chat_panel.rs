//! ChatPanel component: the chat region of the open chat tile.
//!
//! A session is mounted when the chat tile opens and dropped when it closes.
//! Each mount gets a fresh instance number; stream output tagged with any
//! other number belongs to a disposed transcript and is ignored.

use lumina_core::chat::{ChatSession, ChatTurn, Role, SendRejected, UNAVAILABLE};
use lumina_core::tile::ContentRegion;
use ratatui::crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use tracing::debug;
use unicode_width::UnicodeWidthStr;

use crate::action::{Action, ComponentId};
use crate::app_state::AppState;
use crate::component::Component;
use crate::theme::{style_error, style_muted, C_PRIMARY, C_USER_BUBBLE};
use crate::widgets::chat_input::{ChatInput, InputAction};

/// Everything a background task needs to run one reply.
pub struct PendingSend {
    pub instance: u64,
    pub history: Vec<ChatTurn>,
    pub message: String,
}

struct Mounted {
    instance: u64,
    session: ChatSession,
}

pub struct ChatPanel {
    mounted: Option<Mounted>,
    next_instance: u64,
    input: ChatInput,
}

impl ChatPanel {
    pub fn new() -> Self {
        Self {
            mounted: None,
            next_instance: 1,
            input: ChatInput::default(),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    fn mount(&mut self, available: bool) {
        let instance = self.next_instance;
        self.next_instance += 1;
        debug!(instance, "chat: mount");
        self.mounted = Some(Mounted {
            instance,
            session: ChatSession::new(available),
        });
        self.input.clear();
    }

    fn unmount(&mut self) {
        if let Some(m) = self.mounted.take() {
            debug!(instance = m.instance, in_flight = m.session.is_in_flight(), "chat: unmount");
        }
        self.input.clear();
    }

    /// Start a send on the mounted session.
    pub fn begin_send(&mut self, text: &str) -> Result<PendingSend, SendRejected> {
        let m = self.mounted.as_mut().ok_or(SendRejected::Unavailable)?;
        let history = m.session.begin(text)?;
        self.input.clear();
        Ok(PendingSend {
            instance: m.instance,
            history,
            message: text.trim().to_string(),
        })
    }

    fn live(&mut self, instance: u64) -> Option<&mut ChatSession> {
        match self.mounted.as_mut() {
            Some(m) if m.instance == instance => Some(&mut m.session),
            _ => {
                debug!(instance, "chat: dropping output for disposed instance");
                None
            }
        }
    }

    /// Returns true when the chunk landed in a live transcript.
    pub fn apply_chunk(&mut self, instance: u64, text: &str) -> bool {
        self.live(instance)
            .map(|s| s.apply_chunk(text))
            .is_some()
    }

    pub fn finish(&mut self, instance: u64, ok: bool) -> bool {
        self.live(instance)
            .map(|s| if ok { s.finish() } else { s.fail() })
            .is_some()
    }

    fn transcript_lines(session: &ChatSession) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for msg in session.messages() {
            let line = match (msg.role, msg.is_error) {
                (_, true) => Line::from(vec![
                    Span::styled("⚠ ", style_error()),
                    Span::styled(msg.text.clone(), style_error()),
                ]),
                (Role::User, _) => Line::from(Span::styled(
                    msg.text.clone(),
                    Style::default().fg(C_USER_BUBBLE).add_modifier(Modifier::BOLD),
                ))
                .right_aligned(),
                (Role::Model, _) if msg.text.is_empty() => {
                    Line::from(Span::styled("…", style_muted()))
                }
                (Role::Model, _) => Line::from(Span::styled(
                    msg.text.clone(),
                    Style::default().fg(C_PRIMARY),
                )),
            };
            lines.push(line);
            lines.push(Line::from(""));
        }
        lines
    }
}

/// Rows `lines` occupy once wrapped to `width`.
fn wrapped_height(lines: &[Line], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    lines
        .iter()
        .map(|l| {
            let w: usize = l.spans.iter().map(|s| s.content.width()).sum();
            w.div_ceil(width).max(1)
        })
        .sum::<usize>()
        .min(usize::from(u16::MAX)) as u16
}

impl Default for ChatPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ChatPanel {
    fn id(&self) -> ComponentId {
        ComponentId::ChatPanel
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        match key.code {
            KeyCode::Esc => vec![Action::LeaveChatInput, Action::CloseSpotlight],
            KeyCode::Tab | KeyCode::BackTab => vec![Action::LeaveChatInput],
            _ => match self.input.handle_key(key) {
                InputAction::Submitted(text) if state.chat_available => vec![Action::SendChat(text)],
                InputAction::Submitted(_) | InputAction::Changed | InputAction::None => vec![],
            },
        }
    }

    /// Clicks on the chat body are routed by TileGrid.
    fn handle_mouse(&mut self, _event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn on_action(&mut self, action: &Action, state: &AppState) -> Vec<Action> {
        if let Action::LayoutChanged = action {
            let chat_open = matches!(state.open_region(), Some((_, ContentRegion::Chat)));
            match (chat_open, self.is_mounted()) {
                (true, false) => {
                    self.mount(state.chat_available);
                    if state.chat_available {
                        return vec![Action::EnterChatInput];
                    }
                }
                (false, true) => self.unmount(),
                _ => {}
            }
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, _state: &AppState) {
        let Some(m) = self.mounted.as_ref() else {
            return;
        };
        if area.height < 3 || area.width < 4 {
            return;
        }

        if !m.session.is_available() {
            let lines = vec![
                Line::from(Span::styled("⚠ chat unavailable", style_error())),
                Line::from(""),
                Line::from(Span::styled(UNAVAILABLE, style_muted())),
            ];
            frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let lines = Self::transcript_lines(&m.session);
        let height = wrapped_height(&lines, chunks[0].width);
        let scroll = height.saturating_sub(chunks[0].height);
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .scroll((scroll, 0)),
            chunks[0],
        );

        let status = if m.session.is_in_flight() {
            Span::styled("thinking…", style_muted())
        } else if focused {
            Span::styled("Enter send · Tab leave", style_muted())
        } else {
            Span::styled("Enter or click to type", style_muted())
        };
        frame.render_widget(Paragraph::new(Line::from(status)), chunks[1]);

        self.input.draw(frame, chunks[2], focused, !m.session.is_in_flight());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_instances_are_ignored() {
        let mut panel = ChatPanel::new();
        panel.mount(true);
        let first = panel.begin_send("Hello").unwrap();
        assert!(panel.apply_chunk(first.instance, "Hi"));

        // Close and reopen: the old stream keeps talking to a dead transcript.
        panel.unmount();
        panel.mount(true);
        assert!(!panel.apply_chunk(first.instance, " there"));
        assert!(!panel.finish(first.instance, true));

        let m = panel.mounted.as_ref().unwrap();
        assert_eq!(m.session.messages().len(), 1);
        assert_ne!(m.instance, first.instance);
    }

    #[test]
    fn send_clears_input_only_when_accepted() {
        let mut panel = ChatPanel::new();
        assert_eq!(panel.begin_send("hi").err(), Some(SendRejected::Unavailable));
        panel.mount(true);
        let pending = panel.begin_send("  hi ").unwrap();
        assert_eq!(pending.message, "hi");
        assert_eq!(pending.history.len(), 1);
        assert_eq!(panel.begin_send("again").err(), Some(SendRejected::InFlight));
        assert!(panel.finish(pending.instance, false));
        let last = panel.mounted.as_ref().unwrap().session.messages().last().cloned().unwrap();
        assert!(last.is_error);
    }

    #[test]
    fn wrapped_height_counts_rows() {
        let lines = vec![Line::from("abcdef"), Line::from(""), Line::from("abc")];
        assert_eq!(wrapped_height(&lines, 4), 2 + 1 + 1);
    }
}
