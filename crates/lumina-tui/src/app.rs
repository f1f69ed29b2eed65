//! App: component-based event loop.
//!
//! Architecture:
//! - `App` owns all components and `AppState` (shared read-only data for components).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from the terminal
//!   reader and from chat streaming tasks.
//! - The event loop draws each frame, then awaits the next message.
//! - Components return `Vec<Action>`; App dispatches each Action.
//! - The `Spotlight` is the only writer of the selection; `AppState.selected`
//!   mirrors it after every transition.

use std::collections::VecDeque;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use lumina_core::chat::{ChatBackend, ChatError, SendRejected};
use lumina_core::config::UiConfig;
use lumina_core::spotlight::{Activation, Spotlight, Transition};
use lumina_core::tile::ContentRegion;

use crate::{
    action::{Action, Heading},
    app_state::AppState,
    component::Component,
    components::{chat_panel::ChatPanel, help_overlay::HelpOverlay, tile_grid::TileGrid},
    focus::FocusRing,
    theme::C_BG,
    widgets::{
        status_bar::{self, InputMode},
        toast::ToastManager,
    },
};

/// Follow-up actions one dispatch may spawn before it is cut off.
const MAX_CASCADE: usize = 32;

/// Everything that wakes the event loop.
#[derive(Debug)]
pub enum AppMessage {
    Event(Event),
    ChatChunk { instance: u64, text: String },
    ChatDone { instance: u64, result: Result<(), ChatError> },
}

pub struct App {
    state: AppState,
    spotlight: Spotlight,
    focus: FocusRing,

    // ── Components ────────────────────────────────────────────────────────────
    tile_grid: TileGrid,
    chat_panel: ChatPanel,
    help_overlay: HelpOverlay,

    // ── Chat plumbing ─────────────────────────────────────────────────────────
    backend: Option<Arc<dyn ChatBackend>>,
    msg_tx: Option<mpsc::UnboundedSender<AppMessage>>,

    // ── UI ────────────────────────────────────────────────────────────────────
    toast: ToastManager,
    show_keys_bar: bool,
    frame_tick: Duration,
    /// Last-drawn grid area, used for mouse hit-testing.
    grid_area: Rect,

    /// Whether to quit on next iteration.
    should_quit: bool,
}

impl App {
    pub fn new(
        state: AppState,
        backend: Option<Arc<dyn ChatBackend>>,
        ui: &UiConfig,
        startup_warnings: Vec<String>,
    ) -> Self {
        let mut focus = FocusRing::new(state.catalog.ids());
        if let Some(id) = &state.focused {
            focus.set(id.as_str());
        }
        let mut toast = ToastManager::new();
        for w in startup_warnings {
            toast.warning(w);
        }
        if backend.is_none() {
            toast.info("chat offline: no API key");
        }
        Self {
            state,
            spotlight: Spotlight::new(),
            focus,
            tile_grid: TileGrid::new(Duration::from_millis(ui.animation_ms)),
            chat_panel: ChatPanel::new(),
            help_overlay: HelpOverlay::new(),
            backend,
            msg_tx: None,
            toast,
            show_keys_bar: ui.show_keys_bar,
            frame_tick: Duration::from_millis(ui.tick_ms.max(1)),
            grid_area: Rect::default(),
            should_quit: false,
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let (tx, mut rx) = mpsc::unbounded_channel::<AppMessage>();
        self.msg_tx = Some(tx.clone());

        // ── Background task: keyboard/mouse events ────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::poll(Duration::from_millis(250)) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if event_tx.send(AppMessage::Event(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                },
                // Stop once the loop has gone away.
                Ok(false) if event_tx.is_closed() => break,
                Ok(false) => {}
                Err(_) => break,
            }
        });
        drop(tx);

        // ── Periodic timers ───────────────────────────────────────────────────
        // Layout animation frames; only redraws while tiles are moving.
        let mut frame_tick = tokio::time::interval(self.frame_tick);
        frame_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // Toast expiry check.
        let mut toast_tick = tokio::time::interval(Duration::from_millis(100));
        toast_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        info!("lumina started");

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    const MAX_DRAIN: usize = 256;
                    let mut redraw = self.handle_message(msg);
                    let mut drained = 0usize;
                    while drained < MAX_DRAIN {
                        let Ok(next) = rx.try_recv() else {
                            break;
                        };
                        drained += 1;
                        redraw |= self.handle_message(next);
                    }
                    needs_redraw = redraw;
                }

                _ = frame_tick.tick() => {
                    let tick_actions: Vec<Action> = {
                        let s = &self.state;
                        let mut all = Vec::new();
                        all.extend(self.tile_grid.tick(s));
                        all.extend(self.chat_panel.tick(s));
                        all
                    };
                    for action in tick_actions {
                        self.dispatch(action);
                    }
                    needs_redraw = self.tile_grid.is_animating();
                }

                _ = toast_tick.tick() => {
                    needs_redraw = self.toast.tick();
                }
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        self.msg_tx = None;
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        info!("lumina stopped");

        Ok(())
    }

    /// Returns true when the screen needs repainting.
    fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                if key.kind == KeyEventKind::Release {
                    return false;
                }
                for action in self.handle_key(key) {
                    self.dispatch(action);
                }
                true
            }
            AppMessage::Event(Event::Mouse(mouse)) => {
                let actions = self.handle_mouse(mouse);
                let redraw = !actions.is_empty();
                for action in actions {
                    self.dispatch(action);
                }
                redraw
            }
            AppMessage::Event(Event::Resize(w, h)) => {
                self.dispatch(Action::Resize(w, h));
                true
            }
            AppMessage::Event(_) => false,
            AppMessage::ChatChunk { instance, text } => self.chat_panel.apply_chunk(instance, &text),
            AppMessage::ChatDone { instance, result } => {
                if let Err(e) = &result {
                    warn!("chat: reply failed: {}", e);
                }
                self.chat_panel.finish(instance, result.is_ok())
            }
        }
    }

    // ── Input routing ─────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        let normal = self.state.input_mode == InputMode::Normal;

        // Global keys
        match key.code {
            KeyCode::Char('c') if key.modifiers == KeyModifiers::CONTROL => {
                return vec![Action::Quit];
            }
            KeyCode::Char('q') if key.modifiers == KeyModifiers::NONE && normal && !self.help_overlay.visible => {
                return vec![Action::Quit];
            }
            KeyCode::Char('?') if normal && !self.help_overlay.visible => {
                return vec![Action::ToggleHelp];
            }
            KeyCode::Char('K') if normal => {
                return vec![Action::ToggleKeys];
            }
            _ => {}
        }

        // Help overlay captures all keys when visible
        if self.help_overlay.visible {
            return self.help_overlay.handle_key(key, &self.state);
        }

        if !normal {
            return self.chat_panel.handle_key(key, &self.state);
        }

        let local = self.tile_grid.handle_key(key, &self.state);
        if !local.is_empty() {
            return local;
        }

        match key.code {
            KeyCode::Tab => vec![Action::FocusNext],
            KeyCode::BackTab => vec![Action::FocusPrev],
            KeyCode::Left | KeyCode::Char('h') => vec![Action::FocusToward(Heading::Left)],
            KeyCode::Right | KeyCode::Char('l') => vec![Action::FocusToward(Heading::Right)],
            KeyCode::Up | KeyCode::Char('k') => vec![Action::FocusToward(Heading::Up)],
            KeyCode::Down | KeyCode::Char('j') => vec![Action::FocusToward(Heading::Down)],
            KeyCode::Enter | KeyCode::Char(' ') => match self.focus.current() {
                Some(id) => vec![Action::Activate(id.clone())],
                None => vec![],
            },
            KeyCode::Esc | KeyCode::Char('x') => vec![Action::CloseSpotlight],
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        if self.help_overlay.visible {
            return vec![];
        }
        let mut actions = self.tile_grid.handle_mouse(event, self.grid_area, &self.state);
        if self.state.input_mode == InputMode::Chat
            && !actions.is_empty()
            && !actions.iter().any(|a| matches!(a, Action::EnterChatInput))
        {
            actions.insert(0, Action::LeaveChatInput);
        }
        actions
    }

    // ── Action dispatcher ─────────────────────────────────────────────────────

    /// Apply `action` at the app level, then let every component react.
    /// Follow-ups run breadth-first.
    fn dispatch(&mut self, action: Action) {
        let mut queue = VecDeque::from([action]);
        let mut handled = 0usize;
        while let Some(action) = queue.pop_front() {
            handled += 1;
            if handled > MAX_CASCADE {
                warn!("dispatch: dropping {} queued actions after {:?}", queue.len() + 1, action);
                break;
            }
            queue.extend(self.apply_action(&action));
            let s = &self.state;
            queue.extend(self.tile_grid.on_action(&action, s));
            queue.extend(self.chat_panel.on_action(&action, s));
            queue.extend(self.help_overlay.on_action(&action, s));
        }
    }

    fn apply_action(&mut self, action: &Action) -> Vec<Action> {
        debug!("apply_action: {:?}", action);
        match action {
            // ── Navigation ────────────────────────────────────────────────────
            Action::FocusNext => {
                self.focus.next();
                self.sync_focus();
            }
            Action::FocusPrev => {
                self.focus.prev();
                self.sync_focus();
            }
            Action::FocusTile(id) => {
                self.focus.set(id.as_str());
                self.sync_focus();
            }
            Action::FocusToward(heading) => {
                self.focus.toward(*heading, &self.state.grid);
                self.sync_focus();
            }

            // ── Spotlight ─────────────────────────────────────────────────────
            Action::Activate(id) => {
                let Some(entry) = self.state.catalog.get(id.as_str()) else {
                    warn!("activate: unknown tile {}", id);
                    return vec![];
                };
                match self.spotlight.activate(entry) {
                    Activation::Transition(t) => return self.on_transition(t),
                    Activation::Local(id) => {
                        let region = ContentRegion::for_entry(entry);
                        let len = region.carousel_len();
                        let acted = self
                            .state
                            .tile_states
                            .entry(id.clone())
                            .or_default()
                            .local_action(region, len);
                        debug!(tile = %id, acted, "activate: local");
                    }
                    Activation::Ignored => {}
                }
            }
            Action::CloseSpotlight => {
                if let Some(t) = self.spotlight.close() {
                    return self.on_transition(t);
                }
            }
            Action::HeaderClick(id) => {
                if let Some(t) = self.spotlight.header_click(id.as_str()) {
                    return self.on_transition(t);
                }
            }
            Action::LayoutChanged => {}

            // ── Tile regions ──────────────────────────────────────────────────
            Action::StepCarousel(id, delta) => {
                let len = self
                    .state
                    .entry(id.as_str())
                    .map_or(0, |e| ContentRegion::for_entry(e).carousel_len());
                self.state
                    .tile_states
                    .entry(id.clone())
                    .or_default()
                    .step(*delta, len);
            }

            // ── Chat ──────────────────────────────────────────────────────────
            Action::EnterChatInput => {
                let chat_open = matches!(self.state.open_region(), Some((_, ContentRegion::Chat)));
                if chat_open && self.state.chat_available {
                    self.state.input_mode = InputMode::Chat;
                    if let Some(id) = self.state.selected.clone() {
                        self.focus.set(id.as_str());
                        self.sync_focus();
                    }
                }
            }
            Action::LeaveChatInput => {
                self.state.input_mode = InputMode::Normal;
            }
            Action::SendChat(text) => self.send_chat(text),

            // ── UI toggles ────────────────────────────────────────────────────
            Action::ToggleHelp => {}
            Action::ToggleKeys => {
                self.show_keys_bar = !self.show_keys_bar;
            }
            Action::CopyToClipboard(text) => {
                match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.clone())) {
                    Ok(()) => {
                        // Truncate for toast display
                        let display = if text.chars().count() > 40 {
                            format!("{}…", text.chars().take(40).collect::<String>())
                        } else {
                            text.clone()
                        };
                        self.toast.success(format!("copied: {}", display));
                    }
                    Err(e) => {
                        warn!("clipboard error: {}", e);
                        self.toast.error(format!("clipboard error: {}", e));
                    }
                }
            }

            // ── System ────────────────────────────────────────────────────────
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Resize(..) => {}
        }
        vec![]
    }

    /// Bring AppState in line with a spotlight transition and repack.
    fn on_transition(&mut self, transition: Transition) -> Vec<Action> {
        info!("spotlight: {:?}", transition);
        match &transition {
            Transition::Opened(_) => {}
            Transition::Switched { from: prev, .. } | Transition::Closed(prev) => {
                if let Some(ts) = self.state.tile_states.get_mut(prev) {
                    ts.reset();
                }
                self.state.input_mode = InputMode::Normal;
            }
        }
        self.state.selected = self.spotlight.selected().cloned();
        if let Some(id) = self.state.selected.clone() {
            self.focus.set(id.as_str());
            self.sync_focus();
        }
        self.state.relayout();
        vec![Action::LayoutChanged]
    }

    fn sync_focus(&mut self) {
        self.state.focused = self.focus.current().cloned();
    }

    fn send_chat(&mut self, text: &str) {
        let pending = match self.chat_panel.begin_send(text) {
            Ok(p) => p,
            Err(SendRejected::Empty) => return,
            Err(SendRejected::InFlight) => {
                self.toast.info("still answering…");
                return;
            }
            Err(SendRejected::Unavailable) => {
                self.toast.warning("chat unavailable");
                return;
            }
        };
        let (Some(backend), Some(tx)) = (self.backend.clone(), self.msg_tx.clone()) else {
            self.chat_panel.finish(pending.instance, false);
            return;
        };

        let instance = pending.instance;
        debug!(instance, turns = pending.history.len(), "chat: sending");
        tokio::spawn(async move {
            let chunk_tx = tx.clone();
            let mut on_chunk = move |text: &str| {
                let _ = chunk_tx.send(AppMessage::ChatChunk {
                    instance,
                    text: text.to_string(),
                });
            };
            let result = backend
                .stream_reply(&pending.history, &pending.message, &mut on_chunk)
                .await;
            let _ = tx.send(AppMessage::ChatDone { instance, result });
        });
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        let area = frame.area();

        // Fill the entire terminal with the base background colour so the
        // gaps between tiles stay dark.
        frame.render_widget(Block::default().style(Style::default().bg(C_BG)), area);

        let status_h = if self.show_keys_bar { 1u16 } else { 0 };
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(status_h)])
            .split(area);
        let grid_area = outer[0];
        let status_area = outer[1];

        // ── Tiles ─────────────────────────────────────────────────────────────
        self.grid_area = grid_area;
        self.tile_grid.draw(frame, grid_area, true, &self.state);

        // ── Chat region (inside the open chat tile) ───────────────────────────
        if let (Some(body), Some((_, ContentRegion::Chat))) =
            (self.tile_grid.open_body(), self.state.open_region())
        {
            let typing = self.state.input_mode == InputMode::Chat;
            self.chat_panel.draw(frame, body, typing, &self.state);
        }

        // ── Status bar ────────────────────────────────────────────────────────
        if self.show_keys_bar {
            status_bar::draw_keys_bar(
                frame,
                status_area,
                self.state.input_mode,
                self.spotlight.is_active(),
            );
        }

        // ── Help overlay (on top of everything) ──────────────────────────────
        self.help_overlay.draw(frame, area, false, &self.state);

        // ── Toast notifications (topmost layer) ──────────────────────────────
        self.toast.draw(frame, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumina_core::catalog::{Catalog, TileId};
    use lumina_core::contributions::ContributionCalendar;
    use lumina_core::grid::GridSpec;
    use lumina_core::layout::LayoutConfig;

    fn app(chat_available: bool) -> App {
        let state = AppState::new(
            Catalog::builtin(),
            LayoutConfig::builtin(),
            GridSpec::default(),
            1,
            chat_available,
            ContributionCalendar::mock("tester"),
        );
        App::new(state, None, &UiConfig::default(), Vec::new())
    }

    fn id(s: &str) -> TileId {
        TileId::new(s)
    }

    #[test]
    fn activate_opens_switches_and_closes() {
        let mut app = app(false);
        app.dispatch(Action::Activate(id("intro")));
        assert_eq!(app.state.selected, Some(id("intro")));
        assert!(app.state.resolved.get("intro").is_some());

        app.dispatch(Action::Activate(id("projects")));
        assert_eq!(app.state.selected, Some(id("projects")));
        assert_eq!(app.state.focused, Some(id("projects")));

        app.dispatch(Action::CloseSpotlight);
        assert_eq!(app.state.selected, None);
    }

    #[test]
    fn header_click_only_closes_the_open_tile() {
        let mut app = app(false);
        app.dispatch(Action::Activate(id("intro")));
        app.dispatch(Action::HeaderClick(id("projects")));
        assert_eq!(app.state.selected, Some(id("intro")));
        app.dispatch(Action::HeaderClick(id("intro")));
        assert_eq!(app.state.selected, None);
    }

    #[test]
    fn carousel_resets_when_its_tile_closes() {
        let mut app = app(false);
        app.dispatch(Action::Activate(id("projects")));
        app.dispatch(Action::StepCarousel(id("projects"), 2));
        assert_eq!(app.state.carousel("projects"), 2);
        app.dispatch(Action::Activate(id("intro")));
        assert_eq!(app.state.carousel("projects"), 0);
    }

    #[test]
    fn chat_tile_mounts_a_session_but_offline_chat_keeps_normal_mode() {
        let mut app = app(false);
        app.dispatch(Action::Activate(id("ai-chat")));
        assert!(app.chat_panel.is_mounted());
        assert_eq!(app.state.input_mode, InputMode::Normal);
        app.dispatch(Action::EnterChatInput);
        assert_eq!(app.state.input_mode, InputMode::Normal);
        app.dispatch(Action::CloseSpotlight);
        assert!(!app.chat_panel.is_mounted());
    }

    #[test]
    fn opening_chat_enters_input_mode_when_available() {
        let mut app = app(true);
        app.dispatch(Action::Activate(id("ai-chat")));
        assert_eq!(app.state.input_mode, InputMode::Chat);
        app.dispatch(Action::Activate(id("intro")));
        assert_eq!(app.state.input_mode, InputMode::Normal);
        assert!(!app.chat_panel.is_mounted());
    }

    #[test]
    fn toggles_flip_ui_state() {
        let mut app = app(false);
        let keys = app.show_keys_bar;
        app.dispatch(Action::ToggleKeys);
        assert_eq!(app.show_keys_bar, !keys);
        app.dispatch(Action::ToggleHelp);
        assert!(app.help_overlay.visible);
        app.dispatch(Action::Quit);
        assert!(app.should_quit);
    }
}
