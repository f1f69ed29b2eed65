//! Action enum: all user-initiated intents and internal events.

use lumina_core::catalog::TileId;

/// Unique identifier for a component that receives input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    TileGrid,
    ChatPanel,
    HelpOverlay,
}

/// Direction for geometric focus moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Left,
    Right,
    Up,
    Down,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Navigation ───────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    FocusTile(TileId),
    FocusToward(Heading),

    // ── Spotlight ────────────────────────────────────────────────────────────
    Activate(TileId),
    CloseSpotlight,
    HeaderClick(TileId),
    /// Emitted after every real spotlight transition, once the grid is repacked.
    LayoutChanged,

    // ── Tile regions ─────────────────────────────────────────────────────────
    StepCarousel(TileId, isize),

    // ── Chat ─────────────────────────────────────────────────────────────────
    EnterChatInput,
    LeaveChatInput,
    SendChat(String),

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleHelp,
    ToggleKeys,
    CopyToClipboard(String), // text to copy

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
    Resize(u16, u16),
}
