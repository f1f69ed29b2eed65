//! TileGrid component: lays the packed grid onto the terminal, animates
//! tiles between layouts and turns clicks into spotlight actions.

use std::time::{Duration, Instant};

use lumina_core::catalog::TileId;
use lumina_core::content::CONTACT;
use lumina_core::grid::{GridLayout, PlacedTile};
use lumina_core::tile::{ContentRegion, Density};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{layout::Rect, Frame};

use super::tile_view::draw_tile;
use crate::action::{Action, ComponentId};
use crate::animation::LayoutAnimator;
use crate::app_state::AppState;
use crate::component::Component;
use crate::widgets::pane_chrome::in_header;

/// Split `total` cells into `n` tracks separated by `gap`. Leftover cells go
/// to the first tracks.
pub fn track_sizes(total: u16, n: u16, gap: u16) -> Vec<u16> {
    if n == 0 {
        return Vec::new();
    }
    let usable = total.saturating_sub(gap.saturating_mul(n - 1));
    let base = usable / n;
    let extra = usable % n;
    (0..n).map(|i| base + u16::from(i < extra)).collect()
}

/// Offset of track `index` (0-based) and the extent of `span` tracks from it.
fn track_extent(sizes: &[u16], gap: u16, index: usize, span: usize) -> (u16, u16) {
    let offset: u16 = sizes.iter().take(index).map(|s| s + gap).sum();
    let end = (index + span).min(sizes.len());
    let spanned: u16 = sizes[index.min(end)..end].iter().sum();
    let gaps = gap * (end.saturating_sub(index).saturating_sub(1)) as u16;
    (offset, spanned + gaps)
}

/// Terminal rectangle for a placed tile inside `area`.
pub fn cell_rect(area: Rect, grid: &GridLayout, placed: &PlacedTile, gap: u16) -> Rect {
    let cols = track_sizes(area.width, grid.columns.max(1), gap);
    let rows = track_sizes(area.height, grid.rows.max(1), gap);
    let (x, width) = track_extent(&cols, gap, usize::from(placed.col - 1), usize::from(placed.cols));
    let (y, height) = track_extent(&rows, gap, usize::from(placed.row - 1), usize::from(placed.rows));
    Rect {
        x: area.x + x,
        y: area.y + y,
        width,
        height,
    }
}

fn hit(r: Rect, col: u16, row: u16) -> bool {
    r.width > 0 && r.height > 0 && col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
}

pub struct TileGrid {
    animator: LayoutAnimator,
    /// Last drawn rectangles, in paint order (open tile last).
    areas: Vec<(TileId, Rect)>,
    open_body: Option<Rect>,
    /// Set by a resize; the next draw jumps straight to the new geometry.
    snap_next: bool,
}

impl TileGrid {
    pub fn new(animation: Duration) -> Self {
        Self {
            animator: LayoutAnimator::new(animation),
            areas: Vec::new(),
            open_body: None,
            snap_next: false,
        }
    }

    /// Body rectangle of the open tile as last drawn.
    pub fn open_body(&self) -> Option<Rect> {
        self.open_body
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating(Instant::now())
    }

    fn tile_at(&self, col: u16, row: u16) -> Option<&(TileId, Rect)> {
        self.areas.iter().rev().find(|(_, r)| hit(*r, col, row))
    }

    /// Click inside the open tile's body.
    fn region_click(id: &TileId, region: ContentRegion, kind: MouseEventKind) -> Vec<Action> {
        match (region, kind) {
            (ContentRegion::Chat, MouseEventKind::Down(_)) => vec![Action::EnterChatInput],
            (ContentRegion::Contact, MouseEventKind::Down(MouseButton::Left)) => {
                vec![Action::CopyToClipboard(CONTACT.email.to_string())]
            }
            (r, kind) if r.carousel_len() > 0 => match kind {
                MouseEventKind::Down(MouseButton::Left) | MouseEventKind::ScrollDown => {
                    vec![Action::StepCarousel(id.clone(), 1)]
                }
                MouseEventKind::ScrollUp => vec![Action::StepCarousel(id.clone(), -1)],
                _ => vec![],
            },
            _ => vec![],
        }
    }
}

impl Component for TileGrid {
    fn id(&self) -> ComponentId {
        ComponentId::TileGrid
    }

    /// Keys aimed at the open, focused tile. Anything else falls through to
    /// the App's navigation keys.
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        let Some((id, region)) = state.open_region() else {
            return vec![];
        };
        if state.focused.as_ref() != Some(&id) || key.modifiers.contains(KeyModifiers::CONTROL) {
            return vec![];
        }
        match (region, key.code) {
            (r, KeyCode::Left) if r.carousel_len() > 0 => vec![Action::StepCarousel(id, -1)],
            (r, KeyCode::Right) if r.carousel_len() > 0 => vec![Action::StepCarousel(id, 1)],
            (ContentRegion::Contact, KeyCode::Enter | KeyCode::Char('y')) => {
                vec![Action::CopyToClipboard(CONTACT.email.to_string())]
            }
            (ContentRegion::Chat, KeyCode::Enter | KeyCode::Char('i')) if state.chat_available => {
                vec![Action::EnterChatInput]
            }
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        let interesting = matches!(
            event.kind,
            MouseEventKind::Down(_) | MouseEventKind::ScrollUp | MouseEventKind::ScrollDown
        );
        if !interesting {
            return vec![];
        }
        let Some((id, rect)) = self.tile_at(event.column, event.row).cloned() else {
            return vec![];
        };

        if state.is_selected(id.as_str()) {
            if matches!(event.kind, MouseEventKind::Down(MouseButton::Left))
                && in_header(rect, event.column, event.row)
            {
                return vec![Action::HeaderClick(id)];
            }
            let mut actions = vec![Action::FocusTile(id.clone())];
            if let Some(entry) = state.entry(id.as_str()) {
                actions.extend(Self::region_click(&id, ContentRegion::for_entry(entry), event.kind));
            }
            return actions;
        }

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                vec![Action::FocusTile(id.clone()), Action::Activate(id)]
            }
            _ => vec![],
        }
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::Resize(..) = action {
            self.snap_next = true;
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let now = Instant::now();
        for placed in &state.grid.tiles {
            let target = cell_rect(area, &state.grid, placed, state.gap);
            self.animator.retarget(&placed.id, target, now);
        }
        if std::mem::take(&mut self.snap_next) {
            self.animator.snap();
        }

        // Open tile paints last so it sits above tiles it sweeps across.
        let mut order: Vec<&PlacedTile> = state.grid.tiles.iter().collect();
        order.sort_by_key(|p| state.is_selected(p.id.as_str()));

        self.areas.clear();
        self.open_body = None;
        for placed in order {
            let Some(entry) = state.entry(placed.id.as_str()) else {
                continue;
            };
            let rect = self
                .animator
                .rect(&placed.id, now)
                .unwrap_or_default()
                .intersection(area);
            let density = state.density(placed.id.as_str());
            let is_focused = focused && state.focused.as_ref() == Some(&placed.id);
            let body = draw_tile(frame, rect, entry, density, is_focused, state);
            if density == Density::Expanded {
                self.open_body = Some(body);
            }
            self.areas.push((placed.id.clone(), rect));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_share_leftover_cells_from_the_front() {
        assert_eq!(track_sizes(100, 5, 1), vec![20, 19, 19, 19, 19]);
        assert_eq!(track_sizes(9, 3, 0), vec![3, 3, 3]);
        assert_eq!(track_sizes(2, 5, 1), vec![0, 0, 0, 0, 0]);
        assert!(track_sizes(10, 0, 1).is_empty());
    }

    #[test]
    fn spans_include_inner_gaps() {
        let grid = GridLayout {
            columns: 5,
            rows: 3,
            tiles: Vec::new(),
        };
        let placed = PlacedTile {
            id: TileId::new("intro"),
            col: 2,
            row: 1,
            cols: 2,
            rows: 2,
        };
        // 104 wide, gap 1: five tracks of 20.  31 high: three tracks of 9 + leftover.
        let r = cell_rect(Rect::new(0, 0, 104, 31), &grid, &placed, 1);
        assert_eq!(r.x, 21);
        assert_eq!(r.width, 41);
        assert_eq!(r.y, 0);
        assert_eq!(r.height, 10 + 1 + 10);
    }

    #[test]
    fn spans_past_the_last_track_are_clipped() {
        let grid = GridLayout {
            columns: 2,
            rows: 1,
            tiles: Vec::new(),
        };
        let placed = PlacedTile {
            id: TileId::new("wide"),
            col: 2,
            row: 1,
            cols: 3,
            rows: 1,
        };
        let r = cell_rect(Rect::new(0, 0, 21, 5), &grid, &placed, 1);
        assert_eq!((r.x, r.width), (11, 10));
    }
}
