//! AppState: shared read-only data passed to all components during render/event.
//!
//! Components read this, but never mutate it.
//! The App event-loop is the only thing that writes to AppState.

use std::collections::HashMap;

use lumina_core::catalog::{Catalog, TileCatalogEntry, TileId};
use lumina_core::contributions::ContributionCalendar;
use lumina_core::grid::{self, GridLayout, GridSpec, PlacedTile};
use lumina_core::layout::{self, LayoutConfig, ResolvedLayout};
use lumina_core::tile::{ContentRegion, Density, TileState};

use crate::widgets::status_bar::InputMode;

pub struct AppState {
    // ── Layout ──────────────────────────────────────────────────────────────
    pub catalog: Catalog,
    pub layout: LayoutConfig,
    pub grid_spec: GridSpec,
    /// Blank cells between tiles.
    pub gap: u16,
    pub resolved: ResolvedLayout,
    pub grid: GridLayout,

    // ── Selection ───────────────────────────────────────────────────────────
    /// Mirror of the spotlight, refreshed by the App after each transition.
    pub selected: Option<TileId>,
    pub focused: Option<TileId>,
    pub tile_states: HashMap<TileId, TileState>,

    // ── Chat / UI ───────────────────────────────────────────────────────────
    pub chat_available: bool,
    pub input_mode: InputMode,
    pub calendar: ContributionCalendar,
}

impl AppState {
    pub fn new(
        catalog: Catalog,
        layout: LayoutConfig,
        grid_spec: GridSpec,
        gap: u16,
        chat_available: bool,
        calendar: ContributionCalendar,
    ) -> Self {
        let focused = catalog.iter().next().map(|e| e.id.clone());
        let mut state = Self {
            catalog,
            layout,
            grid_spec,
            gap,
            resolved: ResolvedLayout::default(),
            grid: GridLayout::default(),
            selected: None,
            focused,
            tile_states: HashMap::new(),
            chat_available,
            input_mode: InputMode::Normal,
            calendar,
        };
        state.relayout();
        state
    }

    /// Resolve and pack for the current selection.
    pub fn relayout(&mut self) {
        self.resolved = layout::resolve(&self.catalog, &self.layout, self.selected.as_ref());
        self.grid = grid::pack(&self.resolved, &self.grid_spec);
    }

    pub fn entry(&self, id: &str) -> Option<&TileCatalogEntry> {
        self.catalog.get(id)
    }

    pub fn placed(&self, id: &str) -> Option<&PlacedTile> {
        self.grid.get(id)
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_ref().is_some_and(|s| s.as_str() == id)
    }

    pub fn density(&self, id: &str) -> Density {
        let (cols, rows) = self.placed(id).map_or((1, 1), |p| (p.cols, p.rows));
        Density::derive(cols, rows, self.is_selected(id), self.selected.is_some())
    }

    pub fn carousel(&self, id: &str) -> usize {
        self.tile_states.get(id).map_or(0, |s| s.carousel)
    }

    /// Region of the open tile, if one is open.
    pub fn open_region(&self) -> Option<(TileId, ContentRegion)> {
        let id = self.selected.as_ref()?;
        let entry = self.entry(id.as_str())?;
        Some((id.clone(), ContentRegion::for_entry(entry)))
    }
}
