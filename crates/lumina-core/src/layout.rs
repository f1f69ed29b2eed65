//! Layout resolver: turns (catalog, layout table, selection) into one
//! placement per tile.
//!
//! The layout table is authored content, not user input, so the resolver is
//! lenient: unknown tiles are ignored, overlapping or oversized placements
//! are passed through untouched, and a tile missing from a state table gets
//! a computed fallback instead of an error.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::catalog::{Catalog, TileId};

/// Span used for an opened tile that declares no expanded size.
pub const DEFAULT_EXPANDED_COLS: u16 = 4;
pub const DEFAULT_EXPANDED_ROWS: u16 = 2;

/// Largest start line or span a placement may use. Anything beyond it is
/// pulled back so grid arithmetic stays in range.
pub const MAX_TRACK: u16 = 64;

const BUILTIN_LAYOUT: &str = include_str!("../assets/layout.toml");
const DEFAULT_STATE_KEY: &str = "default";

/// Where one tile sits in the grid.
///
/// Without `col_start`/`row_start` the tile takes part in auto-flow and may
/// land anywhere the packer finds room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellPlacement {
    pub cols: u16,
    pub rows: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col_start: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_start: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

impl CellPlacement {
    /// An auto-flow placement with the given span.
    pub fn span(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            col_start: None,
            row_start: None,
            order: None,
        }
    }

    pub fn at(mut self, col_start: u16, row_start: u16) -> Self {
        self.col_start = Some(col_start);
        self.row_start = Some(row_start);
        self
    }

    pub fn is_explicit(&self) -> bool {
        self.col_start.is_some() && self.row_start.is_some()
    }

    pub fn is_in_bounds(&self) -> bool {
        self.cols <= MAX_TRACK
            && self.rows <= MAX_TRACK
            && self.col_start.map_or(true, |c| c <= MAX_TRACK)
            && self.row_start.map_or(true, |r| r <= MAX_TRACK)
    }

    /// Spans and starts limited to [`MAX_TRACK`].
    pub fn capped(mut self) -> Self {
        self.cols = self.cols.min(MAX_TRACK);
        self.rows = self.rows.min(MAX_TRACK);
        self.col_start = self.col_start.map(|c| c.min(MAX_TRACK));
        self.row_start = self.row_start.map(|r| r.min(MAX_TRACK));
        self
    }
}

/// Placements for one named UI state. Need not cover every tile.
pub type StateLayout = BTreeMap<TileId, CellPlacement>;

/// Non-fatal problems found in a layout table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutWarning {
    #[error("layout state '{0}' does not name a catalog tile; state ignored")]
    UnknownState(TileId),
    #[error("layout state '{state}' places unknown tile '{tile}'; entry ignored")]
    UnknownTile { state: String, tile: TileId },
    #[error("layout state '{state}' gives tile '{tile}' a zero span; raised to 1")]
    ZeroSpan { state: String, tile: TileId },
    #[error("layout state '{state}': '{first}' and '{second}' overlap")]
    Overlap {
        state: String,
        first: TileId,
        second: TileId,
    },
    #[error("layout state '{state}' puts tile '{tile}' beyond track {max}; pulled back")]
    OutOfRange { state: String, tile: TileId, max: u16 },
    #[error("layout state '{0}' belongs to a tile that never expands")]
    NonExpandingState(TileId),
}

/// Every state's layout: `default` plus one table per expandable tile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutConfig {
    pub default: Option<StateLayout>,
    pub expanded: HashMap<TileId, StateLayout>,
}

impl LayoutConfig {
    /// The shipped table, tuned for the built-in catalog on a 5 × 3 grid.
    pub fn builtin() -> Self {
        match Self::from_toml_str(BUILTIN_LAYOUT) {
            Ok(config) => config,
            Err(e) => {
                warn!("built-in layout table failed to parse: {}", e);
                Self::default()
            }
        }
    }

    /// Parse the `layout.toml` format: one table per state key.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let raw: HashMap<String, StateLayout> = toml::from_str(content)?;
        let mut config = Self::default();
        for (key, state) in raw {
            if key == DEFAULT_STATE_KEY {
                config.default = Some(state);
            } else {
                config.expanded.insert(TileId::new(key), state);
            }
        }
        Ok(config)
    }

    /// Load the override file at `path`, falling back to the built-in table
    /// when it is missing or unreadable.
    pub fn load_or_builtin(path: &Path) -> Self {
        if !path.exists() {
            return Self::builtin();
        }
        match std::fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|s| Self::from_toml_str(&s))
        {
            Ok(config) => {
                debug!("layout: loaded {}", path.display());
                config
            }
            Err(e) => {
                warn!("layout: {} unusable ({}), using built-in table", path.display(), e);
                Self::builtin()
            }
        }
    }

    /// Check the table against `catalog`.
    ///
    /// States keyed by unknown tiles are dropped, zero spans are raised to 1
    /// and starts or spans past [`MAX_TRACK`] are pulled back. Everything else
    /// is only reported.
    pub fn validate(&mut self, catalog: &Catalog) -> Vec<LayoutWarning> {
        let mut warnings = Vec::new();

        let mut unknown: Vec<TileId> = self
            .expanded
            .keys()
            .filter(|id| !catalog.contains(id.as_str()))
            .cloned()
            .collect();
        unknown.sort();
        for id in unknown {
            self.expanded.remove(&id);
            warnings.push(LayoutWarning::UnknownState(id));
        }

        let mut non_expanding: Vec<TileId> = self
            .expanded
            .keys()
            .filter(|id| catalog.get(id.as_str()).is_some_and(|e| !e.expands))
            .cloned()
            .collect();
        non_expanding.sort();
        warnings.extend(non_expanding.into_iter().map(LayoutWarning::NonExpandingState));

        if let Some(state) = self.default.as_mut() {
            check_state(DEFAULT_STATE_KEY, state, catalog, &mut warnings);
        }
        let mut keys: Vec<TileId> = self.expanded.keys().cloned().collect();
        keys.sort();
        for key in keys {
            if let Some(state) = self.expanded.get_mut(&key) {
                check_state(key.as_str(), state, catalog, &mut warnings);
            }
        }

        for w in &warnings {
            warn!("layout: {}", w);
        }
        warnings
    }

    /// The state table that applies for `selected`, if one is configured.
    ///
    /// An open tile without its own table gets no table at all: the
    /// `default` state describes the idle grid only.
    pub fn state_for(&self, selected: Option<&TileId>) -> Option<&StateLayout> {
        match selected {
            Some(id) => self.expanded.get(id),
            None => self.default.as_ref(),
        }
    }
}

fn check_state(
    key: &str,
    state: &mut StateLayout,
    catalog: &Catalog,
    warnings: &mut Vec<LayoutWarning>,
) {
    for (tile, placement) in state.iter_mut() {
        if !catalog.contains(tile.as_str()) {
            warnings.push(LayoutWarning::UnknownTile {
                state: key.to_string(),
                tile: tile.clone(),
            });
        }
        if placement.cols == 0 || placement.rows == 0 {
            placement.cols = placement.cols.max(1);
            placement.rows = placement.rows.max(1);
            warnings.push(LayoutWarning::ZeroSpan {
                state: key.to_string(),
                tile: tile.clone(),
            });
        }
        if !placement.is_in_bounds() {
            *placement = placement.capped();
            warnings.push(LayoutWarning::OutOfRange {
                state: key.to_string(),
                tile: tile.clone(),
                max: MAX_TRACK,
            });
        }
    }

    let explicit: Vec<(&TileId, &CellPlacement)> =
        state.iter().filter(|(_, p)| p.is_explicit()).collect();
    for (i, (a_id, a)) in explicit.iter().enumerate() {
        for (b_id, b) in explicit.iter().skip(i + 1) {
            if overlaps(a, b) {
                warnings.push(LayoutWarning::Overlap {
                    state: key.to_string(),
                    first: (*a_id).clone(),
                    second: (*b_id).clone(),
                });
            }
        }
    }
}

fn overlaps(a: &CellPlacement, b: &CellPlacement) -> bool {
    let (Some(ac), Some(ar), Some(bc), Some(br)) = (a.col_start, a.row_start, b.col_start, b.row_start)
    else {
        return false;
    };
    ac < bc + b.cols && bc < ac + a.cols && ar < br + b.rows && br < ar + a.rows
}

/// Placement of every catalog tile for one state, in catalog order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedLayout {
    entries: Vec<(TileId, CellPlacement)>,
}

impl ResolvedLayout {
    pub fn get(&self, id: &str) -> Option<&CellPlacement> {
        self.entries
            .iter()
            .find(|(tile, _)| tile.as_str() == id)
            .map(|(_, p)| p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TileId, &CellPlacement)> {
        self.entries.iter().map(|(id, p)| (id, p))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolve one placement per catalog tile.
///
/// Per tile, first match wins: the active state table's entry; the opened
/// tile's expanded span; 1×1 for every other tile while one is open; the
/// tile's intrinsic size when nothing is open.
pub fn resolve(catalog: &Catalog, config: &LayoutConfig, selected: Option<&TileId>) -> ResolvedLayout {
    let state = config.state_for(selected);

    let entries = catalog
        .iter()
        .map(|tile| {
            let placement = match (state.and_then(|s| s.get(&tile.id)), selected) {
                (Some(p), _) => *p,
                (None, Some(sel)) if *sel == tile.id => CellPlacement::span(
                    tile.expanded_cols.unwrap_or(DEFAULT_EXPANDED_COLS),
                    tile.expanded_rows.unwrap_or(DEFAULT_EXPANDED_ROWS),
                ),
                (None, Some(_)) => CellPlacement::span(1, 1),
                (None, None) => {
                    let (cols, rows) = tile.size.span();
                    CellPlacement::span(cols, rows)
                }
            };
            (tile.id.clone(), placement)
        })
        .collect();

    ResolvedLayout { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, TileSize};

    #[test]
    fn builtin_table_parses_and_covers_every_tile_state() {
        let catalog = Catalog::builtin();
        let mut config = LayoutConfig::builtin();
        assert!(config.default.is_some());
        for tile in catalog.iter() {
            assert!(config.expanded.contains_key(&tile.id), "missing state {}", tile.id);
        }
        let warnings = config.validate(&catalog);
        assert!(
            warnings.iter().all(|w| !matches!(w, LayoutWarning::UnknownState(_) | LayoutWarning::UnknownTile { .. })),
            "{warnings:?}"
        );
    }

    #[test]
    fn auto_flow_entries_have_no_start() {
        let config = LayoutConfig::builtin();
        let gallery = config.expanded[&TileId::new("github")][&TileId::new("gallery")];
        assert_eq!(gallery, CellPlacement::span(2, 1));
        assert!(!gallery.is_explicit());
    }

    #[test]
    fn validate_drops_unknown_states_and_fixes_zero_spans() {
        let catalog = Catalog::builtin();
        let mut config = LayoutConfig::from_toml_str(
            r#"
            [default]
            intro = { cols = 0, rows = 2 }
            ghost = { cols = 1, rows = 1 }

            [nowhere]
            intro = { cols = 2, rows = 2 }
            "#,
        )
        .unwrap();

        let warnings = config.validate(&catalog);
        assert!(config.expanded.is_empty());
        assert_eq!(config.default.as_ref().unwrap()[&TileId::new("intro")].cols, 1);
        assert!(warnings.contains(&LayoutWarning::UnknownState(TileId::new("nowhere"))));
        assert!(warnings.contains(&LayoutWarning::UnknownTile {
            state: "default".into(),
            tile: TileId::new("ghost"),
        }));
        assert!(warnings.contains(&LayoutWarning::ZeroSpan {
            state: "default".into(),
            tile: TileId::new("intro"),
        }));
    }

    #[test]
    fn overlapping_explicit_placements_are_reported_not_rejected() {
        let catalog = Catalog::builtin();
        let mut config = LayoutConfig::from_toml_str(
            r#"
            [default]
            intro = { cols = 2, rows = 2, col_start = 1, row_start = 1 }
            blog = { cols = 1, rows = 1, col_start = 2, row_start = 2 }
            "#,
        )
        .unwrap();
        let warnings = config.validate(&catalog);
        assert_eq!(warnings.len(), 1);
        assert!(matches!(warnings[0], LayoutWarning::Overlap { .. }));
        assert_eq!(config.default.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn huge_starts_and_spans_are_pulled_back_with_a_warning() {
        let catalog = Catalog::builtin();
        let mut config = LayoutConfig::from_toml_str(
            r#"
            [intro]
            intro = { cols = 2, rows = 1, col_start = 65535, row_start = 1 }
            blog = { cols = 65535, rows = 2, col_start = 1, row_start = 65535 }
            "#,
        )
        .unwrap();
        let warnings = config.validate(&catalog);

        let state = &config.expanded[&TileId::new("intro")];
        assert_eq!(state[&TileId::new("intro")], CellPlacement::span(2, 1).at(MAX_TRACK, 1));
        assert_eq!(
            state[&TileId::new("blog")],
            CellPlacement::span(MAX_TRACK, 2).at(1, MAX_TRACK)
        );
        let out_of_range = warnings
            .iter()
            .filter(|w| matches!(w, LayoutWarning::OutOfRange { .. }))
            .count();
        assert_eq!(out_of_range, 2);
    }

    #[test]
    fn idle_without_table_uses_intrinsic_sizes() {
        let catalog = Catalog::builtin();
        let resolved = resolve(&catalog, &LayoutConfig::default(), None);
        for tile in catalog.iter() {
            let (cols, rows) = tile.size.span();
            assert_eq!(resolved.get(tile.id.as_str()), Some(&CellPlacement::span(cols, rows)));
        }
        assert_eq!(TileSize::ExtraWide.span(), (3, 1));
    }

    #[test]
    fn state_table_entries_are_used_verbatim() {
        let catalog = Catalog::builtin();
        let config = LayoutConfig::builtin();
        let resolved = resolve(&catalog, &config, Some(&TileId::new("projects")));
        assert_eq!(
            resolved.get("projects"),
            Some(&CellPlacement::span(3, 3).at(3, 1))
        );
        assert_eq!(resolved.get("gallery"), Some(&CellPlacement::span(1, 1)));
    }

    #[test]
    fn missing_expanded_span_defaults_to_four_by_two() {
        let mut entries: Vec<_> = Catalog::builtin().iter().cloned().collect();
        entries[0].expanded_cols = None;
        entries[0].expanded_rows = None;
        let catalog = Catalog::new(entries);
        let resolved = resolve(&catalog, &LayoutConfig::default(), Some(&TileId::new("contact")));
        assert_eq!(resolved.get("contact"), Some(&CellPlacement::span(4, 2)));
    }
}
