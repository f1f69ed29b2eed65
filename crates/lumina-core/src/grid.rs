//! Dense grid packer: the placement half of a CSS-grid-like surface.
//!
//! Explicitly positioned tiles go exactly where they ask, even on top of each
//! other. Everything else is auto-placed row-major, restarting the search
//! from the first cell for each tile so later small tiles back-fill holes
//! left by earlier large ones ("dense" flow). Visual order of auto-placed
//! tiles may therefore differ from catalog order.

use serde::{Deserialize, Serialize};

use crate::catalog::TileId;
use crate::layout::{CellPlacement, ResolvedLayout, MAX_TRACK};

/// What to do with spans or starts that fall outside the declared tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Grow implicit columns to fit.
    #[default]
    Allow,
    /// Shrink spans / pull starts back inside the declared grid.
    Clamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    pub columns: u16,
    pub rows: u16,
    pub overflow: OverflowPolicy,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            columns: 5,
            rows: 3,
            overflow: OverflowPolicy::Allow,
        }
    }
}

/// A tile's final cell rectangle. 1-indexed, like CSS grid lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedTile {
    pub id: TileId,
    pub col: u16,
    pub row: u16,
    pub cols: u16,
    pub rows: u16,
}

impl PlacedTile {
    pub fn last_col(&self) -> u16 {
        self.col + self.cols - 1
    }

    pub fn last_row(&self) -> u16 {
        self.row + self.rows - 1
    }
}

/// Packed grid: track counts include any implicit tracks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridLayout {
    pub columns: u16,
    pub rows: u16,
    /// In catalog order.
    pub tiles: Vec<PlacedTile>,
}

impl GridLayout {
    pub fn get(&self, id: &str) -> Option<&PlacedTile> {
        self.tiles.iter().find(|t| t.id.as_str() == id)
    }
}

/// Occupancy bitmap that grows downwards (and rightwards under `Allow`).
struct Occupancy {
    columns: u16,
    cells: Vec<Vec<bool>>,
}

impl Occupancy {
    fn new(columns: u16) -> Self {
        Self {
            columns,
            cells: Vec::new(),
        }
    }

    fn is_free(&self, col: u16, row: u16, cols: u16, rows: u16) -> bool {
        for r in row..row + rows {
            for c in col..col + cols {
                let taken = self
                    .cells
                    .get(usize::from(r - 1))
                    .and_then(|line| line.get(usize::from(c - 1)))
                    .copied()
                    .unwrap_or(false);
                if taken {
                    return false;
                }
            }
        }
        true
    }

    fn mark(&mut self, col: u16, row: u16, cols: u16, rows: u16) {
        let needed_cols = usize::from(col + cols - 1);
        self.columns = self.columns.max(col + cols - 1);
        for r in row..row + rows {
            let r = usize::from(r - 1);
            if self.cells.len() <= r {
                self.cells.resize_with(r + 1, Vec::new);
            }
            let line = &mut self.cells[r];
            if line.len() < needed_cols {
                line.resize(needed_cols, false);
            }
            for c in col..col + cols {
                line[usize::from(c - 1)] = true;
            }
        }
    }

    /// First free origin scanning row-major. `cols` never exceeds the
    /// current column count here, so a fit always exists at some row.
    fn first_fit(&self, cols: u16, rows: u16) -> (u16, u16) {
        let mut row = 1u16;
        loop {
            if let Some(col) = self.fit_in_row(row, cols, rows) {
                return (col, row);
            }
            row += 1;
        }
    }

    fn fit_in_row(&self, row: u16, cols: u16, rows: u16) -> Option<u16> {
        let last_origin = self.columns.saturating_sub(cols) + 1;
        (1..=last_origin).find(|&col| self.is_free(col, row, cols, rows))
    }

    fn fit_in_column(&self, col: u16, cols: u16, rows: u16) -> u16 {
        let mut row = 1u16;
        while !self.is_free(col, row, cols, rows) {
            row += 1;
        }
        row
    }
}

/// Starts and spans are limited to [`MAX_TRACK`] even when the table was
/// never validated, so every sum below fits in a `u16`.
fn normalise(p: &CellPlacement, spec: &GridSpec) -> CellPlacement {
    let mut p = p.capped();
    p.cols = p.cols.max(1);
    p.rows = p.rows.max(1);
    p.col_start = p.col_start.map(|c| c.max(1));
    p.row_start = p.row_start.map(|r| r.max(1));
    if spec.overflow == OverflowPolicy::Clamp {
        let columns = spec.columns.clamp(1, MAX_TRACK);
        let rows = spec.rows.clamp(1, MAX_TRACK);
        p.cols = p.cols.min(columns);
        p.rows = p.rows.min(rows);
        p.col_start = p.col_start.map(|c| c.min(columns - p.cols + 1));
        p.row_start = p.row_start.map(|r| r.min(rows - p.rows + 1));
    }
    p
}

fn place(
    placed: &mut [Option<PlacedTile>],
    occupancy: &mut Occupancy,
    slot: usize,
    id: &TileId,
    (col, row): (u16, u16),
    p: &CellPlacement,
) {
    occupancy.mark(col, row, p.cols, p.rows);
    placed[slot] = Some(PlacedTile {
        id: id.clone(),
        col,
        row,
        cols: p.cols,
        rows: p.rows,
    });
}

/// Pack resolved placements into concrete cells.
pub fn pack(resolved: &ResolvedLayout, spec: &GridSpec) -> GridLayout {
    let items: Vec<(usize, &TileId, CellPlacement)> = resolved
        .iter()
        .enumerate()
        .map(|(i, (id, p))| (i, id, normalise(p, spec)))
        .collect();

    // Auto-flow spans wider than the grid need the implicit columns up front.
    let mut columns = spec.columns.clamp(1, MAX_TRACK);
    if spec.overflow == OverflowPolicy::Allow {
        for (_, _, p) in &items {
            columns = columns.max(p.cols);
            if let Some(c) = p.col_start {
                columns = columns.max(c + p.cols - 1);
            }
        }
    }

    let mut occupancy = Occupancy::new(columns);
    let mut placed: Vec<Option<PlacedTile>> = vec![None; items.len()];

    // 1. Fully explicit tiles, verbatim.
    for (slot, id, p) in items.iter().filter(|(_, _, p)| p.is_explicit()) {
        if let (Some(col), Some(row)) = (p.col_start, p.row_start) {
            place(&mut placed, &mut occupancy, *slot, id, (col, row), p);
        }
    }

    // 2. Row-locked tiles search their row; 3. column-locked tiles search down.
    for (slot, id, p) in items
        .iter()
        .filter(|(_, _, p)| p.row_start.is_some() && p.col_start.is_none())
    {
        if let Some(row) = p.row_start {
            let col = occupancy.fit_in_row(row, p.cols, p.rows).unwrap_or(1);
            place(&mut placed, &mut occupancy, *slot, id, (col, row), p);
        }
    }
    for (slot, id, p) in items
        .iter()
        .filter(|(_, _, p)| p.col_start.is_some() && p.row_start.is_none())
    {
        if let Some(col) = p.col_start {
            let row = occupancy.fit_in_column(col, p.cols, p.rows);
            place(&mut placed, &mut occupancy, *slot, id, (col, row), p);
        }
    }

    // 4. Auto-flow, ordered by (order, catalog position), dense.
    let mut auto: Vec<&(usize, &TileId, CellPlacement)> = items
        .iter()
        .filter(|(_, _, p)| p.col_start.is_none() && p.row_start.is_none())
        .collect();
    auto.sort_by_key(|(slot, _, p)| (p.order.unwrap_or(0), *slot));
    for (slot, id, p) in auto {
        let origin = occupancy.first_fit(p.cols, p.rows);
        place(&mut placed, &mut occupancy, *slot, id, origin, p);
    }

    let tiles: Vec<PlacedTile> = placed.into_iter().flatten().collect();
    let rows = tiles
        .iter()
        .map(PlacedTile::last_row)
        .max()
        .unwrap_or(0)
        .max(spec.rows);
    let columns = tiles
        .iter()
        .map(PlacedTile::last_col)
        .max()
        .unwrap_or(0)
        .max(spec.columns);

    GridLayout {
        columns,
        rows,
        tiles,
    }
}
