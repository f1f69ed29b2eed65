//! FocusRing: keyboard focus over tiles.
//!
//! Tab cycles in catalog order; arrow keys jump to the nearest tile in the
//! packed grid along the pressed direction.

use lumina_core::catalog::TileId;
use lumina_core::grid::{GridLayout, PlacedTile};

use crate::action::Heading;

pub struct FocusRing {
    items: Vec<TileId>,
    current: usize,
}

impl FocusRing {
    pub fn new(items: Vec<TileId>) -> Self {
        Self { items, current: 0 }
    }

    pub fn current(&self) -> Option<&TileId> {
        self.items.get(self.current)
    }

    pub fn next(&mut self) -> Option<&TileId> {
        if self.items.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.items.len();
        self.current()
    }

    pub fn prev(&mut self) -> Option<&TileId> {
        if self.items.is_empty() {
            return None;
        }
        self.current = if self.current == 0 {
            self.items.len() - 1
        } else {
            self.current - 1
        };
        self.current()
    }

    pub fn set(&mut self, id: &str) {
        if let Some(pos) = self.items.iter().position(|x| x.as_str() == id) {
            self.current = pos;
        }
    }

    /// Move to the closest tile lying in `heading` from the focused one.
    /// Stays put when nothing lies that way.
    pub fn toward(&mut self, heading: Heading, grid: &GridLayout) -> Option<&TileId> {
        let from = self.current().and_then(|id| grid.get(id.as_str()))?;
        if let Some(target) = nearest(from, heading, grid) {
            let target = target.id.clone();
            self.set(target.as_str());
        }
        self.current()
    }
}

impl Default for FocusRing {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Centre of a placed tile in half-cell units, so spans stay integral.
fn centre(t: &PlacedTile) -> (i32, i32) {
    (
        2 * i32::from(t.col) + i32::from(t.cols),
        2 * i32::from(t.row) + i32::from(t.rows),
    )
}

fn nearest<'a>(from: &PlacedTile, heading: Heading, grid: &'a GridLayout) -> Option<&'a PlacedTile> {
    let (fx, fy) = centre(from);
    grid.tiles
        .iter()
        .filter(|t| t.id != from.id)
        .filter_map(|t| {
            let (tx, ty) = centre(t);
            let (dx, dy) = (tx - fx, ty - fy);
            let (along, across) = match heading {
                Heading::Left => (-dx, dy),
                Heading::Right => (dx, dy),
                Heading::Up => (-dy, dx),
                Heading::Down => (dy, dx),
            };
            // Off-axis tiles are penalised so straight moves win.
            (along > 0).then_some((t, along + 2 * across.abs()))
        })
        .min_by_key(|(_, score)| *score)
        .map(|(t, _)| t)
}
