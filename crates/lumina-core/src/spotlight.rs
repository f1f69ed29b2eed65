//! Spotlight: the single owner of "which tile is open".
//!
//! Two states: idle (`None`) and spotlit (`Some(id)`). Opening another tile
//! while one is open switches directly; there is no idle frame in between.
//! Every mutation reports the transition it made, or `None` when the call
//! was a no-op, so callers only react to real changes.

use crate::catalog::{TileCatalogEntry, TileId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Opened(TileId),
    Switched { from: TileId, to: TileId },
    Closed(TileId),
}

/// Outcome of activating (clicking / pressing Enter on) a tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Transition(Transition),
    /// The tile opted out of expansion; it handles the click itself.
    Local(TileId),
    /// The tile is already open.
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Spotlight {
    selected: Option<TileId>,
}

impl Spotlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&TileId> {
        self.selected.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.selected.is_some()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_ref().is_some_and(|s| s.as_str() == id)
    }

    /// Open `id`, replacing whatever was open.
    pub fn select(&mut self, id: TileId) -> Option<Transition> {
        match self.selected.replace(id.clone()) {
            None => Some(Transition::Opened(id)),
            Some(prev) if prev == id => None,
            Some(prev) => Some(Transition::Switched { from: prev, to: id }),
        }
    }

    pub fn close(&mut self) -> Option<Transition> {
        self.selected.take().map(Transition::Closed)
    }

    /// Click on a tile body.
    pub fn activate(&mut self, entry: &TileCatalogEntry) -> Activation {
        if !entry.expands {
            return Activation::Local(entry.id.clone());
        }
        match self.select(entry.id.clone()) {
            Some(t) => Activation::Transition(t),
            None => Activation::Ignored,
        }
    }

    /// Click on a tile's header: closes the tile if it is the open one.
    pub fn header_click(&mut self, id: &str) -> Option<Transition> {
        if self.is_selected(id) {
            self.close()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn id(s: &str) -> TileId {
        TileId::new(s)
    }

    #[test]
    fn select_then_close() {
        let mut s = Spotlight::new();
        assert_eq!(s.select(id("intro")), Some(Transition::Opened(id("intro"))));
        assert!(s.is_selected("intro"));
        assert_eq!(s.close(), Some(Transition::Closed(id("intro"))));
        assert_eq!(s.selected(), None);
        assert_eq!(s.close(), None);
    }

    #[test]
    fn switching_never_passes_through_idle() {
        let mut s = Spotlight::new();
        s.select(id("blog"));
        let t = s.select(id("gallery"));
        assert_eq!(
            t,
            Some(Transition::Switched {
                from: id("blog"),
                to: id("gallery"),
            })
        );
        assert_eq!(s.selected(), Some(&id("gallery")));
    }

    #[test]
    fn reselecting_open_tile_is_a_noop() {
        let mut s = Spotlight::new();
        s.select(id("blog"));
        let before = s.clone();
        assert_eq!(s.select(id("blog")), None);
        assert_eq!(s, before);

        let catalog = Catalog::builtin();
        assert_eq!(s.activate(catalog.get("blog").unwrap()), Activation::Ignored);
    }

    #[test]
    fn non_expanding_tile_stays_local() {
        let mut entry = Catalog::builtin().get("gallery").cloned().unwrap();
        entry.expands = false;
        let mut s = Spotlight::new();
        assert_eq!(s.activate(&entry), Activation::Local(id("gallery")));
        assert!(!s.is_active());
    }

    #[test]
    fn header_click_only_closes_the_open_tile() {
        let mut s = Spotlight::new();
        s.select(id("intro"));
        assert_eq!(s.header_click("blog"), None);
        assert_eq!(s.header_click("intro"), Some(Transition::Closed(id("intro"))));
    }
}
