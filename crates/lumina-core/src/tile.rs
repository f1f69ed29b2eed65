//! Per-tile presentation rules: how much of a tile to show, which content
//! region an open tile renders, and the small amount of state a region keeps.

use crate::catalog::{ContentType, TileCatalogEntry};
use crate::content;
use crate::markup;

/// Teasers longer than this are cut at a word boundary.
pub const TEASER_LIMIT: usize = 90;

/// How much of a tile is drawn. Derived on every frame from the packed
/// placement and the spotlight; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Density {
    /// Spotlight is on another tile: glyph only.
    Minimized,
    TitleOnly,
    Subtitle,
    Teaser,
    /// The open tile: full content region.
    Expanded,
}

impl Density {
    pub fn derive(cols: u16, rows: u16, is_selected: bool, spotlight_active: bool) -> Self {
        if is_selected {
            return Self::Expanded;
        }
        if spotlight_active {
            return Self::Minimized;
        }
        match (cols, rows) {
            (c, r) if c >= 2 && r >= 2 => Self::Teaser,
            (1, 1) | (0, _) | (_, 0) => Self::TitleOnly,
            _ => Self::Subtitle,
        }
    }

    pub fn shows_subtitle(self) -> bool {
        matches!(self, Self::Subtitle | Self::Teaser | Self::Expanded)
    }

    pub fn shows_title(self) -> bool {
        self != Self::Minimized
    }
}

/// The body an open tile renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentRegion {
    Text { badges: &'static [&'static str] },
    Projects,
    Chat,
    Gallery,
    Contact,
    Github,
    Blog,
    Empty,
}

impl ContentRegion {
    pub fn for_entry(entry: &TileCatalogEntry) -> Self {
        match entry.content {
            ContentType::Text => Self::Text {
                badges: if entry.id.as_str() == "skills" {
                    content::SKILL_BADGES
                } else {
                    &[]
                },
            },
            ContentType::Projects => Self::Projects,
            ContentType::Chat => Self::Chat,
            ContentType::Gallery => Self::Gallery,
            ContentType::Contact => Self::Contact,
            ContentType::Github => Self::Github,
            ContentType::Blog => Self::Blog,
            ContentType::Unknown => Self::Empty,
        }
    }

    /// Number of carousel positions, for regions that page through items.
    pub fn carousel_len(self) -> usize {
        match self {
            Self::Projects => content::PROJECTS.len(),
            Self::Gallery => content::GALLERY_IMAGES.len(),
            Self::Blog => content::BLOG_POSTS.len(),
            _ => 0,
        }
    }
}

/// Interaction sub-state kept per tile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileState {
    pub carousel: usize,
}

impl TileState {
    /// Move the carousel by `delta`, wrapping in both directions.
    pub fn step(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.carousel = 0;
            return;
        }
        let len = len as isize;
        let cur = (self.carousel as isize).rem_euclid(len);
        self.carousel = (cur + delta).rem_euclid(len) as usize;
    }

    /// Click on a tile that does not expand. Returns true when the state
    /// changed and the tile needs a redraw.
    pub fn local_action(&mut self, region: ContentRegion, len: usize) -> bool {
        match region {
            ContentRegion::Gallery | ContentRegion::Projects | ContentRegion::Blog if len > 1 => {
                self.step(1, len);
                true
            }
            _ => false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Short preview for idle tiles with room to spare: the first paragraph of the
/// description with markup removed, or the subtitle when there is none.
pub fn teaser(entry: &TileCatalogEntry) -> String {
    let first = entry
        .description
        .as_deref()
        .and_then(|d| d.lines().find(|l| !l.trim().is_empty()))
        .map(markup::plain_text);
    let text = first.unwrap_or_else(|| entry.subtitle.clone());
    truncate_words(text.trim(), TEASER_LIMIT)
}

fn truncate_words(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let cut: String = text.chars().take(limit).collect();
    let head = match cut.rfind(' ') {
        Some(i) if i > 0 => &cut[..i],
        _ => cut.as_str(),
    };
    format!("{}…", head.trim_end_matches(|c: char| c == ',' || c == '.' || c == ' '))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn density_follows_placement_and_spotlight() {
        assert_eq!(Density::derive(1, 1, false, false), Density::TitleOnly);
        assert_eq!(Density::derive(2, 1, false, false), Density::Subtitle);
        assert_eq!(Density::derive(1, 2, false, false), Density::Subtitle);
        assert_eq!(Density::derive(2, 2, false, false), Density::Teaser);
        assert_eq!(Density::derive(2, 2, false, true), Density::Minimized);
        assert_eq!(Density::derive(1, 1, true, true), Density::Expanded);
    }

    #[test]
    fn every_content_type_has_a_region() {
        let catalog = Catalog::builtin();
        let regions: Vec<_> = catalog.iter().map(ContentRegion::for_entry).collect();
        assert!(regions.contains(&ContentRegion::Chat));
        assert!(regions.contains(&ContentRegion::Github));
        assert!(!regions.contains(&ContentRegion::Empty));

        let skills = catalog.get("skills").unwrap();
        assert_eq!(
            ContentRegion::for_entry(skills),
            ContentRegion::Text {
                badges: content::SKILL_BADGES
            }
        );
    }

    #[test]
    fn unknown_content_renders_empty() {
        let mut entry = Catalog::builtin().get("intro").cloned().unwrap();
        entry.content = ContentType::Unknown;
        assert_eq!(ContentRegion::for_entry(&entry), ContentRegion::Empty);
    }

    #[test]
    fn carousel_wraps_both_ways() {
        let mut s = TileState::default();
        s.step(-1, 6);
        assert_eq!(s.carousel, 5);
        s.step(2, 6);
        assert_eq!(s.carousel, 1);
        s.step(1, 0);
        assert_eq!(s.carousel, 0);
    }

    #[test]
    fn local_action_advances_gallery_only() {
        let mut s = TileState::default();
        assert!(s.local_action(ContentRegion::Gallery, 6));
        assert_eq!(s.carousel, 1);
        assert!(!s.local_action(ContentRegion::Contact, 0));
        s.reset();
        assert_eq!(s.carousel, 0);
    }

    #[test]
    fn teaser_uses_first_paragraph_without_markup() {
        let catalog = Catalog::builtin();
        let intro = catalog.get("intro").unwrap();
        let t = teaser(intro);
        assert!(!t.contains("**"));
        assert!(t.chars().count() <= TEASER_LIMIT + 1);

        let contact = catalog.get("contact").unwrap();
        if contact.description.is_none() {
            assert_eq!(teaser(contact), contact.subtitle);
        }
    }
}
