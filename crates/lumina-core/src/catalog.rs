//! Tile catalog: the static set of tiles the grid is built from.
//!
//! Catalog order is meaningful: it is the auto-flow order for unpositioned
//! tiles and the focus order in the UI. A tile's `id` is its identity across
//! every re-layout; the renderer keys its motion on it.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque tile identifier, unique within a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(String);

impl TileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for TileId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TileId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Intrinsic footprint of a tile when nothing is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileSize {
    Small,
    Wide,
    Tall,
    Large,
    ExtraWide,
}

impl TileSize {
    /// `(cols, rows)` span.
    pub fn span(self) -> (u16, u16) {
        match self {
            Self::Small => (1, 1),
            Self::Wide => (2, 1),
            Self::Tall => (1, 2),
            Self::Large => (2, 2),
            Self::ExtraWide => (3, 1),
        }
    }
}

/// What a tile shows once it is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Text,
    Projects,
    Chat,
    Gallery,
    Contact,
    Github,
    Blog,
    /// Any tag this build does not know about. Renders an empty body.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextColor {
    White,
    Black,
}

/// RGB triple; catalog colours are authored as hex strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parse `#RRGGBB` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self(r, g, b))
    }
}

fn default_expands() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileCatalogEntry {
    pub id: TileId,
    pub title: String,
    pub subtitle: String,
    pub size: TileSize,
    pub content: ContentType,
    /// Background colour, `#RRGGBB`.
    pub color: String,
    pub text_color: TextColor,
    /// Single-cell glyph shown in the tile header.
    pub glyph: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub expanded_cols: Option<u16>,
    #[serde(default)]
    pub expanded_rows: Option<u16>,
    /// `false` for tiles whose click performs a local action instead of
    /// opening the spotlight.
    #[serde(default = "default_expands")]
    pub expands: bool,
}

impl TileCatalogEntry {
    pub fn background(&self) -> Rgb {
        Rgb::from_hex(&self.color).unwrap_or(Rgb(34, 34, 34))
    }
}

/// Ordered tile catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: Vec<TileCatalogEntry>,
}

impl Catalog {
    /// Build a catalog, keeping the first entry for any duplicated id.
    pub fn new(entries: Vec<TileCatalogEntry>) -> Self {
        let mut seen = std::collections::HashSet::new();
        let mut kept = Vec::with_capacity(entries.len());
        for entry in entries {
            if seen.insert(entry.id.clone()) {
                kept.push(entry);
            } else {
                tracing::warn!("catalog: duplicate tile id '{}' ignored", entry.id);
            }
        }
        Self { entries: kept }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TileCatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&TileCatalogEntry> {
        self.entries.iter().find(|e| e.id.as_str() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id.as_str() == id)
    }

    pub fn ids(&self) -> Vec<TileId> {
        self.entries.iter().map(|e| e.id.clone()).collect()
    }

    /// The portfolio's eight tiles, in grid order.
    pub fn builtin() -> Self {
        Self::new(vec![
            entry(
                "contact", "Contact", "Hire Me", TileSize::Small, ContentType::Contact,
                "#FFFFFF", TextColor::Black, "✉", None, (4, 2),
            ),
            entry(
                "github", "GitHub", "namit2111", TileSize::ExtraWide, ContentType::Github,
                "#24292e", TextColor::White, "⌥", None, (3, 3),
            ),
            entry(
                "ai-chat", "AI Bot", "Ask Me", TileSize::Small, ContentType::Chat,
                "#1F77FF", TextColor::White, "◉", None, (4, 2),
            ),
            entry(
                "blog", "Blog", "Thoughts", TileSize::Tall, ContentType::Blog,
                "#FF6B6B", TextColor::White, "✎", None, (4, 2),
            ),
            entry(
                "intro", "Hello.", "About Me", TileSize::Large, ContentType::Text,
                "#E63946", TextColor::White, "☺",
                Some(INTRO_TEXT), (4, 2),
            ),
            entry(
                "projects", "Work", "Case Studies", TileSize::Tall, ContentType::Projects,
                "#2ECC71", TextColor::Black, "▤", None, (4, 2),
            ),
            entry(
                "skills", "Stack", "Skills", TileSize::Small, ContentType::Text,
                "#FFD500", TextColor::Black, "⌘",
                Some(SKILLS_TEXT), (4, 2),
            ),
            entry(
                "gallery", "Photos", "Gallery", TileSize::Small, ContentType::Gallery,
                "#6A0DAD", TextColor::White, "▣", None, (4, 2),
            ),
        ])
    }
}

const INTRO_TEXT: &str = "I'm Namit, a **Creative Developer**.

I build digital experiences that blend performance with artistic design. My work bridges the gap between clean code architecture and immersive micro-interactions.

Specialized in:
• React & TypeScript Ecosystems
• Generative AI Integration
• WebGL & 3D Web Experiences";

const SKILLS_TEXT: &str = "**Core:** React 18, TypeScript, Tailwind CSS, Next.js
**Animation:** Framer Motion, GSAP, Three.js
**Backend:** Node.js, Python, PostgreSQL
**AI:** Google Gemini API, OpenAI API, TensorFlow.js";

#[allow(clippy::too_many_arguments)]
fn entry(
    id: &str,
    title: &str,
    subtitle: &str,
    size: TileSize,
    content: ContentType,
    color: &str,
    text_color: TextColor,
    glyph: &str,
    description: Option<&str>,
    expanded: (u16, u16),
) -> TileCatalogEntry {
    TileCatalogEntry {
        id: TileId::new(id),
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        size,
        content,
        color: color.to_string(),
        text_color,
        glyph: glyph.to_string(),
        description: description.map(str::to_string),
        expanded_cols: Some(expanded.0),
        expanded_rows: Some(expanded.1),
        expands: true,
    }
}
