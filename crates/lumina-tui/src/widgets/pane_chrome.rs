//! TileChrome: the coloured block every tile is drawn in.

use lumina_core::catalog::TileCatalogEntry;
use lumina_core::tile::Density;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders},
};

use crate::theme::{style_focus_ring, style_tile, tile_fg, tile_fg_dim};

/// Rows at the top of a tile that count as its header for clicks.
pub const HEADER_ROWS: u16 = 2;

/// A badge shown in the top-right of the tile header.
pub struct Badge<'a> {
    pub text: &'a str,
}

/// Bordered, filled block for `entry`.
///
/// The title carries the glyph and, depending on density, the tile title.
/// The focus ring replaces the border colour; the open tile gets a close badge.
pub fn tile_chrome<'a>(
    entry: &'a TileCatalogEntry,
    density: Density,
    focused: bool,
    badge: Option<Badge<'a>>,
) -> Block<'a> {
    let border_style = if focused {
        style_focus_ring()
    } else {
        Style::default().fg(tile_fg_dim(entry))
    };

    let mut title_spans = vec![Span::styled(
        format!(" {} ", entry.glyph),
        Style::default().fg(tile_fg(entry)),
    )];
    if density.shows_title() {
        title_spans.push(Span::styled(
            format!("{} ", entry.title),
            Style::default()
                .fg(tile_fg(entry))
                .add_modifier(Modifier::BOLD),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if focused {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .border_style(border_style)
        .style(style_tile(entry))
        .title(Line::from(title_spans));

    if let Some(b) = badge {
        block.title_top(
            Line::from(Span::styled(
                format!(" {} ", b.text),
                Style::default()
                    .fg(tile_fg(entry))
                    .add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        )
    } else {
        block
    }
}

/// True when `(col, row)` lies on the header rows of `area`.
pub fn in_header(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x + area.width
        && row >= area.y
        && row < area.y + HEADER_ROWS.min(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_the_top_two_rows() {
        let area = Rect::new(10, 5, 20, 8);
        assert!(in_header(area, 10, 5));
        assert!(in_header(area, 29, 6));
        assert!(!in_header(area, 15, 7));
        assert!(!in_header(area, 30, 5));
        assert!(in_header(Rect::new(0, 0, 4, 1), 0, 0));
        assert!(!in_header(Rect::new(0, 0, 4, 1), 0, 1));
    }
}
