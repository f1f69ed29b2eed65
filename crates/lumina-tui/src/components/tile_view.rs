//! One tile: chrome plus whatever its density allows.

use lumina_core::catalog::TileCatalogEntry;
use lumina_core::tile::{self, ContentRegion, Density};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

use super::regions;
use crate::app_state::AppState;
use crate::theme::{tile_fg, tile_fg_dim};
use crate::widgets::pane_chrome::{tile_chrome, Badge};

/// Draw `entry` into `area` and return the inner body rectangle.
pub fn draw_tile(
    frame: &mut Frame,
    area: Rect,
    entry: &TileCatalogEntry,
    density: Density,
    focused: bool,
    state: &AppState,
) -> Rect {
    if area.width < 2 || area.height < 2 {
        return Rect::default();
    }
    let badge = (density == Density::Expanded).then_some(Badge { text: "✕ close" });
    let block = tile_chrome(entry, density, focused, badge);
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let fg = Style::default().fg(tile_fg(entry));
    let dim = Style::default().fg(tile_fg_dim(entry));

    match density {
        Density::Minimized | Density::TitleOnly => {}
        Density::Subtitle => {
            let line = Line::from(Span::styled(
                entry.subtitle.to_uppercase(),
                dim.add_modifier(Modifier::BOLD),
            ));
            frame.render_widget(Paragraph::new(line), inner);
        }
        Density::Teaser => {
            let lines = vec![
                Line::from(Span::styled(
                    entry.subtitle.to_uppercase(),
                    dim.add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(tile::teaser(entry), fg)),
            ];
            frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
        }
        Density::Expanded => {
            let header = Line::from(Span::styled(
                entry.subtitle.to_uppercase(),
                dim.add_modifier(Modifier::BOLD),
            ));
            frame.render_widget(
                Paragraph::new(header).alignment(Alignment::Left),
                Rect { height: inner.height.min(1), ..inner },
            );
            let body = Rect {
                y: inner.y + inner.height.min(2),
                height: inner.height.saturating_sub(2),
                ..inner
            };
            let region = ContentRegion::for_entry(entry);
            regions::draw_region(frame, body, entry, region, state);
            return body;
        }
    }
    inner
}
