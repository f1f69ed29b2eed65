//! Markup blocks as styled ratatui lines.

use lumina_core::markup::{self, Block, Inline};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

/// One line per block; bullets get a hanging marker. Wrapping is left to the
/// paragraph the lines end up in.
pub fn markup_lines(text: &str, base: Style) -> Vec<Line<'static>> {
    markup::render(text)
        .into_iter()
        .map(|block| {
            let mut spans = Vec::new();
            if let Block::Bullet(_) = block {
                spans.push(Span::styled("  • ", base));
            }
            spans.extend(block.inlines().iter().map(|inline| match inline {
                Inline::Plain(s) => Span::styled(s.clone(), base),
                Inline::Bold(s) => Span::styled(s.clone(), base.add_modifier(Modifier::BOLD)),
            }));
            Line::from(spans)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_spans_carry_the_modifier() {
        let lines = markup_lines("**Core:** React\n- TypeScript", Style::default());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans[0].content, "Core:");
        assert!(lines[0].spans[0].style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(lines[1].spans[0].content, "  • ");
        assert_eq!(lines[1].spans[1].content, "TypeScript");
    }
}
