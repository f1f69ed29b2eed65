//! Minimal inline markup used in tile descriptions.
//!
//! Only two constructs exist: `**bold**` spans and bullet lines starting with
//! `•` or `-`. Every other line is a plain paragraph. Blank lines are dropped.

use std::sync::OnceLock;

use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Plain(String),
    Bold(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Vec<Inline>),
    Bullet(Vec<Inline>),
}

impl Block {
    pub fn inlines(&self) -> &[Inline] {
        match self {
            Self::Paragraph(i) | Self::Bullet(i) => i,
        }
    }
}

fn bold_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*(.+?)\*\*").ok()).as_ref()
}

/// Split one line into plain and bold runs.
pub fn inlines(line: &str) -> Vec<Inline> {
    let Some(re) = bold_re() else {
        return vec![Inline::Plain(line.to_string())];
    };
    let mut out = Vec::new();
    let mut last = 0;
    for caps in re.captures_iter(line) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            out.push(Inline::Plain(line[last..whole.start()].to_string()));
        }
        out.push(Inline::Bold(inner.as_str().to_string()));
        last = whole.end();
    }
    if last < line.len() {
        out.push(Inline::Plain(line[last..].to_string()));
    }
    out
}

fn bullet_body(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    ["•", "-"].iter().find_map(|marker| {
        let rest = trimmed.strip_prefix(marker)?;
        rest.starts_with(char::is_whitespace).then(|| rest.trim_start())
    })
}

pub fn render(text: &str) -> Vec<Block> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| match bullet_body(line) {
            Some(body) => Block::Bullet(inlines(body)),
            None => Block::Paragraph(inlines(line)),
        })
        .collect()
}

/// Text with the markers removed, for width measurement and teasers.
pub fn plain_text(text: &str) -> String {
    match bold_re() {
        Some(re) => re.replace_all(text, "$1").into_owned(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(s: &str) -> Inline {
        Inline::Plain(s.to_string())
    }

    fn bold(s: &str) -> Inline {
        Inline::Bold(s.to_string())
    }

    #[test]
    fn bold_and_bullets() {
        let blocks = render("**bold** text\n- item one\n- item two");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph(vec![bold("bold"), plain(" text")]),
                Block::Bullet(vec![plain("item one")]),
                Block::Bullet(vec![plain("item two")]),
            ]
        );
    }

    #[test]
    fn unicode_bullet_and_blank_lines() {
        let blocks = render("Specialized in:\n\n• React & TypeScript");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph(vec![plain("Specialized in:")]),
                Block::Bullet(vec![plain("React & TypeScript")]),
            ]
        );
    }

    #[test]
    fn nothing_else_is_interpreted() {
        let blocks = render("# heading\n*single* and -dash\n**unclosed");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph(vec![plain("# heading")]),
                Block::Paragraph(vec![plain("*single* and -dash")]),
                Block::Paragraph(vec![plain("**unclosed")]),
            ]
        );
    }

    #[test]
    fn plain_text_strips_bold_markers() {
        assert_eq!(plain_text("**Core:** React"), "Core: React");
    }
}
