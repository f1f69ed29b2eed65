//! Bodies of opened tiles, one renderer per content region.
//!
//! The chat region is not here: it owns a live session and is drawn by
//! `ChatPanel`.

use lumina_core::catalog::TileCatalogEntry;
use lumina_core::content::{self, BLOG_POSTS, CONTACT, GALLERY_IMAGES, PROJECTS};
use lumina_core::contributions::ContributionCalendar;
use lumina_core::tile::ContentRegion;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app_state::AppState;
use crate::theme::{tile_fg, tile_fg_dim, C_HEAT};
use crate::widgets::markup_lines::markup_lines;

pub fn draw_region(
    frame: &mut Frame,
    area: Rect,
    entry: &TileCatalogEntry,
    region: ContentRegion,
    state: &AppState,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let carousel = state.carousel(entry.id.as_str());
    match region {
        ContentRegion::Text { badges } => draw_text(frame, area, entry, badges),
        ContentRegion::Projects => draw_projects(frame, area, entry, carousel),
        ContentRegion::Gallery => draw_gallery(frame, area, entry, carousel),
        ContentRegion::Contact => draw_contact(frame, area, entry),
        ContentRegion::Github => draw_github(frame, area, entry, &state.calendar),
        ContentRegion::Blog => draw_blog(frame, area, entry, carousel),
        ContentRegion::Chat | ContentRegion::Empty => {}
    }
}

fn fg(entry: &TileCatalogEntry) -> Style {
    Style::default().fg(tile_fg(entry))
}

fn dim(entry: &TileCatalogEntry) -> Style {
    Style::default().fg(tile_fg_dim(entry))
}

fn draw_text(frame: &mut Frame, area: Rect, entry: &TileCatalogEntry, badges: &[&str]) {
    let mut lines = entry
        .description
        .as_deref()
        .map(|d| markup_lines(d, fg(entry)))
        .unwrap_or_default();

    if !badges.is_empty() {
        lines.push(Line::from(""));
        let mut spans = Vec::new();
        for badge in badges {
            spans.push(Span::styled(
                format!("[ {} ]", badge),
                fg(entry).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

/// "‹ 2/6 ›" pager shown under carousels.
fn pager(entry: &TileCatalogEntry, current: usize, len: usize) -> Line<'static> {
    Line::from(vec![
        Span::styled("‹ ", dim(entry)),
        Span::styled(format!("{}/{}", current + 1, len), fg(entry)),
        Span::styled(" ›", dim(entry)),
        Span::styled("   ←/→ browse", dim(entry)),
    ])
}

fn draw_projects(frame: &mut Frame, area: Rect, entry: &TileCatalogEntry, carousel: usize) {
    let current = carousel % PROJECTS.len().max(1);
    let mut lines = Vec::new();
    for (i, project) in PROJECTS.iter().enumerate() {
        let active = i == current;
        let marker = if active { "▶ " } else { "  " };
        let title_style = if active {
            fg(entry).add_modifier(Modifier::BOLD)
        } else {
            dim(entry).add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(vec![
            Span::styled(marker, fg(entry)),
            Span::styled(project.title, title_style),
            Span::styled(format!("  {}", project.category.to_uppercase()), dim(entry)),
        ]));
        if active {
            lines.push(Line::from(Span::styled(format!("  {}", project.summary), fg(entry))));
            lines.push(Line::from(Span::styled(format!("  {}", project.image), dim(entry))));
        }
        lines.push(Line::from(""));
    }
    lines.push(pager(entry, current, PROJECTS.len()));
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn draw_gallery(frame: &mut Frame, area: Rect, entry: &TileCatalogEntry, carousel: usize) {
    let len = GALLERY_IMAGES.len();
    if len == 0 {
        return;
    }
    let current = carousel % len;
    let per_row = if area.width >= 48 { 3 } else { 2 };
    let grid_rows = len.div_ceil(per_row);

    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(area);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, grid_rows as u32); grid_rows])
        .split(outer[0]);

    for (r, row_area) in row_areas.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, per_row as u32); per_row])
            .split(*row_area);
        for (c, cell) in cells.iter().enumerate() {
            let i = r * per_row + c;
            if i >= len {
                break;
            }
            let active = i == current;
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(if active {
                    BorderType::Thick
                } else {
                    BorderType::Rounded
                })
                .border_style(if active { fg(entry) } else { dim(entry) });
            let label = Paragraph::new(Line::from(Span::styled(
                format!("{:02}", i + 1),
                if active {
                    fg(entry).add_modifier(Modifier::BOLD)
                } else {
                    dim(entry)
                },
            )))
            .centered()
            .block(block);
            frame.render_widget(label, *cell);
        }
    }

    let footer = vec![
        Line::from(Span::styled(GALLERY_IMAGES[current], fg(entry))),
        pager(entry, current, len),
    ];
    frame.render_widget(Paragraph::new(footer), outer[1]);
}

fn draw_contact(frame: &mut Frame, area: Rect, entry: &TileCatalogEntry) {
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  ✉  ", fg(entry)),
            Span::styled(CONTACT.email, fg(entry).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  ⌖  ", fg(entry)),
            Span::styled(CONTACT.location, fg(entry)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  [ Enter / y ]  copy email address",
            fg(entry).add_modifier(Modifier::REVERSED),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_github(
    frame: &mut Frame,
    area: Rect,
    entry: &TileCatalogEntry,
    calendar: &ContributionCalendar,
) {
    let stats = &calendar.stats;
    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("@{}", content::GITHUB_USERNAME), fg(entry).add_modifier(Modifier::BOLD)),
            Span::styled("  contribution activity", dim(entry)),
        ]),
        Line::from(vec![
            Span::styled(format!("{} ", stats.total), fg(entry).add_modifier(Modifier::BOLD)),
            Span::styled("total  ", dim(entry)),
            Span::styled(format!("{} ", stats.current_streak), fg(entry).add_modifier(Modifier::BOLD)),
            Span::styled("day streak  ", dim(entry)),
            Span::styled(format!("{} ", stats.longest_streak), fg(entry).add_modifier(Modifier::BOLD)),
            Span::styled("longest  ", dim(entry)),
            Span::styled(format!("{:.1} ", stats.avg_per_day), fg(entry).add_modifier(Modifier::BOLD)),
            Span::styled("avg/day", dim(entry)),
        ]),
        Line::from(""),
    ];

    // Newest weeks on the right; drop the oldest when narrow.
    let weeks: Vec<_> = calendar.weeks().collect();
    let fit = usize::from(area.width / 2).max(1);
    let shown = &weeks[weeks.len().saturating_sub(fit)..];
    for day in 0..7 {
        let spans: Vec<Span> = shown
            .iter()
            .map(|week| match week.get(day) {
                Some(d) => Span::styled("■ ", Style::default().fg(C_HEAT[usize::from(d.level.min(4))])),
                None => Span::raw("  "),
            })
            .collect();
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    let mut legend = vec![Span::styled("less ", dim(entry))];
    legend.extend(C_HEAT.iter().map(|c| Span::styled("■ ", Style::default().fg(*c))));
    legend.push(Span::styled("more", dim(entry)));
    lines.push(Line::from(legend));

    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_blog(frame: &mut Frame, area: Rect, entry: &TileCatalogEntry, carousel: usize) {
    let current = carousel % BLOG_POSTS.len().max(1);
    let mut lines = Vec::new();
    for (i, post) in BLOG_POSTS.iter().enumerate() {
        let active = i == current;
        lines.push(Line::from(vec![
            Span::styled(post.category.to_uppercase(), fg(entry).add_modifier(Modifier::BOLD)),
            Span::styled(format!("  {} · {}", post.date, post.read_time), dim(entry)),
        ]));
        lines.push(Line::from(Span::styled(
            post.title,
            if active {
                fg(entry).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                fg(entry).add_modifier(Modifier::BOLD)
            },
        )));
        if active {
            lines.push(Line::from(Span::styled(post.excerpt, fg(entry))));
        }
        lines.push(Line::from(""));
    }
    lines.push(pager(entry, current, BLOG_POSTS.len()));
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}
