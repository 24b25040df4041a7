//! Excerpt card
//!
//! One card fills the body area. Long texts are cut to a preview until
//! expanded; expanded text scrolls inside the card with J/K.

use crate::feed::Excerpt;
use crate::tui::app::{App, CARD_PREVIEW_CHARS};
use crate::util::{exceeds_chars, truncate_chars};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};
use std::borrow::Cow;

pub const FOOTER: &str = "Scroll down for more excerpts";

/// Text shown in the card body
pub fn body_text(excerpt: &Excerpt, expanded: bool) -> Cow<'_, str> {
    if expanded {
        Cow::Borrowed(excerpt.text.as_str())
    } else {
        truncate_chars(&excerpt.text, CARD_PREVIEW_CHARS)
    }
}

/// "Read more" / "Show less", or nothing for short texts
pub fn expand_hint(excerpt: &Excerpt, expanded: bool) -> Option<&'static str> {
    if !exceeds_chars(&excerpt.text, CARD_PREVIEW_CHARS) {
        None
    } else if expanded {
        Some("Show less")
    } else {
        Some("Read more")
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &App, excerpt: &Excerpt) {
    let theme = &app.theme;
    let liked = app.likes.contains(excerpt.id);
    let expanded = app.is_expanded(excerpt.id);

    let heart = if liked {
        Span::styled(" ♥ ", Style::default().fg(theme.liked))
    } else {
        Span::styled(" ♡ ", Style::default().fg(theme.muted))
    };
    let position = format!(" {} / {} ", app.cursor + 1, app.pager.excerpts().len());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.card_background))
        .padding(Padding::horizontal(2))
        .title(Span::styled(
            format!(" {} ", excerpt.title()),
            Style::default()
                .fg(theme.title)
                .add_modifier(Modifier::BOLD),
        ))
        .title_top(Line::from(heart).right_aligned())
        .title_bottom(
            Line::from(Span::styled(position, Style::default().fg(theme.muted))).right_aligned(),
        );

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let body = Paragraph::new(body_text(excerpt, expanded).into_owned())
        .style(Style::default().fg(theme.foreground))
        .wrap(Wrap { trim: true })
        .scroll((if expanded { app.card_scroll } else { 0 }, 0));
    f.render_widget(body, chunks[1]);

    if let Some(hint) = expand_hint(excerpt, expanded) {
        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("[⏎] ", Style::default().fg(theme.muted)),
                Span::styled(hint, Style::default().fg(theme.link)),
            ])),
            chunks[2],
        );
    }

    f.render_widget(
        Paragraph::new(FOOTER)
            .style(Style::default().fg(theme.muted))
            .centered(),
        chunks[3],
    );
}
