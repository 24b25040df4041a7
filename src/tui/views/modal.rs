// Modal overlay rendering
//
// Modals are drawn centered on top of the feed:
// - Help: keyboard shortcuts and active settings
// - About: project blurb
// - Likes: liked excerpts with unlike / export
// - Logs: captured tracing output
// - Notice: one-line blocking message

use crate::logging::{LogEntry, LogLevel};
use crate::tui::app::{App, LIKES_PREVIEW_CHARS};
use crate::tui::modal::Modal;
use crate::tui::theme::Theme;
use crate::util::{display_width, truncate_chars};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, modal: &Modal, app: &App) {
    match modal {
        Modal::Help => render_help(f, app),
        Modal::About => render_about(f, app),
        Modal::Likes { selected } => render_likes(f, app, *selected),
        Modal::Logs { scroll } => render_logs(f, app, *scroll),
        Modal::Notice(message) => render_notice(f, app, message),
    }
}

/// Calculate centered rect for modal dialog
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn modal_block<'a>(theme: &Theme, title: &'a str, footer: &'a str) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight))
        .border_type(theme.border_type)
        .style(Style::default().bg(theme.background))
        .title(title)
        .title_bottom(Line::from(footer).centered())
}

fn render_help(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let key_style = Style::default().fg(theme.highlight);
    let desc_style = Style::default().fg(theme.foreground);
    let header_style = Style::default()
        .fg(theme.title)
        .add_modifier(Modifier::BOLD);

    let kb = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{:<14}", key), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let content = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled("  Reading", header_style)),
        kb("↓/j/Space", "Next excerpt"),
        kb("↑/k", "Previous excerpt"),
        kb("Home/End", "First / last loaded"),
        kb("Enter", "Read more / show less"),
        kb("J/K", "Scroll expanded text"),
        Line::raw(""),
        Line::from(Span::styled("  Excerpt", header_style)),
        kb("l", "Like / unlike"),
        kb("s", "Share"),
        Line::raw(""),
        Line::from(Span::styled("  General", header_style)),
        kb("v", "Liked excerpts"),
        kb("a", "About"),
        kb("r", "Reload feed"),
        kb("L", "Logs"),
        kb("?", "Toggle this help"),
        kb("q", "Quit"),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  Source: ", desc_style),
            Span::styled(app.source_label.as_str(), key_style),
        ]),
        Line::from(vec![
            Span::styled("  Theme: ", desc_style),
            Span::styled(theme.name.as_str(), key_style),
        ]),
    ]);

    let area = centered_rect(48, 26, f.area());
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(content).block(modal_block(theme, " Help ", " Press ? or Esc to close ")),
        area,
    );
}

fn render_about(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let content = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled(
            "About BookTok",
            Style::default()
                .fg(theme.title)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "A TikTok-style interface for reading textbook excerpts.",
            Style::default().fg(theme.foreground),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            format!("Version {}", crate::config::VERSION),
            Style::default().fg(theme.muted),
        )),
    ]);

    let area = centered_rect(62, 9, f.area());
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(content)
            .wrap(Wrap { trim: true })
            .centered()
            .block(modal_block(theme, "", " Press Esc to close ")),
        area,
    );
}

fn render_likes(f: &mut Frame, app: &App, selected: usize) {
    let theme = &app.theme;
    let frame = f.area();
    let area = centered_rect(
        (frame.width * 70 / 100).max(40),
        (frame.height * 80 / 100).max(12),
        frame,
    );
    f.render_widget(Clear, area);

    let liked = app.liked();
    if liked.is_empty() {
        let content = Text::from(vec![
            Line::raw(""),
            Line::from(Span::styled(
                "No liked excerpts yet.",
                Style::default().fg(theme.foreground),
            )),
            Line::raw(""),
            Line::from(Span::styled(
                "Press l on an excerpt to save it here.",
                Style::default().fg(theme.muted),
            )),
        ]);
        f.render_widget(
            Paragraph::new(content)
                .centered()
                .block(modal_block(theme, " Your Liked Excerpts ", " Esc close ")),
            area,
        );
        return;
    }

    let width = area.width.saturating_sub(6) as usize;
    let items: Vec<ListItem> = liked
        .iter()
        .map(|excerpt| {
            let mut lines = vec![Line::from(vec![
                Span::styled("♥ ", Style::default().fg(theme.liked)),
                Span::styled(
                    excerpt.title(),
                    Style::default()
                        .fg(theme.title)
                        .add_modifier(Modifier::BOLD),
                ),
            ])];
            let preview = truncate_chars(&excerpt.text, LIKES_PREVIEW_CHARS);
            lines.extend(wrap_words(&preview, width).into_iter().map(|l| {
                Line::from(Span::styled(
                    format!("  {}", l),
                    Style::default().fg(theme.muted),
                ))
            }));
            lines.push(Line::raw(""));
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .highlight_style(Style::default().bg(theme.selection))
        .block(modal_block(
            theme,
            " Your Liked Excerpts ",
            " ↑↓ select · ⏎ unlike · x export · Esc close ",
        ));
    let mut state = ListState::default().with_selected(Some(selected.min(liked.len() - 1)));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_logs(f: &mut Frame, app: &App, scroll: usize) {
    let theme = &app.theme;
    let frame = f.area();
    let area = centered_rect(
        (frame.width * 90 / 100).max(60),
        (frame.height * 80 / 100).max(12),
        frame,
    );
    f.render_widget(Clear, area);

    if app.log_buffer.is_empty() {
        f.render_widget(
            Paragraph::new(vec![Line::raw(""), Line::from("No log entries yet.")])
                .style(Style::default().fg(theme.muted))
                .centered()
                .block(modal_block(theme, " Logs ", " Esc close ")),
            area,
        );
        return;
    }

    let entries = app.log_buffer.get_all();
    let viewport = area.height.saturating_sub(2) as usize;
    let end = entries.len().saturating_sub(scroll);
    let start = end.saturating_sub(viewport);

    let lines: Vec<Line> = entries[start..end]
        .iter()
        .map(|entry| log_line(entry, theme))
        .collect();

    let title = format!(" Logs ({}) ", entries.len());
    f.render_widget(
        Paragraph::new(lines).block(modal_block(theme, &title, " ↑↓ scroll · Esc close ")),
        area,
    );
}

fn log_line<'a>(entry: &'a LogEntry, theme: &Theme) -> Line<'a> {
    let level_style = match entry.level {
        LogLevel::Error => Style::default()
            .fg(theme.error)
            .add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(theme.liked),
        LogLevel::Info => Style::default().fg(theme.highlight),
        LogLevel::Debug | LogLevel::Trace => Style::default().fg(theme.muted),
    };
    Line::from(vec![
        Span::styled(
            entry.timestamp.format("%H:%M:%S ").to_string(),
            Style::default().fg(theme.muted),
        ),
        Span::styled(format!("{:<5} ", entry.level.as_str()), level_style),
        Span::styled(entry.message.as_str(), Style::default().fg(theme.foreground)),
    ])
}

fn render_notice(f: &mut Frame, app: &App, message: &str) {
    let theme = &app.theme;
    let width = display_width(message).saturating_add(8).max(30);
    let area = centered_rect(width, 5, f.area());
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(vec![Line::raw(""), Line::from(message)])
            .style(Style::default().fg(theme.foreground))
            .centered()
            .block(modal_block(theme, "", " Press any key ")),
        area,
    );
}

/// Greedy word wrap to `width` display columns
fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = display_width(&current) as usize
            + usize::from(!current.is_empty())
            + display_width(word) as usize;
        if !current.is_empty() && needed > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
