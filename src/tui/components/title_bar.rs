// Title bar component
//
// App name with a spinner while a page is in flight, and the About / Likes
// shortcuts on the right.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Right-hand label: "About · ♥ N Likes", count only when non-zero
pub fn likes_label(count: usize) -> String {
    if count > 0 {
        format!(" [a] About · [v] ♥ {} Likes ", count)
    } else {
        " [a] About · [v] ♥ Likes ".to_string()
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let mut spans = vec![Span::styled(
        " 📖 BookTok",
        Style::default()
            .fg(theme.title)
            .add_modifier(Modifier::BOLD),
    )];
    if app.pager.is_loading() {
        spans.push(Span::styled(
            format!(" {}", app.spinner_char()),
            Style::default().fg(theme.highlight),
        ));
    }

    let right = Line::from(Span::styled(
        likes_label(app.likes.len()),
        Style::default().fg(if app.likes.is_empty() {
            theme.muted
        } else {
            theme.liked
        }),
    ))
    .right_aligned();

    let title = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border))
            .title_top(right),
    );

    f.render_widget(title, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_likes_label_hides_zero() {
        assert!(!likes_label(0).contains('0'));
        assert!(likes_label(3).contains("♥ 3 Likes"));
    }
}
