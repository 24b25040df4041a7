// Hint bar component
//
// One line of key reminders at the bottom of the screen.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let key = Style::default().fg(theme.highlight);
    let desc = Style::default().fg(theme.muted);

    let hints: &[(&str, &str)] = if app.pager.error().is_some() {
        &[("r", "try again"), ("L", "logs"), ("q", "quit")]
    } else {
        &[
            ("↑↓", "browse"),
            ("⏎", "expand"),
            ("l", "like"),
            ("s", "share"),
            ("v", "likes"),
            ("r", "reload"),
            ("?", "help"),
            ("q", "quit"),
        ]
    };

    let mut spans = vec![Span::raw(" ")];
    for (k, d) in hints {
        spans.push(Span::styled(*k, key));
        spans.push(Span::styled(format!(" {}  ", d), desc));
    }

    f.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.background)),
        area,
    );
}
