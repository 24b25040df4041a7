// Feed view
//
// Chooses what fills the body: error screen, loading screen, exhausted
// screen, or the current card with the sentinel status row beneath it.

use crate::tui::app::App;
use crate::tui::components::card;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame,
};

pub const NO_MORE: &str = "No more excerpts to show";

/// What the sentinel row says when it is in view
pub fn sentinel_status(app: &App) -> Option<String> {
    if !app.sentinel_in_view() {
        return None;
    }
    if app.pager.is_loading() {
        Some(format!("{} Loading…", app.spinner_char()))
    } else if !app.pager.has_more() {
        Some(NO_MORE.to_string())
    } else {
        None
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(1)])
        .split(area);
    app.card_rows = chunks[0].height;

    if let Some(message) = app.pager.error() {
        render_error(f, area, app, message);
        return;
    }

    let Some(excerpt) = app.current().cloned() else {
        let text = if !app.pager.has_more() && !app.pager.is_loading() {
            NO_MORE.to_string()
        } else {
            format!("{} Loading excerpts…", app.spinner_char())
        };
        render_centered(f, area, Text::from(text), Style::default().fg(app.theme.muted));
        return;
    };

    card::render(f, chunks[0], app, &excerpt);

    if let Some(status) = sentinel_status(app) {
        f.render_widget(
            Paragraph::new(status)
                .style(Style::default().fg(app.theme.muted))
                .centered(),
            chunks[1],
        );
    }
}

fn render_error(f: &mut Frame, area: Rect, app: &App, message: &str) {
    let theme = &app.theme;
    let text = Text::from(vec![
        Line::from(Span::styled(
            "Error loading excerpts",
            Style::default()
                .fg(theme.error)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(theme.foreground))),
        Line::raw(""),
        Line::from(vec![
            Span::styled("[r] ", Style::default().fg(theme.highlight)),
            Span::styled("Try Again", Style::default().fg(theme.foreground)),
        ]),
    ]);
    render_centered(f, area, text, Style::default());
}

/// Vertically centered paragraph
fn render_centered(f: &mut Frame, area: Rect, text: Text<'_>, style: Style) {
    let height = (text.lines.len() as u16).min(area.height);
    let top = area.y + area.height.saturating_sub(height) / 2;
    let target = Rect::new(area.x, top, area.width, height);
    f.render_widget(Paragraph::new(text).style(style).centered(), target);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::feed::Excerpt;
    use crate::logging::LogBuffer;

    fn app_with(count: i64) -> App {
        let mut app = App::with_config(&Config::default(), LogBuffer::new(), "test".into());
        app.card_rows = 30;
        let req = app.start().unwrap();
        let page = (1..=count).map(|id| Excerpt::new(id, "text")).collect();
        app.apply_page(req, Ok(page));
        app
    }

    #[test]
    fn test_no_status_away_from_end() {
        let app = app_with(5);
        assert_eq!(sentinel_status(&app), None);
    }

    #[test]
    fn test_loading_status_at_end() {
        let mut app = app_with(5);
        app.last_card();
        assert!(app.observe_sentinel().is_some());
        assert!(sentinel_status(&app).unwrap().ends_with("Loading…"));
    }

    #[test]
    fn test_exhausted_status_at_end() {
        let mut app = app_with(5);
        app.last_card();
        let req = app.observe_sentinel().unwrap();
        app.apply_page(req, Ok(Vec::new()));
        assert_eq!(sentinel_status(&app).as_deref(), Some(NO_MORE));
    }
}
