// Views module - screen-level rendering logic
//
// Every frame is the same shell: title bar, body, hint bar. The body is the
// feed, or a full-screen state (loading, empty, error) in its place. Modals
// and the toast are drawn on top.

mod feed;
mod modal;

use super::app::App;
use crate::tui::components;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

/// Main UI render function - called on every frame
///
/// Records the body height in `app.card_rows` so the sentinel check after
/// the draw measures against what is actually on screen.
pub fn draw(f: &mut Frame, app: &mut App) {
    let bg_block = Block::default().style(Style::default().bg(app.theme.background));
    f.render_widget(bg_block, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(f.area());

    components::title_bar::render(f, chunks[0], app);
    feed::render(f, chunks[1], app);
    components::hint_bar::render(f, chunks[2], app);

    if let Some(modal_state) = app.modal.take() {
        modal::render(f, &modal_state, app);
        app.modal = Some(modal_state);
    }

    if let Some(ref toast) = app.toast {
        toast.render(f, f.area(), &app.theme);
    }
}
