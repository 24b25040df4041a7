// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, finished fetches and shares)
// - Spawning the fetches and shares that key handling asks for

pub mod app;
pub mod components;
pub mod modal;
pub mod observer;
pub mod share;
pub mod theme;
pub mod views;

use crate::config::Config;
use crate::feed::{Excerpt, ExcerptSource, FetchError, PageRequest};
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use modal::{Modal, ModalAction};
use ratatui::{backend::CrosstermBackend, Terminal};
use share::{ShareOutcome, ShareRequest};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// A finished fetch, tagged with the request that produced it
type PageResult = (PageRequest, Result<Vec<Excerpt>, FetchError>);

/// A finished share, tagged with the excerpt id
type ShareResult = (i64, Result<ShareOutcome>);

/// Work a key press asks the loop to start
#[derive(Debug, Clone, PartialEq, Eq)]
enum Effect {
    Fetch(PageRequest),
    Share(ShareRequest),
}

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and restores the terminal
/// whether or not the loop failed.
pub async fn run_tui(config: Config, source: ExcerptSource, log_buffer: LogBuffer) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::with_config(&config, log_buffer, source.describe());

    let result = run_event_loop(&mut terminal, &mut app, source).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Spawn one fetch; it posts exactly one message back
///
/// A send error means the loop has exited; the late result is dropped.
fn spawn_fetch(source: &ExcerptSource, request: PageRequest, tx: &mpsc::Sender<PageResult>) {
    let source = source.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let outcome = source.fetch(request).await;
        if tx.send((request, outcome)).await.is_err() {
            tracing::debug!(epoch = request.epoch, "Feed closed, dropping page");
        }
    });
}

/// Run one share off the event loop; it posts exactly one message back
fn spawn_share(request: ShareRequest, tx: &mpsc::Sender<ShareResult>) {
    let tx = tx.clone();
    tokio::spawn(async move {
        let id = request.excerpt.id;
        let outcome = request.run().await;
        if tx.send((id, outcome)).await.is_err() {
            tracing::debug!(id, "Feed closed, dropping share result");
        }
    });
}

/// Main event loop
///
/// Waits on three things with tokio::select!:
/// 1. Keyboard and mouse input
/// 2. Timer ticks (spinner animation, toast expiry)
/// 3. Finished fetches and shares
///
/// After each draw the sentinel is checked against the fresh layout, which
/// makes the observer level-triggered.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    source: ExcerptSource,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(120));
    let (tx, mut rx) = mpsc::channel::<PageResult>(16);
    let (share_tx, mut share_rx) = mpsc::channel::<ShareResult>(4);

    if let Some(request) = app.start() {
        spawn_fetch(&source, request, &tx);
    }

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        if let Some(request) = app.observe_sentinel() {
            spawn_fetch(&source, request, &tx);
        }

        let mut effects = Vec::new();

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => {
                            effects.extend(handle_key_event(app, key_event));
                        }
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        _ => {}
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick_animation();
            }

            Some((request, outcome)) = rx.recv() => {
                app.apply_page(request, outcome);
            }

            Some((id, outcome)) = share_rx.recv() => {
                app.finish_share(id, outcome);
            }
        }

        for effect in effects {
            match effect {
                Effect::Fetch(request) => spawn_fetch(&source, request, &tx),
                Effect::Share(request) => spawn_share(request, &share_tx),
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Modal → Global
///
/// Returns the fetch or share the key started, if any.
fn handle_key_event(app: &mut App, key_event: KeyEvent) -> Option<Effect> {
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL)
    {
        app.should_quit = true;
        return None;
    }

    if let Some(modal) = &app.modal {
        let action = modal.handle_input(key_event.code);
        app.apply_modal_action(action);
        return None;
    }

    handle_global_keys(app, key_event.code)
}

fn handle_global_keys(app: &mut App, key: KeyCode) -> Option<Effect> {
    match key {
        KeyCode::Char('q') => app.should_quit = true,

        // Reload works from the error screen too
        KeyCode::Char('r') => return Some(Effect::Fetch(app.reload())),

        KeyCode::Char('?') => app.toggle_modal(Modal::Help),
        KeyCode::Char('a') => app.toggle_modal(Modal::About),
        KeyCode::Char('v') => app.toggle_modal(Modal::likes()),
        KeyCode::Char('L') => app.toggle_modal(Modal::logs()),

        _ if app.pager.error().is_some() => {}

        KeyCode::Down | KeyCode::Char('j') | KeyCode::PageDown | KeyCode::Char(' ') => {
            app.next_card()
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::PageUp => app.prev_card(),
        KeyCode::Home | KeyCode::Char('g') => app.first_card(),
        KeyCode::End | KeyCode::Char('G') => app.last_card(),
        KeyCode::Char('J') => app.scroll_card(1),
        KeyCode::Char('K') => app.scroll_card(-1),
        KeyCode::Enter => app.toggle_expand_current(),
        KeyCode::Char('l') => app.toggle_like_current(),
        KeyCode::Char('s') => return app.share_current().map(Effect::Share),
        _ => {}
    }
    None
}

/// Mouse wheel moves between cards, or scrolls the open list modal
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    let delta = match mouse_event.kind {
        MouseEventKind::ScrollUp => -1,
        MouseEventKind::ScrollDown => 1,
        _ => return,
    };

    match app.modal {
        Some(Modal::Likes { .. }) => app.apply_modal_action(ModalAction::Select(delta)),
        Some(Modal::Logs { .. }) => app.apply_modal_action(ModalAction::Scroll(-delta)),
        Some(_) => {}
        None if app.pager.error().is_some() => {}
        None if delta > 0 => app.next_card(),
        None => app.prev_card(),
    }
}
