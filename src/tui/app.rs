// TUI application state
//
// Owns the pager, the liked set and every bit of local UI state (cursor,
// expanded cards, modal, toast). Methods that need a fetch return the
// PageRequest; the event loop performs it and feeds the result back
// through `apply_page`.

use super::components::Toast;
use super::modal::{Modal, ModalAction};
use super::observer::SentinelObserver;
use super::share::{ShareOutcome, ShareRequest};
use super::theme::Theme;
use crate::config::Config;
use crate::feed::export;
use crate::feed::{Applied, Excerpt, FetchError, Likes, PageRequest, Pager};
use crate::logging::LogBuffer;
use std::collections::HashSet;
use std::path::PathBuf;

/// Characters shown on a card before "Read more"
pub const CARD_PREVIEW_CHARS: usize = 500;

/// Characters shown per entry in the likes list
pub const LIKES_PREVIEW_CHARS: usize = 200;

/// Main application state for the TUI
pub struct App {
    /// Pagination core (accumulated excerpts, loading/error/has_more)
    pub pager: Pager,

    /// Liked excerpt ids, independent of the pager lifecycle
    pub likes: Likes,

    /// Ids of cards showing their full text
    pub expanded: HashSet<i64>,

    /// Index of the card on screen
    pub cursor: usize,

    /// Line offset inside the current card's text
    pub card_scroll: u16,

    /// Height of the card viewport as last rendered, in rows
    pub card_rows: u16,

    pub modal: Option<Modal>,
    pub toast: Option<Toast>,
    pub should_quit: bool,

    pub theme: Theme,
    pub observer: SentinelObserver,
    pub log_buffer: LogBuffer,

    /// Where the feed comes from, for the help screen
    pub source_label: String,

    export_dir: PathBuf,
    share_command: Option<Vec<String>>,
    animation_frame: usize,
}

impl App {
    pub fn with_config(config: &Config, log_buffer: LogBuffer, source_label: String) -> Self {
        Self {
            pager: Pager::new(config.page_size),
            likes: Likes::new(),
            expanded: HashSet::new(),
            cursor: 0,
            card_scroll: 0,
            card_rows: 0,
            modal: None,
            toast: None,
            should_quit: false,
            theme: Theme::by_name(&config.theme),
            observer: SentinelObserver::new(
                config.observer.threshold,
                config.observer.lookahead_rows,
            ),
            log_buffer,
            source_label,
            export_dir: config.export_dir.clone(),
            share_command: config.share_command.clone(),
            animation_frame: 0,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Feed
    // ─────────────────────────────────────────────────────────────────────

    /// Initial load on startup
    pub fn start(&mut self) -> Option<PageRequest> {
        self.pager.start()
    }

    /// Full reload: fresh feed under a new epoch. Likes survive.
    pub fn reload(&mut self) -> PageRequest {
        self.cursor = 0;
        self.card_scroll = 0;
        self.expanded.clear();
        self.modal = None;
        let request = self.pager.reload();
        tracing::info!(epoch = self.pager.epoch(), "Reloading feed");
        request
    }

    /// Apply a finished fetch
    pub fn apply_page(
        &mut self,
        request: PageRequest,
        outcome: Result<Vec<Excerpt>, FetchError>,
    ) -> Applied {
        let applied = self.pager.apply(request, outcome);
        if let Applied::Loaded { added } = applied {
            tracing::info!(
                page = request.page,
                total = self.pager.excerpts().len(),
                "Loaded {} excerpts",
                added
            );
        }
        self.clamp_cursor();
        applied
    }

    /// Level-triggered sentinel check, run after every draw
    ///
    /// Returns the next page request when the sentinel is in range and the
    /// pager accepts it.
    pub fn observe_sentinel(&mut self) -> Option<PageRequest> {
        if self.pager.error().is_some() || self.card_rows == 0 {
            return None;
        }
        let viewport = SentinelObserver::viewport(self.cursor, self.card_rows);
        let sentinel = SentinelObserver::sentinel(self.pager.excerpts().len(), self.card_rows);

        if self.observer.should_load(
            viewport,
            sentinel,
            self.pager.is_loading(),
            self.pager.has_more(),
        ) {
            self.pager.load_more()
        } else {
            None
        }
    }

    /// Whether the sentinel row (loader / end-of-feed) is in range
    pub fn sentinel_in_view(&self) -> bool {
        self.observer.is_intersecting(
            SentinelObserver::viewport(self.cursor, self.card_rows.max(1)),
            SentinelObserver::sentinel(self.pager.excerpts().len(), self.card_rows.max(1)),
        )
    }

    pub fn current(&self) -> Option<&Excerpt> {
        self.pager.excerpts().get(self.cursor)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────

    pub fn next_card(&mut self) {
        self.move_to(self.cursor.saturating_add(1));
    }

    pub fn prev_card(&mut self) {
        self.move_to(self.cursor.saturating_sub(1));
    }

    pub fn first_card(&mut self) {
        self.move_to(0);
    }

    pub fn last_card(&mut self) {
        self.move_to(usize::MAX);
    }

    fn move_to(&mut self, index: usize) {
        let before = self.cursor;
        self.cursor = index;
        self.clamp_cursor();
        if self.cursor != before {
            self.card_scroll = 0;
        }
    }

    fn clamp_cursor(&mut self) {
        let last = self.pager.excerpts().len().saturating_sub(1);
        self.cursor = self.cursor.min(last);
    }

    /// Scroll inside the current card (only meaningful when expanded)
    pub fn scroll_card(&mut self, delta: i32) {
        self.card_scroll = if delta < 0 {
            self.card_scroll.saturating_sub(delta.unsigned_abs() as u16)
        } else {
            self.card_scroll.saturating_add(delta as u16)
        };
    }

    // ─────────────────────────────────────────────────────────────────────
    // Card actions
    // ─────────────────────────────────────────────────────────────────────

    pub fn toggle_like(&mut self, id: i64) -> bool {
        let liked = self.likes.toggle(id);
        tracing::debug!(id, liked, "Toggled like");
        liked
    }

    pub fn toggle_like_current(&mut self) {
        if let Some(id) = self.current().map(|e| e.id) {
            self.toggle_like(id);
        }
    }

    /// Expand or collapse the current card if its text is long enough to matter
    pub fn toggle_expand_current(&mut self) {
        let Some(excerpt) = self.current() else {
            return;
        };
        if !crate::util::exceeds_chars(&excerpt.text, CARD_PREVIEW_CHARS) {
            return;
        }
        let id = excerpt.id;
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
        self.card_scroll = 0;
    }

    pub fn is_expanded(&self, id: i64) -> bool {
        self.expanded.contains(&id)
    }

    /// Package the current card for the share task
    pub fn share_current(&self) -> Option<ShareRequest> {
        self.current().map(|excerpt| ShareRequest {
            excerpt: excerpt.clone(),
            command: self.share_command.clone(),
        })
    }

    /// Report a finished share. Failures are logged, never shown.
    pub fn finish_share(&mut self, id: i64, outcome: anyhow::Result<ShareOutcome>) {
        match outcome {
            Ok(ShareOutcome::Shared) => {
                tracing::info!(id, "Shared excerpt");
                self.show_toast("✓ Shared");
            }
            Ok(ShareOutcome::Copied) => {
                tracing::info!(id, "Copied excerpt to clipboard");
                self.modal = Some(Modal::notice("Excerpt copied to clipboard!"));
            }
            Err(e) => tracing::warn!(id, "Error sharing excerpt: {:#}", e),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Likes & export
    // ─────────────────────────────────────────────────────────────────────

    /// Liked excerpts in feed order
    pub fn liked(&self) -> Vec<&Excerpt> {
        export::liked_excerpts(self.pager.excerpts(), &self.likes)
    }

    /// Write the favorites file; only reachable with a non-empty liked set
    pub fn export_likes(&mut self) {
        let today = export::export_date();
        match export::write_export(&self.export_dir, self.pager.excerpts(), &self.likes, today) {
            Ok(Some(path)) => self.show_toast(format!("✓ Exported to {}", path.display())),
            Ok(None) => {}
            Err(e) => {
                tracing::error!("Export failed: {:#}", e);
                self.show_toast("✗ Export failed");
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────

    /// Toggle a modal: open it, or close it if the same kind is already open
    pub fn toggle_modal(&mut self, modal: Modal) {
        let same_kind = self
            .modal
            .as_ref()
            .is_some_and(|open| std::mem::discriminant(open) == std::mem::discriminant(&modal));
        self.modal = if same_kind { None } else { Some(modal) };
    }

    /// Execute a modal action
    pub fn apply_modal_action(&mut self, action: ModalAction) {
        match action {
            ModalAction::None => {}
            ModalAction::Close => self.modal = None,
            ModalAction::Select(delta) => {
                let count = self.liked().len();
                if let Some(Modal::Likes { selected }) = &mut self.modal {
                    *selected = step(*selected, delta, count);
                }
            }
            ModalAction::Scroll(delta) => {
                let count = self.log_buffer.len();
                if let Some(Modal::Logs { scroll }) = &mut self.modal {
                    *scroll = step(*scroll, delta, count);
                }
            }
            ModalAction::Unlike => {
                let Some(Modal::Likes { selected }) = self.modal else {
                    return;
                };
                let target = self.liked().get(selected).map(|e| e.id);
                if let Some(id) = target {
                    self.toggle_like(id);
                    let remaining = self.liked().len();
                    if let Some(Modal::Likes { selected }) = &mut self.modal {
                        *selected = (*selected).min(remaining.saturating_sub(1));
                    }
                }
            }
            ModalAction::Export => {
                if !self.likes.is_empty() {
                    self.export_likes();
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Toast & animation
    // ─────────────────────────────────────────────────────────────────────

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    /// Advance spinner frame and expire the toast
    pub fn tick_animation(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }
    }

    pub fn spinner_char(&self) -> char {
        const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];
        SPINNER[self.animation_frame % SPINNER.len()]
    }
}

/// Move an index by `delta` within `0..count`
fn step(index: usize, delta: i32, count: usize) -> usize {
    let last = count.saturating_sub(1);
    if delta < 0 {
        index.saturating_sub(delta.unsigned_abs() as usize)
    } else {
        index.saturating_add(delta as usize).min(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::pager::LOAD_ERROR_MESSAGE;

    fn app() -> App {
        let mut app = App::with_config(&Config::default(), LogBuffer::new(), "test".to_string());
        app.card_rows = 30;
        app
    }

    fn page(ids: std::ops::RangeInclusive<i64>) -> Vec<Excerpt> {
        ids.map(|id| Excerpt::new(id, format!("excerpt {}", id)))
            .collect()
    }

    fn loaded(ids: std::ops::RangeInclusive<i64>) -> App {
        let mut app = app();
        let req = app.start().unwrap();
        app.apply_page(req, Ok(page(ids)));
        app
    }

    #[test]
    fn test_scrolling_to_last_card_requests_next_page() {
        let mut app = loaded(1..=5);
        assert_eq!(app.observe_sentinel(), None);

        app.last_card();
        assert_eq!(app.cursor, 4);
        let req = app.observe_sentinel().unwrap();
        assert_eq!(req.page, 1);

        // Still in view while loading: no duplicate request
        assert_eq!(app.observe_sentinel(), None);

        app.apply_page(req, Ok(page(6..=10)));
        assert_eq!(app.pager.excerpts().len(), 10);
        assert_eq!(app.observe_sentinel(), None);
    }

    #[test]
    fn test_exhaustion_stops_requests() {
        let mut app = loaded(1..=5);
        app.last_card();
        let req = app.observe_sentinel().unwrap();
        app.apply_page(req, Ok(Vec::new()));

        assert!(!app.pager.has_more());
        assert_eq!(app.observe_sentinel(), None);
        assert!(app.sentinel_in_view());
    }

    #[test]
    fn test_error_blocks_observer_until_reload() {
        let mut app = app();
        let req = app.start().unwrap();
        app.apply_page(req, Err(FetchError::Status(500)));
        assert_eq!(app.pager.error(), Some(LOAD_ERROR_MESSAGE));
        assert_eq!(app.observe_sentinel(), None);

        let req = app.reload();
        app.apply_page(req, Ok(page(1..=5)));
        assert_eq!(app.pager.error(), None);
        assert_eq!(app.pager.excerpts().len(), 5);
    }

    #[test]
    fn test_likes_survive_reload() {
        let mut app = loaded(1..=5);
        app.toggle_like_current();
        assert!(app.likes.contains(1));

        let req = app.reload();
        app.apply_page(req, Ok(page(1..=5)));
        assert!(app.likes.contains(1));
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut app = loaded(1..=3);
        app.prev_card();
        assert_eq!(app.cursor, 0);
        app.next_card();
        app.next_card();
        app.next_card();
        assert_eq!(app.cursor, 2);
    }

    #[test]
    fn test_expand_only_long_texts() {
        let mut app = app();
        let req = app.start().unwrap();
        let long = "word ".repeat(200);
        app.apply_page(
            req,
            Ok(vec![Excerpt::new(1, "short"), Excerpt::new(2, long)]),
        );

        app.toggle_expand_current();
        assert!(!app.is_expanded(1));

        app.next_card();
        app.toggle_expand_current();
        assert!(app.is_expanded(2));
        app.toggle_expand_current();
        assert!(!app.is_expanded(2));
    }

    #[test]
    fn test_unlike_from_likes_modal() {
        let mut app = loaded(1..=5);
        app.toggle_like(3);
        app.toggle_like(5);
        app.modal = Some(Modal::likes());

        app.apply_modal_action(ModalAction::Select(1));
        assert_eq!(app.modal, Some(Modal::Likes { selected: 1 }));
        app.apply_modal_action(ModalAction::Select(5));
        assert_eq!(app.modal, Some(Modal::Likes { selected: 1 }));

        app.apply_modal_action(ModalAction::Unlike);
        assert!(!app.likes.contains(5));
        assert_eq!(app.modal, Some(Modal::Likes { selected: 0 }));
        assert_eq!(app.liked().iter().map(|e| e.id).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_export_with_no_likes_is_noop() {
        let mut app = loaded(1..=5);
        app.apply_modal_action(ModalAction::Export);
        assert!(app.toast.is_none());
    }

    #[test]
    fn test_share_request_carries_current_card() {
        let mut app = app();
        assert_eq!(app.share_current(), None);

        let req = app.start().unwrap();
        app.apply_page(req, Ok(page(1..=3)));
        app.next_card();
        let share = app.share_current().unwrap();
        assert_eq!(share.excerpt.id, 2);
        assert_eq!(share.command, None);
    }

    #[test]
    fn test_share_failure_is_only_logged() {
        let mut app = loaded(1..=3);
        app.finish_share(1, Err(anyhow::anyhow!("Share command exited with 3")));
        assert_eq!(app.modal, None);
        assert!(app.toast.is_none());

        app.finish_share(1, Ok(ShareOutcome::Copied));
        assert_eq!(
            app.modal,
            Some(Modal::notice("Excerpt copied to clipboard!"))
        );
    }

    #[test]
    fn test_toggle_modal() {
        let mut app = app();
        app.toggle_modal(Modal::About);
        assert_eq!(app.modal, Some(Modal::About));
        app.toggle_modal(Modal::likes());
        assert_eq!(app.modal, Some(Modal::likes()));
        app.toggle_modal(Modal::likes());
        assert_eq!(app.modal, None);
    }
}
