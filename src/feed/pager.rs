//! Pagination fetch core
//!
//! A sans-IO state machine that owns the accumulated excerpt list. It never
//! performs a fetch itself: operations hand out a [`PageRequest`] describing
//! the fetch to run, and the caller reports the outcome with [`Pager::apply`].
//!
//! # Transitions
//!
//! ```text
//!            start()                 apply(Ok(n>0))
//!   Idle ───────────────► Loading ───────────────────► Ready ◄─┐
//!                            │   apply(Ok(0))                  │ load_more()
//!                            ├─────────────────► Exhausted     │ + apply(Ok(n>0))
//!                            │   apply(Err)                    │
//!                            └─────────────────► Errored ──────┘ (next pages only)
//!
//!   reload() from any state: fresh state, new epoch, Loading
//! ```
//!
//! Pages are zero-based: the initial request is page 0, each `load_more`
//! asks for `page + 1`, and the cursor only advances when a non-empty page
//! arrives. The `loading` flag is the one guard against overlapping fetches.

use super::model::Excerpt;
use super::source::FetchError;

/// Number of excerpts requested per page unless configured otherwise
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// User-facing message for every fetch failure
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load excerpts. Please try again later.";

/// Which operation produced a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// First page after start or reload
    Initial,
    /// A `load_more` continuation
    Next,
}

/// A fetch the caller must perform and report back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Pager generation the request belongs to
    pub epoch: u64,
    pub page: u32,
    pub size: u32,
    pub kind: RequestKind,
}

/// What `apply` did with a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Items were stored (initial) or appended (next page)
    Loaded { added: usize },
    /// An empty page arrived; no more pages will be requested
    Exhausted,
    /// The fetch failed; `error` now carries the user-facing message
    Failed,
    /// The request belongs to an earlier epoch and was ignored
    Stale,
}

/// Paging state plus the accumulated excerpts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    excerpts: Vec<Excerpt>,
    page: u32,
    page_size: u32,
    loading: bool,
    has_more: bool,
    error: Option<String>,
    epoch: u64,
    started: bool,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pager {
    /// Create an idle pager. A zero page size is bumped to 1.
    pub fn new(page_size: u32) -> Self {
        Self {
            excerpts: Vec::new(),
            page: 0,
            page_size: page_size.max(1),
            loading: false,
            has_more: true,
            error: None,
            epoch: 0,
            started: false,
        }
    }

    pub fn excerpts(&self) -> &[Excerpt] {
        &self.excerpts
    }

    #[cfg(test)]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[cfg(test)]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Begin the initial load (page 0). Returns `None` once started.
    pub fn start(&mut self) -> Option<PageRequest> {
        if self.started {
            return None;
        }
        self.started = true;
        self.loading = true;
        Some(self.request(0, RequestKind::Initial))
    }

    /// Request the next page, or `None` while loading / exhausted / idle
    pub fn load_more(&mut self) -> Option<PageRequest> {
        if !self.started || !self.has_more || self.loading {
            return None;
        }
        self.loading = true;
        Some(self.request(self.page + 1, RequestKind::Next))
    }

    /// Throw away all state and start over under a new epoch
    ///
    /// Any fetch still in flight from the previous epoch is discarded by
    /// `apply` when it lands.
    pub fn reload(&mut self) -> PageRequest {
        let epoch = self.epoch.wrapping_add(1);
        *self = Self {
            epoch,
            ..Self::new(self.page_size)
        };
        self.started = true;
        self.loading = true;
        self.request(0, RequestKind::Initial)
    }

    /// Apply the outcome of a fetch previously handed out by this pager
    pub fn apply(
        &mut self,
        request: PageRequest,
        outcome: Result<Vec<Excerpt>, FetchError>,
    ) -> Applied {
        if request.epoch != self.epoch {
            tracing::debug!(
                request_epoch = request.epoch,
                current_epoch = self.epoch,
                page = request.page,
                "Discarding stale page"
            );
            return Applied::Stale;
        }

        self.loading = false;

        match (request.kind, outcome) {
            (RequestKind::Initial, Ok(items)) if items.is_empty() => {
                self.excerpts.clear();
                self.page = 0;
                self.has_more = false;
                Applied::Exhausted
            }
            (RequestKind::Initial, Ok(items)) => {
                let added = items.len();
                self.excerpts = items;
                self.page = 0;
                self.has_more = true;
                Applied::Loaded { added }
            }
            (RequestKind::Initial, Err(e)) => {
                tracing::error!("Initial page failed: {}", e);
                self.excerpts.clear();
                self.has_more = false;
                self.error = Some(LOAD_ERROR_MESSAGE.to_string());
                Applied::Failed
            }
            (RequestKind::Next, Ok(items)) if items.is_empty() => {
                self.has_more = false;
                Applied::Exhausted
            }
            (RequestKind::Next, Ok(items)) => {
                let added = items.len();
                self.excerpts.extend(items);
                self.page = request.page;
                Applied::Loaded { added }
            }
            (RequestKind::Next, Err(e)) => {
                tracing::error!(page = request.page, "Next page failed: {}", e);
                self.error = Some(LOAD_ERROR_MESSAGE.to_string());
                Applied::Failed
            }
        }
    }

    fn request(&self, page: u32, kind: RequestKind) -> PageRequest {
        PageRequest {
            epoch: self.epoch,
            page,
            size: self.page_size,
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(ids: std::ops::RangeInclusive<i64>) -> Vec<Excerpt> {
        ids.map(|id| Excerpt::new(id, format!("excerpt {}", id)))
            .collect()
    }

    fn ids(pager: &Pager) -> Vec<i64> {
        pager.excerpts().iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_new_pager_is_idle() {
        let mut pager = Pager::new(5);
        assert!(!pager.is_loading());
        assert!(pager.has_more());
        assert!(pager.excerpts().is_empty());
        assert_eq!(pager.load_more(), None);
    }

    #[test]
    fn test_start_requests_page_zero_once() {
        let mut pager = Pager::new(5);
        let req = pager.start().unwrap();
        assert_eq!(req.page, 0);
        assert_eq!(req.size, 5);
        assert_eq!(req.kind, RequestKind::Initial);
        assert!(pager.is_loading());
        assert_eq!(pager.start(), None);
    }

    #[test]
    fn test_initial_page_loads() {
        let mut pager = Pager::new(5);
        let req = pager.start().unwrap();

        assert_eq!(pager.apply(req, Ok(page_of(1..=5))), Applied::Loaded { added: 5 });
        assert_eq!(ids(&pager), vec![1, 2, 3, 4, 5]);
        assert_eq!(pager.page(), 0);
        assert!(pager.has_more());
        assert!(!pager.is_loading());
        assert_eq!(pager.error(), None);
    }

    #[test]
    fn test_accumulates_in_arrival_order() {
        let mut pager = Pager::new(3);
        let req = pager.start().unwrap();
        pager.apply(req, Ok(page_of(1..=3)));

        let req = pager.load_more().unwrap();
        assert_eq!(req.page, 1);
        pager.apply(req, Ok(page_of(4..=6)));

        // A short page is still a page
        let req = pager.load_more().unwrap();
        assert_eq!(req.page, 2);
        pager.apply(req, Ok(page_of(7..=8)));

        assert_eq!(ids(&pager), (1..=8).collect::<Vec<_>>());
        assert_eq!(pager.page(), 2);
        assert!(pager.has_more());
        assert_eq!(pager.load_more().map(|r| r.page), Some(3));
    }

    #[test]
    fn test_load_more_is_guarded_while_loading() {
        let mut pager = Pager::new(5);
        let req = pager.start().unwrap();
        pager.apply(req, Ok(page_of(1..=5)));

        let first = pager.load_more().unwrap();
        assert_eq!(pager.load_more(), None);
        assert_eq!(pager.load_more(), None);
        assert_eq!(pager.page(), 0);

        pager.apply(first, Ok(page_of(6..=10)));
        assert_eq!(pager.page(), 1);
        assert_eq!(ids(&pager).len(), 10);
    }

    #[test]
    fn test_empty_page_exhausts() {
        let mut pager = Pager::new(5);
        let req = pager.start().unwrap();
        pager.apply(req, Ok(page_of(1..=5)));

        let req = pager.load_more().unwrap();
        assert_eq!(pager.apply(req, Ok(Vec::new())), Applied::Exhausted);

        assert!(!pager.has_more());
        assert!(!pager.is_loading());
        assert_eq!(pager.excerpts().len(), 5);
        assert_eq!(pager.page(), 0);

        // Exhausted pagers never request again
        assert_eq!(pager.load_more(), None);
        assert_eq!(pager.page(), 0);
    }

    #[test]
    fn test_empty_initial_page() {
        let mut pager = Pager::new(5);
        let req = pager.start().unwrap();
        assert_eq!(pager.apply(req, Ok(Vec::new())), Applied::Exhausted);
        assert!(!pager.has_more());
        assert!(pager.excerpts().is_empty());
        assert_eq!(pager.error(), None);
    }

    #[test]
    fn test_initial_failure_then_reload() {
        let mut pager = Pager::new(5);
        let req = pager.start().unwrap();

        assert_eq!(pager.apply(req, Err(FetchError::Status(500))), Applied::Failed);
        assert_eq!(pager.error(), Some(LOAD_ERROR_MESSAGE));
        assert!(pager.excerpts().is_empty());
        assert!(!pager.has_more());
        assert!(!pager.is_loading());

        let req = pager.reload();
        assert_eq!(req.page, 0);
        assert_eq!(req.kind, RequestKind::Initial);
        assert_eq!(pager.error(), None);

        pager.apply(req, Ok(page_of(1..=5)));
        assert_eq!(pager.error(), None);
        assert_eq!(ids(&pager), vec![1, 2, 3, 4, 5]);
        assert!(pager.has_more());
    }

    #[test]
    fn test_next_page_failure_keeps_state() {
        let mut pager = Pager::new(5);
        let req = pager.start().unwrap();
        pager.apply(req, Ok(page_of(1..=5)));

        let req = pager.load_more().unwrap();
        let outcome = Err(FetchError::Network("connection reset".to_string()));
        assert_eq!(pager.apply(req, outcome), Applied::Failed);

        assert_eq!(pager.error(), Some(LOAD_ERROR_MESSAGE));
        assert_eq!(pager.excerpts().len(), 5);
        assert_eq!(pager.page(), 0);
        assert!(pager.has_more());
        assert!(!pager.is_loading());

        // Caller may retry the same page
        assert_eq!(pager.load_more().map(|r| r.page), Some(1));
    }

    #[test]
    fn test_stale_results_are_discarded() {
        let mut pager = Pager::new(5);
        let old = pager.start().unwrap();
        let fresh = pager.reload();
        assert_ne!(old.epoch, fresh.epoch);

        assert_eq!(pager.apply(old, Ok(page_of(90..=94))), Applied::Stale);
        assert!(pager.excerpts().is_empty());
        assert!(pager.is_loading());

        pager.apply(fresh, Ok(page_of(1..=2)));
        assert_eq!(ids(&pager), vec![1, 2]);
    }

    #[test]
    fn test_reload_keeps_page_size() {
        let mut pager = Pager::new(8);
        let req = pager.start().unwrap();
        pager.apply(req, Ok(page_of(1..=8)));
        assert_eq!(pager.reload().size, 8);
        assert!(pager.excerpts().is_empty());
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        assert_eq!(Pager::new(0).page_size(), 1);
    }
}
