//! Sentinel observer - decides when to ask for the next page
//!
//! The feed is laid out as one vertical strip measured in terminal rows:
//!
//! ```text
//!   row 0        ┌──────────────┐
//!                │   card 0     │  H rows each
//!   row H        ├──────────────┤
//!                │   card 1     │
//!                │     ...      │
//!   row n*H      ├──────────────┤
//!                │   sentinel   │  SENTINEL_ROWS
//!                └──────────────┘
//! ```
//!
//! The viewport shows card `cursor` and is widened by `lookahead_rows` on
//! both ends. When at least `threshold` of the sentinel falls inside the
//! widened viewport, and the pager is neither loading nor exhausted, the
//! observer fires. It is level-triggered: every check while the condition
//! holds fires again, and the pager's loading guard absorbs the repeats.

/// Height of the sentinel band after the last card
pub const SENTINEL_ROWS: u32 = 4;

/// Fraction of the sentinel that must be in view
pub const DEFAULT_THRESHOLD: f32 = 0.1;

/// Rows of lookahead beyond each edge of the viewport
pub const DEFAULT_LOOKAHEAD_ROWS: u16 = 4;

/// A half-open range of rows `[start, start + len)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub start: u32,
    pub len: u32,
}

impl Band {
    pub fn new(start: u32, len: u32) -> Self {
        Self { start, len }
    }

    pub fn end(&self) -> u32 {
        self.start.saturating_add(self.len)
    }

    /// Rows shared with `other`
    pub fn overlap(&self, other: &Band) -> u32 {
        let start = self.start.max(other.start);
        let end = self.end().min(other.end());
        end.saturating_sub(start)
    }

    /// Grow by `margin` rows on both ends (clamped at row 0)
    pub fn expand(&self, margin: u32) -> Band {
        let start = self.start.saturating_sub(margin);
        Band::new(start, self.end().saturating_add(margin) - start)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentinelObserver {
    threshold: f32,
    lookahead_rows: u16,
}

impl Default for SentinelObserver {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD, DEFAULT_LOOKAHEAD_ROWS)
    }
}

impl SentinelObserver {
    /// Threshold is clamped into `0.0..=1.0`
    pub fn new(threshold: f32, lookahead_rows: u16) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            lookahead_rows,
        }
    }

    /// Viewport band for card `cursor` with cards `card_rows` tall
    pub fn viewport(cursor: usize, card_rows: u16) -> Band {
        let rows = u32::from(card_rows);
        Band::new((cursor as u32).saturating_mul(rows), rows)
    }

    /// Sentinel band after `count` cards
    pub fn sentinel(count: usize, card_rows: u16) -> Band {
        Band::new(
            (count as u32).saturating_mul(u32::from(card_rows)),
            SENTINEL_ROWS,
        )
    }

    /// Fraction of the sentinel inside the widened viewport
    pub fn visible_ratio(&self, viewport: Band, sentinel: Band) -> f32 {
        if sentinel.len == 0 {
            return 0.0;
        }
        let root = viewport.expand(u32::from(self.lookahead_rows));
        root.overlap(&sentinel) as f32 / sentinel.len as f32
    }

    /// Whether the sentinel is intersecting at all (used for the loader row)
    pub fn is_intersecting(&self, viewport: Band, sentinel: Band) -> bool {
        let ratio = self.visible_ratio(viewport, sentinel);
        ratio > 0.0 && ratio >= self.threshold
    }

    /// Whether the next page should be requested now
    pub fn should_load(
        &self,
        viewport: Band,
        sentinel: Band,
        loading: bool,
        has_more: bool,
    ) -> bool {
        !loading && has_more && self.is_intersecting(viewport, sentinel)
    }
}
