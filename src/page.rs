//! Pagination over a fixed page capacity.
//!
//! [`paginate`] is the pure derivation. [`PaginationController`] wraps it with
//! the bookkeeping needed to tell the control surface when the effective page
//! moved away from what it last saw.

use core::num::NonZeroUsize;
use core::ops::Range;

use whereat::{At, at};

use crate::constraint::ConfigError;

/// One page of tiles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Page {
    /// 1-based page number, always within `1..=total_pages`.
    pub index: usize,
    /// At least 1, even with no tiles.
    pub total_pages: usize,
    /// Index of the first tile on this page.
    pub start_offset: usize,
    /// Tiles on this page; this, not the total, is what gets solved.
    pub visible_count: usize,
}

impl Page {
    /// Tile indices shown on this page.
    pub fn range(&self) -> Range<usize> {
        self.start_offset..self.start_offset + self.visible_count
    }

    pub fn has_previous(&self) -> bool {
        self.index > 1
    }

    pub fn has_next(&self) -> bool {
        self.index < self.total_pages
    }
}

/// Compute the page for `requested` (1-based), clamped into range.
///
/// Page 0 clamps to 1; anything past the end clamps to the last page.
pub fn paginate(total: usize, capacity: NonZeroUsize, requested: usize) -> Page {
    let cap = capacity.get();
    let total_pages = total.div_ceil(cap).max(1);
    let index = requested.clamp(1, total_pages);
    let start_offset = (index - 1) * cap;
    let visible_count = cap.min(total.saturating_sub(start_offset));
    Page {
        index,
        total_pages,
        start_offset,
        visible_count,
    }
}

/// Stateful page tracker.
///
/// Every mutator returns `Some(page)` when the control surface needs to hear
/// about it: the page differs from the last reported one, or a request was
/// clamped. Repeating the same request is silent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaginationController {
    capacity: NonZeroUsize,
    total: usize,
    page: Page,
    reported: Page,
    last_corrected_request: Option<usize>,
}

impl PaginationController {
    /// Controller over `total` tiles, starting on page 1.
    ///
    /// Fails when `capacity` is zero, since no page count exists for it.
    pub fn new(capacity: usize, total: usize) -> Result<Self, At<ConfigError>> {
        let capacity = NonZeroUsize::new(capacity).ok_or_else(|| at!(ConfigError::ZeroPageCapacity))?;
        Ok(Self::with_capacity(capacity, total))
    }

    /// Like [`new`](Self::new) with the capacity already proven non-zero.
    pub fn with_capacity(capacity: NonZeroUsize, total: usize) -> Self {
        let page = paginate(total, capacity, 1);
        Self {
            capacity,
            total,
            page,
            reported: page,
            last_corrected_request: None,
        }
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// The current effective page.
    pub fn page(&self) -> Page {
        self.page
    }

    /// Request a page. Out-of-range requests clamp and are reported back.
    pub fn set_page(&mut self, requested: usize) -> Option<Page> {
        let page = paginate(self.total, self.capacity, requested);
        let corrected = page.index != requested;
        let repeat = corrected && self.last_corrected_request == Some(requested);
        self.last_corrected_request = corrected.then_some(requested);
        self.page = page;

        if corrected {
            #[cfg(feature = "tracing")]
            tracing::debug!(requested, index = page.index, "page request clamped");
        }
        self.report(page != self.reported || (corrected && !repeat))
    }

    /// Change the tile total, keeping the current page when still valid.
    pub fn set_total(&mut self, total: usize) -> Option<Page> {
        if total == self.total {
            return None;
        }
        self.total = total;
        self.page = paginate(total, self.capacity, self.page.index);
        self.report(self.page != self.reported)
    }

    /// Step forward one page, saturating at the last.
    pub fn next_page(&mut self) -> Option<Page> {
        self.set_page(self.page.index.saturating_add(1).min(self.page.total_pages))
    }

    /// Step back one page, saturating at the first.
    pub fn previous_page(&mut self) -> Option<Page> {
        self.set_page(self.page.index.saturating_sub(1).max(1))
    }

    fn report(&mut self, notify: bool) -> Option<Page> {
        if notify {
            self.reported = self.page;
            Some(self.page)
        } else {
            None
        }
    }
}
