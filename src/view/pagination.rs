use tracing::debug;

use crate::error::ReviewError;

/// Number of pages needed for `total_rows`, never less than one.
/// A page size of zero is treated as one.
pub fn page_count(total_rows: usize, page_size: usize) -> usize {
    total_rows.div_ceil(page_size.max(1)).max(1)
}

/// Half-open row range `(start, end)` of a 1-based page.
pub fn page_bounds(page: usize, page_size: usize, total_rows: usize) -> Result<(usize, usize), ReviewError> {
    let page_size = page_size.max(1);
    let pages = page_count(total_rows, page_size);
    if page < 1 || page > pages {
        return Err(ReviewError::InvalidPage { page, page_count: pages });
    }

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total_rows);
    Ok((start, end))
}

/// `current + delta` clamped to `1..=total_pages`.
pub fn advance(current: usize, delta: isize, total_pages: usize) -> usize {
    let last = total_pages.max(1);
    current.saturating_add_signed(delta).clamp(1, last)
}

/// The "current page" of a review session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    page: usize,
    page_size: usize,
    total_rows: usize,
}

impl PageCursor {
    pub fn new(total_rows: usize, page_size: usize) -> Self {
        PageCursor { page: 1, page_size: page_size.max(1), total_rows }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self) -> usize {
        page_count(self.total_rows, self.page_size)
    }

    pub fn bounds(&self) -> (usize, usize) {
        // page is kept within 1..=page_count by every transition
        page_bounds(self.page, self.page_size, self.total_rows).unwrap_or((0, 0))
    }

    pub fn next(&mut self) -> usize {
        self.page = advance(self.page, 1, self.page_count());
        self.page
    }

    pub fn previous(&mut self) -> usize {
        self.page = advance(self.page, -1, self.page_count());
        self.page
    }

    /// Absolute move; out of range pages are rejected and the cursor stays put.
    pub fn jump(&mut self, page: usize) -> Result<usize, ReviewError> {
        page_bounds(page, self.page_size, self.total_rows)?;
        self.page = page;
        Ok(self.page)
    }

    /// The number of visible rows changed, keep the page valid.
    pub fn resize(&mut self, total_rows: usize) {
        self.total_rows = total_rows;
        let clamped = advance(self.page, 0, self.page_count());
        if clamped != self.page {
            debug!("Page {} no longer exists, moved to {}", self.page, clamped);
            self.page = clamped;
        }
    }
}
