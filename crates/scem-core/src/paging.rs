//! Page arithmetic for tables backed by in-memory lists.

use std::ops::Range;

/// Rows-per-page choices offered by paged tables.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 15, 25, 50];

pub const DEFAULT_PAGE_SIZE: usize = 15;

/// One-based page cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    /// A zero page size is treated as 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `ceil(total / page_size)`; zero when there is nothing to show.
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    /// Index range of the current page within `total` items.
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(total);
        let end = (self.page * self.page_size).min(total);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.range(items.len())]
    }

    pub fn next(&mut self, total: usize) {
        if self.page < self.total_pages(total) {
            self.page += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    pub fn first(&mut self) {
        self.page = 1;
    }

    pub fn last(&mut self, total: usize) {
        self.page = self.total_pages(total).max(1);
    }

    /// Changing the page size always returns to page 1.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// Step through [`PAGE_SIZE_OPTIONS`].
    pub fn cycle_page_size(&mut self) {
        let next = PAGE_SIZE_OPTIONS
            .iter()
            .position(|&s| s == self.page_size)
            .map_or(DEFAULT_PAGE_SIZE, |i| {
                PAGE_SIZE_OPTIONS[(i + 1) % PAGE_SIZE_OPTIONS.len()]
            });
        self.set_page_size(next);
    }

    /// Keep the cursor on an existing page after the list shrank.
    pub fn clamp(&mut self, total: usize) {
        self.page = self.page.min(self.total_pages(total)).max(1);
    }

    /// "Showing a to b of n" bounds, one-based. `(0, 0)` when empty.
    pub fn showing(&self, total: usize) -> (usize, usize) {
        let r = self.range(total);
        if r.is_empty() { (0, 0) } else { (r.start + 1, r.end) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_math() {
        let mut p = Pagination::new(15);
        assert_eq!(p.total_pages(0), 0);
        assert_eq!(p.total_pages(50), 4);
        assert_eq!(p.range(50), 0..15);
        p.last(50);
        assert_eq!(p.page(), 4);
        assert_eq!(p.range(50), 45..50);
        assert_eq!(p.showing(50), (46, 50));
    }

    #[test]
    fn navigation_stays_in_bounds() {
        let mut p = Pagination::new(5);
        p.prev();
        assert_eq!(p.page(), 1);
        for _ in 0..10 {
            p.next(12);
        }
        assert_eq!(p.page(), 3);
        p.first();
        assert_eq!(p.page(), 1);
    }

    #[test]
    fn page_size_change_resets_page() {
        let mut p = Pagination::default();
        p.next(100);
        p.set_page_size(25);
        assert_eq!(p.page(), 1);
        p.cycle_page_size();
        assert_eq!(p.page_size(), 50);
        p.cycle_page_size();
        assert_eq!(p.page_size(), 5);
    }

    #[test]
    fn clamp_after_shrink() {
        let mut p = Pagination::new(5);
        p.last(30);
        p.clamp(7);
        assert_eq!(p.page(), 2);
        p.clamp(0);
        assert_eq!(p.page(), 1);
        assert_eq!(p.showing(0), (0, 0));
    }

    #[test]
    fn slice_returns_current_page() {
        let items: Vec<u32> = (1..=12).collect();
        let mut p = Pagination::new(5);
        p.next(items.len());
        p.next(items.len());
        assert_eq!(p.slice(&items), &[11, 12]);
    }
}
