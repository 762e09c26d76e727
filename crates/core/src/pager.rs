//! Pagination over a materialized item list

/// Items shown per page unless configured otherwise
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Current page position for a fixed page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
    page: usize,
}

/// The visible window of one page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageView<'a, T> {
    /// Items on this page
    pub items: &'a [T],
    /// Zero-based page index
    pub page: usize,
    /// Total pages, never zero
    pub page_count: usize,
    /// Index of `items[0]` in the full list
    pub offset: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            page: 0,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages for `len` items; an empty list still has one page
    pub fn page_count(&self, len: usize) -> usize {
        len.div_ceil(self.page_size).max(1)
    }

    /// Advance one page unless already on the last one
    pub fn next(&mut self, len: usize) -> bool {
        if (self.page + 1) * self.page_size < len {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page unless already on the first one
    pub fn prev(&mut self) -> bool {
        if self.page > 0 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.page = 0;
    }

    /// Keep the page in range after the list shrank
    pub fn clamp(&mut self, len: usize) {
        self.page = self.page.min(self.page_count(len) - 1);
    }

    /// Slice out the current page
    pub fn view<'a, T>(&self, items: &'a [T]) -> PageView<'a, T> {
        let page_count = self.page_count(items.len());
        let page = self.page.min(page_count - 1);
        let start = (page * self.page_size).min(items.len());
        let end = (start + self.page_size).min(items.len());
        PageView {
            items: &items[start..end],
            page,
            page_count,
            offset: start,
        }
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
