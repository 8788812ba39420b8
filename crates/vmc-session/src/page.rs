//! Pagination over the current result set.
//!
//! Pages are numbered from 1.

use vmc_model::{CollegeRecord, ResultSchema};

/// Number of pages needed for `len` rows.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Rows on page `page_number`, clipped to the end of `items`.
pub fn page<T>(items: &[T], page_number: usize, page_size: usize) -> &[T] {
    let start = page_number
        .saturating_sub(1)
        .saturating_mul(page_size)
        .min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Current page of a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    current: usize,
    page_size: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(vmc_client::DEFAULT_PAGE_SIZE)
    }
}

impl Pager {
    /// A pager on page 1. A zero page size is treated as 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            current: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Back to page 1.
    pub fn reset(&mut self) {
        self.current = 1;
    }

    /// Advance one page unless already on the last one.
    pub fn next(&mut self, len: usize) -> bool {
        if self.current < total_pages(len, self.page_size) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page unless already on page 1.
    pub fn prev(&mut self) -> bool {
        if self.current > 1 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to `page`, clamped to the pages `len` rows fill.
    pub fn go_to(&mut self, page: usize, len: usize) {
        self.current = page.clamp(1, total_pages(len, self.page_size).max(1));
    }

    /// Rows of the current page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        page(items, self.current, self.page_size)
    }
}

/// What the results table shows for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageView<'a> {
    pub records: &'a [CollegeRecord],
    pub page: usize,
    pub total_pages: usize,
    pub total_records: usize,
    pub schema: ResultSchema,
}

impl<'a> PageView<'a> {
    pub fn new(records: &'a [CollegeRecord], pager: &Pager, schema: ResultSchema) -> Self {
        Self {
            records: pager.slice(records),
            page: pager.current(),
            total_pages: total_pages(records.len(), pager.page_size()),
            total_records: records.len(),
            schema,
        }
    }

    /// Page count as displayed, never below 1.
    pub fn display_total(&self) -> usize {
        self.total_pages.max(1)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// "Page X of Y".
    pub fn page_info(&self) -> String {
        format!("Page {} of {}", self.page, self.display_total())
    }
}
