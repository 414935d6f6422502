use serde::Serialize;

use super::PageWindow;

/// One page of a filtered, optionally ordered query.
///
/// `row_count` is the number of matches across all pages, counted before
/// paging. `items` may be shorter than `page_size` on the last page and is
/// empty past the end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    items: Vec<T>,
    row_count: usize,
    current_page: usize,
    page_size: usize,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, row_count: usize, window: PageWindow) -> Self {
        Self {
            items,
            row_count,
            current_page: window.page(),
            page_size: window.page_size(),
        }
    }

    /// The result for a query with no matches.
    pub fn empty(window: PageWindow) -> Self {
        Self::new(Vec::new(), 0, window)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn page_count(&self) -> usize {
        self.row_count.div_ceil(self.page_size)
    }

    /// 1-based index of the first row on this page, 0 when the page is empty.
    pub fn first_row_on_page(&self) -> usize {
        if self.items.is_empty() {
            return 0;
        }
        (self.current_page - 1) * self.page_size + 1
    }

    /// 1-based index of the last row on this page, 0 when the page is empty.
    pub fn last_row_on_page(&self) -> usize {
        if self.items.is_empty() {
            return 0;
        }
        self.first_row_on_page() + self.items.len() - 1
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.page_count()
    }

    /// Transform the items while keeping the paging metadata.
    pub fn map<U, F>(self, f: F) -> PagedResult<U>
    where
        F: FnMut(T) -> U,
    {
        PagedResult {
            items: self.items.into_iter().map(f).collect(),
            row_count: self.row_count,
            current_page: self.current_page,
            page_size: self.page_size,
        }
    }
}
