/// A normalized `(page, page_size)` request with its skip/take arithmetic.
///
/// Both fields are always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    page: usize,
    page_size: usize,
}

impl PageWindow {
    /// Clamp a raw request: `page <= 0` becomes 1, `page_size <= 0` becomes
    /// `fallback_page_size`.
    pub fn normalize(page: i64, page_size: i64, fallback_page_size: usize) -> Self {
        Self {
            page: positive(page).unwrap_or(1),
            page_size: positive(page_size).unwrap_or(fallback_page_size.max(1)),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Rows before this page. Saturates instead of overflowing for absurd pages.
    pub fn skip(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn take(&self) -> usize {
        self.page_size
    }
}

fn positive(value: i64) -> Option<usize> {
    if value <= 0 {
        return None;
    }
    Some(usize::try_from(value).unwrap_or(usize::MAX))
}
