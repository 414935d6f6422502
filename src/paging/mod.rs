//! Paging - page arithmetic and the page value returned by paged queries.

mod paged_result;
mod window;

pub use paged_result::PagedResult;
pub use window::PageWindow;

/// Page size used when the caller asks for a non-positive one.
pub const DEFAULT_PAGE_SIZE: usize = 10;
