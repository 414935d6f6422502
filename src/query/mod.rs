//! Query building blocks - statically typed filters and orderings.
//!
//! Callers describe *what* to match and *how* to sort with plain closures
//! wrapped in [`Filter`] and [`OrderBy`]. Stores evaluate them; the
//! repository layer only forwards them.
//!
//! ## Example
//!
//! ```ignore
//! use unit_of_work::{Filter, OrderBy};
//!
//! let enabled = Filter::new(|row: &TestRow| row.is_enabled);
//! let named = Filter::new(|row: &TestRow| row.name.starts_with("Test"));
//! let order = OrderBy::desc(|row: &TestRow| row.id).then_asc(|row| row.name.clone());
//!
//! let page = read.get_paged_result(1, 20, Some(&enabled.and(named)), Some(&order))?;
//! ```

mod filter;
mod order;

pub use filter::Filter;
pub use order::OrderBy;
