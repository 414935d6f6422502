//! RepositoryOptions - tunables shared by every repository a unit of work creates.

use serde::{Deserialize, Serialize};

use crate::paging::DEFAULT_PAGE_SIZE;

/// Options applied to repositories created by a [`UnitOfWork`](crate::UnitOfWork).
///
/// Deserializable so hosts can keep it in their own configuration files:
///
/// ```ignore
/// let options = RepositoryOptions::from_json(r#"{ "defaultPageSize": 25 }"#)?;
/// let uow = UnitOfWork::new(store).with_options(options);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RepositoryOptions {
    /// Page size used when a paging call passes a non-positive size.
    pub default_page_size: usize,
}

impl Default for RepositoryOptions {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl RepositoryOptions {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The fallback page size, never zero.
    pub fn fallback_page_size(&self) -> usize {
        if self.default_page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            self.default_page_size
        }
    }
}
