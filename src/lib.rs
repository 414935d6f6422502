//! Generic Unit-of-Work and Repository data-access layer.
//!
//! A [`UnitOfWork`] wraps one [`PersistentStore`] handle and hands out one
//! cached [`RepositoryPair`] per entity type. Repositories read and stage
//! writes through the store; the unit of work saves them and drives
//! transactions. Every store-touching operation comes in a blocking form and
//! an `_async` form taking a [`CancellationToken`].
//!
//! [`InMemoryDatabase`] is the bundled store, used by the tests and handy for
//! prototyping.

mod entity;
mod error;
#[cfg(feature = "http")]
pub mod http;
mod options;
mod paging;
mod query;
mod repository;
mod service;
mod store;
mod unit_of_work;

pub use entity::Entity;
pub use error::{RepositoryError, RepositoryResult, StoreError};
pub use options::RepositoryOptions;
pub use paging::{PageWindow, PagedResult, DEFAULT_PAGE_SIZE};
pub use query::{Filter, OrderBy};
pub use repository::{GenericRepository, Matches, ReadRepository, RepositoryPair, WriteRepository};
pub use service::{EntityRepository, ListService};
pub use store::{AsyncStore, InMemoryDatabase, InMemoryStore, PersistentStore, Store};
pub use unit_of_work::UnitOfWork;

// Async operations take tokio-util's token; re-exported so callers need not depend on it.
pub use tokio_util::sync::CancellationToken;
