//! Application layer - typed entity access and the list service on top of it.
//!
//! [`EntityRepository`] wraps a shared [`UnitOfWork`](crate::UnitOfWork) and
//! exposes the reads an application needs. [`ListService`] is the thin
//! service the HTTP surface calls.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use unit_of_work::{CancellationToken, EntityRepository, InMemoryDatabase, ListService, UnitOfWork};
//!
//! let uow = Arc::new(UnitOfWork::new(db.connect()));
//! let service = ListService::new(Some(EntityRepository::new(Some(uow))?))?;
//! let rows = service.list_all::<TestRow>(&CancellationToken::new()).await?;
//! ```

mod entity_repository;
mod list_service;

pub use entity_repository::EntityRepository;
pub use list_service::ListService;
