//! Unit of Work - one store handle, one repository per entity type.
//!
//! A [`UnitOfWork`] is scoped to one logical operation (for example one
//! inbound request). It owns the store handle, hands out a cached
//! [`RepositoryPair`](crate::RepositoryPair) per entity type, and delegates
//! save and transaction control to the store.
//!
//! ## Example
//!
//! ```ignore
//! use unit_of_work::{InMemoryDatabase, UnitOfWork};
//!
//! let db = InMemoryDatabase::new();
//! let uow = UnitOfWork::new(db.connect());
//!
//! uow.begin_transaction()?;
//! uow.repository::<TestRow>().write.add(&row)?;
//! uow.save_changes()?;
//! uow.commit_transaction()?;
//!
//! uow.dispose()?;
//! ```

mod registry;
mod unit_of_work;

pub use unit_of_work::UnitOfWork;
