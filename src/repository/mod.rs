//! Repositories - per-entity-type read/write capabilities over a store.
//!
//! A [`GenericRepository`] binds one entity type to one store handle and
//! implements both [`ReadRepository`] and [`WriteRepository`]. Callers usually
//! receive it as a [`RepositoryPair`] from a [`UnitOfWork`](crate::UnitOfWork).
//!
//! ## Example
//!
//! ```ignore
//! let rows = uow.repository::<TestRow>();
//!
//! rows.write.add(&TestRow { id: 3, name: "Test3".into() })?;
//! uow.save_changes()?;
//!
//! let row = rows.read.get_by_id(&3)?;
//! let enabled = rows.read.find(Filter::new(|r: &TestRow| r.is_enabled));
//! for row in enabled.iter()? {
//!     println!("{}", row.name);
//! }
//! ```

mod generic;
mod matches;
mod pair;
mod read;
mod write;

pub use generic::GenericRepository;
pub use matches::Matches;
pub use pair::RepositoryPair;
pub use read::ReadRepository;
pub use write::WriteRepository;
