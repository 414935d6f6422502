//! Persistent stores - the contract repositories execute against.
//!
//! A store holds one collection per [`Entity`](crate::Entity) type and offers
//! staging (add/update/remove), key lookup, predicate queries, counting,
//! ordered skip/take, a flush (`save`) and transaction control. Every
//! operation exists in a synchronous form ([`Store`]) and a cancellable
//! asynchronous form ([`AsyncStore`]). Anything implementing both is a
//! [`PersistentStore`].
//!
//! ## Example
//!
//! ```ignore
//! use unit_of_work::{InMemoryDatabase, Store};
//!
//! let db = InMemoryDatabase::new();
//! let store = db.connect();
//! store.add(&TestRow { id: 1, name: "Test1".into() })?;
//! assert_eq!(store.save()?, 1);
//! ```

mod async_store;
mod in_memory;
mod store;

pub use async_store::AsyncStore;
pub use in_memory::{InMemoryDatabase, InMemoryStore};
pub use store::Store;

/// Full store contract combining the sync and async capabilities.
pub trait PersistentStore: Store + AsyncStore {}

// Blanket implementation: anything implementing both halves is a PersistentStore
impl<T> PersistentStore for T where T: Store + AsyncStore {}
