//! Entity - the record type a repository manages.

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

/// Trait for types that can be stored through a repository.
///
/// The data-access layer never looks inside an entity beyond its key.
/// Everything else (filtering, ordering) is expressed through caller-supplied
/// [`Filter`](crate::Filter) and [`OrderBy`](crate::OrderBy) values.
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize)]
/// struct TestRow {
///     id: i32,
///     name: String,
/// }
///
/// impl Entity for TestRow {
///     type Key = i32;
///     const COLLECTION: &'static str = "test_rows";
///     fn key(&self) -> i32 {
///         self.id
///     }
/// }
/// ```
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Primary key type.
    type Key: Serialize + Clone + Eq + Debug + Send + Sync + 'static;

    /// The collection name for this entity type (e.g., "users", "test_rows").
    /// Maps to a table in SQL, a collection in a document store, a key prefix in KV stores, etc.
    const COLLECTION: &'static str;

    /// Returns the primary key of this entity.
    fn key(&self) -> Self::Key;
}
