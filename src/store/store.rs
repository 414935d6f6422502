use crate::entity::Entity;
use crate::error::StoreError;
use crate::query::{Filter, OrderBy};

/// Synchronous store operations.
///
/// Staging calls (`add`, `update`, `remove` and their range forms) record
/// intent only; nothing is persisted until [`save`](Store::save).
pub trait Store: Send + Sync {
    /// Stage an insertion.
    fn add<T: Entity>(&self, entity: &T) -> Result<(), StoreError>;

    /// Stage several insertions, in order.
    fn add_range<T: Entity>(&self, entities: &[T]) -> Result<(), StoreError>;

    /// Stage a modification of an existing entity.
    fn update<T: Entity>(&self, entity: &T) -> Result<(), StoreError>;

    fn update_range<T: Entity>(&self, entities: &[T]) -> Result<(), StoreError>;

    /// Stage a deletion.
    fn remove<T: Entity>(&self, entity: &T) -> Result<(), StoreError>;

    fn remove_range<T: Entity>(&self, entities: &[T]) -> Result<(), StoreError>;

    /// Look up an entity by primary key. Returns None if not found.
    fn find_by_key<T: Entity>(&self, key: &T::Key) -> Result<Option<T>, StoreError>;

    /// All entities matching the filter, in store order.
    fn query<T: Entity>(&self, filter: &Filter<T>) -> Result<Vec<T>, StoreError>;

    /// Whether at least one entity matches.
    fn any<T: Entity>(&self, filter: &Filter<T>) -> Result<bool, StoreError>;

    /// First entity (in store order) matching the filter.
    fn first_match<T: Entity>(&self, filter: &Filter<T>) -> Result<Option<T>, StoreError>;

    fn all<T: Entity>(&self) -> Result<Vec<T>, StoreError>;

    /// Number of entities matching the filter, or all of them without one.
    fn count<T: Entity>(&self, filter: Option<&Filter<T>>) -> Result<usize, StoreError>;

    /// Filter, then order (store order when `order` is None), then skip/take.
    fn order_then_skip_take<T: Entity>(
        &self,
        filter: Option<&Filter<T>>,
        order: Option<&OrderBy<T>>,
        skip: usize,
        take: usize,
    ) -> Result<Vec<T>, StoreError>;

    /// Flush staged changes. Returns the number of affected rows.
    fn save(&self) -> Result<usize, StoreError>;

    fn begin_transaction(&self) -> Result<(), StoreError>;

    fn commit_transaction(&self) -> Result<(), StoreError>;

    fn rollback_transaction(&self) -> Result<(), StoreError>;

    /// Release the handle. Staged changes and any open transaction are discarded.
    fn dispose(&self) -> Result<(), StoreError>;
}
