use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::entity::Entity;
use crate::error::StoreError;
use crate::query::{Filter, OrderBy};

/// Cancellable asynchronous store operations.
///
/// Mirrors [`Store`](super::Store) one-to-one. Each call receives the
/// caller's cancellation token; honoring it is entirely up to the store.
#[async_trait]
pub trait AsyncStore: Send + Sync {
    async fn add_async<T: Entity>(
        &self,
        entity: &T,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError>;

    async fn add_range_async<T: Entity>(
        &self,
        entities: &[T],
        cancel: &CancellationToken,
    ) -> Result<(), StoreError>;

    async fn find_by_key_async<T: Entity>(
        &self,
        key: &T::Key,
        cancel: &CancellationToken,
    ) -> Result<Option<T>, StoreError>;

    async fn query_async<T: Entity>(
        &self,
        filter: &Filter<T>,
        cancel: &CancellationToken,
    ) -> Result<Vec<T>, StoreError>;

    async fn any_async<T: Entity>(
        &self,
        filter: &Filter<T>,
        cancel: &CancellationToken,
    ) -> Result<bool, StoreError>;

    async fn first_match_async<T: Entity>(
        &self,
        filter: &Filter<T>,
        cancel: &CancellationToken,
    ) -> Result<Option<T>, StoreError>;

    async fn all_async<T: Entity>(&self, cancel: &CancellationToken)
        -> Result<Vec<T>, StoreError>;

    async fn count_async<T: Entity>(
        &self,
        filter: Option<&Filter<T>>,
        cancel: &CancellationToken,
    ) -> Result<usize, StoreError>;

    async fn order_then_skip_take_async<T: Entity>(
        &self,
        filter: Option<&Filter<T>>,
        order: Option<&OrderBy<T>>,
        skip: usize,
        take: usize,
        cancel: &CancellationToken,
    ) -> Result<Vec<T>, StoreError>;

    async fn save_async(&self, cancel: &CancellationToken) -> Result<usize, StoreError>;

    async fn begin_transaction_async(&self, cancel: &CancellationToken) -> Result<(), StoreError>;

    async fn commit_transaction_async(&self, cancel: &CancellationToken)
        -> Result<(), StoreError>;

    async fn rollback_transaction_async(
        &self,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError>;

    async fn dispose_async(&self, cancel: &CancellationToken) -> Result<(), StoreError>;
}
