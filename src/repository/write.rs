use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::entity::Entity;
use crate::error::RepositoryResult;

/// Write capability over one entity collection.
///
/// Every method only stages work; nothing is persisted until the owning
/// unit of work saves.
#[async_trait]
pub trait WriteRepository<T: Entity>: Send + Sync {
    fn add(&self, entity: &T) -> RepositoryResult<()>;

    async fn add_async(&self, entity: &T, cancel: &CancellationToken) -> RepositoryResult<()>;

    fn add_range(&self, entities: &[T]) -> RepositoryResult<()>;

    async fn add_range_async(
        &self,
        entities: &[T],
        cancel: &CancellationToken,
    ) -> RepositoryResult<()>;

    fn update(&self, entity: &T) -> RepositoryResult<()>;

    fn update_range(&self, entities: &[T]) -> RepositoryResult<()>;

    fn remove(&self, entity: &T) -> RepositoryResult<()>;

    fn remove_range(&self, entities: &[T]) -> RepositoryResult<()>;
}
