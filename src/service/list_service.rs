use log::debug;
use tokio_util::sync::CancellationToken;

use super::EntityRepository;
use crate::entity::Entity;
use crate::error::{RepositoryError, RepositoryResult};
use crate::store::PersistentStore;

/// Lists entities through an [`EntityRepository`].
pub struct ListService<S> {
    repository: EntityRepository<S>,
}

impl<S: PersistentStore + 'static> ListService<S> {
    pub fn new(repository: Option<EntityRepository<S>>) -> RepositoryResult<Self> {
        let repository = repository.ok_or(RepositoryError::InvalidArgument("repository"))?;
        Ok(Self { repository })
    }

    pub fn repository(&self) -> &EntityRepository<S> {
        &self.repository
    }

    pub async fn list_all<T: Entity>(&self, cancel: &CancellationToken) -> RepositoryResult<Vec<T>> {
        let items = self.repository.get_all_async::<T>(cancel).await?;
        debug!("listed {} {}", items.len(), T::COLLECTION);
        Ok(items)
    }
}
