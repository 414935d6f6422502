use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::entity::Entity;
use crate::error::{RepositoryError, RepositoryResult};
use crate::paging::PagedResult;
use crate::store::PersistentStore;
use crate::unit_of_work::UnitOfWork;

/// Application-facing reads over a shared unit of work.
pub struct EntityRepository<S> {
    unit_of_work: Arc<UnitOfWork<S>>,
}

impl<S> Clone for EntityRepository<S> {
    fn clone(&self) -> Self {
        Self {
            unit_of_work: Arc::clone(&self.unit_of_work),
        }
    }
}

impl<S: PersistentStore + 'static> EntityRepository<S> {
    pub fn new(unit_of_work: Option<Arc<UnitOfWork<S>>>) -> RepositoryResult<Self> {
        let unit_of_work = unit_of_work.ok_or(RepositoryError::InvalidArgument("unit_of_work"))?;
        Ok(Self { unit_of_work })
    }

    pub fn unit_of_work(&self) -> &UnitOfWork<S> {
        &self.unit_of_work
    }

    /// Every `T` in store order.
    pub async fn get_all_async<T: Entity>(
        &self,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<T>> {
        self.unit_of_work
            .repository::<T>()
            .read
            .get_all_async(cancel)
            .await
    }

    pub async fn get_page_async<T: Entity>(
        &self,
        page: i64,
        page_size: i64,
        cancel: &CancellationToken,
    ) -> RepositoryResult<PagedResult<T>> {
        self.unit_of_work
            .repository::<T>()
            .read
            .get_paged_result_async(page, page_size, None, None, cancel)
            .await
    }
}
