use std::sync::Arc;

use log::debug;
use tokio_util::sync::CancellationToken;

use super::registry::Registry;
use crate::entity::Entity;
use crate::error::{RepositoryError, RepositoryResult};
use crate::options::RepositoryOptions;
use crate::repository::{GenericRepository, RepositoryPair};
use crate::store::PersistentStore;

/// Coordinates the repositories of one logical operation over one store handle.
///
/// Holds no transaction state of its own: begin, commit and rollback go
/// straight to the store, and misuse (commit without begin, ...) is whatever
/// the store reports.
///
/// Not meant to be shared between logical operations. The repository cache
/// is the only part that tolerates concurrent callers.
pub struct UnitOfWork<S> {
    store: Arc<S>,
    options: RepositoryOptions,
    repositories: Registry,
}

impl<S: PersistentStore + 'static> UnitOfWork<S> {
    pub fn new(store: S) -> Self {
        Self::with_handle(Arc::new(store))
    }

    /// Build from a shared handle that may be absent.
    ///
    /// Fails with `InvalidArgument` when there is no handle.
    pub fn from_shared(store: Option<Arc<S>>) -> RepositoryResult<Self> {
        store
            .map(Self::with_handle)
            .ok_or(RepositoryError::InvalidArgument("store"))
    }

    fn with_handle(store: Arc<S>) -> Self {
        Self {
            store,
            options: RepositoryOptions::default(),
            repositories: Registry::default(),
        }
    }

    /// Replace the options used by repositories created from now on.
    pub fn with_options(mut self, options: RepositoryOptions) -> Self {
        self.options = options;
        self.repositories = Registry::default();
        self
    }

    pub fn options(&self) -> &RepositoryOptions {
        &self.options
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The repository pair for `T`, created on first use and cached for the
    /// lifetime of this unit of work.
    pub fn repository<T: Entity>(&self) -> RepositoryPair<T> {
        self.repositories.get_or_create(|| {
            debug!("creating repository for {}", T::COLLECTION);
            RepositoryPair::new(Arc::new(GenericRepository::<S, T>::new(
                Arc::clone(&self.store),
                self.options.clone(),
            )))
        })
    }

    /// Flush staged changes. Returns the number of affected rows.
    pub fn save_changes(&self) -> RepositoryResult<usize> {
        Ok(self.store.save()?)
    }

    pub async fn save_changes_async(&self, cancel: &CancellationToken) -> RepositoryResult<usize> {
        Ok(self.store.save_async(cancel).await?)
    }

    pub fn begin_transaction(&self) -> RepositoryResult<()> {
        Ok(self.store.begin_transaction()?)
    }

    pub async fn begin_transaction_async(&self, cancel: &CancellationToken) -> RepositoryResult<()> {
        Ok(self.store.begin_transaction_async(cancel).await?)
    }

    pub fn commit_transaction(&self) -> RepositoryResult<()> {
        Ok(self.store.commit_transaction()?)
    }

    pub async fn commit_transaction_async(
        &self,
        cancel: &CancellationToken,
    ) -> RepositoryResult<()> {
        Ok(self.store.commit_transaction_async(cancel).await?)
    }

    pub fn rollback_transaction(&self) -> RepositoryResult<()> {
        Ok(self.store.rollback_transaction()?)
    }

    pub async fn rollback_transaction_async(
        &self,
        cancel: &CancellationToken,
    ) -> RepositoryResult<()> {
        Ok(self.store.rollback_transaction_async(cancel).await?)
    }

    /// Release the store handle. Consumes the unit of work; cached
    /// repositories go with it.
    pub fn dispose(self) -> RepositoryResult<()> {
        debug!(
            "disposing unit of work ({} cached repositories)",
            self.repositories.len()
        );
        Ok(self.store.dispose()?)
    }

    pub async fn dispose_async(self, cancel: &CancellationToken) -> RepositoryResult<()> {
        debug!(
            "disposing unit of work ({} cached repositories)",
            self.repositories.len()
        );
        Ok(self.store.dispose_async(cancel).await?)
    }
}
