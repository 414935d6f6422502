use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use log::trace;
use tokio_util::sync::CancellationToken;

use super::{Matches, ReadRepository, WriteRepository};
use crate::entity::Entity;
use crate::error::{RepositoryError, RepositoryResult};
use crate::options::RepositoryOptions;
use crate::paging::{PageWindow, PagedResult};
use crate::query::{Filter, OrderBy};
use crate::store::PersistentStore;

/// Repository for entities of type `T` backed by store `S`.
///
/// Holds nothing but the shared store handle and options, so two instances
/// over the same handle behave identically.
pub struct GenericRepository<S, T> {
    store: Arc<S>,
    options: RepositoryOptions,
    _marker: PhantomData<fn() -> T>,
}

impl<S, T> GenericRepository<S, T>
where
    S: PersistentStore + 'static,
    T: Entity,
{
    pub fn new(store: Arc<S>, options: RepositoryOptions) -> Self {
        Self {
            store,
            options,
            _marker: PhantomData,
        }
    }

    fn window(&self, page: i64, page_size: i64) -> PageWindow {
        PageWindow::normalize(page, page_size, self.options.fallback_page_size())
    }
}

fn not_found<T: Entity>(key: &T::Key) -> RepositoryError {
    RepositoryError::NotFound {
        collection: T::COLLECTION,
        key: format!("{:?}", key),
    }
}

fn no_match<T: Entity>() -> RepositoryError {
    RepositoryError::NoMatch {
        collection: T::COLLECTION,
    }
}

#[async_trait]
impl<S, T> ReadRepository<T> for GenericRepository<S, T>
where
    S: PersistentStore + 'static,
    T: Entity,
{
    fn get_by_id(&self, key: &T::Key) -> RepositoryResult<T> {
        self.store
            .find_by_key(key)?
            .ok_or_else(|| not_found::<T>(key))
    }

    async fn get_by_id_async(
        &self,
        key: &T::Key,
        cancel: &CancellationToken,
    ) -> RepositoryResult<T> {
        self.store
            .find_by_key_async(key, cancel)
            .await?
            .ok_or_else(|| not_found::<T>(key))
    }

    fn find(&self, filter: Filter<T>) -> Matches<T> {
        let store = Arc::clone(&self.store);
        Matches::new(filter, move |filter| store.query(filter))
    }

    async fn find_async(
        &self,
        filter: &Filter<T>,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<T>> {
        Ok(self.store.query_async(filter, cancel).await?)
    }

    fn exists(&self, filter: &Filter<T>) -> RepositoryResult<bool> {
        Ok(self.store.any(filter)?)
    }

    async fn exists_async(
        &self,
        filter: &Filter<T>,
        cancel: &CancellationToken,
    ) -> RepositoryResult<bool> {
        Ok(self.store.any_async(filter, cancel).await?)
    }

    fn find_first_or_fail(&self, filter: &Filter<T>) -> RepositoryResult<T> {
        self.find_first(filter)?.ok_or_else(no_match::<T>)
    }

    async fn find_first_or_fail_async(
        &self,
        filter: &Filter<T>,
        cancel: &CancellationToken,
    ) -> RepositoryResult<T> {
        self.find_first_async(filter, cancel)
            .await?
            .ok_or_else(no_match::<T>)
    }

    fn find_first(&self, filter: &Filter<T>) -> RepositoryResult<Option<T>> {
        Ok(self.store.first_match(filter)?)
    }

    async fn find_first_async(
        &self,
        filter: &Filter<T>,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Option<T>> {
        Ok(self.store.first_match_async(filter, cancel).await?)
    }

    fn count(&self, filter: Option<&Filter<T>>) -> RepositoryResult<usize> {
        Ok(self.store.count(filter)?)
    }

    async fn count_async(
        &self,
        filter: Option<&Filter<T>>,
        cancel: &CancellationToken,
    ) -> RepositoryResult<usize> {
        Ok(self.store.count_async(filter, cancel).await?)
    }

    fn get_all(&self) -> RepositoryResult<Vec<T>> {
        Ok(self.store.all()?)
    }

    async fn get_all_async(&self, cancel: &CancellationToken) -> RepositoryResult<Vec<T>> {
        Ok(self.store.all_async(cancel).await?)
    }

    fn get_paged_result(
        &self,
        page: i64,
        page_size: i64,
        filter: Option<&Filter<T>>,
        order_by: Option<&OrderBy<T>>,
    ) -> RepositoryResult<PagedResult<T>> {
        let window = self.window(page, page_size);

        let row_count = self.store.count(filter)?;
        if row_count == 0 {
            return Ok(PagedResult::empty(window));
        }

        let items =
            self.store
                .order_then_skip_take(filter, order_by, window.skip(), window.take())?;
        trace!(
            "{} page {} (size {}): {} of {} row(s)",
            T::COLLECTION,
            window.page(),
            window.page_size(),
            items.len(),
            row_count
        );
        Ok(PagedResult::new(items, row_count, window))
    }

    async fn get_paged_result_async(
        &self,
        page: i64,
        page_size: i64,
        filter: Option<&Filter<T>>,
        order_by: Option<&OrderBy<T>>,
        cancel: &CancellationToken,
    ) -> RepositoryResult<PagedResult<T>> {
        let window = self.window(page, page_size);

        let row_count = self.store.count_async(filter, cancel).await?;
        if row_count == 0 {
            return Ok(PagedResult::empty(window));
        }

        let items = self
            .store
            .order_then_skip_take_async(filter, order_by, window.skip(), window.take(), cancel)
            .await?;
        trace!(
            "{} page {} (size {}): {} of {} row(s)",
            T::COLLECTION,
            window.page(),
            window.page_size(),
            items.len(),
            row_count
        );
        Ok(PagedResult::new(items, row_count, window))
    }
}

#[async_trait]
impl<S, T> WriteRepository<T> for GenericRepository<S, T>
where
    S: PersistentStore + 'static,
    T: Entity,
{
    fn add(&self, entity: &T) -> RepositoryResult<()> {
        Ok(self.store.add(entity)?)
    }

    async fn add_async(&self, entity: &T, cancel: &CancellationToken) -> RepositoryResult<()> {
        Ok(self.store.add_async(entity, cancel).await?)
    }

    fn add_range(&self, entities: &[T]) -> RepositoryResult<()> {
        Ok(self.store.add_range(entities)?)
    }

    async fn add_range_async(
        &self,
        entities: &[T],
        cancel: &CancellationToken,
    ) -> RepositoryResult<()> {
        Ok(self.store.add_range_async(entities, cancel).await?)
    }

    fn update(&self, entity: &T) -> RepositoryResult<()> {
        Ok(self.store.update(entity)?)
    }

    fn update_range(&self, entities: &[T]) -> RepositoryResult<()> {
        Ok(self.store.update_range(entities)?)
    }

    fn remove(&self, entity: &T) -> RepositoryResult<()> {
        Ok(self.store.remove(entity)?)
    }

    fn remove_range(&self, entities: &[T]) -> RepositoryResult<()> {
        Ok(self.store.remove_range(entities)?)
    }
}
