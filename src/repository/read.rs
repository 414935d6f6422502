use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::Matches;
use crate::entity::Entity;
use crate::error::RepositoryResult;
use crate::paging::PagedResult;
use crate::query::{Filter, OrderBy};

/// Read capability over one entity collection.
///
/// Synchronous methods and their `_async` twins have identical semantics; the
/// async forms forward the cancellation token to the store.
#[async_trait]
pub trait ReadRepository<T: Entity>: Send + Sync {
    /// Look up by primary key. Fails with `NotFound` when absent.
    fn get_by_id(&self, key: &T::Key) -> RepositoryResult<T>;

    async fn get_by_id_async(&self, key: &T::Key, cancel: &CancellationToken)
        -> RepositoryResult<T>;

    /// Lazy, restartable query. Nothing runs until the result is iterated,
    /// and every iteration re-runs the query.
    fn find(&self, filter: Filter<T>) -> Matches<T>;

    /// Eager query, materialized once.
    async fn find_async(
        &self,
        filter: &Filter<T>,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<T>>;

    fn exists(&self, filter: &Filter<T>) -> RepositoryResult<bool>;

    async fn exists_async(
        &self,
        filter: &Filter<T>,
        cancel: &CancellationToken,
    ) -> RepositoryResult<bool>;

    /// First match in store order. Fails with `NoMatch` when nothing matches.
    fn find_first_or_fail(&self, filter: &Filter<T>) -> RepositoryResult<T>;

    async fn find_first_or_fail_async(
        &self,
        filter: &Filter<T>,
        cancel: &CancellationToken,
    ) -> RepositoryResult<T>;

    /// First match in store order, or None.
    fn find_first(&self, filter: &Filter<T>) -> RepositoryResult<Option<T>>;

    async fn find_first_async(
        &self,
        filter: &Filter<T>,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Option<T>>;

    /// Number of matches, or of all entities without a filter.
    fn count(&self, filter: Option<&Filter<T>>) -> RepositoryResult<usize>;

    async fn count_async(
        &self,
        filter: Option<&Filter<T>>,
        cancel: &CancellationToken,
    ) -> RepositoryResult<usize>;

    /// Every entity. An empty collection is a valid result.
    fn get_all(&self) -> RepositoryResult<Vec<T>>;

    async fn get_all_async(&self, cancel: &CancellationToken) -> RepositoryResult<Vec<T>>;

    /// One page of the (optionally filtered, optionally ordered) collection.
    ///
    /// `page <= 0` is treated as 1 and `page_size <= 0` as the configured
    /// default. Without `order_by` the store decides the order.
    fn get_paged_result(
        &self,
        page: i64,
        page_size: i64,
        filter: Option<&Filter<T>>,
        order_by: Option<&OrderBy<T>>,
    ) -> RepositoryResult<PagedResult<T>>;

    async fn get_paged_result_async(
        &self,
        page: i64,
        page_size: i64,
        filter: Option<&Filter<T>>,
        order_by: Option<&OrderBy<T>>,
        cancel: &CancellationToken,
    ) -> RepositoryResult<PagedResult<T>>;
}
