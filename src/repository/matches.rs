use std::fmt;
use std::sync::Arc;

use crate::error::{RepositoryResult, StoreError};
use crate::query::Filter;

type Source<T> = Arc<dyn Fn(&Filter<T>) -> Result<Vec<T>, StoreError> + Send + Sync>;

/// A deferred query returned by [`ReadRepository::find`](super::ReadRepository::find).
///
/// Holds the filter and a handle to the store. Iterating runs the query;
/// iterating again runs it again and sees whatever was saved in between.
pub struct Matches<T> {
    filter: Filter<T>,
    source: Source<T>,
}

impl<T> Clone for Matches<T> {
    fn clone(&self) -> Self {
        Self {
            filter: self.filter.clone(),
            source: Arc::clone(&self.source),
        }
    }
}

impl<T> fmt::Debug for Matches<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matches")
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

impl<T> Matches<T> {
    pub fn new<F>(filter: Filter<T>, source: F) -> Self
    where
        F: Fn(&Filter<T>) -> Result<Vec<T>, StoreError> + Send + Sync + 'static,
    {
        Self {
            filter,
            source: Arc::new(source),
        }
    }

    pub fn filter(&self) -> &Filter<T> {
        &self.filter
    }

    /// Run the query and iterate its results.
    pub fn iter(&self) -> RepositoryResult<std::vec::IntoIter<T>> {
        Ok(self.to_vec()?.into_iter())
    }

    /// Run the query and collect its results.
    pub fn to_vec(&self) -> RepositoryResult<Vec<T>> {
        Ok((self.source)(&self.filter)?)
    }
}
