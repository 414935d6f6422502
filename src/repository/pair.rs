use std::fmt;
use std::sync::Arc;

use super::{ReadRepository, WriteRepository};
use crate::entity::Entity;

/// The `(read, write)` capabilities for one entity type.
///
/// Both handles point at the same repository object. Cloning a pair clones
/// the handles, never the repository.
pub struct RepositoryPair<T: Entity> {
    pub read: Arc<dyn ReadRepository<T>>,
    pub write: Arc<dyn WriteRepository<T>>,
}

impl<T: Entity> Clone for RepositoryPair<T> {
    fn clone(&self) -> Self {
        Self {
            read: Arc::clone(&self.read),
            write: Arc::clone(&self.write),
        }
    }
}

impl<T: Entity> fmt::Debug for RepositoryPair<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepositoryPair")
            .field("collection", &T::COLLECTION)
            .field("read", &Arc::as_ptr(&self.read).cast::<()>())
            .field("write", &Arc::as_ptr(&self.write).cast::<()>())
            .finish()
    }
}

impl<T: Entity> RepositoryPair<T> {
    pub fn new<R>(repository: Arc<R>) -> Self
    where
        R: ReadRepository<T> + WriteRepository<T> + 'static,
    {
        let read: Arc<dyn ReadRepository<T>> = repository.clone();
        let write: Arc<dyn WriteRepository<T>> = repository;
        Self { read, write }
    }

    /// True when both handles refer to the same objects as `other`'s.
    pub fn same_as(&self, other: &Self) -> bool {
        same_object(&self.read, &other.read) && same_object(&self.write, &other.write)
    }

    pub fn into_parts(self) -> (Arc<dyn ReadRepository<T>>, Arc<dyn WriteRepository<T>>) {
        (self.read, self.write)
    }
}

/// Address comparison that ignores trait-object metadata.
fn same_object<A: ?Sized, B: ?Sized>(a: &Arc<A>, b: &Arc<B>) -> bool {
    Arc::as_ptr(a).cast::<()>() == Arc::as_ptr(b).cast::<()>()
}
