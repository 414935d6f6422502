use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Type-keyed cache holding at most one value per type.
///
/// Entries are inserted whole and never mutated, so a poisoned lock still
/// guards a consistent map and is recovered rather than reported.
#[derive(Default)]
pub(crate) struct Registry {
    entries: RwLock<HashMap<TypeId, Box<dyn Any + Send + Sync>>>,
}

impl Registry {
    pub(crate) fn get<V: Clone + 'static>(&self) -> Option<V> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(&TypeId::of::<V>())
            .and_then(|entry| entry.downcast_ref::<V>())
            .cloned()
    }

    /// Return the cached `V`, building and publishing one on first use.
    ///
    /// `create` runs without the lock held. Two callers racing on the same
    /// type may each build a value; the first insert wins and both callers
    /// get the published one.
    pub(crate) fn get_or_create<V, F>(&self, create: F) -> V
    where
        V: Clone + Send + Sync + 'static,
        F: FnOnce() -> V,
    {
        if let Some(cached) = self.get::<V>() {
            return cached;
        }

        let created = create();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries
            .entry(TypeId::of::<V>())
            .or_insert_with(|| Box::new(created.clone()))
            .downcast_ref::<V>()
            .cloned()
            .unwrap_or(created)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
