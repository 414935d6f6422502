use std::sync::{Arc, RwLock};

use log::debug;

use super::session::InMemoryStore;
use super::table::{self, Change, Tables};
use crate::entity::Entity;
use crate::error::StoreError;

/// Shared in-memory data behind any number of [`InMemoryStore`] connections.
///
/// Rows are stored as JSON bytes keyed by `"COLLECTION" -> key`, in insertion
/// order. Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryDatabase {
    /// Create a new empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new connection (store handle) to this database.
    pub fn connect(&self) -> InMemoryStore {
        InMemoryStore::new(self.clone())
    }

    /// Write entities directly, bypassing staging. Returns the number inserted.
    pub fn seed<T: Entity>(&self, entities: &[T]) -> Result<usize, StoreError> {
        let changes = entities
            .iter()
            .map(Change::add)
            .collect::<Result<Vec<_>, _>>()?;
        let seeded = self.apply(&changes)?;
        debug!("seeded {} row(s) into {}", seeded, T::COLLECTION);
        Ok(seeded)
    }

    /// Number of committed rows of type `T`.
    pub fn row_count<T: Entity>(&self) -> Result<usize, StoreError> {
        self.read(|tables| tables.get(T::COLLECTION).map_or(0, |t| t.len()))
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&Tables) -> R) -> Result<R, StoreError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(f(&tables))
    }

    /// A private copy of the current data.
    pub(crate) fn snapshot(&self) -> Result<Tables, StoreError> {
        self.read(Tables::clone)
    }

    /// Apply a batch atomically. Returns the number of affected rows.
    pub(crate) fn apply(&self, changes: &[Change]) -> Result<usize, StoreError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;
        table::apply(&mut tables, changes)
    }
}
