use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use log::{debug, trace};
use tokio_util::sync::CancellationToken;

use super::database::InMemoryDatabase;
use super::table::{self, Change, Tables};
use crate::entity::Entity;
use crate::error::StoreError;
use crate::query::{Filter, OrderBy};
use crate::store::{AsyncStore, Store};

/// One connection to an [`InMemoryDatabase`].
///
/// Reads see committed data, or this connection's transaction overlay while a
/// transaction is open. Staged changes are private to the connection and
/// invisible to reads until saved.
pub struct InMemoryStore {
    database: InMemoryDatabase,
    session: Mutex<Session>,
}

#[derive(Default)]
struct Session {
    staged: Vec<Change>,
    transaction: Option<Transaction>,
    disposed: bool,
}

/// Saved-but-uncommitted work: a private copy of the data plus the changes
/// to replay onto the shared database on commit.
struct Transaction {
    overlay: Tables,
    log: Vec<Change>,
}

impl InMemoryStore {
    pub(crate) fn new(database: InMemoryDatabase) -> Self {
        Self {
            database,
            session: Mutex::new(Session::default()),
        }
    }

    /// The database this connection talks to.
    pub fn database(&self) -> &InMemoryDatabase {
        &self.database
    }

    /// Number of staged, unsaved changes.
    pub fn pending_changes(&self) -> Result<usize, StoreError> {
        Ok(self.session()?.staged.len())
    }

    pub fn in_transaction(&self) -> Result<bool, StoreError> {
        Ok(self.session()?.transaction.is_some())
    }

    pub fn is_disposed(&self) -> bool {
        self.session
            .lock()
            .map(|session| session.disposed)
            .unwrap_or(true)
    }

    fn session(&self) -> Result<MutexGuard<'_, Session>, StoreError> {
        let session = self
            .session
            .lock()
            .map_err(|_| StoreError::LockPoisoned("session"))?;
        if session.disposed {
            return Err(StoreError::Disposed);
        }
        Ok(session)
    }

    fn stage(&self, changes: Vec<Change>) -> Result<(), StoreError> {
        let mut session = self.session()?;
        trace!("staging {} change(s)", changes.len());
        session.staged.extend(changes);
        Ok(())
    }

    fn with_tables<R>(&self, f: impl FnOnce(&Tables) -> R) -> Result<R, StoreError> {
        let session = self.session()?;
        match &session.transaction {
            Some(tx) => Ok(f(&tx.overlay)),
            None => self.database.read(f),
        }
    }

    /// Every row of `T`, decoded, in store order.
    fn load<T: Entity>(&self) -> Result<Vec<T>, StoreError> {
        self.with_tables(|tables| match tables.get(T::COLLECTION) {
            Some(rows) => rows.rows().map(table::decode).collect(),
            None => Ok(Vec::new()),
        })?
    }
}

impl Store for InMemoryStore {
    fn add<T: Entity>(&self, entity: &T) -> Result<(), StoreError> {
        self.stage(vec![Change::add(entity)?])
    }

    fn add_range<T: Entity>(&self, entities: &[T]) -> Result<(), StoreError> {
        let changes = entities
            .iter()
            .map(Change::add)
            .collect::<Result<Vec<_>, _>>()?;
        self.stage(changes)
    }

    fn update<T: Entity>(&self, entity: &T) -> Result<(), StoreError> {
        self.stage(vec![Change::update(entity)?])
    }

    fn update_range<T: Entity>(&self, entities: &[T]) -> Result<(), StoreError> {
        let changes = entities
            .iter()
            .map(Change::update)
            .collect::<Result<Vec<_>, _>>()?;
        self.stage(changes)
    }

    fn remove<T: Entity>(&self, entity: &T) -> Result<(), StoreError> {
        self.stage(vec![Change::remove(entity)?])
    }

    fn remove_range<T: Entity>(&self, entities: &[T]) -> Result<(), StoreError> {
        let changes = entities
            .iter()
            .map(Change::remove)
            .collect::<Result<Vec<_>, _>>()?;
        self.stage(changes)
    }

    fn find_by_key<T: Entity>(&self, key: &T::Key) -> Result<Option<T>, StoreError> {
        let key = table::encode_key::<T>(key)?;
        self.with_tables(|tables| {
            tables
                .get(T::COLLECTION)
                .and_then(|rows| rows.get(&key))
                .map(table::decode::<T>)
                .transpose()
        })?
    }

    fn query<T: Entity>(&self, filter: &Filter<T>) -> Result<Vec<T>, StoreError> {
        let mut rows = self.load::<T>()?;
        rows.retain(|row| filter.matches(row));
        Ok(rows)
    }

    fn any<T: Entity>(&self, filter: &Filter<T>) -> Result<bool, StoreError> {
        Ok(self.load::<T>()?.iter().any(|row| filter.matches(row)))
    }

    fn first_match<T: Entity>(&self, filter: &Filter<T>) -> Result<Option<T>, StoreError> {
        Ok(self
            .load::<T>()?
            .into_iter()
            .find(|row| filter.matches(row)))
    }

    fn all<T: Entity>(&self) -> Result<Vec<T>, StoreError> {
        self.load::<T>()
    }

    fn count<T: Entity>(&self, filter: Option<&Filter<T>>) -> Result<usize, StoreError> {
        match filter {
            Some(filter) => Ok(self.query(filter)?.len()),
            None => self.with_tables(|tables| tables.get(T::COLLECTION).map_or(0, |t| t.len())),
        }
    }

    fn order_then_skip_take<T: Entity>(
        &self,
        filter: Option<&Filter<T>>,
        order: Option<&OrderBy<T>>,
        skip: usize,
        take: usize,
    ) -> Result<Vec<T>, StoreError> {
        let mut rows = match filter {
            Some(filter) => self.query(filter)?,
            None => self.load::<T>()?,
        };
        if let Some(order) = order {
            order.sort(&mut rows);
        }
        Ok(rows.into_iter().skip(skip).take(take).collect())
    }

    fn save(&self) -> Result<usize, StoreError> {
        let mut guard = self.session()?;
        let session = &mut *guard;
        if session.staged.is_empty() {
            return Ok(0);
        }

        let affected = match &mut session.transaction {
            Some(tx) => {
                let affected = table::apply(&mut tx.overlay, &session.staged)?;
                tx.log.extend(session.staged.iter().cloned());
                affected
            }
            None => self.database.apply(&session.staged)?,
        };
        session.staged.clear();

        debug!("saved {} change(s)", affected);
        Ok(affected)
    }

    fn begin_transaction(&self) -> Result<(), StoreError> {
        let mut session = self.session()?;
        if session.transaction.is_some() {
            return Err(StoreError::TransactionAlreadyActive);
        }
        session.transaction = Some(Transaction {
            overlay: self.database.snapshot()?,
            log: Vec::new(),
        });
        debug!("transaction started");
        Ok(())
    }

    fn commit_transaction(&self) -> Result<(), StoreError> {
        let mut session = self.session()?;
        let tx = session
            .transaction
            .take()
            .ok_or(StoreError::NoActiveTransaction)?;
        let applied = self.database.apply(&tx.log)?;
        debug!("transaction committed ({} change(s))", applied);
        Ok(())
    }

    fn rollback_transaction(&self) -> Result<(), StoreError> {
        let mut session = self.session()?;
        let tx = session
            .transaction
            .take()
            .ok_or(StoreError::NoActiveTransaction)?;
        debug!("transaction rolled back ({} change(s) discarded)", tx.log.len());
        Ok(())
    }

    fn dispose(&self) -> Result<(), StoreError> {
        let mut session = self.session()?;
        session.disposed = true;
        session.staged.clear();
        session.transaction = None;
        debug!("store handle disposed");
        Ok(())
    }
}

/// Simulated store round trip: the single suspension point of every async call.
async fn round_trip(cancel: &CancellationToken) -> Result<(), StoreError> {
    if cancel.is_cancelled() {
        return Err(StoreError::Cancelled);
    }
    tokio::task::yield_now().await;
    if cancel.is_cancelled() {
        return Err(StoreError::Cancelled);
    }
    Ok(())
}

#[async_trait]
impl AsyncStore for InMemoryStore {
    async fn add_async<T: Entity>(
        &self,
        entity: &T,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        round_trip(cancel).await?;
        self.add(entity)
    }

    async fn add_range_async<T: Entity>(
        &self,
        entities: &[T],
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        round_trip(cancel).await?;
        self.add_range(entities)
    }

    async fn find_by_key_async<T: Entity>(
        &self,
        key: &T::Key,
        cancel: &CancellationToken,
    ) -> Result<Option<T>, StoreError> {
        round_trip(cancel).await?;
        self.find_by_key(key)
    }

    async fn query_async<T: Entity>(
        &self,
        filter: &Filter<T>,
        cancel: &CancellationToken,
    ) -> Result<Vec<T>, StoreError> {
        round_trip(cancel).await?;
        self.query(filter)
    }

    async fn any_async<T: Entity>(
        &self,
        filter: &Filter<T>,
        cancel: &CancellationToken,
    ) -> Result<bool, StoreError> {
        round_trip(cancel).await?;
        self.any(filter)
    }

    async fn first_match_async<T: Entity>(
        &self,
        filter: &Filter<T>,
        cancel: &CancellationToken,
    ) -> Result<Option<T>, StoreError> {
        round_trip(cancel).await?;
        self.first_match(filter)
    }

    async fn all_async<T: Entity>(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<T>, StoreError> {
        round_trip(cancel).await?;
        self.all()
    }

    async fn count_async<T: Entity>(
        &self,
        filter: Option<&Filter<T>>,
        cancel: &CancellationToken,
    ) -> Result<usize, StoreError> {
        round_trip(cancel).await?;
        self.count(filter)
    }

    async fn order_then_skip_take_async<T: Entity>(
        &self,
        filter: Option<&Filter<T>>,
        order: Option<&OrderBy<T>>,
        skip: usize,
        take: usize,
        cancel: &CancellationToken,
    ) -> Result<Vec<T>, StoreError> {
        round_trip(cancel).await?;
        self.order_then_skip_take(filter, order, skip, take)
    }

    async fn save_async(&self, cancel: &CancellationToken) -> Result<usize, StoreError> {
        round_trip(cancel).await?;
        self.save()
    }

    async fn begin_transaction_async(&self, cancel: &CancellationToken) -> Result<(), StoreError> {
        round_trip(cancel).await?;
        self.begin_transaction()
    }

    async fn commit_transaction_async(
        &self,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        round_trip(cancel).await?;
        self.commit_transaction()
    }

    async fn rollback_transaction_async(
        &self,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        round_trip(cancel).await?;
        self.rollback_transaction()
    }

    async fn dispose_async(&self, cancel: &CancellationToken) -> Result<(), StoreError> {
        round_trip(cancel).await?;
        self.dispose()
    }
}
