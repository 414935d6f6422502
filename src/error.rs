use thiserror::Error;

/// Failure surfaced by a persistent store.
///
/// The repository layer never retries or translates these; they reach the
/// caller wrapped in [`RepositoryError::Store`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The caller's cancellation token fired before the store call completed.
    #[error("operation cancelled")]
    Cancelled,
    /// The store handle was already disposed.
    #[error("store handle has been disposed")]
    Disposed,
    /// Commit or rollback was requested with no transaction open.
    #[error("no active transaction")]
    NoActiveTransaction,
    /// Begin was requested while a transaction is already open.
    #[error("a transaction is already active")]
    TransactionAlreadyActive,
    /// An added entity collides with an existing primary key.
    #[error("duplicate key {key} in {collection}")]
    DuplicateKey { collection: String, key: String },
    /// An updated or removed entity does not exist in the store.
    #[error("no row with key {key} in {collection}")]
    MissingRow { collection: String, key: String },
    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serde(String),
    /// The underlying lock primitive was poisoned.
    #[error("store lock poisoned during {0}")]
    LockPoisoned(&'static str),
    /// Any other storage-level error.
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err.to_string())
    }
}

/// Error type for repository and unit-of-work operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// No entity has the requested primary key.
    #[error("entity of type {collection} with key {key} not found")]
    NotFound { collection: &'static str, key: String },
    /// No entity matches the given filter.
    #[error("no entity of type {collection} matches the given filter")]
    NoMatch { collection: &'static str },
    /// A required collaborator was absent.
    #[error("invalid argument: {0} is required")]
    InvalidArgument(&'static str),
    /// Failure reported by the store, unmodified.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RepositoryError {
    /// True for both key lookups and filter lookups that found nothing.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RepositoryError::NotFound { .. } | RepositoryError::NoMatch { .. }
        )
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
