//! Row storage and change application shared by the database and its sessions.

use std::collections::{BTreeMap, HashMap};

use crate::entity::Entity;
use crate::error::StoreError;

/// All collections, keyed by `Entity::COLLECTION`.
pub(crate) type Tables = HashMap<&'static str, Table>;

/// One collection. Rows keep insertion order; updates keep a row's position.
#[derive(Clone, Default)]
pub(crate) struct Table {
    next_seq: u64,
    rows: BTreeMap<u64, Vec<u8>>,
    index: HashMap<String, u64>,
}

impl Table {
    pub(crate) fn get(&self, key: &str) -> Option<&[u8]> {
        self.index
            .get(key)
            .and_then(|seq| self.rows.get(seq))
            .map(Vec::as_slice)
    }

    pub(crate) fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.rows.values().map(Vec::as_slice)
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    fn insert(&mut self, key: &str, bytes: Vec<u8>) -> bool {
        if self.index.contains_key(key) {
            return false;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.index.insert(key.to_string(), seq);
        self.rows.insert(seq, bytes);
        true
    }

    fn replace(&mut self, key: &str, bytes: Vec<u8>) -> bool {
        match self.index.get(key) {
            Some(seq) => {
                self.rows.insert(*seq, bytes);
                true
            }
            None => false,
        }
    }

    fn delete(&mut self, key: &str) -> bool {
        match self.index.remove(key) {
            Some(seq) => {
                self.rows.remove(&seq);
                true
            }
            None => false,
        }
    }
}

/// A staged write, already serialized.
#[derive(Clone, Debug)]
pub(crate) enum Change {
    Add {
        collection: &'static str,
        key: String,
        bytes: Vec<u8>,
    },
    Update {
        collection: &'static str,
        key: String,
        bytes: Vec<u8>,
    },
    Remove {
        collection: &'static str,
        key: String,
    },
}

impl Change {
    pub(crate) fn add<T: Entity>(entity: &T) -> Result<Self, StoreError> {
        Ok(Change::Add {
            collection: T::COLLECTION,
            key: encode_key::<T>(&entity.key())?,
            bytes: serde_json::to_vec(entity)?,
        })
    }

    pub(crate) fn update<T: Entity>(entity: &T) -> Result<Self, StoreError> {
        Ok(Change::Update {
            collection: T::COLLECTION,
            key: encode_key::<T>(&entity.key())?,
            bytes: serde_json::to_vec(entity)?,
        })
    }

    pub(crate) fn remove<T: Entity>(entity: &T) -> Result<Self, StoreError> {
        Ok(Change::Remove {
            collection: T::COLLECTION,
            key: encode_key::<T>(&entity.key())?,
        })
    }
}

/// Storage key for a primary key value.
pub(crate) fn encode_key<T: Entity>(key: &T::Key) -> Result<String, StoreError> {
    Ok(serde_json::to_string(key)?)
}

pub(crate) fn decode<T: Entity>(bytes: &[u8]) -> Result<T, StoreError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Apply `changes` in order. All-or-nothing: on error `tables` is untouched.
///
/// Returns the number of affected rows.
pub(crate) fn apply(tables: &mut Tables, changes: &[Change]) -> Result<usize, StoreError> {
    if changes.is_empty() {
        return Ok(0);
    }

    let mut next = tables.clone();
    for change in changes {
        match change {
            Change::Add {
                collection,
                key,
                bytes,
            } => {
                if !next.entry(*collection).or_default().insert(key, bytes.clone()) {
                    return Err(StoreError::DuplicateKey {
                        collection: collection.to_string(),
                        key: key.clone(),
                    });
                }
            }
            Change::Update {
                collection,
                key,
                bytes,
            } => {
                let updated = next
                    .get_mut(collection)
                    .is_some_and(|table| table.replace(key, bytes.clone()));
                if !updated {
                    return Err(missing(collection, key));
                }
            }
            Change::Remove { collection, key } => {
                let removed = next
                    .get_mut(collection)
                    .is_some_and(|table| table.delete(key));
                if !removed {
                    return Err(missing(collection, key));
                }
            }
        }
    }

    *tables = next;
    Ok(changes.len())
}

fn missing(collection: &str, key: &str) -> StoreError {
    StoreError::MissingRow {
        collection: collection.to_string(),
        key: key.to_string(),
    }
}
