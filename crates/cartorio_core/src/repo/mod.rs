//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the record storage contract injected into services.
//! - Isolate storage details (process memory, SQLite) from service logic.
//!
//! # Invariants
//! - `list` returns records in insertion order.
//! - `insert` never overwrites: a duplicate id is a `Conflict`.
//! - `replace` never creates: a missing id is `NotFound`.

mod memory;
mod sqlite;

pub use memory::{InMemoryRepository, MemoryProvider};
pub use sqlite::{SqliteProvider, SqliteRecordRepository};

use crate::db::DbError;
use crate::model::id::RecordId;
use crate::model::Record;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage error shared by every repository implementation.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(RecordId),
    Conflict(RecordId),
    Codec(serde_json::Error),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::Conflict(id) => write!(f, "record already exists: {id}"),
            Self::Codec(err) => write!(f, "record payload codec failed: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted record data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Codec(err) => Some(err),
            Self::NotFound(_) | Self::Conflict(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Codec(value)
    }
}

/// Storage contract for one record collection.
pub trait RecordRepository<T: Record> {
    /// Stores a new record and returns it as stored.
    fn insert(&mut self, record: T) -> RepoResult<T>;
    fn get(&self, id: &RecordId) -> RepoResult<Option<T>>;
    /// All records in insertion order.
    fn list(&self) -> RepoResult<Vec<T>>;
    /// Overwrites an existing record with the same id.
    fn replace(&mut self, record: T) -> RepoResult<T>;
    /// Removes a record; returns whether it existed.
    fn delete(&mut self, id: &RecordId) -> RepoResult<bool>;
}

/// Hands out one repository per record type from a shared backend.
pub trait RepositoryProvider {
    type Repo<T: Record>: RecordRepository<T>;

    fn repository<T: Record>(&self) -> RepoResult<Self::Repo<T>>;
}
