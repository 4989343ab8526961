//! Optional SQLite backing store for records.
//!
//! # Responsibility
//! - Hand out connections whose schema matches this build.
//! - Report schema drift as typed errors instead of SQL failures.
//!
//! # Invariants
//! - The schema version lives in `PRAGMA user_version`.
//! - Nothing reads or writes `records` on a connection that is not `Current`.

pub mod migrations;
mod open;

pub use migrations::{schema_state, SchemaState};
pub use open::{open_db, open_db_in_memory};

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The database was written by a newer build.
    SchemaTooNew { found: u32, supported: u32 },
    /// The connection never went through `open_db`, so migrations did not run.
    SchemaBehind { found: u32, expected: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "record store schema v{found} is newer than this build (supports up to v{supported})"
            ),
            Self::SchemaBehind { found, expected } => write!(
                f,
                "record store schema v{found} needs migrating to v{expected}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        if let Self::Sqlite(err) = self {
            Some(err)
        } else {
            None
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
