//! SQLite-backed record storage.
//!
//! # Responsibility
//! - Persist any `Record` as a JSON payload row in the shared `records` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Rows are scoped by `collection`; ids are unique per collection.
//! - A payload whose id disagrees with its row is rejected, never masked.

use super::{RecordRepository, RepoError, RepoResult, RepositoryProvider};
use crate::db::migrations::ensure_current;
use crate::model::id::RecordId;
use crate::model::Record;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use std::marker::PhantomData;

const RECORD_SELECT_SQL: &str = "SELECT id, payload FROM records";

/// Repository for one collection over a borrowed, migrated connection.
pub struct SqliteRecordRepository<'conn, T> {
    conn: &'conn Connection,
    _record: PhantomData<fn() -> T>,
}

impl<'conn, T: Record> SqliteRecordRepository<'conn, T> {
    /// Wraps `conn`; fails when its schema is not fully migrated.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_current(conn)?;
        Ok(Self {
            conn,
            _record: PhantomData,
        })
    }
}

impl<T: Record> RecordRepository<T> for SqliteRecordRepository<'_, T> {
    fn insert(&mut self, record: T) -> RepoResult<T> {
        let payload = serde_json::to_string(&record)?;
        let result = self.conn.execute(
            "INSERT INTO records (collection, id, payload) VALUES (?1, ?2, ?3);",
            params![T::COLLECTION, record.id().as_str(), payload],
        );

        match result {
            Ok(_) => Ok(record),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(RepoError::Conflict(record.id().clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn get(&self, id: &RecordId) -> RepoResult<Option<T>> {
        let mut stmt = self.conn.prepare(&format!(
            "{RECORD_SELECT_SQL} WHERE collection = ?1 AND id = ?2;"
        ))?;
        let row = stmt
            .query_row(params![T::COLLECTION, id.as_str()], |row| {
                Ok((row.get::<_, String>("id")?, row.get::<_, String>("payload")?))
            })
            .optional()?;

        row.map(|(id, payload)| decode_payload(&id, &payload))
            .transpose()
    }

    fn list(&self) -> RepoResult<Vec<T>> {
        let mut stmt = self.conn.prepare(&format!(
            "{RECORD_SELECT_SQL} WHERE collection = ?1 ORDER BY seq ASC;"
        ))?;
        let mut rows = stmt.query([T::COLLECTION])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_record_row(row)?);
        }

        Ok(records)
    }

    fn replace(&mut self, record: T) -> RepoResult<T> {
        let payload = serde_json::to_string(&record)?;
        let changed = self.conn.execute(
            "UPDATE records
             SET
                payload = ?1,
                updated_at = (CAST(strftime('%s', 'now') AS INTEGER) * 1000)
             WHERE collection = ?2 AND id = ?3;",
            params![payload, T::COLLECTION, record.id().as_str()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(record.id().clone()));
        }

        Ok(record)
    }

    fn delete(&mut self, id: &RecordId) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM records WHERE collection = ?1 AND id = ?2;",
            params![T::COLLECTION, id.as_str()],
        )?;
        Ok(changed > 0)
    }
}

fn parse_record_row<T: Record>(row: &Row<'_>) -> RepoResult<T> {
    let id: String = row.get("id")?;
    let payload: String = row.get("payload")?;
    decode_payload(&id, &payload)
}

fn decode_payload<T: Record>(row_id: &str, payload: &str) -> RepoResult<T> {
    let record: T = serde_json::from_str(payload).map_err(|err| {
        RepoError::InvalidData(format!(
            "invalid payload for `{row_id}` in {}: {err}",
            T::COLLECTION
        ))
    })?;

    if record.id().as_str() != row_id {
        return Err(RepoError::InvalidData(format!(
            "payload id `{}` does not match row id `{row_id}` in {}",
            record.id(),
            T::COLLECTION
        )));
    }

    Ok(record)
}

/// Provider handing out repositories that share one connection.
pub struct SqliteProvider<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProvider<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl<'conn> RepositoryProvider for SqliteProvider<'conn> {
    type Repo<T: Record> = SqliteRecordRepository<'conn, T>;

    fn repository<T: Record>(&self) -> RepoResult<Self::Repo<T>> {
        SqliteRecordRepository::try_new(self.conn)
    }
}
