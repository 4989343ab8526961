//! Versioned schema steps for the record store.
//!
//! Step `n` (1-based) brings a database from version `n - 1` to `n`. Pending
//! steps run together in one transaction.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;
use std::cmp::Ordering;

const STEPS: &[&str] = &[include_str!("0001_init.sql")];

/// Schema version reported by a fully migrated database.
pub fn latest_version() -> u32 {
    STEPS.len() as u32
}

/// Where a connection's schema stands relative to this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaState {
    Current,
    Behind(u32),
    Ahead(u32),
}

pub fn schema_state(conn: &Connection) -> DbResult<SchemaState> {
    let found: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(match found.cmp(&latest_version()) {
        Ordering::Equal => SchemaState::Current,
        Ordering::Less => SchemaState::Behind(found),
        Ordering::Greater => SchemaState::Ahead(found),
    })
}

/// Runs every pending step and returns how many ran.
pub fn migrate(conn: &mut Connection) -> DbResult<usize> {
    let found = match schema_state(conn)? {
        SchemaState::Current => return Ok(0),
        SchemaState::Ahead(found) => {
            return Err(DbError::SchemaTooNew {
                found,
                supported: latest_version(),
            })
        }
        SchemaState::Behind(found) => found as usize,
    };

    let tx = conn.transaction()?;
    let pending = STEPS.iter().zip(1u32..).skip(found);
    let mut ran = 0;
    for (sql, version) in pending {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
        ran += 1;
    }
    tx.commit()?;

    Ok(ran)
}

/// Fails unless `conn` is at exactly [`latest_version`].
pub fn ensure_current(conn: &Connection) -> DbResult<()> {
    match schema_state(conn)? {
        SchemaState::Current => Ok(()),
        SchemaState::Behind(found) => Err(DbError::SchemaBehind {
            found,
            expected: latest_version(),
        }),
        SchemaState::Ahead(found) => Err(DbError::SchemaTooNew {
            found,
            supported: latest_version(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{ensure_current, latest_version, migrate, schema_state, SchemaState};
    use crate::db::DbError;
    use rusqlite::Connection;

    #[test]
    fn migrate_runs_each_step_once() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert_eq!(schema_state(&conn).unwrap(), SchemaState::Behind(0));

        assert_eq!(migrate(&mut conn).unwrap(), latest_version() as usize);
        assert_eq!(migrate(&mut conn).unwrap(), 0);
        assert_eq!(schema_state(&conn).unwrap(), SchemaState::Current);
        ensure_current(&conn).unwrap();
    }

    #[test]
    fn unmigrated_connection_is_behind() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(matches!(
            ensure_current(&conn),
            Err(DbError::SchemaBehind { found: 0, .. })
        ));
    }
}
