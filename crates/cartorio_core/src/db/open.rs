//! Opening record databases.

use super::migrations::{latest_version, migrate};
use super::{DbError, DbResult};
use log::{debug, error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// How long a statement waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens or creates the record database at `path`, migrating it to this
/// build's schema.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    prepare("file", || Connection::open(path))
}

/// Opens a private in-memory record database.
pub fn open_db_in_memory() -> DbResult<Connection> {
    prepare("memory", Connection::open_in_memory)
}

fn prepare(
    target: &str,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started = Instant::now();

    let outcome = open().map_err(DbError::from).and_then(|mut conn| {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        let ran = migrate(&mut conn)?;
        debug!(
            "event=db_migrate module=db status=ok steps_run={ran} schema_version={}",
            latest_version()
        );
        Ok(conn)
    });

    let elapsed_ms = started.elapsed().as_millis();
    match &outcome {
        Ok(_) => info!("event=db_open module=db status=ok target={target} duration_ms={elapsed_ms}"),
        Err(err) => error!(
            "event=db_open module=db status=error target={target} duration_ms={elapsed_ms} error={err}"
        ),
    }
    outcome
}
