//! Connection provider for the backing SQLite store.
//!
//! # Responsibility
//! - Open one SQLite connection per call for a given store location.
//! - Configure connection pragmas required by gateway behavior.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON` and a busy timeout set.
//! - Callers own the returned connection; dropping it closes the handle.

use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Identifies one SQLite store file plus per-connection settings.
///
/// Cheap to clone. Gateways keep a copy and open a new connection from it on
/// every operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLocation {
    path: PathBuf,
    busy_timeout: Duration,
}

impl StoreLocation {
    /// Creates a location with the default 5s busy timeout.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// Overrides the busy timeout applied to each opened connection.
    pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn busy_timeout(&self) -> Duration {
        self.busy_timeout
    }
}

/// Opens a fresh connection to the store.
///
/// # Side effects
/// - Creates the SQLite file if it does not exist yet (tables are not created).
/// - Emits `db_open` logging events with duration and status.
///
/// # Errors
/// - Returns `DbError::EmptyLocation` when the location path is empty.
/// - Returns `DbError::Sqlite` when SQLite cannot open or configure the file.
pub fn open_store(location: &StoreLocation) -> DbResult<Connection> {
    let started_at = Instant::now();
    if location.path.as_os_str().is_empty() {
        error!("event=db_open module=db status=error error_code=empty_location");
        return Err(DbError::EmptyLocation);
    }

    let mut conn = match Connection::open(&location.path) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match configure_connection(&mut conn, location.busy_timeout) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error duration_ms={} error_code=db_configure_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn configure_connection(conn: &mut Connection, busy_timeout: Duration) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(busy_timeout)?;
    Ok(())
}
