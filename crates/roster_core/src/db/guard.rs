//! Table presence guard.
//!
//! # Responsibility
//! - Look up a table name in the SQLite catalog before data access.
//! - Turn an absent table into a typed `MissingTable` outcome.
//!
//! # Invariants
//! - Catalog lookups are parameterized; the name is never interpolated.
//! - A missing table aborts the guarded operation before any write.

use super::DbResult;
use crate::gateway::{PersistenceError, PersistenceResult};
use crate::model::table::TableName;
use log::warn;
use rusqlite::Connection;

/// Catalog lookup outcome for one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    Exists,
    Missing,
}

/// Reports whether a table with this exact name exists.
pub fn table_status(conn: &Connection, table: &TableName) -> DbResult<TableStatus> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table.as_str()],
        |row| row.get(0),
    )?;
    Ok(if exists == 1 {
        TableStatus::Exists
    } else {
        TableStatus::Missing
    })
}

/// Fails with `PersistenceError::MissingTable` unless the table exists.
pub fn ensure_table(conn: &Connection, table: &TableName) -> PersistenceResult<()> {
    match table_status(conn, table)? {
        TableStatus::Exists => Ok(()),
        TableStatus::Missing => {
            warn!(
                "event=table_guard module=db status=missing table={}",
                table.as_str()
            );
            Err(PersistenceError::MissingTable(table.as_str().to_string()))
        }
    }
}
