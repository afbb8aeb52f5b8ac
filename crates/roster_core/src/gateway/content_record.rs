//! Row Data Gateway for one content cycle table.
//!
//! # Responsibility
//! - Provide CRUD for one participation row keyed by `(nick_name, day)`.
//! - Resolve the backing table from a validated `ContentTable`.
//!
//! # Invariants
//! - Every statement's predicate includes both `nick_name` and `day`.
//! - All operations are table-guarded, including inserts.

use super::{
    guarded_read, guarded_write, parse_content_record_row, report, PersistenceError,
    PersistenceResult, CONTENT_RECORD_COLUMNS,
};
use crate::db::StoreLocation;
use crate::model::row::ContentRecordRow;
use crate::model::table::ContentTable;
use rusqlite::params;
use std::time::Instant;

/// Gateway over one `(nick_name, day)` row of a content table.
#[derive(Debug, Clone)]
pub struct ContentRecordGateway {
    store: StoreLocation,
    content: ContentTable,
    nick_name: String,
    day: i64,
}

impl ContentRecordGateway {
    pub fn new(
        store: StoreLocation,
        content: ContentTable,
        nick_name: impl Into<String>,
        day: i64,
    ) -> Self {
        Self {
            store,
            content,
            nick_name: nick_name.into(),
            day,
        }
    }

    pub fn content(&self) -> &ContentTable {
        &self.content
    }

    pub fn nick_name(&self) -> &str {
        &self.nick_name
    }

    pub fn day(&self) -> i64 {
        self.day
    }

    /// Inserts the row for this `(nick_name, day)`.
    ///
    /// The `day` column is the one bound in `new`; to record another day,
    /// build another gateway.
    ///
    /// # Errors
    /// - `MissingTable` when the content table is absent; nothing is written.
    /// - `Db` when the key already exists; rolled back.
    pub fn insert(&self, score: i64, participation_count: i64) -> PersistenceResult<()> {
        let started_at = Instant::now();
        let table = self.content.table_name();
        let result = guarded_write(&self.store, table, |tx| {
            tx.execute(
                &format!(
                    "INSERT INTO {} (nick_name, {CONTENT_RECORD_COLUMNS}) VALUES (?1, ?2, ?3, ?4);",
                    table.quoted()
                ),
                params![self.nick_name.as_str(), score, participation_count, self.day],
            )?;
            Ok(())
        });
        report("content_record_insert", table, started_at, result)
    }

    /// Reads the row for this `(nick_name, day)`, `Ok(None)` when absent.
    pub fn fetch(&self) -> PersistenceResult<Option<ContentRecordRow>> {
        let started_at = Instant::now();
        let table = self.content.table_name();
        let result = guarded_read(&self.store, table, |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {CONTENT_RECORD_COLUMNS} FROM {} WHERE nick_name = ?1 AND day = ?2;",
                table.quoted()
            ))?;
            let mut rows = stmt.query(params![self.nick_name.as_str(), self.day])?;
            if let Some(row) = rows.next()? {
                return Ok(Some(parse_content_record_row(row)?));
            }
            Ok(None)
        });
        report("content_record_fetch", table, started_at, result)
    }

    /// Rewrites score and participation count of this `(nick_name, day)` row.
    ///
    /// Other day-rows of the same member are left untouched.
    pub fn update(&self, score: i64, participation_count: i64) -> PersistenceResult<()> {
        let started_at = Instant::now();
        let table = self.content.table_name();
        let result = guarded_write(&self.store, table, |tx| {
            let changed = tx.execute(
                &format!(
                    "UPDATE {}
                     SET score = ?1, participation_count = ?2
                     WHERE nick_name = ?3 AND day = ?4;",
                    table.quoted()
                ),
                params![score, participation_count, self.nick_name.as_str(), self.day],
            )?;
            if changed == 0 {
                return Err(PersistenceError::NotFound {
                    table: table.as_str().to_string(),
                    key: format!("nick_name={} day={}", self.nick_name, self.day),
                });
            }
            Ok(())
        });
        report("content_record_update", table, started_at, result)
    }

    /// Removes this `(nick_name, day)` row. Returns whether a row was removed.
    pub fn delete(&self) -> PersistenceResult<bool> {
        let started_at = Instant::now();
        let table = self.content.table_name();
        let result = guarded_write(&self.store, table, |tx| {
            let changed = tx.execute(
                &format!(
                    "DELETE FROM {} WHERE nick_name = ?1 AND day = ?2;",
                    table.quoted()
                ),
                params![self.nick_name.as_str(), self.day],
            )?;
            Ok(changed > 0)
        });
        report("content_record_delete", table, started_at, result)
    }
}
