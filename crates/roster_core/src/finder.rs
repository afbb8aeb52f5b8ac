//! Read-only lookups used to pick create vs. update at the call site.
//!
//! # Responsibility
//! - Look up members and content participation rows by key.
//!
//! # Invariants
//! - Never writes.
//! - Every lookup is table-guarded; absence of a row is `Ok(None)` / empty.

use crate::db::StoreLocation;
use crate::gateway::{
    guarded_read, parse_content_record_row, parse_member_row, report, PersistenceResult,
    CONTENT_RECORD_COLUMNS, MEMBER_COLUMNS,
};
use crate::model::row::{ContentRecordRow, MemberRow};
use crate::model::table::{ContentTable, TableName};
use rusqlite::params;
use std::time::Instant;

/// Store-wide finder, not bound to one key.
#[derive(Debug, Clone)]
pub struct Finder {
    store: StoreLocation,
}

impl Finder {
    pub fn new(store: StoreLocation) -> Self {
        Self { store }
    }

    /// Finds one member by nick name.
    pub fn find_member(&self, nick_name: &str) -> PersistenceResult<Option<MemberRow>> {
        let started_at = Instant::now();
        let table = TableName::member();
        let result = guarded_read(&self.store, &table, |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {MEMBER_COLUMNS} FROM {} WHERE nick_name = ?1;",
                table.quoted()
            ))?;
            let mut rows = stmt.query([nick_name])?;
            if let Some(row) = rows.next()? {
                return Ok(Some(parse_member_row(row)?));
            }
            Ok(None)
        });
        report("find_member", &table, started_at, result)
    }

    /// Finds every day-row of one member in a content table, ordered by day.
    pub fn find_content_records(
        &self,
        content: &ContentTable,
        nick_name: &str,
    ) -> PersistenceResult<Vec<ContentRecordRow>> {
        let started_at = Instant::now();
        let table = content.table_name();
        let result = guarded_read(&self.store, table, |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {CONTENT_RECORD_COLUMNS} FROM {} WHERE nick_name = ?1 ORDER BY day ASC;",
                table.quoted()
            ))?;
            let mut rows = stmt.query([nick_name])?;
            let mut records = Vec::new();
            while let Some(row) = rows.next()? {
                records.push(parse_content_record_row(row)?);
            }
            Ok(records)
        });
        report("find_content_records", table, started_at, result)
    }

    /// Finds one `(nick_name, day)` row in a content table.
    pub fn find_content_record(
        &self,
        content: &ContentTable,
        nick_name: &str,
        day: i64,
    ) -> PersistenceResult<Option<ContentRecordRow>> {
        let started_at = Instant::now();
        let table = content.table_name();
        let result = guarded_read(&self.store, table, |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {CONTENT_RECORD_COLUMNS} FROM {} WHERE nick_name = ?1 AND day = ?2;",
                table.quoted()
            ))?;
            let mut rows = stmt.query(params![nick_name, day])?;
            if let Some(row) = rows.next()? {
                return Ok(Some(parse_content_record_row(row)?));
            }
            Ok(None)
        });
        report("find_content_record", table, started_at, result)
    }
}
