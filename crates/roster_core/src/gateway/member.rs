//! Row Data Gateway for the `member` table.
//!
//! # Responsibility
//! - Provide CRUD for one member row keyed by `nick_name`.
//!
//! # Invariants
//! - The gateway only holds immutable identity (store location, nick name).
//! - Single-field updates are independent statements; `update_fields` is the
//!   atomic multi-column write.

use super::{
    format_date, guarded_read, guarded_write, parse_member_row, report, PersistenceError,
    PersistenceResult, MEMBER_COLUMNS,
};
use crate::db::StoreLocation;
use crate::model::grant::Grant;
use crate::model::row::{MemberRow, MemberUpdate};
use crate::model::table::TableName;
use rusqlite::{params, OptionalExtension};
use std::time::Instant;

/// Gateway over one `member` row.
#[derive(Debug, Clone)]
pub struct MemberGateway {
    store: StoreLocation,
    nick_name: String,
    table: TableName,
}

impl MemberGateway {
    pub fn new(store: StoreLocation, nick_name: impl Into<String>) -> Self {
        Self {
            store,
            nick_name: nick_name.into(),
            table: TableName::member(),
        }
    }

    pub fn nick_name(&self) -> &str {
        &self.nick_name
    }

    /// Inserts a new row for this nick name.
    ///
    /// # Errors
    /// - `MissingTable` when `member` is absent; nothing is written.
    /// - `Db` on constraint failure (e.g. duplicate nick name); rolled back.
    pub fn create(&self, fields: &MemberRow) -> PersistenceResult<()> {
        let started_at = Instant::now();
        let result = guarded_write(&self.store, &self.table, |tx| {
            tx.execute(
                &format!(
                    "INSERT INTO {} (nick_name, {MEMBER_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                    self.table.quoted()
                ),
                params![
                    self.nick_name.as_str(),
                    fields.kakao_nick_name.as_deref(),
                    fields.join_date.map(format_date),
                    fields.grant.map(Grant::ordinal),
                    fields.last_login,
                    fields.score,
                ],
            )?;
            Ok(())
        });
        report("member_create", &self.table, started_at, result)
    }

    /// Reads the non-key columns, `Ok(None)` when no row matches.
    pub fn fetch(&self) -> PersistenceResult<Option<MemberRow>> {
        let started_at = Instant::now();
        let result = guarded_read(&self.store, &self.table, |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {MEMBER_COLUMNS} FROM {} WHERE nick_name = ?1;",
                self.table.quoted()
            ))?;
            let mut rows = stmt.query([self.nick_name.as_str()])?;
            if let Some(row) = rows.next()? {
                return Ok(Some(parse_member_row(row)?));
            }
            Ok(None)
        });
        report("member_fetch", &self.table, started_at, result)
    }

    pub fn update_grant(&self, grant: Grant) -> PersistenceResult<()> {
        self.update_column("member_update_grant", "\"grant\"", grant.ordinal())
    }

    pub fn update_last_login(&self, last_login: i64) -> PersistenceResult<()> {
        self.update_column("member_update_last_login", "last_login", last_login)
    }

    pub fn update_score(&self, score: i64) -> PersistenceResult<()> {
        self.update_column("member_update_score", "score", score)
    }

    /// Writes grant, last_login, score and join_date in one transaction.
    ///
    /// Either all columns change or none do.
    pub fn update_fields(&self, update: &MemberUpdate) -> PersistenceResult<()> {
        let started_at = Instant::now();
        let result = guarded_write(&self.store, &self.table, |tx| {
            let changed = tx.execute(
                &format!(
                    "UPDATE {}
                     SET
                        \"grant\" = ?1,
                        last_login = ?2,
                        score = ?3,
                        join_date = ?4
                     WHERE nick_name = ?5;",
                    self.table.quoted()
                ),
                params![
                    update.grant.ordinal(),
                    update.last_login,
                    update.score,
                    format_date(update.join_date),
                    self.nick_name.as_str(),
                ],
            )?;
            self.require_changed(changed)
        });
        report("member_update", &self.table, started_at, result)
    }

    /// Removes the row. Returns whether a row was removed.
    pub fn delete(&self) -> PersistenceResult<bool> {
        let started_at = Instant::now();
        let result = guarded_write(&self.store, &self.table, |tx| {
            let changed = tx.execute(
                &format!("DELETE FROM {} WHERE nick_name = ?1;", self.table.quoted()),
                [self.nick_name.as_str()],
            )?;
            Ok(changed > 0)
        });
        report("member_delete", &self.table, started_at, result)
    }

    /// Whether a row with this nick name exists.
    pub fn exists(&self) -> PersistenceResult<bool> {
        let started_at = Instant::now();
        let result = guarded_read(&self.store, &self.table, |conn| {
            let found = conn
                .query_row(
                    &format!("SELECT 1 FROM {} WHERE nick_name = ?1;", self.table.quoted()),
                    [self.nick_name.as_str()],
                    |row| row.get::<_, i64>(0),
                )
                .optional()?;
            Ok(found.is_some())
        });
        report("member_exists", &self.table, started_at, result)
    }

    fn update_column(
        &self,
        event: &str,
        column: &'static str,
        value: i64,
    ) -> PersistenceResult<()> {
        let started_at = Instant::now();
        let result = guarded_write(&self.store, &self.table, |tx| {
            let changed = tx.execute(
                &format!(
                    "UPDATE {} SET {column} = ?1 WHERE nick_name = ?2;",
                    self.table.quoted()
                ),
                params![value, self.nick_name.as_str()],
            )?;
            self.require_changed(changed)
        });
        report(event, &self.table, started_at, result)
    }

    fn require_changed(&self, changed: usize) -> PersistenceResult<()> {
        if changed == 0 {
            return Err(PersistenceError::NotFound {
                table: self.table.as_str().to_string(),
                key: format!("nick_name={}", self.nick_name),
            });
        }
        Ok(())
    }
}
