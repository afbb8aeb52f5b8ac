//! Transaction Script counterpart to the gateways.
//!
//! # Responsibility
//! - Expose one flat procedure per business operation.
//! - Run on a caller-supplied connection instead of opening one per call.
//!
//! # Invariants
//! - Each procedure checks its table first and issues a single statement,
//!   so every write is atomic on its own.
//! - Content-record writes are keyed by `(nick_name, day)`.

use crate::db::{ensure_table, table_status, DbResult, TableStatus};
use crate::gateway::{
    format_date, parse_content_record_row, parse_member_row, report, PersistenceError,
    PersistenceResult, CONTENT_RECORD_COLUMNS, MEMBER_COLUMNS,
};
use crate::model::grant::Grant;
use crate::model::row::{ContentRecordRow, MemberRow, MemberUpdate};
use crate::model::table::{ContentTable, TableName};
use log::info;
use rusqlite::{params, Connection};
use std::time::Instant;

/// Reports whether the `member` table is present on this connection.
pub fn member_table_ready(conn: &Connection) -> DbResult<bool> {
    Ok(table_status(conn, &TableName::member())? == TableStatus::Exists)
}

pub fn find_member(conn: &Connection, nick_name: &str) -> PersistenceResult<Option<MemberRow>> {
    let started_at = Instant::now();
    let table = TableName::member();
    let result = select_member(conn, &table, nick_name);
    report("script_find_member", &table, started_at, result)
}

pub fn create_member(
    conn: &Connection,
    nick_name: &str,
    fields: &MemberRow,
) -> PersistenceResult<()> {
    let table = TableName::member();
    run_write(conn, &table, "script_create_member", || {
        conn.execute(
            &format!(
                "INSERT INTO {} (nick_name, {MEMBER_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                table.quoted()
            ),
            params![
                nick_name,
                fields.kakao_nick_name.as_deref(),
                fields.join_date.map(format_date),
                fields.grant.map(Grant::ordinal),
                fields.last_login,
                fields.score,
            ],
        )
    })
    .map(|_| ())
}

pub fn update_grant(conn: &Connection, nick_name: &str, grant: Grant) -> PersistenceResult<()> {
    update_member_column(
        conn,
        nick_name,
        "script_update_grant",
        "\"grant\"",
        grant.ordinal(),
    )
}

pub fn update_last_login(
    conn: &Connection,
    nick_name: &str,
    last_login: i64,
) -> PersistenceResult<()> {
    update_member_column(
        conn,
        nick_name,
        "script_update_last_login",
        "last_login",
        last_login,
    )
}

pub fn update_score(conn: &Connection, nick_name: &str, score: i64) -> PersistenceResult<()> {
    update_member_column(conn, nick_name, "script_update_score", "score", score)
}

/// Rewrites grant, last_login, score and join_date in one statement.
pub fn update_member(
    conn: &Connection,
    nick_name: &str,
    update: &MemberUpdate,
) -> PersistenceResult<()> {
    let table = TableName::member();
    let changed = run_write(conn, &table, "script_update_member", || {
        conn.execute(
            &format!(
                "UPDATE {}
                 SET \"grant\" = ?1, last_login = ?2, score = ?3, join_date = ?4
                 WHERE nick_name = ?5;",
                table.quoted()
            ),
            params![
                update.grant.ordinal(),
                update.last_login,
                update.score,
                format_date(update.join_date),
                nick_name,
            ],
        )
    })?;
    require_member_changed(&table, nick_name, changed)
}

/// Removes one member. Returns whether a row was removed.
pub fn delete_member(conn: &Connection, nick_name: &str) -> PersistenceResult<bool> {
    let table = TableName::member();
    let changed = run_write(conn, &table, "script_delete_member", || {
        conn.execute(
            &format!("DELETE FROM {} WHERE nick_name = ?1;", table.quoted()),
            [nick_name],
        )
    })?;
    Ok(changed > 0)
}

/// Changes a member's privilege and logs the new grant name.
pub fn change_grant(conn: &Connection, nick_name: &str, grant: Grant) -> PersistenceResult<()> {
    update_grant(conn, nick_name, grant)?;
    info!(
        "event=change_grant module=script status=ok grant={}",
        grant.as_str()
    );
    Ok(())
}

/// All day-rows of one member in a content table, ordered by day.
pub fn find_content_records(
    conn: &Connection,
    content: &ContentTable,
    nick_name: &str,
) -> PersistenceResult<Vec<ContentRecordRow>> {
    let started_at = Instant::now();
    let table = content.table_name();
    let result = select_content_records(conn, table, nick_name);
    report("script_find_content_records", table, started_at, result)
}

pub fn insert_content_record(
    conn: &Connection,
    content: &ContentTable,
    nick_name: &str,
    record: &ContentRecordRow,
) -> PersistenceResult<()> {
    let table = content.table_name();
    run_write(conn, table, "script_insert_content_record", || {
        conn.execute(
            &format!(
                "INSERT INTO {} (nick_name, {CONTENT_RECORD_COLUMNS}) VALUES (?1, ?2, ?3, ?4);",
                table.quoted()
            ),
            params![nick_name, record.score, record.participation_count, record.day],
        )
    })
    .map(|_| ())
}

/// Rewrites score and participation count of the `(nick_name, record.day)` row.
pub fn update_content_record(
    conn: &Connection,
    content: &ContentTable,
    nick_name: &str,
    record: &ContentRecordRow,
) -> PersistenceResult<()> {
    let table = content.table_name();
    let changed = run_write(conn, table, "script_update_content_record", || {
        conn.execute(
            &format!(
                "UPDATE {}
                 SET score = ?1, participation_count = ?2
                 WHERE nick_name = ?3 AND day = ?4;",
                table.quoted()
            ),
            params![record.score, record.participation_count, nick_name, record.day],
        )
    })?;
    if changed == 0 {
        return Err(PersistenceError::NotFound {
            table: table.as_str().to_string(),
            key: format!("nick_name={nick_name} day={}", record.day),
        });
    }
    Ok(())
}

/// Removes the `(nick_name, day)` row. Returns whether a row was removed.
pub fn delete_content_record(
    conn: &Connection,
    content: &ContentTable,
    nick_name: &str,
    day: i64,
) -> PersistenceResult<bool> {
    let table = content.table_name();
    let changed = run_write(conn, table, "script_delete_content_record", || {
        conn.execute(
            &format!(
                "DELETE FROM {} WHERE nick_name = ?1 AND day = ?2;",
                table.quoted()
            ),
            params![nick_name, day],
        )
    })?;
    Ok(changed > 0)
}

fn update_member_column(
    conn: &Connection,
    nick_name: &str,
    event: &str,
    column: &'static str,
    value: i64,
) -> PersistenceResult<()> {
    let table = TableName::member();
    let changed = run_write(conn, &table, event, || {
        conn.execute(
            &format!(
                "UPDATE {} SET {column} = ?1 WHERE nick_name = ?2;",
                table.quoted()
            ),
            params![value, nick_name],
        )
    })?;
    require_member_changed(&table, nick_name, changed)
}

fn require_member_changed(
    table: &TableName,
    nick_name: &str,
    changed: usize,
) -> PersistenceResult<()> {
    if changed == 0 {
        return Err(PersistenceError::NotFound {
            table: table.as_str().to_string(),
            key: format!("nick_name={nick_name}"),
        });
    }
    Ok(())
}

fn select_member(
    conn: &Connection,
    table: &TableName,
    nick_name: &str,
) -> PersistenceResult<Option<MemberRow>> {
    ensure_table(conn, table)?;
    let mut stmt = conn.prepare(&format!(
        "SELECT {MEMBER_COLUMNS} FROM {} WHERE nick_name = ?1;",
        table.quoted()
    ))?;
    let mut rows = stmt.query([nick_name])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_member_row(row)?));
    }
    Ok(None)
}

fn select_content_records(
    conn: &Connection,
    table: &TableName,
    nick_name: &str,
) -> PersistenceResult<Vec<ContentRecordRow>> {
    ensure_table(conn, table)?;
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
}

/// Guards the table, runs one statement and logs the outcome.
fn run_write(
    conn: &Connection,
    table: &TableName,
    event: &str,
    statement: impl FnOnce() -> rusqlite::Result<usize>,
) -> PersistenceResult<usize> {
    let started_at = Instant::now();
    let result = ensure_table(conn, table)
        .and_then(|()| statement().map_err(PersistenceError::from));
    report(event, table, started_at, result)
}
