//! Row Data Gateways over the member and content tables.
//!
//! # Responsibility
//! - Wrap CRUD for one table row behind an object keyed by its identity.
//! - Own connection and transaction scope for every call.
//! - Return typed outcomes instead of swallowing persistence failures.
//!
//! # Invariants
//! - Every operation opens its own connection and releases it on every exit path.
//! - Every operation checks table presence first; a missing table writes nothing.
//! - Write statements run in a transaction that rolls back unless committed.

use crate::db::{ensure_table, open_store, DbError, StoreLocation};
use crate::model::grant::Grant;
use crate::model::row::{ContentRecordRow, MemberRow};
use crate::model::table::{IdentifierError, TableName};
use crate::model::DATE_FORMAT;
use chrono::NaiveDate;
use log::{log, Level};
use rusqlite::{Connection, Row, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub mod content_record;
pub mod member;

pub use content_record::ContentRecordGateway;
pub use member::MemberGateway;

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Persistence outcome for gateway, finder and script operations.
#[derive(Debug)]
pub enum PersistenceError {
    /// Target table is absent; the operation was skipped.
    MissingTable(String),
    /// Statement or connection failure; any open transaction was rolled back.
    Db(DbError),
    /// Update matched no row for the given key.
    NotFound { table: String, key: String },
    /// Table name component failed validation.
    InvalidIdentifier(IdentifierError),
    /// Persisted value cannot be decoded into the row model.
    InvalidData(String),
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTable(table) => write!(f, "table `{table}` does not exist"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { table, key } => write!(f, "no row for {key} in `{table}`"),
            Self::InvalidIdentifier(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidIdentifier(err) => Some(err),
            Self::MissingTable(_) => None,
            Self::NotFound { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for PersistenceError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for PersistenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<IdentifierError> for PersistenceError {
    fn from(value: IdentifierError) -> Self {
        Self::InvalidIdentifier(value)
    }
}

impl PersistenceError {
    /// Short stable code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingTable(_) => "missing_table",
            Self::Db(_) => "db_error",
            Self::NotFound { .. } => "not_found",
            Self::InvalidIdentifier(_) => "invalid_identifier",
            Self::InvalidData(_) => "invalid_data",
        }
    }

    /// Whether the failure came from the table presence guard.
    pub fn is_missing_table(&self) -> bool {
        matches!(self, Self::MissingTable(_))
    }
}

/// Logs the outcome of one gateway operation and hands the result back.
pub(crate) fn report<T>(
    event: &str,
    table: &TableName,
    started_at: Instant,
    result: PersistenceResult<T>,
) -> PersistenceResult<T> {
    let Some(level) = outcome_level(&result) else {
        return result;
    };
    match &result {
        Ok(_) => log!(
            level,
            "event={event} module=gateway status=ok table={} duration_ms={}",
            table.as_str(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => log!(
            level,
            "event={event} module=gateway status=error table={} duration_ms={} error_code={} error={}",
            table.as_str(),
            started_at.elapsed().as_millis(),
            err.code(),
            err
        ),
    }
    result
}

/// Log level for an operation outcome.
///
/// `None` for a missing table, which the table guard has already logged.
fn outcome_level<T>(result: &PersistenceResult<T>) -> Option<Level> {
    match result {
        Ok(_) => Some(Level::Debug),
        Err(PersistenceError::MissingTable(_)) => None,
        Err(_) => Some(Level::Error),
    }
}

/// Opens a connection, checks the table, then runs a read.
pub(crate) fn guarded_read<T>(
    store: &StoreLocation,
    table: &TableName,
    op: impl FnOnce(&Connection) -> PersistenceResult<T>,
) -> PersistenceResult<T> {
    let conn = open_store(store)?;
    ensure_table(&conn, table)?;
    op(&conn)
}

/// Opens a connection, checks the table, then runs a write in one transaction.
pub(crate) fn guarded_write<T>(
    store: &StoreLocation,
    table: &TableName,
    op: impl FnOnce(&Connection) -> PersistenceResult<T>,
) -> PersistenceResult<T> {
    let mut conn = open_store(store)?;
    ensure_table(&conn, table)?;
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    // Dropping `tx` on the error path rolls the write back.
    let value = op(&*tx)?;
    tx.commit()?;
    Ok(value)
}

pub(crate) const MEMBER_COLUMNS: &str =
    "kakao_nick_name, join_date, \"grant\", last_login, score";
pub(crate) const CONTENT_RECORD_COLUMNS: &str = "score, participation_count, day";

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn parse_date(value: &str) -> PersistenceResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        PersistenceError::InvalidData(format!(
            "invalid join_date value `{value}` in member.join_date"
        ))
    })
}

pub(crate) fn parse_grant(value: i64) -> PersistenceResult<Grant> {
    Grant::from_ordinal(value).ok_or_else(|| {
        PersistenceError::InvalidData(format!("invalid grant value `{value}` in member.grant"))
    })
}

/// Decodes a row selected with `MEMBER_COLUMNS`.
///
/// `NULL` columns decode to `None`; only present but malformed values fail.
pub(crate) fn parse_member_row(row: &Row<'_>) -> PersistenceResult<MemberRow> {
    let join_date = row
        .get::<_, Option<String>>("join_date")?
        .map(|text| parse_date(&text))
        .transpose()?;
    let grant = row
        .get::<_, Option<i64>>("grant")?
        .map(parse_grant)
        .transpose()?;

    Ok(MemberRow {
        kakao_nick_name: row.get("kakao_nick_name")?,
        join_date,
        grant,
        last_login: row.get("last_login")?,
        score: row.get("score")?,
    })
}

/// Decodes a row selected with `CONTENT_RECORD_COLUMNS`.
pub(crate) fn parse_content_record_row(row: &Row<'_>) -> PersistenceResult<ContentRecordRow> {
    Ok(ContentRecordRow {
        score: row.get("score")?,
        participation_count: row.get("participation_count")?,
        day: row.get("day")?,
    })
}
