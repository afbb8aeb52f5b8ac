//! Validated table identifiers.
//!
//! # Responsibility
//! - Resolve the fixed `member` table and dynamic `{content}_{start_date}` tables.
//! - Reject identifier components that could escape an SQL identifier.
//!
//! # Invariants
//! - `TableName` values are only built from validated components.
//! - SQL text embeds table names through `TableName::quoted()` only.

use super::DATE_FORMAT;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Name of the member profile table.
pub const MEMBER_TABLE: &str = "member";

static CONTENT_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9]{0,31}$").expect("valid content name regex"));
static START_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{8}$").expect("valid start date regex"));

/// Identifier validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// Content name is empty, too long or contains non-alphanumeric characters.
    InvalidContentName(String),
    /// Start date is not an 8-digit `YYYYMMDD` calendar date.
    InvalidStartDate(String),
}

impl Display for IdentifierError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidContentName(value) => {
                write!(f, "invalid content name `{value}`: expected [A-Za-z][A-Za-z0-9]{{0,31}}")
            }
            Self::InvalidStartDate(value) => {
                write!(f, "invalid start date `{value}`: expected YYYYMMDD")
            }
        }
    }
}

impl Error for IdentifierError {}

/// A table name that is safe to embed as a quoted SQL identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName(String);

impl TableName {
    /// The `member` table.
    pub fn member() -> Self {
        Self(MEMBER_TABLE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Double-quoted form for DML text.
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0)
    }
}

impl Display for TableName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One content cycle, which owns its own participation table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentTable {
    table_name: TableName,
}

impl ContentTable {
    /// Validates both components and resolves `{content_name}_{start_date}`.
    ///
    /// # Errors
    /// - `InvalidContentName` unless the name is 1-32 ASCII alphanumerics
    ///   starting with a letter.
    /// - `InvalidStartDate` unless the date is 8 digits naming a real day.
    pub fn new(content_name: &str, start_date: &str) -> Result<Self, IdentifierError> {
        if !CONTENT_NAME_RE.is_match(content_name) {
            return Err(IdentifierError::InvalidContentName(content_name.to_string()));
        }
        if !START_DATE_RE.is_match(start_date)
            || NaiveDate::parse_from_str(start_date, DATE_FORMAT).is_err()
        {
            return Err(IdentifierError::InvalidStartDate(start_date.to_string()));
        }

        Ok(Self {
            table_name: TableName(format!("{content_name}_{start_date}")),
        })
    }

    pub fn table_name(&self) -> &TableName {
        &self.table_name
    }
}
