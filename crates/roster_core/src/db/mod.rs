//! SQLite connection provider and table presence checks.
//!
//! # Responsibility
//! - Open one fresh SQLite connection per logical operation.
//! - Report whether a required table exists before it is touched.
//!
//! # Invariants
//! - Connections are never cached or shared between calls.
//! - Schema is provisioned externally; this module never creates tables.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod guard;
mod open;

pub use guard::{ensure_table, table_status, TableStatus};
pub use open::{open_store, StoreLocation};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    EmptyLocation,
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::EmptyLocation => write!(f, "store location must not be empty"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::EmptyLocation => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
