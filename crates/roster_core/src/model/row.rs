//! Row shapes read from and written to the store.

use super::grant::Grant;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Non-key columns of one `member` row.
///
/// Every column is nullable in the store; `None` is SQL `NULL`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRow {
    pub kakao_nick_name: Option<String>,
    /// Persisted as `YYYYMMDD` text.
    pub join_date: Option<NaiveDate>,
    pub grant: Option<Grant>,
    /// Days since last login.
    pub last_login: Option<i64>,
    pub score: Option<i64>,
}

/// Columns rewritten by a full member update.
///
/// `kakao_nick_name` is not part of it; only the validated fields are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberUpdate {
    pub join_date: NaiveDate,
    pub grant: Grant,
    pub last_login: i64,
    pub score: i64,
}

/// One content participation row without its `nick_name`.
///
/// `score` and `participation_count` are nullable in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecordRow {
    pub score: Option<i64>,
    pub participation_count: Option<i64>,
    /// Day offset within the content schedule.
    pub day: i64,
}
