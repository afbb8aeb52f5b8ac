//! Member domain entity.
//!
//! # Responsibility
//! - Hold member profile fields and translate them into gateway calls.
//! - Own the member business rules (`validate`).
//!
//! # Invariants
//! - After `validate()`: `score` in `[0, 15]`, `join_date <= today`,
//!   `last_login >= 0`.
//! - `validate()` is idempotent.

use crate::db::StoreLocation;
use crate::gateway::{MemberGateway, PersistenceResult};
use crate::model::grant::Grant;
use crate::model::row::{MemberRow, MemberUpdate};
use chrono::{Local, NaiveDate};
use log::info;

pub const MIN_SCORE: i64 = 0;
pub const MAX_SCORE: i64 = 15;

/// Fields corrected by one `validate()` pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Corrections {
    pub score: bool,
    pub join_date: bool,
    pub last_login: bool,
}

impl Corrections {
    pub fn any(self) -> bool {
        self.score || self.join_date || self.last_login
    }
}

/// In-memory member profile bound to its `member` row.
#[derive(Debug, Clone)]
pub struct Member {
    /// Never validated or rewritten by `update`, so `NULL` is kept as `None`.
    pub kakao_nick_name: Option<String>,
    pub join_date: NaiveDate,
    pub grant: Grant,
    /// Days since last login.
    pub last_login: i64,
    pub score: i64,
    gateway: MemberGateway,
}

impl Member {
    /// Creates a fresh member: joined today, `USER` grant, zero counters.
    pub fn new(
        store: StoreLocation,
        nick_name: impl Into<String>,
        kakao_nick_name: impl Into<String>,
    ) -> Self {
        Self {
            kakao_nick_name: Some(kakao_nick_name.into()),
            join_date: today(),
            grant: Grant::User,
            last_login: 0,
            score: 0,
            gateway: MemberGateway::new(store, nick_name),
        }
    }

    /// Builds a member from a row returned by `Finder::find_member`.
    ///
    /// No validation is applied. `NULL` columns take the new-member defaults
    /// (joined today, `USER`, zero counters).
    pub fn from_row(store: StoreLocation, nick_name: impl Into<String>, row: MemberRow) -> Self {
        let mut member = Self {
            kakao_nick_name: None,
            join_date: today(),
            grant: Grant::User,
            last_login: 0,
            score: 0,
            gateway: MemberGateway::new(store, nick_name),
        };
        member.load(row);
        member
    }

    pub fn nick_name(&self) -> &str {
        self.gateway.nick_name()
    }

    pub fn to_row(&self) -> MemberRow {
        MemberRow {
            kakao_nick_name: self.kakao_nick_name.clone(),
            join_date: Some(self.join_date),
            grant: Some(self.grant),
            last_login: Some(self.last_login),
            score: Some(self.score),
        }
    }

    /// Persists the current field values as a new row, without validation.
    pub fn insert(&self) -> PersistenceResult<()> {
        self.gateway.create(&self.to_row())
    }

    /// Reloads fields from the store.
    ///
    /// Returns `false` and leaves fields untouched when no row exists.
    /// `NULL` columns reload as the new-member defaults.
    pub fn fetch(&mut self) -> PersistenceResult<bool> {
        match self.gateway.fetch()? {
            Some(row) => {
                self.load(row);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn load(&mut self, row: MemberRow) {
        self.kakao_nick_name = row.kakao_nick_name;
        self.join_date = row.join_date.unwrap_or_else(today);
        self.grant = row.grant.unwrap_or_default();
        self.last_login = row.last_login.unwrap_or(0);
        self.score = row.score.unwrap_or(0);
    }

    /// Validates, then writes grant, last_login, score and join_date atomically.
    ///
    /// `kakao_nick_name` is not rewritten.
    pub fn update(&mut self) -> PersistenceResult<()> {
        self.validate();
        self.gateway.update_fields(&MemberUpdate {
            join_date: self.join_date,
            grant: self.grant,
            last_login: self.last_login,
            score: self.score,
        })
    }

    /// Removes the member row. Returns whether a row was removed.
    pub fn delete(&self) -> PersistenceResult<bool> {
        self.gateway.delete()
    }

    /// Applies the member rules against the local current date.
    pub fn validate(&mut self) -> Corrections {
        self.validate_at(today())
    }

    /// Applies the member rules against `today`.
    pub fn validate_at(&mut self, today: NaiveDate) -> Corrections {
        let mut corrections = Corrections::default();

        let clamped = self.score.clamp(MIN_SCORE, MAX_SCORE);
        if clamped != self.score {
            self.score = clamped;
            corrections.score = true;
        }

        if self.join_date > today {
            self.join_date = today;
            corrections.join_date = true;
        }

        if self.last_login < 0 {
            self.last_login = 0;
            corrections.last_login = true;
        }

        if corrections.any() {
            info!(
                "event=member_validate module=domain status=corrected score={} join_date={} last_login={}",
                corrections.score, corrections.join_date, corrections.last_login
            );
        }
        corrections
    }

    /// Whether the member falls under the inactivity/zero-score removal rule.
    ///
    /// `max_idle_days` is the last_login threshold (inclusive) for removal.
    pub fn is_removable(&self, max_idle_days: i64) -> bool {
        self.score <= MIN_SCORE || self.last_login >= max_idle_days
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
