//! Content participation entity.

use crate::db::StoreLocation;
use crate::gateway::{ContentRecordGateway, PersistenceResult};
use crate::model::row::ContentRecordRow;
use crate::model::table::ContentTable;

/// One member's participation on one day of a content cycle.
///
/// Thin delegation to `ContentRecordGateway`; no validation layer.
#[derive(Debug, Clone)]
pub struct ContentRecord {
    pub score: i64,
    pub participation_count: i64,
    gateway: ContentRecordGateway,
}

impl ContentRecord {
    pub fn new(
        store: StoreLocation,
        content: ContentTable,
        nick_name: impl Into<String>,
        day: i64,
        score: i64,
        participation_count: i64,
    ) -> Self {
        Self {
            score,
            participation_count,
            gateway: ContentRecordGateway::new(store, content, nick_name, day),
        }
    }

    /// Builds a record from a row returned by the finder.
    ///
    /// `NULL` score or participation count loads as `0`.
    pub fn from_row(
        store: StoreLocation,
        content: ContentTable,
        nick_name: impl Into<String>,
        row: ContentRecordRow,
    ) -> Self {
        Self::new(
            store,
            content,
            nick_name,
            row.day,
            row.score.unwrap_or(0),
            row.participation_count.unwrap_or(0),
        )
    }

    pub fn nick_name(&self) -> &str {
        self.gateway.nick_name()
    }

    pub fn day(&self) -> i64 {
        self.gateway.day()
    }

    pub fn content(&self) -> &ContentTable {
        self.gateway.content()
    }

    pub fn insert(&self) -> PersistenceResult<()> {
        self.gateway.insert(self.score, self.participation_count)
    }

    /// Reloads score and participation count; `false` when the row is absent.
    ///
    /// `NULL` columns reload as `0`.
    pub fn fetch(&mut self) -> PersistenceResult<bool> {
        match self.gateway.fetch()? {
            Some(row) => {
                self.score = row.score.unwrap_or(0);
                self.participation_count = row.participation_count.unwrap_or(0);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn update(&self) -> PersistenceResult<()> {
        self.gateway.update(self.score, self.participation_count)
    }

    pub fn delete(&self) -> PersistenceResult<bool> {
        self.gateway.delete()
    }
}
