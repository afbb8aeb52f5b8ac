//! Member and content-record persistence for the roster store.
//! Row Data Gateways, their domain entities, and the equivalent Transaction
//! Script procedures over one SQLite file.

pub mod config;
pub mod db;
pub mod domain;
pub mod finder;
pub mod gateway;
pub mod logging;
pub mod model;
pub mod script;

pub use config::{ConfigError, StoreConfig};
pub use db::{open_store, DbError, DbResult, StoreLocation, TableStatus};
pub use domain::content_record::ContentRecord;
pub use domain::member::{Corrections, Member};
pub use finder::Finder;
pub use gateway::{ContentRecordGateway, MemberGateway, PersistenceError, PersistenceResult};
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::grant::Grant;
pub use model::row::{ContentRecordRow, MemberRow, MemberUpdate};
pub use model::table::{ContentTable, IdentifierError, TableName};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
