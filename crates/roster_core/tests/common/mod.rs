#![allow(dead_code)]

use roster_core::{ContentTable, StoreLocation};
use rusqlite::Connection;
use tempfile::TempDir;

pub const MEMBER_DDL: &str = "CREATE TABLE member (
    nick_name TEXT PRIMARY KEY,
    kakao_nick_name TEXT,
    join_date TEXT,
    \"grant\" INTEGER,
    last_login INTEGER,
    score INTEGER CHECK (score <= 100)
);";

/// On-disk store that lives as long as the returned value.
pub struct TestStore {
    _dir: TempDir,
    pub location: StoreLocation,
}

pub fn empty_store() -> TestStore {
    let dir = tempfile::tempdir().unwrap();
    let location = StoreLocation::new(dir.path().join("MemberManagement.db"));
    TestStore {
        _dir: dir,
        location,
    }
}

pub fn store_with_member_table() -> TestStore {
    let store = empty_store();
    raw_conn(&store.location).execute_batch(MEMBER_DDL).unwrap();
    store
}

pub fn create_content_table(location: &StoreLocation, content: &ContentTable) {
    raw_conn(location)
        .execute_batch(&format!(
            "CREATE TABLE {} (
                nick_name TEXT,
                score INTEGER,
                participation_count INTEGER,
                day INTEGER,
                PRIMARY KEY (nick_name, day)
            );",
            content.table_name().quoted()
        ))
        .unwrap();
}

pub fn raid() -> ContentTable {
    ContentTable::new("raid", "20240925").unwrap()
}

pub fn raw_conn(location: &StoreLocation) -> Connection {
    Connection::open(location.path()).unwrap()
}

pub fn row_count(location: &StoreLocation, table: &str) -> i64 {
    raw_conn(location)
        .query_row(&format!("SELECT COUNT(*) FROM \"{table}\";"), [], |row| {
            row.get(0)
        })
        .unwrap()
}

pub fn table_names(location: &StoreLocation) -> Vec<String> {
    let conn = raw_conn(location);
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name;")
        .unwrap();
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    names
}
