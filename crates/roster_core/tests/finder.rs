mod common;

use common::{create_content_table, empty_store, raid, raw_conn, store_with_member_table};
use roster_core::{ContentRecordGateway, ContentRecordRow, Finder, Grant, PersistenceError};

#[test]
fn find_member_returns_row_or_none() {
    let store = store_with_member_table();
    raw_conn(&store.location)
        .execute_batch(
            "INSERT INTO member VALUES ('User_0001', 'Kakao_0001', '20210101', 1, 2, 3);",
        )
        .unwrap();
    let finder = Finder::new(store.location.clone());

    let row = finder.find_member("User_0001").unwrap().unwrap();
    assert_eq!(row.kakao_nick_name.as_deref(), Some("Kakao_0001"));
    assert_eq!(row.grant, Some(Grant::SubAdmin));
    assert_eq!((row.last_login, row.score), (Some(2), Some(3)));

    assert!(finder.find_member("User_0002").unwrap().is_none());
}

#[test]
fn find_content_records_lists_every_day_in_order() {
    let store = empty_store();
    create_content_table(&store.location, &raid());
    for (day, score) in [(3, 30), (1, 10), (2, 20)] {
        ContentRecordGateway::new(store.location.clone(), raid(), "A", day)
            .insert(score, 1)
            .unwrap();
    }
    ContentRecordGateway::new(store.location.clone(), raid(), "B", 1)
        .insert(99, 1)
        .unwrap();

    let finder = Finder::new(store.location.clone());
    let days: Vec<i64> = finder
        .find_content_records(&raid(), "A")
        .unwrap()
        .iter()
        .map(|row| row.day)
        .collect();
    assert_eq!(days, vec![1, 2, 3]);

    assert!(finder.find_content_records(&raid(), "C").unwrap().is_empty());
}

#[test]
fn find_content_record_by_composite_key() {
    let store = empty_store();
    create_content_table(&store.location, &raid());
    ContentRecordGateway::new(store.location.clone(), raid(), "A", 2)
        .insert(20, 4)
        .unwrap();

    let finder = Finder::new(store.location.clone());
    assert_eq!(
        finder.find_content_record(&raid(), "A", 2).unwrap(),
        Some(ContentRecordRow {
            score: Some(20),
            participation_count: Some(4),
            day: 2
        })
    );
    assert_eq!(finder.find_content_record(&raid(), "A", 1).unwrap(), None);
}

#[test]
fn member_with_null_columns_is_found_not_missing() {
    let store = store_with_member_table();
    raw_conn(&store.location)
        .execute_batch("INSERT INTO member (nick_name, score) VALUES ('User_0001', 5);")
        .unwrap();

    let row = Finder::new(store.location.clone())
        .find_member("User_0001")
        .unwrap()
        .unwrap();
    assert_eq!(row.score, Some(5));
    assert_eq!((row.kakao_nick_name, row.join_date, row.grant), (None, None, None));
}

#[test]
fn lookups_against_missing_tables_are_reported() {
    let store = empty_store();
    let finder = Finder::new(store.location.clone());

    assert!(matches!(
        finder.find_member("User_0001").unwrap_err(),
        PersistenceError::MissingTable(table) if table == "member"
    ));
    assert!(finder
        .find_content_records(&raid(), "A")
        .unwrap_err()
        .is_missing_table());
    assert!(finder
        .find_content_record(&raid(), "A", 1)
        .unwrap_err()
        .is_missing_table());
}
