mod common;

use common::{create_content_table, empty_store, raid, raw_conn, row_count, table_names};
use roster_core::{ContentRecordGateway, ContentRecordRow, ContentTable, PersistenceError};

#[test]
fn insert_update_fetch_scenario() {
    let store = empty_store();
    create_content_table(&store.location, &raid());
    let gateway = ContentRecordGateway::new(store.location.clone(), raid(), "User_0001", 1);

    gateway.insert(10, 1).unwrap();
    gateway.update(12, 2).unwrap();

    let fetched = gateway.fetch().unwrap().unwrap();
    assert_eq!(
        fetched,
        ContentRecordRow {
            score: Some(12),
            participation_count: Some(2),
            day: 1
        }
    );
}

#[test]
fn day_rows_of_one_member_are_independent() {
    let store = empty_store();
    create_content_table(&store.location, &raid());
    let day_one = ContentRecordGateway::new(store.location.clone(), raid(), "A", 1);
    let day_two = ContentRecordGateway::new(store.location.clone(), raid(), "A", 2);

    day_one.insert(5, 1).unwrap();
    day_two.insert(7, 1).unwrap();
    assert_eq!(row_count(&store.location, "raid_20240925"), 2);

    day_one.update(9, 3).unwrap();
    assert_eq!(day_two.fetch().unwrap().unwrap().score, Some(7));

    assert!(day_one.delete().unwrap());
    assert!(day_one.fetch().unwrap().is_none());
    let remaining = day_two.fetch().unwrap().unwrap();
    assert_eq!((remaining.score, remaining.day), (Some(7), 2));
}

#[test]
fn insert_writes_the_day_bound_at_construction() {
    let store = empty_store();
    create_content_table(&store.location, &raid());
    ContentRecordGateway::new(store.location.clone(), raid(), "A", 3)
        .insert(8, 1)
        .unwrap();

    let day: i64 = raw_conn(&store.location)
        .query_row(
            "SELECT day FROM raid_20240925 WHERE nick_name = 'A';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(day, 3);
}

#[test]
fn null_score_and_count_are_read_back_as_none() {
    let store = empty_store();
    create_content_table(&store.location, &raid());
    raw_conn(&store.location)
        .execute_batch("INSERT INTO raid_20240925 (nick_name, day) VALUES ('A', 1);")
        .unwrap();

    let fetched = ContentRecordGateway::new(store.location.clone(), raid(), "A", 1)
        .fetch()
        .unwrap();
    assert_eq!(
        fetched,
        Some(ContentRecordRow {
            score: None,
            participation_count: None,
            day: 1
        })
    );
}

#[test]
fn duplicate_key_insert_is_rejected() {
    let store = empty_store();
    create_content_table(&store.location, &raid());
    let gateway = ContentRecordGateway::new(store.location.clone(), raid(), "A", 1);

    gateway.insert(5, 1).unwrap();
    let err = gateway.insert(6, 2).unwrap_err();
    assert!(matches!(err, PersistenceError::Db(_)));
    assert_eq!(gateway.fetch().unwrap().unwrap().score, Some(5));
}

#[test]
fn update_and_delete_of_absent_row() {
    let store = empty_store();
    create_content_table(&store.location, &raid());
    let gateway = ContentRecordGateway::new(store.location.clone(), raid(), "A", 4);

    assert!(matches!(
        gateway.update(1, 1).unwrap_err(),
        PersistenceError::NotFound { .. }
    ));
    assert!(!gateway.delete().unwrap());
}

#[test]
fn content_cycles_are_disjoint_tables() {
    let store = empty_store();
    let september = raid();
    let october = ContentTable::new("raid", "20241002").unwrap();
    create_content_table(&store.location, &september);
    create_content_table(&store.location, &october);

    ContentRecordGateway::new(store.location.clone(), september.clone(), "A", 1)
        .insert(3, 1)
        .unwrap();

    let other_cycle = ContentRecordGateway::new(store.location.clone(), october, "A", 1);
    assert!(other_cycle.fetch().unwrap().is_none());
    assert_eq!(row_count(&store.location, "raid_20241002"), 0);
}

#[test]
fn every_operation_reports_missing_content_table_without_writing() {
    let store = empty_store();
    let gateway = ContentRecordGateway::new(store.location.clone(), raid(), "A", 1);

    let outcomes = [
        gateway.insert(1, 1),
        gateway.fetch().map(|_| ()),
        gateway.update(1, 1),
        gateway.delete().map(|_| ()),
    ];
    for outcome in outcomes {
        match outcome {
            Err(PersistenceError::MissingTable(table)) => assert_eq!(table, "raid_20240925"),
            other => panic!("expected missing table, got {other:?}"),
        }
    }

    assert!(table_names(&store.location).is_empty());
}
