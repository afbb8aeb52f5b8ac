mod common;

use chrono::{Local, Months};
use common::{create_content_table, raid, raw_conn, store_with_member_table};
use roster_core::{ContentRecord, Finder, Grant, Member, MemberRow, PersistenceError};

#[test]
fn insert_then_fetch_roundtrip() {
    let store = store_with_member_table();
    let mut member = Member::new(store.location.clone(), "User_0001", "Kakao_0001");
    member.score = 7;
    member.last_login = 2;
    member.insert().unwrap();

    let mut reloaded = Member::new(store.location.clone(), "User_0001", "placeholder");
    assert!(reloaded.fetch().unwrap());
    assert_eq!(reloaded.to_row(), member.to_row());
}

#[test]
fn fetch_of_unknown_member_leaves_fields_untouched() {
    let store = store_with_member_table();
    let mut member = Member::new(store.location.clone(), "Ghost", "Kakao_Ghost");

    assert!(!member.fetch().unwrap());
    assert_eq!(member.kakao_nick_name.as_deref(), Some("Kakao_Ghost"));
}

#[test]
fn insert_does_not_validate() {
    let store = store_with_member_table();
    let mut member = Member::new(store.location.clone(), "User_0001", "Kakao_0001");
    member.score = 20;
    member.last_login = -3;
    member.insert().unwrap();

    let stored = Finder::new(store.location.clone())
        .find_member("User_0001")
        .unwrap()
        .unwrap();
    assert_eq!(stored.score, Some(20));
    assert_eq!(stored.last_login, Some(-3));
}

#[test]
fn update_clamps_score_before_writing() {
    let store = store_with_member_table();
    let mut member = Member::new(store.location.clone(), "U1", "Kakao_U1");
    member.insert().unwrap();

    member.score = 20;
    member.update().unwrap();

    let stored = Finder::new(store.location.clone())
        .find_member("U1")
        .unwrap()
        .unwrap();
    assert_eq!(stored.score, Some(15));
}

#[test]
fn update_resets_future_join_date_to_today() {
    let store = store_with_member_table();
    let mut member = Member::new(store.location.clone(), "U1", "Kakao_U1");
    member.insert().unwrap();

    let today = Local::now().date_naive();
    member.join_date = today.checked_add_months(Months::new(12)).unwrap();
    member.last_login = -1;
    member.update().unwrap();

    let stored = Finder::new(store.location.clone())
        .find_member("U1")
        .unwrap()
        .unwrap();
    let after = Local::now().date_naive();
    let join_date = stored.join_date.unwrap();
    assert!(join_date >= today && join_date <= after);
    assert_eq!(stored.last_login, Some(0));
}

#[test]
fn update_does_not_rewrite_kakao_nick_name() {
    let store = store_with_member_table();
    let mut member = Member::new(store.location.clone(), "U1", "Kakao_U1");
    member.insert().unwrap();

    member.kakao_nick_name = Some("Renamed".to_string());
    member.grant = Grant::SubAdmin;
    member.update().unwrap();

    let stored = Finder::new(store.location.clone())
        .find_member("U1")
        .unwrap()
        .unwrap();
    assert_eq!(stored.kakao_nick_name.as_deref(), Some("Kakao_U1"));
    assert_eq!(stored.grant, Some(Grant::SubAdmin));
}

#[test]
fn update_of_deleted_member_is_not_found() {
    let store = store_with_member_table();
    let mut member = Member::new(store.location.clone(), "U1", "Kakao_U1");
    member.insert().unwrap();
    assert!(member.delete().unwrap());

    assert!(matches!(
        member.update().unwrap_err(),
        PersistenceError::NotFound { .. }
    ));
}

#[test]
fn find_or_create_then_update_and_delete_flow() {
    let store = store_with_member_table();
    let finder = Finder::new(store.location.clone());

    let mut member = match finder.find_member("User_0001").unwrap() {
        Some(row) => Member::from_row(store.location.clone(), "User_0001", row),
        None => {
            let member = Member::new(store.location.clone(), "User_0001", "Kakao_0001");
            member.insert().unwrap();
            member
        }
    };
    assert!(member.fetch().unwrap());

    member.grant = Grant::SubAdmin;
    member.last_login = 3;
    member.update().unwrap();

    let row = finder.find_member("User_0001").unwrap().unwrap();
    let existing = Member::from_row(store.location.clone(), "User_0001", row);
    assert_eq!(existing.grant, Grant::SubAdmin);
    assert_eq!(existing.last_login, 3);

    if existing.is_removable(5) {
        assert!(existing.delete().unwrap());
    }
    assert!(finder.find_member("User_0001").unwrap().is_none());
}

#[test]
fn fetch_of_row_with_null_columns_finds_the_member() {
    let store = store_with_member_table();
    raw_conn(&store.location)
        .execute_batch("INSERT INTO member (nick_name, last_login) VALUES ('User_0003', 2);")
        .unwrap();

    let mut member = Member::new(store.location.clone(), "User_0003", "placeholder");
    assert!(member.fetch().unwrap());
    assert_eq!(member.kakao_nick_name, None);
    assert_eq!((member.grant, member.last_login, member.score), (Grant::User, 2, 0));

    member.score = 3;
    member.update().unwrap();
    let stored = Finder::new(store.location.clone())
        .find_member("User_0003")
        .unwrap()
        .unwrap();
    assert_eq!(stored.kakao_nick_name, None);
    assert_eq!(stored.score, Some(3));
}

#[test]
fn null_content_counters_reload_as_zero() {
    let store = store_with_member_table();
    create_content_table(&store.location, &raid());
    raw_conn(&store.location)
        .execute_batch("INSERT INTO raid_20240925 (nick_name, day) VALUES ('User_0001', 2);")
        .unwrap();

    let mut record = ContentRecord::new(store.location.clone(), raid(), "User_0001", 2, 9, 9);
    assert!(record.fetch().unwrap());
    assert_eq!((record.score, record.participation_count), (0, 0));
}

#[test]
fn member_rows_round_trip_through_json() {
    let store = store_with_member_table();
    raw_conn(&store.location)
        .execute_batch(
            "INSERT INTO member VALUES ('User_0002', 'Kakao_0002', '20230101', 0, 4, 9);",
        )
        .unwrap();

    let row = Finder::new(store.location.clone())
        .find_member("User_0002")
        .unwrap()
        .unwrap();
    let json = serde_json::to_value(&row).unwrap();
    assert_eq!(json["grant"], "ADMIN");
    assert_eq!(json["join_date"], "2023-01-01");

    let decoded: MemberRow = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, row);
}

#[test]
fn content_record_entity_delegates_to_gateway() {
    let store = store_with_member_table();
    create_content_table(&store.location, &raid());

    let mut record = ContentRecord::new(store.location.clone(), raid(), "User_0001", 1, 10, 1);
    record.insert().unwrap();

    record.score = 12;
    record.participation_count = 2;
    record.update().unwrap();

    let mut reloaded = ContentRecord::new(store.location.clone(), raid(), "User_0001", 1, 0, 0);
    assert!(reloaded.fetch().unwrap());
    assert_eq!((reloaded.score, reloaded.participation_count), (12, 2));

    let rows = Finder::new(store.location.clone())
        .find_content_records(&raid(), "User_0001")
        .unwrap();
    let from_finder = ContentRecord::from_row(
        store.location.clone(),
        raid(),
        "User_0001",
        rows[0],
    );
    assert_eq!(from_finder.day(), 1);
    assert_eq!(from_finder.content().table_name().as_str(), "raid_20240925");

    assert!(from_finder.delete().unwrap());
    assert!(!reloaded.fetch().unwrap());
}
