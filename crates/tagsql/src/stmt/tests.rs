use super::*;
use crate::Model;
use crate::config::QuoteStyle;
use crate::nulls::NullString;
use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

#[derive(Model)]
#[orm(table = "test")]
#[allow(non_snake_case)]
struct TestStruct {
    #[orm(column = "id")]
    ID: Uuid,
    #[orm(column = "name")]
    Name: String,
    #[orm(column = "created_at")]
    CreatedAt: NaiveDateTime,
    #[orm(column = "updated_at")]
    UpdatedAt: NaiveDateTime,
    #[orm(column = "an_int")]
    AnInt: i64,
    #[orm(column = "a_float")]
    AFloat: f64,
    #[orm(column = "a_bool")]
    ABool: bool,
}

fn test_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2019, 3, 14)
        .unwrap()
        .and_hms_opt(15, 9, 26)
        .unwrap()
}

fn test_struct() -> TestStruct {
    TestStruct {
        ID: Uuid::parse_str("86f65f0c-0320-461b-9047-6303d79db43d").unwrap(),
        Name: "asdf".into(),
        CreatedAt: test_time(),
        UpdatedAt: test_time(),
        AnInt: 7,
        AFloat: 7.0,
        ABool: true,
    }
}

const COLUMNS: &str = "id,name,created_at,updated_at,an_int,a_float,a_bool";

#[test]
fn insert_stmt() {
    assert_eq!(
        insert(&test_struct()).unwrap(),
        format!("INSERT INTO test ({COLUMNS}) VALUES")
    );
}

#[test]
fn insert_ignore_stmt() {
    assert_eq!(
        insert_ignore(&test_struct()).unwrap(),
        format!("INSERT IGNORE INTO test ({COLUMNS}) VALUES")
    );
}

#[test]
fn replace_stmt() {
    assert_eq!(
        replace(&test_struct()).unwrap(),
        format!("REPLACE INTO test ({COLUMNS}) VALUES")
    );
}

#[test]
fn select_stmt() {
    assert_eq!(
        select(&test_struct()).unwrap(),
        format!("SELECT {COLUMNS} FROM test")
    );
}

#[test]
fn truncate_stmt() {
    assert_eq!(truncate(&test_struct()), "TRUNCATE TABLE test");
}

#[test]
fn value_tuple_matches_columns() {
    assert_eq!(
        crate::value_tuple(&test_struct()).unwrap(),
        "('86f65f0c-0320-461b-9047-6303d79db43d','asdf','2019-03-14 15:09:26','2019-03-14 15:09:26',7,7.000000,true)"
    );
}

#[test]
fn insert_family_shares_column_list() {
    let m = test_struct();
    let strip = |sql: String, prefix: &str| {
        sql.strip_prefix(prefix)
            .and_then(|s| s.strip_suffix(" VALUES"))
            .map(str::to_string)
            .unwrap()
    };
    let a = strip(insert(&m).unwrap(), "INSERT INTO test ");
    let b = strip(insert_ignore(&m).unwrap(), "INSERT IGNORE INTO test ");
    let c = strip(replace(&m).unwrap(), "REPLACE INTO test ");
    assert_eq!(a, b);
    assert_eq!(b, c);
    assert_eq!(a, format!("({COLUMNS})"));
}

#[test]
fn backtick_quoting() {
    let b = StatementBuilder::new(StatementConfig::mysql());
    let m = test_struct();
    assert_eq!(
        b.insert(&m).unwrap(),
        "INSERT INTO `test` (`id`,`name`,`created_at`,`updated_at`,`an_int`,`a_float`,`a_bool`) VALUES"
    );
    // SELECT and TRUNCATE stay unwrapped.
    assert_eq!(b.select(&m).unwrap(), format!("SELECT {COLUMNS} FROM test"));
    assert_eq!(b.truncate(&m), "TRUNCATE TABLE test");
}

#[test]
fn double_quoting() {
    let b = StatementBuilder::new(StatementConfig::new().with_quote(QuoteStyle::Double));
    assert!(
        b.replace(&test_struct())
            .unwrap()
            .starts_with(r#"REPLACE INTO "test" ("id","name","#)
    );
}

#[derive(Model)]
#[orm(table = "people")]
struct Person {
    #[orm(id, column = "id")]
    id: i64,
    #[orm(column = "full_name")]
    name: String,
    nick: NullString,
    notes: String,
}

fn person() -> Person {
    Person {
        id: 9,
        name: "Ann O'Neil".into(),
        nick: NullString::null(),
        notes: "x".into(),
    }
}

#[test]
fn untagged_fields_default_in_insert_but_not_select() {
    let p = person();
    assert_eq!(
        insert(&p).unwrap(),
        "INSERT INTO people (id,full_name,nick,notes) VALUES"
    );
    assert_eq!(select(&p).unwrap(), "SELECT id,full_name FROM people");
}

#[test]
fn update_uses_primary_key() {
    assert_eq!(
        update(&person()).unwrap(),
        "UPDATE people SET full_name='Ann O\\'Neil',nick=NULL,notes='x' WHERE id=9"
    );
    assert_eq!(
        update_set_clause(&person()).unwrap(),
        "full_name='Ann O\\'Neil',nick=NULL,notes='x'"
    );
}

#[test]
fn update_by_named_field() {
    let b = StatementBuilder::new(StatementConfig::mysql());
    assert_eq!(
        b.update_by(&person(), "notes").unwrap(),
        "UPDATE `people` SET `id`=9,`full_name`='Ann O\\'Neil',`nick`=NULL WHERE `notes`='x'"
    );
    assert!(update_by(&person(), "missing").unwrap_err().is_missing_field());
}

#[test]
fn update_falls_back_to_id_column() {
    let sql = update(&test_struct()).unwrap();
    assert!(sql.starts_with("UPDATE test SET name='asdf',"));
    assert!(sql.ends_with(" WHERE id='86f65f0c-0320-461b-9047-6303d79db43d'"));
}

#[test]
fn set_clause_skips_id_column_fallback() {
    let m = test_struct();
    let set = update_set_clause(&m).unwrap();
    assert_eq!(
        set,
        "name='asdf',created_at='2019-03-14 15:09:26',updated_at='2019-03-14 15:09:26',an_int=7,a_float=7.000000,a_bool=true"
    );
    assert_eq!(
        update(&m).unwrap(),
        format!("UPDATE test SET {set} WHERE id='86f65f0c-0320-461b-9047-6303d79db43d'")
    );
}

#[derive(Model)]
#[orm(table = "events")]
struct Event {
    #[orm(column = "kind")]
    kind: String,
}

#[test]
fn update_without_key_is_missing_field() {
    let e = Event { kind: "a".into() };
    assert!(matches!(update(&e), Err(OrmError::MissingField(name)) if name == "id"));
}

#[test]
fn insert_many_appends_tuples() {
    let people = [
        person(),
        Person {
            id: 10,
            name: "Bo".into(),
            nick: NullString::new("b".into()),
            notes: String::new(),
        },
    ];
    assert_eq!(
        insert_many(&people).unwrap().unwrap(),
        "INSERT INTO people (id,full_name,nick,notes) VALUES (9,'Ann O\\'Neil',NULL,'x'),(10,'Bo','b','')"
    );
    assert!(replace_many(&people).unwrap().unwrap().starts_with("REPLACE INTO people "));
    assert!(
        insert_ignore_many(&people)
            .unwrap()
            .unwrap()
            .starts_with("INSERT IGNORE INTO people ")
    );
    assert_eq!(insert_many::<Person>(&[]).unwrap(), None);
}

#[derive(Model)]
#[orm(table = "blank")]
struct Untagged {
    value: i32,
}

#[test]
fn select_without_tags_has_no_columns() {
    let u = Untagged { value: 1 };
    assert!(matches!(select(&u), Err(OrmError::NoColumns { .. })));
    assert_eq!(insert(&u).unwrap(), "INSERT INTO blank (value) VALUES");
}

struct Manual;

impl Table for Manual {
    fn table_name(&self) -> &str {
        "manual"
    }
}

impl Reflect for Manual {
    fn type_name(&self) -> &'static str {
        "Manual"
    }

    fn shape(&self) -> crate::Shape<'_> {
        crate::Shape::Scalar
    }
}

#[test]
fn non_struct_models_are_rejected() {
    assert!(insert(&Manual).unwrap_err().is_not_a_struct());
    assert!(select(&Manual).unwrap_err().is_not_a_struct());
    assert_eq!(truncate(&Manual), "TRUNCATE TABLE manual");
}

#[test]
fn delete_by_key() {
    assert_eq!(delete(&person()).unwrap(), "DELETE FROM people WHERE id=9");
    assert_eq!(
        delete(&test_struct()).unwrap(),
        "DELETE FROM test WHERE id='86f65f0c-0320-461b-9047-6303d79db43d'"
    );
    let b = StatementBuilder::new(StatementConfig::mysql());
    assert_eq!(b.delete(&person()).unwrap(), "DELETE FROM `people` WHERE `id`=9");
    assert!(delete(&Event { kind: "a".into() }).unwrap_err().is_missing_field());
}

#[test]
fn delete_many_lists_keys() {
    let people = [person(), Person { id: 12, ..person() }];
    assert_eq!(
        delete_many(&people).unwrap().unwrap(),
        "DELETE FROM people WHERE id IN (9,12)"
    );
    assert_eq!(delete_many::<Person>(&[]).unwrap(), None);
    assert!(
        delete_many(&[Event { kind: "a".into() }])
            .unwrap_err()
            .is_missing_field()
    );
}

#[test]
fn upsert_refreshes_non_key_columns() {
    assert_eq!(
        upsert(&person()).unwrap(),
        "INSERT INTO people (id,full_name,nick,notes) VALUES (9,'Ann O\\'Neil',NULL,'x') \
         ON DUPLICATE KEY UPDATE full_name=VALUES(full_name),nick=VALUES(nick),notes=VALUES(notes)"
    );

    let b = StatementBuilder::new(StatementConfig::mysql());
    let sql = b
        .upsert_many(&[person(), Person { id: 10, ..person() }])
        .unwrap()
        .unwrap();
    assert!(sql.starts_with("INSERT INTO `people` (`id`,`full_name`,`nick`,`notes`) VALUES (9,"));
    assert!(sql.contains("'x'),(10,"));
    assert!(sql.ends_with(
        " ON DUPLICATE KEY UPDATE `full_name`=VALUES(`full_name`),`nick`=VALUES(`nick`),`notes`=VALUES(`notes`)"
    ));
    assert_eq!(upsert_many::<Person>(&[]).unwrap(), None);
}

#[test]
fn upsert_without_key_refreshes_every_column() {
    assert_eq!(
        upsert(&Event { kind: "a".into() }).unwrap(),
        "INSERT INTO events (kind) VALUES ('a') ON DUPLICATE KEY UPDATE kind=VALUES(kind)"
    );
}

#[derive(Model)]
#[orm(table = "keys")]
struct OnlyKey {
    #[orm(id, column = "id")]
    id: i64,
}

#[test]
fn upsert_with_only_a_key_has_nothing_to_refresh() {
    assert!(matches!(
        upsert(&OnlyKey { id: 1 }),
        Err(OrmError::NoColumns { type_name: "OnlyKey" })
    ));
}
