mod common;

use common::MockConn;
use myorm::{row, Example, Op, Orm, Value};

#[test]
fn insert_then_select_round_trips() {
    let conn = MockConn::new();
    conn.queue_result(Vec::new()); // insert
    conn.queue_result(vec![row! {
        "id" => 1u64,
        "name" => "Alice",
        "age" => 30i64,
    }]);

    let orm = Orm::new(&conn, "user");
    let key = orm
        .insert_one(row! { "name" => "Alice", "age" => 30i64 })
        .unwrap();
    assert_eq!(key, Value::UInt(1));
    assert_eq!(conn.commits(), 1);

    let found = orm.select_by_primary_key(key).unwrap().unwrap();
    assert_eq!(found.get("name").and_then(Value::as_str), Some("Alice"));
    assert_eq!(found.get("age"), Some(&Value::Int(30)));

    let sql = conn.executed_sql();
    assert_eq!(
        sql,
        vec![
            "INSERT INTO `user` (`name`, `age`) VALUES (?, ?)".to_string(),
            "SELECT * FROM `user` WHERE `id` = ?".to_string(),
        ]
    );
    // reads never touch the transaction state
    assert_eq!(conn.commits(), 1);
    assert_eq!(conn.rollbacks(), 0);
}

#[test]
fn update_and_delete_commit_per_statement() {
    let conn = MockConn::new();
    let orm = Orm::new(&conn, "user");

    let affected = orm
        .update_by_primary_key(row! { "id" => 7i64, "age" => 31i64 }, None)
        .unwrap();
    assert_eq!(affected, 1);

    orm.delete_by_example(&Example::new().and("age", Op::lt(18i64)))
        .unwrap();

    let executed = conn.executed();
    assert_eq!(executed[0].0, "UPDATE `user` SET `age` = ? WHERE `id` = ?");
    assert_eq!(executed[0].1, vec![Value::Int(31), Value::Int(7)]);
    assert_eq!(executed[1].0, "DELETE FROM `user` WHERE `age` < ?");
    assert_eq!(executed[1].1, vec![Value::Int(18)]);
    assert_eq!(conn.commits(), 2);
}

#[test]
fn dict_list_insert_returns_last_key() {
    let conn = MockConn::new();
    let orm = Orm::new(&conn, "user");

    let key = orm
        .insert_dict_list(vec![
            row! { "name" => "a" },
            row! { "name" => "b" },
            row! { "name" => "c" },
        ])
        .unwrap();

    // one executed entry per row, ids handed out in order
    assert_eq!(conn.executed().len(), 3);
    assert_eq!(key, Value::UInt(3));
    assert_eq!(conn.commits(), 1);
}

#[test]
fn close_releases_the_connection() {
    let conn = MockConn::new();
    let orm = Orm::new(&conn, "user");
    orm.close().unwrap();
    assert!(conn.closed());
}
