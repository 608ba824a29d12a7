mod common;

use common::MockConn;
use myorm::{query, row, OrmError, Statement, Transaction, Value};

#[test]
fn batch_commits_in_order() {
    let conn = MockConn::new();
    let result = Transaction::new(&conn)
        .add(Statement::new(
            "INSERT INTO `user` (`name`) VALUES (?)",
            vec![Value::from("a")],
        ))
        .add(Statement::new(
            "UPDATE `user` SET `age` = ? WHERE `id` = ?",
            vec![Value::Int(20), Value::Int(1)],
        ))
        .add(Statement::new(
            "DELETE FROM `user` WHERE `id` = ?",
            vec![Value::Int(2)],
        ))
        .commit()
        .unwrap();

    assert_eq!(result.statements, 3);
    assert_eq!(result.rows_affected, 3);
    assert_eq!(conn.commits(), 1);
    assert_eq!(conn.rollbacks(), 0);

    let sql = conn.executed_sql();
    assert!(sql[0].starts_with("INSERT"));
    assert!(sql[1].starts_with("UPDATE"));
    assert!(sql[2].starts_with("DELETE"));
}

#[test]
fn batch_rolls_back_on_first_failure() {
    let conn = MockConn::new();
    conn.fail_on_execute(1);

    let err = Transaction::new(&conn)
        .add_all([
            Statement::new("DELETE FROM `user` WHERE `id` = ?", vec![Value::Int(1)]),
            Statement::new("DELETE FROM `user` WHERE `id` = ?", vec![Value::Int(2)]),
            Statement::new("DELETE FROM `user` WHERE `id` = ?", vec![Value::Int(3)]),
        ])
        .commit()
        .unwrap_err();

    match err {
        OrmError::Batch { index, .. } => assert_eq!(index, 1),
        other => panic!("unexpected error: {other}"),
    }
    // stops at the failing statement, rolls back, never commits
    assert_eq!(conn.executed().len(), 2);
    assert_eq!(conn.rollbacks(), 1);
    assert_eq!(conn.commits(), 0);
}

#[test]
fn batch_error_keeps_index_when_rollback_fails() {
    let conn = MockConn::new();
    conn.fail_on_execute(0);
    conn.fail_on_rollback();

    let err = Transaction::new(&conn)
        .add(Statement::new(
            "DELETE FROM `user` WHERE `id` = ?",
            vec![Value::Int(1)],
        ))
        .commit()
        .unwrap_err();

    assert_eq!(err.batch_index(), Some(0));
    match err {
        OrmError::Batch { source, .. } => {
            assert!(matches!(*source, OrmError::RollbackFailed { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(conn.commits(), 0);
}

#[test]
fn empty_batch_never_touches_the_driver() {
    let conn = MockConn::new();
    let result = Transaction::new(&conn).commit().unwrap();
    assert_eq!(result.statements, 0);
    assert_eq!(result.rows_affected, 0);
    assert!(conn.executed().is_empty());
    assert_eq!(conn.commits(), 0);
}

#[test]
fn raw_query_defers_into_a_batch() {
    let conn = MockConn::new();
    let stmt = query("UPDATE `user` SET `age` = ? WHERE `id` IN (?, ?)")
        .bind(30i64)
        .bind_all([1i64, 2])
        .into_statement();
    assert_eq!(stmt.placeholder_count(), stmt.params().len());

    let result = Transaction::new(&conn).add(stmt).commit().unwrap();
    assert_eq!(result.statements, 1);
    assert_eq!(
        conn.executed()[0].1,
        vec![Value::Int(30), Value::Int(1), Value::Int(2)]
    );
    assert_eq!(conn.commits(), 1);
}

#[test]
fn batch_accepts_builder_statements() {
    let conn = MockConn::new();
    let orm = myorm::Orm::new(&conn, "user");
    let insert = orm.insert_stmt(row! { "name" => "a" }).unwrap();
    let delete = orm.delete_by_primary_key_stmt(Value::Int(9));

    let result = Transaction::new(&conn).add(insert).add(delete).commit().unwrap();
    assert_eq!(result.statements, 2);
    assert_eq!(conn.commits(), 1);
}
