//! Tests for the INSERT builder.

use crate::error::QbError;
use crate::placeholder::PlaceholderFormat;
use crate::pred::{Eq, Gt};
use crate::value::Value;
use crate::{StatementBuilder, expr, params};

fn qb() -> StatementBuilder {
    StatementBuilder::default()
}

fn psql() -> StatementBuilder {
    StatementBuilder::default().placeholder_format(PlaceholderFormat::DOLLAR)
}

#[test]
fn test_insert_rows() {
    let (sql, args) = qb()
        .insert("users")
        .columns(["name", "age"])
        .values(params!["moe", 13])
        .values(params!["larry", 35])
        .to_sql()
        .unwrap();
    assert_eq!(sql, "INSERT INTO users (name,age) VALUES (?,?),(?,?)");
    assert_eq!(format!("{args:?}"), r#"["moe", 13, "larry", 35]"#);
}

#[test]
fn test_insert_numbered() {
    let (sql, args) = psql()
        .insert("users")
        .columns(["name", "age"])
        .values(params!["moe", 13])
        .values(params!["larry", 35])
        .suffix("RETURNING id", params![])
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        "INSERT INTO users (name,age) VALUES ($1,$2),($3,$4) RETURNING id"
    );
    assert_eq!(args.len(), 4);
}

#[test]
fn test_insert_all_clauses() {
    let (sql, args) = qb()
        .insert("a")
        .prefix("WITH prefix AS ?", params![0])
        .options(["DELAYED", "IGNORE"])
        .columns(["b", "c"])
        .values(params![1, 2])
        .values([Value::param(3), Value::expr("? + 1", params![4])])
        .suffix("RETURNING ?", params![5])
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        "WITH prefix AS ? INSERT DELAYED IGNORE INTO a (b,c) VALUES (?,?),(?,? + 1) RETURNING ?"
    );
    assert_eq!(format!("{args:?}"), "[0, 1, 2, 3, 4, 5]");
}

#[test]
fn test_insert_expression_values() {
    let (sql, args) = psql()
        .insert("events")
        .columns(["kind", "at"])
        .values([Value::param("login"), expr("NOW()", params![]).into()])
        .to_sql()
        .unwrap();
    assert_eq!(sql, "INSERT INTO events (kind,at) VALUES ($1,NOW())");
    assert_eq!(format!("{args:?}"), r#"["login"]"#);
}

#[test]
fn test_insert_subquery_value() {
    let max_id = qb().select(["max(id)"]).from("t").where_(Gt::one("v", 1));
    let (sql, args) = psql()
        .insert("t")
        .columns(["id", "v"])
        .values([Value::from(max_id), Value::param(2)])
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        "INSERT INTO t (id,v) VALUES ((SELECT max(id) FROM t WHERE v > $1),$2)"
    );
    assert_eq!(format!("{args:?}"), "[1, 2]");
}

#[test]
fn test_set_map_sorts_columns() {
    let (sql, args) = qb()
        .insert("users")
        .columns(["ignored"])
        .values(params![0])
        .set_map([
            ("name", Value::param("moe")),
            ("age", Value::param(13)),
            ("created_at", Value::expr("NOW()", params![])),
        ])
        .to_sql()
        .unwrap();
    assert_eq!(sql, "INSERT INTO users (age,created_at,name) VALUES (?,NOW(),?)");
    assert_eq!(format!("{args:?}"), r#"[13, "moe"]"#);
}

#[test]
fn test_select_takes_precedence_over_values() {
    let source = qb()
        .select(["name", "age"])
        .from("staging")
        .where_(Eq::one("ready", true));
    let (sql, args) = psql()
        .insert("users")
        .columns(["name", "age"])
        .values(params!["dropped", 1])
        .select(source)
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        "INSERT INTO users (name,age) SELECT name, age FROM staging WHERE ready = $1"
    );
    assert_eq!(format!("{args:?}"), "[true]");
}

#[test]
fn test_insert_requires_table() {
    let err = qb().insert("").values(params![1]).to_sql().unwrap_err();
    assert_eq!(err, QbError::MissingInsertTarget);
    assert!(err.is_structural());
}

#[test]
fn test_insert_requires_values_or_select() {
    let err = qb().insert("t").columns(["a"]).to_sql().unwrap_err();
    assert_eq!(err, QbError::MissingInsertPayload);
}

#[test]
fn test_insert_is_immutable() {
    let base = qb().insert("t").columns(["a"]);
    let one = base.values(params![1]);
    let two = one.values(params![2]);

    assert!(base.to_sql().is_err());
    assert_eq!(one.to_sql().unwrap().0, "INSERT INTO t (a) VALUES (?)");
    assert_eq!(two.to_sql().unwrap().0, "INSERT INTO t (a) VALUES (?),(?)");
}
