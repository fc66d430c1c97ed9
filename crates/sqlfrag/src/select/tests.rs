//! Tests for the SELECT builder.

use crate::error::QbError;
use crate::expr::{Or, Part, Pred, expr};
use crate::fragment::Sequence;
use crate::placeholder::PlaceholderFormat;
use crate::pred::{Eq, Gt, NotEq};
use crate::{StatementBuilder, SelectBuilder, params};

fn qb() -> StatementBuilder {
    StatementBuilder::default()
}

fn psql() -> StatementBuilder {
    StatementBuilder::default().placeholder_format(PlaceholderFormat::DOLLAR)
}

#[test]
fn test_select_basic() {
    let (sql, args) = qb().select(["*"]).from("users").to_sql().unwrap();
    assert_eq!(sql, "SELECT * FROM users");
    assert!(args.is_empty());
}

#[test]
fn test_end_to_end_dollar() {
    let (sql, args) = psql()
        .select(["id", "name"])
        .from("users")
        .where_(Eq::one("status", "active"))
        .to_sql()
        .unwrap();
    assert_eq!(sql, "SELECT id, name FROM users WHERE status = $1");
    assert_eq!(format!("{args:?}"), r#"["active"]"#);
}

#[test]
fn test_marker_without_arg_is_rejected() {
    let err = qb()
        .select(["*"])
        .from("t")
        .where_("i = ?")
        .to_sql()
        .unwrap_err();
    assert!(err.is_placeholder_mismatch());
    assert!(err.is_structural());
    assert_eq!(
        err,
        QbError::SqlArgMismatch {
            sql: "i = ?".to_string(),
            placeholders: 1,
            args: 0
        }
    );
}

#[test]
fn test_markers_align_with_args() {
    let (sql, args) = psql()
        .select(["*"])
        .from("t")
        .where_sql("a = ?", params!["x"])
        .where_(Or::new([Pred::from(Eq::one("b", 2)), Pred::from(Gt::one("c", 3))]))
        .suffix("LIMIT ?", params![4i64])
        .to_sql()
        .unwrap();
    assert_eq!(sql, "SELECT * FROM t WHERE a = $1 AND (b = $2 OR c > $3) LIMIT $4");
    assert_eq!(format!("{args:?}"), r#"["x", 2, 3, 4]"#);
}

#[test]
fn test_select_clause_order() {
    let (sql, args) = qb()
        .select(["a", "b"])
        .prefix("WITH prefix AS ?", params![0])
        .distinct()
        .columns(["c"])
        .column("IF(d IN (?,?,?), 1, 0) as stat_column", params![1, 2, 3])
        .from("e")
        .join_clause("CROSS JOIN j1", params![])
        .left_join("j2 ON j2.id = e.id", params![])
        .where_sql("f = ?", params![4])
        .where_(Eq::one("g", 5))
        .where_(Eq::new().set_list("h", [6, 7, 8]))
        .where_(Or::new([Pred::from("i > 9"), Pred::from(Eq::one("j", 10))]))
        .group_by(["l"])
        .having_sql("m = n", params![])
        .order_by(["o ASC", "p DESC"])
        .limit(12)
        .offset(13)
        .suffix("FETCH FIRST ? ROWS ONLY", params![14])
        .to_sql()
        .unwrap();

    assert_eq!(
        sql,
        "WITH prefix AS ? \
         SELECT DISTINCT a, b, c, IF(d IN (?,?,?), 1, 0) as stat_column \
         FROM e CROSS JOIN j1 LEFT JOIN j2 ON j2.id = e.id \
         WHERE f = ? AND g = ? AND h IN (?,?,?) AND (i > 9 OR j = ?) \
         GROUP BY l HAVING m = n ORDER BY o ASC, p DESC LIMIT 12 OFFSET 13 \
         FETCH FIRST ? ROWS ONLY"
    );
    assert_eq!(format!("{args:?}"), "[0, 1, 2, 3, 4, 5, 6, 7, 8, 10, 14]");
}

#[test]
fn test_select_requires_columns() {
    let err = qb().select(Vec::<String>::new()).from("users").to_sql().unwrap_err();
    assert_eq!(err, QbError::NoColumns);

    // Columns that all render empty are no columns either.
    let err = qb().select([""]).from("users").to_sql().unwrap_err();
    assert_eq!(err, QbError::NoColumns);
}

#[test]
fn test_empty_where_is_suppressed() {
    let (sql, _) = qb()
        .select(["*"])
        .from("users")
        .condition()
        .where_(None::<&str>)
        .where_("")
        .where_(Eq::new())
        .to_sql()
        .unwrap();
    assert_eq!(sql, "SELECT * FROM users");
}

#[test]
fn test_empty_where_parts_leave_no_dangling_and() {
    let (sql, _) = qb()
        .select(["*"])
        .from("users")
        .condition()
        .where_("a = 1")
        .where_(None::<&str>)
        .where_("b = 2")
        .to_sql()
        .unwrap();
    assert_eq!(sql, "SELECT * FROM users WHERE a = 1 AND b = 2");
}

#[test]
fn test_derivation_does_not_affect_source() {
    let base = psql().select(["id"]).from("users");
    let before = base.to_sql().unwrap();

    let a = base.where_(Eq::one("a", 1));
    let b = base.where_(Eq::one("b", 2)).limit(5);

    assert_eq!(base.to_sql().unwrap().0, before.0);
    assert_eq!(a.to_sql().unwrap().0, "SELECT id FROM users WHERE a = $1");
    assert_eq!(b.to_sql().unwrap().0, "SELECT id FROM users WHERE b = $1 LIMIT 5");
}

#[test]
fn test_render_is_idempotent() {
    let qb = psql()
        .select(["id"])
        .from("users")
        .where_(Eq::new().set("b", 2).set("a", 1).set_list("c", [3, 4]));
    let (sql1, args1) = qb.to_sql().unwrap();
    let (sql2, args2) = qb.to_sql().unwrap();
    assert_eq!(sql1, sql2);
    assert_eq!(format!("{args1:?}"), format!("{args2:?}"));
    assert_eq!(sql1, "SELECT id FROM users WHERE a = $1 AND b = $2 AND c IN ($3,$4)");
}

#[test]
fn test_from_select_numbers_nested_placeholders() {
    let sub = qb()
        .select(["id"])
        .from("orders")
        .where_(Gt::one("total", 100))
        // the nested builder's own format is not applied when nested
        .placeholder_format(PlaceholderFormat::Named);
    let (sql, args) = psql()
        .select(["o.id"])
        .from_select(sub, "o")
        .where_(NotEq::one("o.id", 7))
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        "SELECT o.id FROM (SELECT id FROM orders WHERE total > $1) AS o WHERE o.id <> $2"
    );
    assert_eq!(format!("{args:?}"), "[100, 7]");
}

#[test]
fn test_subquery_in_where() {
    let banned = qb().select(["user_id"]).from("bans").where_(Eq::one("kind", "hard"));
    let (sql, args) = psql()
        .select(["*"])
        .from("users")
        .where_(Eq::one("active", true))
        .where_(expr("EXISTS (SELECT 1)", params![]))
        .where_(Sequence::new(
            vec![
                Part::from_pred("id NOT IN ("),
                Part::from_pred(banned),
                Part::from_pred(")"),
            ],
            "",
        ))
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        "SELECT * FROM users WHERE active = $1 AND EXISTS (SELECT 1) \
         AND id NOT IN (SELECT user_id FROM bans WHERE kind = $2)"
    );
    assert_eq!(format!("{args:?}"), r#"[true, "hard"]"#);
}

#[test]
fn test_placeholder_formats() {
    let qb = qb().select(["*"]).from("t").where_sql("a = ? AND b = ?", params![1, 2]);
    assert_eq!(qb.to_sql().unwrap().0, "SELECT * FROM t WHERE a = ? AND b = ?");
    assert_eq!(
        qb.placeholder_format(PlaceholderFormat::DOLLAR).to_sql().unwrap().0,
        "SELECT * FROM t WHERE a = $1 AND b = $2"
    );
    assert_eq!(
        qb.placeholder_format(PlaceholderFormat::COLON).to_sql().unwrap().0,
        "SELECT * FROM t WHERE a = :1 AND b = :2"
    );
    assert_eq!(
        qb.placeholder_format(PlaceholderFormat::Named).to_sql().unwrap().0,
        "SELECT * FROM t WHERE a = @p1 AND b = @p2"
    );
}

#[test]
fn test_invalid_predicate_aborts_render() {
    let err = qb()
        .select(["*"])
        .from("t")
        .join_clause(Eq::one("a", 1), params![2])
        .to_sql()
        .unwrap_err();
    assert!(matches!(err, QbError::InvalidPredicate(_)));
}

#[test]
fn test_remove_limit_and_offset() {
    let qb = qb().select(["*"]).from("t").limit(10).offset(20);
    assert_eq!(qb.to_sql().unwrap().0, "SELECT * FROM t LIMIT 10 OFFSET 20");
    assert_eq!(
        qb.remove_limit().remove_offset().to_sql().unwrap().0,
        "SELECT * FROM t"
    );
}

#[test]
fn test_convenience_comparisons() {
    let (sql, args) = psql()
        .select(["*"])
        .from("t")
        .eq("a", 1)
        .not_eq("b", 2)
        .gt("c", 3)
        .gt_or_eq("d", 4)
        .lt("e", 5)
        .lt_or_eq("f", 6)
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        "SELECT * FROM t WHERE a = $1 AND b <> $2 AND c > $3 AND d >= $4 AND e < $5 AND f <= $6"
    );
    assert_eq!(args.len(), 6);
}

#[test]
fn test_set_columns_replaces() {
    let qb: SelectBuilder = qb().select(["a", "b"]).from("t");
    assert_eq!(qb.set_columns(["count(*)"]).to_sql().unwrap().0, "SELECT count(*) FROM t");
    assert_eq!(qb.to_sql().unwrap().0, "SELECT a, b FROM t");
}

#[test]
fn test_having_with_map() {
    let (sql, args) = psql()
        .select(["dept", "count(*)"])
        .from("emp")
        .group_by(["dept"])
        .having(Gt::one("count(*)", 5i64))
        .to_sql()
        .unwrap();
    assert_eq!(sql, "SELECT dept, count(*) FROM emp GROUP BY dept HAVING count(*) > $1");
    assert_eq!(args.len(), 1);
}

#[test]
fn test_convenience_comparisons_with_none() {
    let (sql, args) = psql()
        .select(["id"])
        .from("t")
        .eq("deleted_at", None::<i64>)
        .not_eq("archived_at", None::<i64>)
        .eq("kind", vec!["a", "b"])
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        "SELECT id FROM t WHERE deleted_at IS NULL AND archived_at IS NOT NULL AND kind IN ($1,$2)"
    );
    assert_eq!(format!("{args:?}"), r#"["a", "b"]"#);
}

#[test]
fn test_raw_sql_arg_mismatch_names_the_fragment() {
    let err = qb()
        .select(["*"])
        .from("t")
        .where_sql("a = ?", params![])
        .to_sql()
        .unwrap_err();
    assert_eq!(
        err,
        QbError::SqlArgMismatch {
            sql: "a = ?".to_string(),
            placeholders: 1,
            args: 0
        }
    );
    assert!(err.is_structural());

    let err = qb()
        .select(["*"])
        .from("t")
        .suffix("LIMIT 1", params![2])
        .to_sql()
        .unwrap_err();
    assert!(matches!(err, QbError::SqlArgMismatch { placeholders: 0, args: 1, .. }));
}
