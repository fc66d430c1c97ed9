//! Statement builder tour for sqlfrag
//!
//! Run with: cargo run --example statements -p sqlfrag
//!
//! Prints each statement with its bound args; nothing is executed.

use sqlfrag::{
    Eq, Gt, NotEq, Or, ParamList, PlaceholderFormat, Pred, QbConfig, QbError, StatementBuilder,
    Value, expr, params,
};

fn show(label: &str, rendered: (String, ParamList)) {
    let (sql, args) = rendered;
    println!("{label}:\n  {sql}\n  args = {args:?}\n");
}

fn main() -> Result<(), QbError> {
    let psql = StatementBuilder::new(QbConfig::new().placeholder_format(PlaceholderFormat::DOLLAR));

    // ============================================
    // SELECT
    // ============================================
    println!("=== SELECT ===");

    let users = psql.select(["id", "name"]).from("users");
    show("base", users.to_sql()?);

    let active = users.where_(Eq::one("status", "active"));
    show("active", active.to_sql()?);

    let filtered = active
        .where_(Or::new([
            Pred::from(Gt::one("age", 65)),
            Pred::from(NotEq::new().set_null("vip_since")),
        ]))
        .order_by(["name ASC"])
        .limit(10);
    show("filtered", filtered.to_sql()?);

    let recent = psql
        .select(["user_id", "count(*) AS n"])
        .from("orders")
        .where_sql("placed_at > NOW() - INTERVAL '30 days'", params![])
        .group_by(["user_id"]);
    let joined = psql
        .select(["u.name", "r.n"])
        .from_select(recent, "r")
        .join("users u ON u.id = r.user_id", params![])
        .where_(Eq::new().set_list("u.region", ["eu", "us"]));
    show("sub-select", joined.to_sql()?);

    // The base builder is untouched by everything derived from it.
    show("base again", users.to_sql()?);

    // ============================================
    // INSERT / UPDATE / DELETE
    // ============================================
    println!("=== INSERT / UPDATE / DELETE ===");

    let insert = psql
        .insert("products")
        .columns(["name", "price", "created_at"])
        .values([Value::param("Laptop"), Value::param(999), expr("NOW()", params![]).into()])
        .values([Value::param("Mouse"), Value::param(29), expr("NOW()", params![]).into()])
        .suffix("RETURNING id", params![]);
    show("insert", insert.to_sql()?);

    let update = psql
        .update("products")
        .set("price", expr("price * ?", params![0.9f64]))
        .where_(Gt::one("price", 500));
    show("update", update.to_sql()?);

    let delete = psql.delete("products").where_(Eq::one("name", "Mouse"));
    show("delete", delete.to_sql()?);

    // ============================================
    // Errors
    // ============================================
    println!("=== Errors ===");

    match psql.select(Vec::<String>::new()).from("users").to_sql() {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("no columns: {e}"),
    }
    match psql.select(["*"]).from("t").where_("a = ?").to_sql() {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("parity: {e}"),
    }

    Ok(())
}
