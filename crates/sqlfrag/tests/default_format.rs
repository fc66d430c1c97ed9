//! The process-wide default format lives in its own test binary so that no
//! other test observes the change.

use sqlfrag::{PlaceholderFormat, default_placeholder_format, params, set_default_placeholder_format};

#[test]
fn default_format_applies_to_builders_created_afterwards() {
    assert_eq!(default_placeholder_format(), PlaceholderFormat::Question);

    let before = sqlfrag::select(["*"]).from("t").where_sql("a = ?", params![1]);

    set_default_placeholder_format(PlaceholderFormat::DOLLAR);
    let after = sqlfrag::select(["*"]).from("t").where_sql("a = ?", params![1]);
    let deleted = sqlfrag::delete("t").where_sql("a = ?", params![1]);

    assert_eq!(before.to_sql().unwrap().0, "SELECT * FROM t WHERE a = ?");
    assert_eq!(after.to_sql().unwrap().0, "SELECT * FROM t WHERE a = $1");
    assert_eq!(deleted.to_sql().unwrap().0, "DELETE FROM t WHERE a = $1");

    // An explicit format still wins over the default.
    let explicit = after.placeholder_format(PlaceholderFormat::COLON);
    assert_eq!(explicit.to_sql().unwrap().0, "SELECT * FROM t WHERE a = :1");

    set_default_placeholder_format(PlaceholderFormat::Question);
    assert_eq!(after.to_sql().unwrap().0, "SELECT * FROM t WHERE a = $1");
}
