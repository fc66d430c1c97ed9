//! # sqlfrag
//!
//! Fragment-based SQL statement builders.
//!
//! ## Features
//!
//! - **Immutable builders**: every clause method returns a new builder; earlier
//!   builders keep rendering what they rendered before
//! - **Predicate maps**: `Eq`, `NotEq`, `Gt`, ... with `IS NULL`, `IN (...)`
//!   and empty-list handling, rendered in a deterministic column order
//! - **Composable fragments**: sub-selects, raw expressions and `And`/`Or`
//!   groups nest anywhere a predicate is accepted
//! - **Placeholder formats**: fragments render `?`; the final statement is
//!   rewritten once to `?`, `$n`, `:n` or `@pn`
//! - **Driver-ready args**: [`ParamList::as_refs`] yields
//!   `&(dyn tokio_postgres::types::ToSql + Sync)` slices
//!
//! ## Example
//!
//! ```ignore
//! use sqlfrag::{Eq, PlaceholderFormat, select};
//!
//! let users = select(["id", "name"]).from("users");
//! let active = users
//!     .where_(Eq::one("status", "active"))
//!     .placeholder_format(PlaceholderFormat::DOLLAR);
//!
//! let (sql, args) = active.to_sql()?;
//! assert_eq!(sql, "SELECT id, name FROM users WHERE status = $1");
//! client.query(&sql, &args.as_refs()).await?;
//! ```

pub mod config;
pub mod delete;
pub mod error;
pub mod expr;
pub mod fragment;
pub mod insert;
pub mod param;
pub mod placeholder;
pub mod pred;
pub mod select;
pub mod statement;
pub mod update;
pub mod value;

mod store;

pub use config::{QbConfig, default_placeholder_format, set_default_placeholder_format};
pub use delete::DeleteBuilder;
pub use error::{QbError, QbResult};
pub use expr::{Aliased, And, Or, Part, Pred, RawExpr, alias, expr, placeholders};
pub use fragment::{Fragment, Sequence};
pub use insert::InsertBuilder;
pub use param::{Param, ParamList};
pub use placeholder::{PlaceholderFormat, count_placeholders};
pub use pred::{Eq, Gt, GtOrEq, Lt, LtOrEq, NotEq, PredValue};
pub use select::SelectBuilder;
pub use statement::{StatementBuilder, StatementKind};
pub use update::UpdateBuilder;
pub use value::Value;

/// Start a SELECT with the given result columns, using the process-wide
/// default placeholder format.
///
/// # Example
/// ```ignore
/// let qb = sqlfrag::select(["id", "name"]).from("users");
/// ```
pub fn select(columns: impl IntoIterator<Item = impl Into<String>>) -> SelectBuilder {
    StatementBuilder::current().select(columns)
}

/// Start an INSERT into `table`, using the process-wide default placeholder
/// format.
pub fn insert(table: &str) -> InsertBuilder {
    StatementBuilder::current().insert(table)
}

/// Start an UPDATE of `table`, using the process-wide default placeholder
/// format.
pub fn update(table: &str) -> UpdateBuilder {
    StatementBuilder::current().update(table)
}

/// Start a DELETE from `table`, using the process-wide default placeholder
/// format.
pub fn delete(table: &str) -> DeleteBuilder {
    StatementBuilder::current().delete(table)
}
