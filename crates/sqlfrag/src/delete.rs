//! DELETE statement builder.

use crate::error::{QbError, QbResult};
use crate::expr::{Part, Pred};
use crate::fragment::{Fragment, append_clause, append_to_sql};
use crate::param::{Param, ParamList};
use crate::placeholder::PlaceholderFormat;
use crate::statement::{StatementKind, finish_statement};
use crate::store::{Slot, derive};
use std::sync::Arc;

#[derive(Clone, Debug, Default)]
struct DeleteData {
    placeholder_format: PlaceholderFormat,
    prefixes: Slot<Part>,
    from: Option<String>,
    where_parts: Slot<Part>,
    order_bys: Slot<String>,
    limit: Option<u64>,
    offset: Option<u64>,
    suffixes: Slot<Part>,
}

impl DeleteData {
    fn render(&self) -> QbResult<(String, ParamList)> {
        let from = match self.from.as_deref() {
            Some(table) if !table.is_empty() => table,
            _ => return Err(QbError::MissingDeleteTable),
        };

        let mut sql = String::new();
        let mut params = ParamList::new();

        append_to_sql(self.prefixes.iter(), &mut sql, " ", &mut params)?;
        if !sql.is_empty() {
            sql.push(' ');
        }

        sql.push_str("DELETE FROM ");
        sql.push_str(from);

        append_clause(" WHERE ", self.where_parts.iter(), &mut sql, " AND ", &mut params)?;

        if !self.order_bys.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_bys.join(", "));
        }

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {}", offset));
        }

        append_clause(" ", self.suffixes.iter(), &mut sql, " ", &mut params)?;

        Ok((sql, params))
    }
}

/// DELETE statement builder.
///
/// Unlike some ORMs this does not guard against a missing WHERE clause:
/// `delete("t").to_sql()` renders `DELETE FROM t`.
#[derive(Clone, Debug)]
#[must_use]
pub struct DeleteBuilder {
    data: Arc<DeleteData>,
}

impl DeleteBuilder {
    /// Create an empty DELETE builder rendering with `format`.
    pub fn new(format: PlaceholderFormat) -> Self {
        Self {
            data: Arc::new(DeleteData {
                placeholder_format: format,
                ..DeleteData::default()
            }),
        }
    }

    fn with(&self, f: impl FnOnce(&mut DeleteData)) -> Self {
        Self {
            data: derive(&self.data, f),
        }
    }

    /// Build the statement into SQL and bound args.
    pub fn to_sql(&self) -> QbResult<(String, ParamList)> {
        let (sql, params) = self.data.render()?;
        finish_statement(StatementKind::Delete, &sql, params, self.data.placeholder_format)
    }

    /// Set the placeholder format.
    pub fn placeholder_format(&self, format: PlaceholderFormat) -> Self {
        self.with(|d| d.placeholder_format = format)
    }

    /// Add an expression to the beginning of the query.
    pub fn prefix(&self, sql: &str, args: Vec<Param>) -> Self {
        self.with(|d| d.prefixes = d.prefixes.appended(Part::new(sql, args)))
    }

    /// Set the table to delete from.
    pub fn from(&self, table: &str) -> Self {
        let table = table.to_string();
        self.with(|d| d.from = Some(table))
    }

    /// Add a WHERE predicate; predicates are ANDed together.
    pub fn where_(&self, pred: impl Into<Pred>) -> Self {
        self.with(|d| d.where_parts = d.where_parts.appended(Part::from_pred(pred)))
    }

    /// Add a WHERE predicate from SQL text with `?` markers.
    pub fn where_sql(&self, sql: &str, args: Vec<Param>) -> Self {
        self.with(|d| d.where_parts = d.where_parts.appended(Part::new(sql, args)))
    }

    /// Add ORDER BY expressions.
    pub fn order_by(&self, order_bys: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let order_bys: Vec<String> = order_bys.into_iter().map(Into::into).collect();
        self.with(|d| d.order_bys = d.order_bys.extended(order_bys))
    }

    /// Set LIMIT.
    pub fn limit(&self, limit: u64) -> Self {
        self.with(|d| d.limit = Some(limit))
    }

    /// Set OFFSET.
    pub fn offset(&self, offset: u64) -> Self {
        self.with(|d| d.offset = Some(offset))
    }

    /// Add an expression to the end of the query.
    pub fn suffix(&self, sql: &str, args: Vec<Param>) -> Self {
        self.with(|d| d.suffixes = d.suffixes.appended(Part::new(sql, args)))
    }
}

impl Fragment for DeleteBuilder {
    fn render(&self) -> QbResult<(String, ParamList)> {
        self.data.render()
    }
}

#[cfg(test)]
mod tests {
    use crate::error::QbError;
    use crate::placeholder::PlaceholderFormat;
    use crate::pred::{Eq, NotEq};
    use crate::{StatementBuilder, params};

    #[test]
    fn test_delete_basic() {
        let (sql, args) = StatementBuilder::default()
            .placeholder_format(PlaceholderFormat::DOLLAR)
            .delete("users")
            .where_(Eq::one("id", 1i64))
            .to_sql()
            .unwrap();
        assert_eq!(sql, "DELETE FROM users WHERE id = $1");
        assert_eq!(format!("{args:?}"), "[1]");
    }

    #[test]
    fn test_delete_all_clauses() {
        let (sql, args) = StatementBuilder::default()
            .delete("a")
            .prefix("WITH prefix AS ?", params![0])
            .where_sql("b = ?", params![1])
            .where_(NotEq::new().set_null("c"))
            .order_by(["c"])
            .limit(2)
            .offset(3)
            .suffix("RETURNING ?", params![4])
            .to_sql()
            .unwrap();
        assert_eq!(
            sql,
            "WITH prefix AS ? DELETE FROM a WHERE b = ? AND c IS NOT NULL ORDER BY c LIMIT 2 OFFSET 3 RETURNING ?"
        );
        assert_eq!(format!("{args:?}"), "[0, 1, 4]");
    }

    #[test]
    fn test_delete_without_where_has_no_where_keyword() {
        let (sql, _) = StatementBuilder::default()
            .delete("t")
            .where_(None::<&str>)
            .to_sql()
            .unwrap();
        assert_eq!(sql, "DELETE FROM t");
    }

    #[test]
    fn test_requires_table() {
        let err = StatementBuilder::default().delete("").to_sql().unwrap_err();
        assert_eq!(err, QbError::MissingDeleteTable);
    }
}
