//! UPDATE statement builder.

use crate::error::{QbError, QbResult};
use crate::expr::{Part, Pred};
use crate::fragment::{Fragment, append_clause, append_to_sql};
use crate::param::{Param, ParamList};
use crate::placeholder::PlaceholderFormat;
use crate::statement::{StatementKind, finish_statement};
use crate::store::{Slot, derive};
use crate::value::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Clone, Debug)]
struct SetClause {
    column: String,
    value: Value,
}

#[derive(Clone, Debug, Default)]
struct UpdateData {
    placeholder_format: PlaceholderFormat,
    prefixes: Slot<Part>,
    table: Option<String>,
    set_clauses: Slot<SetClause>,
    where_parts: Slot<Part>,
    order_bys: Slot<String>,
    limit: Option<u64>,
    offset: Option<u64>,
    suffixes: Slot<Part>,
}

impl UpdateData {
    fn render(&self) -> QbResult<(String, ParamList)> {
        let table = match self.table.as_deref() {
            Some(table) if !table.is_empty() => table,
            _ => return Err(QbError::MissingUpdateTable),
        };
        if self.set_clauses.is_empty() {
            return Err(QbError::NoSetClauses);
        }

        let mut sql = String::new();
        let mut params = ParamList::new();

        append_to_sql(self.prefixes.iter(), &mut sql, " ", &mut params)?;
        if !sql.is_empty() {
            sql.push(' ');
        }

        sql.push_str("UPDATE ");
        sql.push_str(table);
        sql.push_str(" SET ");

        let mut assignments = Vec::with_capacity(self.set_clauses.len());
        for clause in self.set_clauses.iter() {
            let value = clause.value.write(&mut params)?;
            assignments.push(format!("{} = {}", clause.column, value));
        }
        sql.push_str(&assignments.join(", "));

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

/// UPDATE statement builder.
///
/// # Example
/// ```ignore
/// let (sql, args) = sqlfrag::update("users")
///     .set("status", Value::param("inactive"))
///     .where_(Eq::one("id", 1i64))
///     .placeholder_format(PlaceholderFormat::DOLLAR)
///     .to_sql()?;
/// assert_eq!(sql, "UPDATE users SET status = $1 WHERE id = $2");
/// ```
#[derive(Clone, Debug)]
#[must_use]
pub struct UpdateBuilder {
    data: Arc<UpdateData>,
}

impl UpdateBuilder {
    /// Create an empty UPDATE builder rendering with `format`.
    pub fn new(format: PlaceholderFormat) -> Self {
        Self {
            data: Arc::new(UpdateData {
                placeholder_format: format,
                ..UpdateData::default()
            }),
        }
    }

    fn with(&self, f: impl FnOnce(&mut UpdateData)) -> Self {
        Self {
            data: derive(&self.data, f),
        }
    }

    /// Build the statement into SQL and bound args.
    pub fn to_sql(&self) -> QbResult<(String, ParamList)> {
        let (sql, params) = self.data.render()?;
        finish_statement(StatementKind::Update, &sql, params, self.data.placeholder_format)
    }

    /// Set the placeholder format.
    pub fn placeholder_format(&self, format: PlaceholderFormat) -> Self {
        self.with(|d| d.placeholder_format = format)
    }

    /// Add an expression to the beginning of the query.
    pub fn prefix(&self, sql: &str, args: Vec<Param>) -> Self {
        self.with(|d| d.prefixes = d.prefixes.appended(Part::new(sql, args)))
    }

    /// Set the table to update.
    pub fn table(&self, table: &str) -> Self {
        let table = table.to_string();
        self.with(|d| d.table = Some(table))
    }

    /// Add a SET clause.
    pub fn set(&self, column: &str, value: impl Into<Value>) -> Self {
        let clause = SetClause {
            column: column.to_string(),
            value: value.into(),
        };
        self.with(|d| d.set_clauses = d.set_clauses.appended(clause))
    }

    /// Add SET clauses from a map, in sorted column order.
    pub fn set_map<K, V>(&self, clauses: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let clauses: BTreeMap<String, Value> = clauses
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let clauses = clauses
            .into_iter()
            .map(|(column, value)| SetClause { column, value });
        let clauses: Vec<SetClause> = clauses.collect();
        self.with(|d| d.set_clauses = d.set_clauses.extended(clauses))
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

impl Fragment for UpdateBuilder {
    fn render(&self) -> QbResult<(String, ParamList)> {
        self.data.render()
    }
}
