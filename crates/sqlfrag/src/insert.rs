//! INSERT statement builder.

use crate::error::{QbError, QbResult};
use crate::expr::{Part, Pred};
use crate::fragment::{Fragment, append_clause, append_to_sql};
use crate::param::{Param, ParamList};
use crate::placeholder::PlaceholderFormat;
use crate::select::SelectBuilder;
use crate::statement::{StatementKind, finish_statement};
use crate::store::{Slot, derive};
use crate::value::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Clone, Debug, Default)]
struct InsertData {
    placeholder_format: PlaceholderFormat,
    prefixes: Slot<Part>,
    options: Slot<String>,
    into: Option<String>,
    columns: Slot<String>,
    values: Slot<Vec<Value>>,
    select: Option<SelectBuilder>,
    suffixes: Slot<Part>,
}

impl InsertData {
    /// Assemble the statement with neutral `?` markers.
    fn render(&self) -> QbResult<(String, ParamList)> {
        let into = match self.into.as_deref() {
            Some(table) if !table.is_empty() => table,
            _ => return Err(QbError::MissingInsertTarget),
        };
        if self.values.is_empty() && self.select.is_none() {
            return Err(QbError::MissingInsertPayload);
        }

        let mut sql = String::new();
        let mut params = ParamList::new();

        append_to_sql(self.prefixes.iter(), &mut sql, " ", &mut params)?;
        if !sql.is_empty() {
            sql.push(' ');
        }

        sql.push_str("INSERT ");

        if !self.options.is_empty() {
            sql.push_str(&self.options.join(" "));
            sql.push(' ');
        }

        sql.push_str("INTO ");
        sql.push_str(into);
        sql.push(' ');

        if !self.columns.is_empty() {
            sql.push('(');
            sql.push_str(&self.columns.join(","));
            sql.push_str(") ");
        }

        // A sub-select takes precedence over value rows.
        if let Some(select) = &self.select {
            #[cfg(feature = "tracing")]
            if !self.values.is_empty() {
                tracing::debug!(
                    target: "sqlfrag.sql",
                    ignored_rows = self.values.len(),
                    "insert has both values and a select; values are ignored"
                );
            }
            let (select_sql, select_params) = select.render()?;
            sql.push_str(&select_sql);
            params.append(select_params);
        } else {
            self.append_values(&mut sql, &mut params)?;
        }

        append_clause(" ", self.suffixes.iter(), &mut sql, " ", &mut params)?;

        Ok((sql, params))
    }

    fn append_values(&self, sql: &mut String, params: &mut ParamList) -> QbResult<()> {
        sql.push_str("VALUES ");

        let mut rows = Vec::with_capacity(self.values.len());
        for row in self.values.iter() {
            let mut cells = Vec::with_capacity(row.len());
            for value in row {
                cells.push(value.write(params)?);
            }
            rows.push(format!("({})", cells.join(",")));
        }

        sql.push_str(&rows.join(","));
        Ok(())
    }
}

/// INSERT statement builder.
///
/// # Example
/// ```ignore
/// let (sql, args) = sqlfrag::insert("users")
///     .columns(["name", "age"])
///     .values(params!["moe", 13])
///     .values(params!["larry", 35])
///     .to_sql()?;
/// assert_eq!(sql, "INSERT INTO users (name,age) VALUES (?,?),(?,?)");
/// ```
#[derive(Clone, Debug)]
#[must_use]
pub struct InsertBuilder {
    data: Arc<InsertData>,
}

impl InsertBuilder {
    /// Create an empty INSERT builder rendering with `format`.
    pub fn new(format: PlaceholderFormat) -> Self {
        Self {
            data: Arc::new(InsertData {
                placeholder_format: format,
                ..InsertData::default()
            }),
        }
    }

    fn with(&self, f: impl FnOnce(&mut InsertData)) -> Self {
        Self {
            data: derive(&self.data, f),
        }
    }

    /// Build the statement into SQL and bound args.
    pub fn to_sql(&self) -> QbResult<(String, ParamList)> {
        let (sql, params) = self.data.render()?;
        finish_statement(StatementKind::Insert, &sql, params, self.data.placeholder_format)
    }

    /// Set the placeholder format.
    pub fn placeholder_format(&self, format: PlaceholderFormat) -> Self {
        self.with(|d| d.placeholder_format = format)
    }

    /// Add an expression to the beginning of the query.
    pub fn prefix(&self, sql: &str, args: Vec<Param>) -> Self {
        self.with(|d| d.prefixes = d.prefixes.appended(Part::new(sql, args)))
    }

    /// Add a fragment to the beginning of the query.
    pub fn prefix_expr(&self, pred: impl Into<Pred>) -> Self {
        self.with(|d| d.prefixes = d.prefixes.appended(Part::from_pred(pred)))
    }

    /// Add keyword options before INTO (e.g. `IGNORE`).
    pub fn options(&self, options: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        self.with(|d| d.options = d.options.extended(options))
    }

    /// Set the INTO table.
    pub fn into_table(&self, table: &str) -> Self {
        let table = table.to_string();
        self.with(|d| d.into = Some(table))
    }

    /// Add insert columns.
    pub fn columns(&self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        self.with(|d| d.columns = d.columns.extended(columns))
    }

    /// Add one row of values.
    pub fn values(&self, row: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        let row: Vec<Value> = row.into_iter().map(Into::into).collect();
        self.with(|d| d.values = d.values.appended(row))
    }

    /// Replace columns and values with a single row taken from a map.
    ///
    /// Columns are written in sorted order.
    pub fn set_map<K, V>(&self, clauses: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let clauses: BTreeMap<String, Value> = clauses
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let (columns, row): (Vec<String>, Vec<Value>) = clauses.into_iter().unzip();
        self.with(|d| {
            d.columns = Slot::set(columns);
            d.values = Slot::set([row]);
        })
    }

    /// Insert the rows of a sub-select. Takes precedence over [`values`](Self::values).
    pub fn select(&self, select: SelectBuilder) -> Self {
        self.with(|d| d.select = Some(select))
    }

    /// Add an expression to the end of the query (e.g. `RETURNING id`).
    pub fn suffix(&self, sql: &str, args: Vec<Param>) -> Self {
        self.with(|d| d.suffixes = d.suffixes.appended(Part::new(sql, args)))
    }

    /// Add a fragment to the end of the query.
    pub fn suffix_expr(&self, pred: impl Into<Pred>) -> Self {
        self.with(|d| d.suffixes = d.suffixes.appended(Part::from_pred(pred)))
    }
}

impl Fragment for InsertBuilder {
    fn render(&self) -> QbResult<(String, ParamList)> {
        self.data.render()
    }
}

impl From<InsertBuilder> for Pred {
    fn from(insert: InsertBuilder) -> Self {
        Pred::fragment(insert)
    }
}

#[cfg(test)]
mod tests;
