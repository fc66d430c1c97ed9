//! SELECT statement builder.

use crate::error::{QbError, QbResult};
use crate::expr::{Part, Pred, alias};
use crate::fragment::{Fragment, append_clause, append_to_sql};
use crate::param::{Param, ParamList};
use crate::placeholder::PlaceholderFormat;
use crate::pred::{Eq, Gt, GtOrEq, Lt, LtOrEq, NotEq, PredValue};
use crate::statement::{StatementKind, finish_statement};
use crate::store::{Slot, derive};
use std::sync::Arc;

#[derive(Clone, Debug, Default)]
struct SelectData {
    placeholder_format: PlaceholderFormat,
    prefixes: Slot<Part>,
    options: Slot<String>,
    columns: Slot<Part>,
    from: Option<Part>,
    joins: Slot<Part>,
    where_parts: Slot<Part>,
    group_bys: Slot<String>,
    having_parts: Slot<Part>,
    order_bys: Slot<String>,
    limit: Option<u64>,
    offset: Option<u64>,
    suffixes: Slot<Part>,
}

impl SelectData {
    /// Assemble the statement with neutral `?` markers.
    fn render(&self) -> QbResult<(String, ParamList)> {
        if self.columns.is_empty() {
            return Err(QbError::NoColumns);
        }

        let mut sql = String::new();
        let mut params = ParamList::new();

        append_to_sql(self.prefixes.iter(), &mut sql, " ", &mut params)?;
        if !sql.is_empty() {
            sql.push(' ');
        }

        sql.push_str("SELECT ");

        if !self.options.is_empty() {
            sql.push_str(&self.options.join(" "));
            sql.push(' ');
        }

        let before_columns = sql.len();
        append_to_sql(self.columns.iter(), &mut sql, ", ", &mut params)?;
        if sql.len() == before_columns {
            return Err(QbError::NoColumns);
        }

        append_clause(" FROM ", self.from.iter(), &mut sql, "", &mut params)?;
        append_clause(" ", self.joins.iter(), &mut sql, " ", &mut params)?;
        append_clause(" WHERE ", self.where_parts.iter(), &mut sql, " AND ", &mut params)?;

        if !self.group_bys.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.group_bys.join(", "));
        }

        append_clause(" HAVING ", self.having_parts.iter(), &mut sql, " AND ", &mut params)?;

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

/// SELECT statement builder.
///
/// Every method returns a new builder and leaves `self` untouched, so a
/// partially configured builder can be shared and extended in different
/// directions.
///
/// # Example
/// ```ignore
/// let base = sqlfrag::select(["id", "name"]).from("users");
/// let active = base.where_(Eq::one("status", "active"));
/// let (sql, args) = active.placeholder_format(PlaceholderFormat::DOLLAR).to_sql()?;
/// assert_eq!(sql, "SELECT id, name FROM users WHERE status = $1");
/// ```
#[derive(Clone, Debug)]
#[must_use]
pub struct SelectBuilder {
    data: Arc<SelectData>,
}

impl SelectBuilder {
    /// Create an empty SELECT builder rendering with `format`.
    pub fn new(format: PlaceholderFormat) -> Self {
        Self {
            data: Arc::new(SelectData {
                placeholder_format: format,
                ..SelectData::default()
            }),
        }
    }

    fn with(&self, f: impl FnOnce(&mut SelectData)) -> Self {
        Self {
            data: derive(&self.data, f),
        }
    }

    /// Build the statement into SQL and bound args.
    pub fn to_sql(&self) -> QbResult<(String, ParamList)> {
        let (sql, params) = self.data.render()?;
        finish_statement(StatementKind::Select, &sql, params, self.data.placeholder_format)
    }

    /// Set the placeholder format (e.g. `Question` or `DOLLAR`).
    pub fn placeholder_format(&self, format: PlaceholderFormat) -> Self {
        self.with(|d| d.placeholder_format = format)
    }

    // ==================== Prefix / options ====================

    /// Add an expression to the beginning of the query.
    pub fn prefix(&self, sql: &str, args: Vec<Param>) -> Self {
        self.with(|d| d.prefixes = d.prefixes.appended(Part::new(sql, args)))
    }

    /// Add a fragment to the beginning of the query (e.g. a CTE).
    pub fn prefix_expr(&self, pred: impl Into<Pred>) -> Self {
        self.with(|d| d.prefixes = d.prefixes.appended(Part::from_pred(pred)))
    }

    /// Add a DISTINCT option.
    pub fn distinct(&self) -> Self {
        self.options(["DISTINCT"])
    }

    /// Add keyword options after SELECT.
    pub fn options(&self, options: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        self.with(|d| d.options = d.options.extended(options))
    }

    // ==================== Columns ====================

    /// Add result columns.
    pub fn columns(&self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let parts: Vec<Part> = columns
            .into_iter()
            .map(|c| Part::from_pred(Into::<String>::into(c)))
            .collect();
        self.with(|d| d.columns = d.columns.extended(parts))
    }

    /// Add a result column with bound args, e.g.
    /// `column("IF(col IN (?,?), 1, 0) AS col", params![1, 2])`.
    pub fn column(&self, pred: impl Into<Pred>, args: Vec<Param>) -> Self {
        self.with(|d| d.columns = d.columns.appended(Part::new(pred, args)))
    }

    /// Replace all result columns.
    pub fn set_columns(&self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let parts: Vec<Part> = columns
            .into_iter()
            .map(|c| Part::from_pred(Into::<String>::into(c)))
            .collect();
        self.with(|d| d.columns = Slot::set(parts))
    }

    // ==================== FROM / JOIN ====================

    /// Set the FROM clause.
    pub fn from(&self, from: &str) -> Self {
        self.with(|d| d.from = Some(Part::from_pred(from)))
    }

    /// Set the FROM clause to any fragment.
    pub fn from_expr(&self, pred: impl Into<Pred>) -> Self {
        self.with(|d| d.from = Some(Part::from_pred(pred)))
    }

    /// Set a sub-select as the FROM clause: `FROM (<sub>) AS alias`.
    pub fn from_select(&self, from: SelectBuilder, alias_name: &str) -> Self {
        self.from_expr(alias(from, alias_name))
    }

    /// Add a join clause.
    pub fn join_clause(&self, pred: impl Into<Pred>, args: Vec<Param>) -> Self {
        self.with(|d| d.joins = d.joins.appended(Part::new(pred, args)))
    }

    /// Add `JOIN <join>`.
    pub fn join(&self, join: &str, args: Vec<Param>) -> Self {
        self.join_clause(format!("JOIN {}", join), args)
    }

    /// Add `LEFT JOIN <join>`.
    pub fn left_join(&self, join: &str, args: Vec<Param>) -> Self {
        self.join_clause(format!("LEFT JOIN {}", join), args)
    }

    /// Add `RIGHT JOIN <join>`.
    pub fn right_join(&self, join: &str, args: Vec<Param>) -> Self {
        self.join_clause(format!("RIGHT JOIN {}", join), args)
    }

    /// Add `INNER JOIN <join>`.
    pub fn inner_join(&self, join: &str, args: Vec<Param>) -> Self {
        self.join_clause(format!("INNER JOIN {}", join), args)
    }

    /// Add `CROSS JOIN <join>`.
    pub fn cross_join(&self, join: &str, args: Vec<Param>) -> Self {
        self.join_clause(format!("CROSS JOIN {}", join), args)
    }

    // ==================== WHERE ====================

    /// Add a WHERE predicate. Predicates are ANDed together.
    ///
    /// Accepts SQL text, predicate maps (`Eq`, `NotEq`, ...), conjunctions,
    /// raw expressions and sub-selects. `None` is ignored.
    pub fn where_(&self, pred: impl Into<Pred>) -> Self {
        self.with(|d| d.where_parts = d.where_parts.appended(Part::from_pred(pred)))
    }

    /// Add a WHERE predicate from SQL text with `?` markers.
    pub fn where_sql(&self, sql: &str, args: Vec<Param>) -> Self {
        self.with(|d| d.where_parts = d.where_parts.appended(Part::new(sql, args)))
    }

    /// Add an empty WHERE placeholder; renders as nothing.
    pub fn condition(&self) -> Self {
        self.with(|d| d.where_parts = d.where_parts.appended(Part::empty()))
    }

    /// Add WHERE: column = value (`IS NULL` for `None`, `IN` for a `Vec`)
    pub fn eq(&self, column: &str, value: impl Into<PredValue>) -> Self {
        self.where_(Eq::one(column, value))
    }

    /// Add WHERE: column <> value (`IS NOT NULL` for `None`, `NOT IN` for a `Vec`)
    pub fn not_eq(&self, column: &str, value: impl Into<PredValue>) -> Self {
        self.where_(NotEq::one(column, value))
    }

    /// Add WHERE: column > value
    pub fn gt(&self, column: &str, value: impl Into<PredValue>) -> Self {
        self.where_(Gt::one(column, value))
    }

    /// Add WHERE: column >= value
    pub fn gt_or_eq(&self, column: &str, value: impl Into<PredValue>) -> Self {
        self.where_(GtOrEq::one(column, value))
    }

    /// Add WHERE: column < value
    pub fn lt(&self, column: &str, value: impl Into<PredValue>) -> Self {
        self.where_(Lt::one(column, value))
    }

    /// Add WHERE: column <= value
    pub fn lt_or_eq(&self, column: &str, value: impl Into<PredValue>) -> Self {
        self.where_(LtOrEq::one(column, value))
    }

    // ==================== GROUP BY / HAVING ====================

    /// Add GROUP BY expressions.
    pub fn group_by(&self, group_bys: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let group_bys: Vec<String> = group_bys.into_iter().map(Into::into).collect();
        self.with(|d| d.group_bys = d.group_bys.extended(group_bys))
    }

    /// Add a HAVING predicate; see [`where_`](Self::where_).
    pub fn having(&self, pred: impl Into<Pred>) -> Self {
        self.with(|d| d.having_parts = d.having_parts.appended(Part::from_pred(pred)))
    }

    /// Add a HAVING predicate from SQL text with `?` markers.
    pub fn having_sql(&self, sql: &str, args: Vec<Param>) -> Self {
        self.with(|d| d.having_parts = d.having_parts.appended(Part::new(sql, args)))
    }

    // ==================== ORDER BY / LIMIT / OFFSET ====================

    /// Add ORDER BY expressions.
    pub fn order_by(&self, order_bys: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let order_bys: Vec<String> = order_bys.into_iter().map(Into::into).collect();
        self.with(|d| d.order_bys = d.order_bys.extended(order_bys))
    }

    /// Set LIMIT.
    pub fn limit(&self, limit: u64) -> Self {
        self.with(|d| d.limit = Some(limit))
    }

    /// Remove LIMIT.
    pub fn remove_limit(&self) -> Self {
        self.with(|d| d.limit = None)
    }

    /// Set OFFSET.
    pub fn offset(&self, offset: u64) -> Self {
        self.with(|d| d.offset = Some(offset))
    }

    /// Remove OFFSET.
    pub fn remove_offset(&self) -> Self {
        self.with(|d| d.offset = None)
    }

    // ==================== Suffix ====================

    /// Add an expression to the end of the query.
    pub fn suffix(&self, sql: &str, args: Vec<Param>) -> Self {
        self.with(|d| d.suffixes = d.suffixes.appended(Part::new(sql, args)))
    }

    /// Add a fragment to the end of the query.
    pub fn suffix_expr(&self, pred: impl Into<Pred>) -> Self {
        self.with(|d| d.suffixes = d.suffixes.appended(Part::from_pred(pred)))
    }
}

/// Nested selects render with neutral markers; the outer statement numbers them.
impl Fragment for SelectBuilder {
    fn render(&self) -> QbResult<(String, ParamList)> {
        self.data.render()
    }
}

impl From<SelectBuilder> for Pred {
    fn from(select: SelectBuilder) -> Self {
        Pred::fragment(select)
    }
}

#[cfg(test)]
mod tests;
