//! Raw expressions, predicate wrapping and conjunctions.
//!
//! Predicates reach a builder in one of three shapes, captured by [`Pred`]:
//! nothing at all, a SQL string (with `?` markers bound to trailing
//! arguments), or something that already implements [`Fragment`]. The shape
//! is classified once, when the predicate is added, into a [`Part`].

use crate::error::{QbError, QbResult};
use crate::fragment::{Fragment, Sequence};
use crate::param::{Param, ParamList};
use crate::placeholder::count_placeholders;
use std::fmt;
use std::sync::Arc;

/// Literal SQL text with a fixed argument list.
///
/// # Example
/// ```ignore
/// let e = sqlfrag::expr("FROM_UNIXTIME(?)", params![ts]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RawExpr {
    sql: String,
    params: Vec<Param>,
}

impl RawExpr {
    /// Create a raw expression.
    pub fn new(sql: impl Into<String>, params: Vec<Param>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// The SQL text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The bound arguments.
    pub fn params(&self) -> &[Param] {
        &self.params
    }
}

impl Fragment for RawExpr {
    fn render(&self) -> QbResult<(String, ParamList)> {
        let placeholders = count_placeholders(&self.sql);
        if placeholders != self.params.len() {
            return Err(QbError::SqlArgMismatch {
                sql: self.sql.clone(),
                placeholders,
                args: self.params.len(),
            });
        }
        Ok((self.sql.clone(), self.params.iter().cloned().collect()))
    }
}

/// Build a raw SQL expression with bound arguments.
pub fn expr(sql: impl Into<String>, params: Vec<Param>) -> RawExpr {
    RawExpr::new(sql, params)
}

/// A caller-supplied predicate before classification.
#[derive(Clone)]
pub enum Pred {
    /// Ignored entirely.
    None,
    /// SQL text; `?` markers bind to the trailing arguments given with it.
    Sql(String),
    /// A value that already renders itself.
    Fragment(Arc<dyn Fragment>),
}

impl Pred {
    /// Wrap any fragment.
    pub fn fragment<F: Fragment + 'static>(fragment: F) -> Self {
        Pred::Fragment(Arc::new(fragment))
    }
}

impl From<&str> for Pred {
    fn from(sql: &str) -> Self {
        Pred::Sql(sql.to_string())
    }
}

impl From<String> for Pred {
    fn from(sql: String) -> Self {
        Pred::Sql(sql)
    }
}

impl<P: Into<Pred>> From<Option<P>> for Pred {
    fn from(pred: Option<P>) -> Self {
        pred.map_or(Pred::None, Into::into)
    }
}

impl From<RawExpr> for Pred {
    fn from(expr: RawExpr) -> Self {
        Pred::fragment(expr)
    }
}

impl From<Sequence> for Pred {
    fn from(seq: Sequence) -> Self {
        Pred::fragment(seq)
    }
}

impl From<And> for Pred {
    fn from(and: And) -> Self {
        Pred::fragment(and)
    }
}

impl From<Or> for Pred {
    fn from(or: Or) -> Self {
        Pred::fragment(or)
    }
}

impl From<Aliased> for Pred {
    fn from(aliased: Aliased) -> Self {
        Pred::fragment(aliased)
    }
}

impl fmt::Debug for Pred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pred::None => f.write_str("None"),
            Pred::Sql(sql) => f.debug_tuple("Sql").field(sql).finish(),
            Pred::Fragment(_) => f.debug_tuple("Fragment").field(&"<dyn Fragment>").finish(),
        }
    }
}

/// A classified predicate, stored in builder snapshots.
#[derive(Clone)]
pub enum Part {
    /// Renders as nothing.
    Empty,
    /// SQL text plus its arguments.
    Raw(RawExpr),
    /// A nested fragment.
    Fragment(Arc<dyn Fragment>),
    /// Input that cannot be rendered; fails the statement at render time.
    Invalid(String),
}

impl Part {
    /// Classify a predicate and its trailing arguments.
    ///
    /// Trailing arguments only make sense for SQL text: passing them with a
    /// fragment predicate yields a part that fails rendering.
    pub fn new(pred: impl Into<Pred>, args: Vec<Param>) -> Self {
        match pred.into() {
            Pred::None => Part::Empty,
            Pred::Sql(sql) => Part::Raw(RawExpr::new(sql, args)),
            Pred::Fragment(fragment) if args.is_empty() => Part::Fragment(fragment),
            Pred::Fragment(_) => Part::Invalid(format!(
                "expected SQL text or a fragment, got a fragment with {} trailing argument(s)",
                args.len()
            )),
        }
    }

    /// Classify a predicate with no trailing arguments.
    pub fn from_pred(pred: impl Into<Pred>) -> Self {
        Self::new(pred, Vec::new())
    }

    /// A part that renders as nothing.
    pub fn empty() -> Self {
        Part::Empty
    }

    /// Check if this part was classified as ignorable.
    pub fn is_empty(&self) -> bool {
        matches!(self, Part::Empty)
    }
}

impl Fragment for Part {
    fn render(&self) -> QbResult<(String, ParamList)> {
        match self {
            Part::Empty => Ok((String::new(), ParamList::new())),
            Part::Raw(raw) => raw.render(),
            Part::Fragment(fragment) => fragment.render(),
            Part::Invalid(message) => Err(QbError::invalid_predicate(message.clone())),
        }
    }
}

impl fmt::Debug for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Part::Empty => f.write_str("Empty"),
            Part::Raw(raw) => f.debug_tuple("Raw").field(raw).finish(),
            Part::Fragment(_) => f.debug_tuple("Fragment").field(&"<dyn Fragment>").finish(),
            Part::Invalid(message) => f.debug_tuple("Invalid").field(message).finish(),
        }
    }
}

fn render_conjunction(parts: &[Part], sep: &str) -> QbResult<(String, ParamList)> {
    let (sql, params) = Sequence::new(parts.to_vec(), sep).render()?;
    if sql.is_empty() {
        return Ok((sql, params));
    }
    Ok((format!("({})", sql), params))
}

/// AND group: renders `(a AND b AND ...)`, or nothing when every child is empty.
#[derive(Clone, Debug, Default)]
pub struct And(Vec<Part>);

impl And {
    /// Create an AND group from predicates.
    pub fn new(preds: impl IntoIterator<Item = Pred>) -> Self {
        And(preds.into_iter().map(Part::from_pred).collect())
    }

    /// Add one predicate to the group.
    pub fn and(mut self, pred: impl Into<Pred>) -> Self {
        self.0.push(Part::from_pred(pred));
        self
    }
}

impl Fragment for And {
    fn render(&self) -> QbResult<(String, ParamList)> {
        render_conjunction(&self.0, " AND ")
    }
}

/// OR group: renders `(a OR b OR ...)`, or nothing when every child is empty.
#[derive(Clone, Debug, Default)]
pub struct Or(Vec<Part>);

impl Or {
    /// Create an OR group from predicates.
    pub fn new(preds: impl IntoIterator<Item = Pred>) -> Self {
        Or(preds.into_iter().map(Part::from_pred).collect())
    }

    /// Add one predicate to the group.
    pub fn or(mut self, pred: impl Into<Pred>) -> Self {
        self.0.push(Part::from_pred(pred));
        self
    }
}

impl Fragment for Or {
    fn render(&self) -> QbResult<(String, ParamList)> {
        render_conjunction(&self.0, " OR ")
    }
}

/// A fragment rendered as `(<inner>) AS <alias>`.
#[derive(Clone)]
pub struct Aliased {
    inner: Arc<dyn Fragment>,
    alias: String,
}

impl Fragment for Aliased {
    fn render(&self) -> QbResult<(String, ParamList)> {
        let (sql, params) = self.inner.render()?;
        Ok((format!("({}) AS {}", sql, self.alias), params))
    }
}

impl fmt::Debug for Aliased {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aliased").field("alias", &self.alias).finish_non_exhaustive()
    }
}

/// Wrap a fragment (typically a sub-select) with an alias.
pub fn alias<F: Fragment + 'static>(fragment: F, alias: impl Into<String>) -> Aliased {
    Aliased {
        inner: Arc::new(fragment),
        alias: alias.into(),
    }
}

/// `n` comma-separated `?` markers, e.g. `placeholders(3) == "?,?,?"`.
pub fn placeholders(count: usize) -> String {
    vec!["?"; count].join(",")
}
