//! Values written into INSERT rows and UPDATE SET clauses.

use crate::error::QbResult;
use crate::expr::RawExpr;
use crate::fragment::Fragment;
use crate::param::{Param, ParamList};
use crate::select::SelectBuilder;
use std::fmt;
use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// One value of an INSERT row or an UPDATE assignment.
#[derive(Clone)]
pub enum Value {
    /// Bound as `?`.
    Param(Param),
    /// Written as-is, with its own args (e.g. `NOW()`, `? + 1`).
    Expr(RawExpr),
    /// A scalar sub-query, written in parentheses.
    Subquery(Arc<dyn Fragment>),
}

impl Value {
    /// A bound value.
    pub fn param<T: ToSql + Send + Sync + 'static>(value: T) -> Self {
        Value::Param(Param::new(value))
    }

    /// A raw SQL expression.
    pub fn expr(sql: impl Into<String>, args: Vec<Param>) -> Self {
        Value::Expr(RawExpr::new(sql, args))
    }

    /// Render into `?`-marked SQL, pushing args onto `params`.
    pub(crate) fn write(&self, params: &mut ParamList) -> QbResult<String> {
        match self {
            Value::Param(param) => {
                params.push(param.clone());
                Ok("?".to_string())
            }
            Value::Expr(expr) => {
                let (sql, args) = expr.render()?;
                params.append(args);
                Ok(sql)
            }
            Value::Subquery(sub) => {
                let (sql, args) = sub.render()?;
                params.append(args);
                Ok(format!("({})", sql))
            }
        }
    }
}

impl From<Param> for Value {
    fn from(param: Param) -> Self {
        Value::Param(param)
    }
}

impl From<RawExpr> for Value {
    fn from(expr: RawExpr) -> Self {
        Value::Expr(expr)
    }
}

impl From<SelectBuilder> for Value {
    fn from(select: SelectBuilder) -> Self {
        Value::Subquery(Arc::new(select))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Param(param) => f.debug_tuple("Param").field(param).finish(),
            Value::Expr(expr) => f.debug_tuple("Expr").field(expr).finish(),
            Value::Subquery(_) => f.debug_tuple("Subquery").field(&"<dyn Fragment>").finish(),
        }
    }
}
