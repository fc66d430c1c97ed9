//! Predicate maps: column → value comparisons sharing one operator.
//!
//! Each map type (`Eq`, `NotEq`, `Gt`, `GtOrEq`, `Lt`, `LtOrEq`) renders its
//! entries ANDed together. Entries are kept in a `BTreeMap`, so the generated
//! SQL lists columns in sorted order and is byte-identical across renders.
//!
//! Value dispatch:
//! - [`PredValue::Null`] → `col IS NULL` / `col IS NOT NULL`
//! - [`PredValue::List`] → `col IN (?,?,?)` / `col NOT IN (?,?,?)`; an empty
//!   list renders `(1=0)` for `Eq` and `(1=1)` for `NotEq`
//! - [`PredValue::One`] → `col = ?`, `col <> ?`, `col > ?`, ...
//!
//! Values are classified when they are added: `None` becomes
//! [`PredValue::Null`] and a `Vec` becomes [`PredValue::List`]. Types without a
//! `From` impl here go through [`PredValue::one`] or a [`Param`].

use crate::error::{QbError, QbResult};
use crate::expr::{Part, Pred, RawExpr, placeholders};
use crate::fragment::{Fragment, Sequence};
use crate::param::{Param, ParamList};
use std::collections::BTreeMap;
use tokio_postgres::types::ToSql;

/// The comparison value of one predicate map entry.
#[derive(Clone, Debug)]
pub enum PredValue {
    /// SQL NULL.
    Null,
    /// A single bound value.
    One(Param),
    /// A list of bound values (IN / NOT IN).
    List(Vec<Param>),
}

impl PredValue {
    /// A single bound value.
    pub fn one<T: ToSql + Send + Sync + 'static>(value: T) -> Self {
        PredValue::One(Param::new(value))
    }

    /// A list of bound values.
    pub fn list<T: ToSql + Send + Sync + 'static>(values: impl IntoIterator<Item = T>) -> Self {
        PredValue::List(values.into_iter().map(Param::new).collect())
    }

    /// `Some(v)` binds `v`, `None` compares against NULL.
    pub fn opt<T: ToSql + Send + Sync + 'static>(value: Option<T>) -> Self {
        value.map_or(PredValue::Null, PredValue::one)
    }
}

impl From<Param> for PredValue {
    fn from(param: Param) -> Self {
        PredValue::One(param)
    }
}

impl<T: ToSql + Send + Sync + 'static> From<Option<T>> for PredValue {
    fn from(value: Option<T>) -> Self {
        PredValue::opt(value)
    }
}

impl<T: ToSql + Send + Sync + 'static> From<Vec<T>> for PredValue {
    fn from(values: Vec<T>) -> Self {
        PredValue::list(values)
    }
}

macro_rules! scalar_pred_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for PredValue {
                fn from(value: $ty) -> Self {
                    PredValue::one(value)
                }
            }
        )+
    };
}

scalar_pred_value!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u32,
    f32,
    f64,
    String,
    &'static str,
    std::net::IpAddr,
    std::time::SystemTime,
    chrono::NaiveDate,
    chrono::NaiveTime,
    chrono::NaiveDateTime,
    chrono::DateTime<chrono::Utc>,
    chrono::DateTime<chrono::FixedOffset>,
    chrono::DateTime<chrono::Local>,
    uuid::Uuid,
    serde_json::Value,
);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CompareOp {
    Eq,
    NotEq,
    Gt,
    GtOrEq,
    Lt,
    LtOrEq,
}

impl CompareOp {
    fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::NotEq => "<>",
            CompareOp::Gt => ">",
            CompareOp::GtOrEq => ">=",
            CompareOp::Lt => "<",
            CompareOp::LtOrEq => "<=",
        }
    }

    fn is_equality(self) -> bool {
        matches!(self, CompareOp::Eq | CompareOp::NotEq)
    }

    fn compile(self, column: &str, value: &PredValue) -> QbResult<RawExpr> {
        let negated = self == CompareOp::NotEq;
        match value {
            PredValue::One(param) => Ok(RawExpr::new(
                format!("{} {} ?", column, self.symbol()),
                vec![param.clone()],
            )),
            PredValue::Null if self.is_equality() => {
                let test = if negated { "IS NOT NULL" } else { "IS NULL" };
                Ok(RawExpr::new(format!("{} {}", column, test), Vec::new()))
            }
            PredValue::List(values) if self.is_equality() => {
                if values.is_empty() {
                    let tautology = if negated { "(1=1)" } else { "(1=0)" };
                    return Ok(RawExpr::new(tautology, Vec::new()));
                }
                let op = if negated { "NOT IN" } else { "IN" };
                Ok(RawExpr::new(
                    format!("{} {} ({})", column, op, placeholders(values.len())),
                    values.clone(),
                ))
            }
            PredValue::Null => Err(QbError::InvalidPredicateValue {
                column: column.to_string(),
                op: self.symbol(),
                reason: "cannot use NULL with less than or greater than operators",
            }),
            PredValue::List(_) => Err(QbError::InvalidPredicateValue {
                column: column.to_string(),
                op: self.symbol(),
                reason: "cannot use a list with less than or greater than operators",
            }),
        }
    }
}

fn render_map(op: CompareOp, entries: &BTreeMap<String, PredValue>) -> QbResult<(String, ParamList)> {
    let parts = entries
        .iter()
        .map(|(column, value)| op.compile(column, value).map(Part::Raw))
        .collect::<QbResult<Vec<_>>>()?;
    Sequence::new(parts, " AND ").render()
}

macro_rules! pred_map {
    ($(#[$meta:meta])* $name:ident => $op:expr) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default)]
        pub struct $name(BTreeMap<String, PredValue>);

        impl $name {
            /// Create an empty map (renders as nothing).
            pub fn new() -> Self {
                Self(BTreeMap::new())
            }

            /// Create a map with a single entry.
            pub fn one(column: impl Into<String>, value: impl Into<PredValue>) -> Self {
                Self::new().set(column, value)
            }

            /// Set the entry for `column`, replacing any previous one.
            ///
            /// `None` compares against NULL and a `Vec` against a list.
            pub fn set(mut self, column: impl Into<String>, value: impl Into<PredValue>) -> Self {
                self.0.insert(column.into(), value.into());
                self
            }

            /// Compare `column` against NULL.
            pub fn set_null(self, column: impl Into<String>) -> Self {
                self.set(column, PredValue::Null)
            }

            /// Compare `column` against a list of values.
            pub fn set_list<T: ToSql + Send + Sync + 'static>(
                self,
                column: impl Into<String>,
                values: impl IntoIterator<Item = T>,
            ) -> Self {
                self.set(column, PredValue::list(values))
            }

            /// Number of entries.
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// Check if the map has no entries.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl Fragment for $name {
            fn render(&self) -> QbResult<(String, ParamList)> {
                render_map($op, &self.0)
            }
        }

        impl From<$name> for Pred {
            fn from(map: $name) -> Self {
                Pred::fragment(map)
            }
        }

        impl<K: Into<String>> FromIterator<(K, PredValue)> for $name {
            fn from_iter<I: IntoIterator<Item = (K, PredValue)>>(iter: I) -> Self {
                Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
            }
        }
    };
}

pred_map! {
    /// Equality map: `col = ?`, `col IS NULL`, `col IN (...)`.
    Eq => CompareOp::Eq
}

pred_map! {
    /// Inequality map: `col <> ?`, `col IS NOT NULL`, `col NOT IN (...)`.
    NotEq => CompareOp::NotEq
}

pred_map! {
    /// Greater-than map: `col > ?`.
    Gt => CompareOp::Gt
}

pred_map! {
    /// Greater-than-or-equal map: `col >= ?`.
    GtOrEq => CompareOp::GtOrEq
}

pred_map! {
    /// Less-than map: `col < ?`.
    Lt => CompareOp::Lt
}

pred_map! {
    /// Less-than-or-equal map: `col <= ?`.
    LtOrEq => CompareOp::LtOrEq
}
