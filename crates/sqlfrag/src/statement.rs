//! Statement factory and the shared final render step.

use crate::config::QbConfig;
use crate::delete::DeleteBuilder;
use crate::error::QbResult;
use crate::insert::InsertBuilder;
use crate::param::ParamList;
use crate::placeholder::{self, PlaceholderFormat};
use crate::select::SelectBuilder;
use crate::update::UpdateBuilder;

/// Statement kinds, used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
}

impl StatementKind {
    /// Lower-case name of the statement kind.
    pub fn as_str(self) -> &'static str {
        match self {
            StatementKind::Select => "select",
            StatementKind::Insert => "insert",
            StatementKind::Update => "update",
            StatementKind::Delete => "delete",
        }
    }
}

/// Check parity, rewrite placeholders and log the statement.
pub(crate) fn finish_statement(
    kind: StatementKind,
    sql: &str,
    params: ParamList,
    format: PlaceholderFormat,
) -> QbResult<(String, ParamList)> {
    let sql = placeholder::finish(sql, params.len(), format)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        target: "sqlfrag.sql",
        kind = kind.as_str(),
        param_count = params.len(),
        sql = %sql,
        "rendered statement"
    );
    #[cfg(not(feature = "tracing"))]
    let _ = kind;

    Ok((sql, params))
}

/// Creates builders sharing one configuration.
///
/// # Example
/// ```ignore
/// let psql = StatementBuilder::new(QbConfig::new().placeholder_format(PlaceholderFormat::DOLLAR));
/// let (sql, args) = psql.select(["id"]).from("users").where_(Eq::one("id", 1)).to_sql()?;
/// assert_eq!(sql, "SELECT id FROM users WHERE id = $1");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatementBuilder {
    config: QbConfig,
}

impl StatementBuilder {
    /// Create a factory with an explicit configuration.
    pub fn new(config: QbConfig) -> Self {
        Self { config }
    }

    /// Create a factory from the process-wide default configuration.
    pub fn current() -> Self {
        Self::new(QbConfig::current())
    }

    /// A factory with a different placeholder format.
    pub fn placeholder_format(mut self, format: PlaceholderFormat) -> Self {
        self.config.placeholder_format = format;
        self
    }

    /// The configuration builders inherit.
    pub fn config(&self) -> QbConfig {
        self.config
    }

    /// Start a SELECT with the given result columns.
    pub fn select(&self, columns: impl IntoIterator<Item = impl Into<String>>) -> SelectBuilder {
        SelectBuilder::new(self.config.placeholder_format).columns(columns)
    }

    /// Start an INSERT into `table`.
    pub fn insert(&self, table: &str) -> InsertBuilder {
        InsertBuilder::new(self.config.placeholder_format).into_table(table)
    }

    /// Start an UPDATE of `table`.
    pub fn update(&self, table: &str) -> UpdateBuilder {
        UpdateBuilder::new(self.config.placeholder_format).table(table)
    }

    /// Start a DELETE from `table`.
    pub fn delete(&self, table: &str) -> DeleteBuilder {
        DeleteBuilder::new(self.config.placeholder_format).from(table)
    }
}
