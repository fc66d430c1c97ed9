//! Error types for sqlfrag

use thiserror::Error;

/// Result type alias for statement rendering
pub type QbResult<T> = Result<T, QbError>;

/// Errors raised while rendering a statement.
///
/// Every variant aborts rendering: a statement either renders completely or
/// not at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QbError {
    /// A predicate was supplied in a form that cannot be rendered
    #[error("Invalid predicate type: {0}")]
    InvalidPredicate(String),

    /// A predicate map entry holds a value its operator cannot compare against
    #[error("Invalid value for `{column} {op}`: {reason}")]
    InvalidPredicateValue {
        column: String,
        op: &'static str,
        reason: &'static str,
    },

    /// SELECT without any result column
    #[error("select statements must have at least one result column")]
    NoColumns,

    /// INSERT without an INTO table
    #[error("insert statements must specify a table")]
    MissingInsertTarget,

    /// INSERT without values or a sub-select
    #[error("insert statements must have at least one set of values or select clause")]
    MissingInsertPayload,

    /// UPDATE without a table
    #[error("update statements must specify a table")]
    MissingUpdateTable,

    /// UPDATE without any SET clause
    #[error("update statements must have at least one Set clause")]
    NoSetClauses,

    /// DELETE without a FROM table
    #[error("delete statements must specify a From table")]
    MissingDeleteTable,

    /// Raw SQL whose `?` markers disagree with the arguments passed with it
    #[error("`{sql}` has {placeholders} placeholder(s) but {args} argument(s)")]
    SqlArgMismatch {
        sql: String,
        placeholders: usize,
        args: usize,
    },

    /// Markers and arguments of the assembled statement diverged.
    ///
    /// Raw SQL is checked on its own (`SqlArgMismatch`), so this only surfaces
    /// when a custom [`Fragment`](crate::Fragment) renders inconsistent output.
    #[error("placeholder count {placeholders} does not match argument count {args}")]
    PlaceholderMismatch { placeholders: usize, args: usize },

    /// Unknown placeholder format name in configuration
    #[error("Unknown placeholder format: {0}")]
    UnknownPlaceholderFormat(String),
}

impl QbError {
    /// Create an invalid predicate error
    pub fn invalid_predicate(message: impl Into<String>) -> Self {
        Self::InvalidPredicate(message.into())
    }

    /// Check if this error comes from misuse of the builder API
    pub fn is_structural(&self) -> bool {
        !matches!(
            self,
            Self::PlaceholderMismatch { .. } | Self::UnknownPlaceholderFormat(_)
        )
    }

    /// Check if this is a placeholder/argument parity error
    pub fn is_placeholder_mismatch(&self) -> bool {
        matches!(
            self,
            Self::SqlArgMismatch { .. } | Self::PlaceholderMismatch { .. }
        )
    }
}
