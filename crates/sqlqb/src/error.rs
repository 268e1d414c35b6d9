//! Error types for sqlqb

use thiserror::Error;

/// Result type alias for query builder operations
pub type QbResult<T> = Result<T, QbError>;

/// Errors raised by builder mutators.
///
/// Every error is reported by the call that detects it. A call that returns
/// an error leaves the builder exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QbError {
    /// Empty, malformed, or over-qualified column/table name
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Select alias, table name/alias, or join target already registered
    #[error("Duplicate identifier: {0}")]
    DuplicateIdentifier(String),

    /// Join whose local table is not part of the FROM/JOIN set yet
    #[error("Orphaned join: local table '{local}' is not registered (joining '{join}')")]
    OrphanedJoin { join: String, local: String },

    /// Empty or unrecognised comparison operator
    #[error("Invalid operator: '{0}'")]
    InvalidOperator(String),

    /// Order direction other than ASC/DESC
    #[error("Invalid order direction: '{0}'")]
    InvalidDirection(String),

    /// Negative LIMIT count or OFFSET
    #[error("Invalid limit: {0}")]
    InvalidLimit(String),

    /// Well-typed argument with an unusable shape (empty IN-list, non-integer length, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Argument of the wrong fundamental type
    #[error("Type error: expected {expected}, found {found}")]
    Type { expected: String, found: String },
}

impl QbError {
    /// Create an invalid identifier error
    pub fn invalid_identifier(message: impl Into<String>) -> Self {
        Self::InvalidIdentifier(message.into())
    }

    /// Create a duplicate identifier error
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicateIdentifier(name.into())
    }

    /// Create an orphaned join error
    pub fn orphaned_join(join: impl Into<String>, local: impl Into<String>) -> Self {
        Self::OrphanedJoin {
            join: join.into(),
            local: local.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a type error
    pub fn type_error(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::Type {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Check if this is an invalid identifier error
    pub fn is_invalid_identifier(&self) -> bool {
        matches!(self, Self::InvalidIdentifier(_))
    }

    /// Check if this is a duplicate identifier error
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateIdentifier(_))
    }

    /// Check if this is an orphaned join error
    pub fn is_orphaned_join(&self) -> bool {
        matches!(self, Self::OrphanedJoin { .. })
    }

    /// Check if this is an invalid operator error
    pub fn is_invalid_operator(&self) -> bool {
        matches!(self, Self::InvalidOperator(_))
    }

    /// Check if this is an invalid direction error
    pub fn is_invalid_direction(&self) -> bool {
        matches!(self, Self::InvalidDirection(_))
    }

    /// Check if this is an invalid limit/offset error
    pub fn is_invalid_limit(&self) -> bool {
        matches!(self, Self::InvalidLimit(_))
    }

    /// Check if this is an invalid argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Check if this is a type error
    pub fn is_type_error(&self) -> bool {
        matches!(self, Self::Type { .. })
    }

    /// Short stable name of the error kind, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidIdentifier(_) => "invalid_identifier",
            Self::DuplicateIdentifier(_) => "duplicate_identifier",
            Self::OrphanedJoin { .. } => "orphaned_join",
            Self::InvalidOperator(_) => "invalid_operator",
            Self::InvalidDirection(_) => "invalid_direction",
            Self::InvalidLimit(_) => "invalid_limit",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::Type { .. } => "type_error",
        }
    }
}
