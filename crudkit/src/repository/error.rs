//! Repository error types
//!
//! Structured errors for repository operations: what operation failed,
//! which category it falls into, and (for persistence errors) the
//! underlying driver cause.

use std::fmt;

/// Operation being performed when the repository error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryOperation {
    /// Counting rows matching filters
    Count,
    /// Streaming rows matching a query configuration
    Find,
    /// Fetching a single row by conditions
    FindOne,
    /// Inserting a new row
    Create,
    /// Partially updating a row by id
    UpdateById,
    /// Deleting rows matching conditions
    Delete,
}

impl fmt::Display for RepositoryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count => write!(f, "count"),
            Self::Find => write!(f, "find"),
            Self::FindOne => write!(f, "find_one"),
            Self::Create => write!(f, "create"),
            Self::UpdateById => write!(f, "update_by_id"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Category of repository error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryErrorKind {
    /// A filter, order-by, or update field does not exist on the table.
    /// Raised at query build time, before any SQL reaches the database.
    UnknownField,
    /// The query configuration itself is unusable (e.g. an empty update)
    InvalidQuery,
    /// A single-row fetch matched nothing
    NotFound,
    /// The database rejected the statement with a constraint violation
    ConstraintViolation,
    /// The database could not be reached or the pool timed out
    Connection,
    /// Any other database failure
    Database,
}

impl fmt::Display for RepositoryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownField => write!(f, "unknown_field"),
            Self::InvalidQuery => write!(f, "invalid_query"),
            Self::NotFound => write!(f, "not_found"),
            Self::ConstraintViolation => write!(f, "constraint_violation"),
            Self::Connection => write!(f, "connection"),
            Self::Database => write!(f, "database"),
        }
    }
}

/// Structured repository error with operation context
///
/// # Example
///
/// ```rust
/// use crudkit::repository::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
///
/// let err = RepositoryError::unknown_field(RepositoryOperation::Find, "nickname", "users");
/// assert_eq!(err.kind, RepositoryErrorKind::UnknownField);
/// assert!(err.to_string().contains("nickname"));
/// ```
#[derive(Debug)]
pub struct RepositoryError {
    /// The operation being performed when the error occurred
    pub operation: RepositoryOperation,
    /// The category of error
    pub kind: RepositoryErrorKind,
    /// Human-readable error message
    pub message: String,
    /// The entity involved, when known (e.g. "User")
    pub entity: Option<String>,
    /// The underlying driver error, for persistence failures
    pub source: Option<sqlx::Error>,
}

impl RepositoryError {
    /// Create a new repository error
    pub fn new(
        operation: RepositoryOperation,
        kind: RepositoryErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity: None,
            source: None,
        }
    }

    /// A filter or update field that does not exist on the target table
    pub fn unknown_field(operation: RepositoryOperation, field: &str, table: &str) -> Self {
        Self::new(
            operation,
            RepositoryErrorKind::UnknownField,
            format!("field {field} cannot be found on table {table}"),
        )
    }

    /// A query configuration that cannot produce a valid statement
    pub fn invalid_query(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::InvalidQuery, message)
    }

    /// A single-row fetch that matched nothing
    pub fn not_found(entity: impl Into<String>, detail: impl Into<String>) -> Self {
        let entity = entity.into();
        Self {
            operation: RepositoryOperation::FindOne,
            kind: RepositoryErrorKind::NotFound,
            message: format!("nothing found for {} with conditions: {}", entity, detail.into()),
            entity: Some(entity),
            source: None,
        }
    }

    /// Wrap a driver error, classifying it by cause
    pub fn from_sqlx(operation: RepositoryOperation, err: sqlx::Error) -> Self {
        let kind = match &err {
            sqlx::Error::Database(db)
                if db.constraint().is_some()
                    || db.is_unique_violation()
                    || db.is_foreign_key_violation()
                    || db.is_check_violation() =>
            {
                RepositoryErrorKind::ConstraintViolation
            }
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => RepositoryErrorKind::Connection,
            _ => RepositoryErrorKind::Database,
        };
        Self {
            operation,
            kind,
            message: err.to_string(),
            entity: None,
            source: Some(err),
        }
    }

    /// Attach the entity name to an existing error
    #[must_use]
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Set the operation that caused the error
    #[must_use]
    pub fn with_operation(mut self, operation: RepositoryOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Whether this error is the typed not-found condition
    pub fn is_not_found(&self) -> bool {
        self.kind == RepositoryErrorKind::NotFound
    }
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "repository {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let Some(ref entity) = self.entity {
            write!(f, " [{entity}]")?;
        }
        Ok(())
    }
}

impl std::error::Error for RepositoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;
