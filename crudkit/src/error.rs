//! Crate-level error types

use thiserror::Error;

/// Errors surfaced while bootstrapping or running a service
///
/// Request-scoped failures use [`RepositoryError`](crate::repository::RepositoryError)
/// and [`ApiError`](crate::routes::ApiError); this enum covers everything
/// outside the request path: configuration, pool creation, migrations,
/// and server I/O.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded or extracted
    #[error("configuration error: {0}")]
    Config(#[from] figment::Error),

    /// Socket or filesystem I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Underlying database driver failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration run failed
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Input failed validation before any work was attempted
    #[error("validation error: {0}")]
    Validation(String),

    /// Password hashing or verification failure
    #[error("password hashing error: {0}")]
    PasswordHash(String),

    /// Anything that does not fit the categories above
    #[error("{0}")]
    Internal(String),
}

/// Result type for crate-level operations
pub type Result<T> = std::result::Result<T, Error>;
