use std::time::Duration;

use thiserror::Error;

#[cfg(feature = "sqlite")]
use deadpool_sqlite::rusqlite;
#[cfg(feature = "postgres")]
use tokio_postgres;

/// Unified error type for every operation in this crate.
///
/// Driver errors are wrapped transparently so callers can still reach the
/// backend's message and code; everything else carries a descriptive string.
/// No variant ever terminates the process.
#[derive(Debug, Error)]
pub enum CrudError {
    #[cfg(feature = "postgres")]
    #[error(transparent)]
    PostgresError(#[from] tokio_postgres::Error),

    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[cfg(feature = "postgres")]
    #[error(transparent)]
    PoolErrorPostgres(#[from] deadpool::managed::PoolError<tokio_postgres::Error>),

    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    PoolErrorSqlite(#[from] deadpool::managed::PoolError<rusqlite::Error>),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Parameter conversion error: {0}")]
    ParameterError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Unimplemented feature: {0}")]
    Unimplemented(String),
}

#[cfg(feature = "sqlite")]
impl From<deadpool_sqlite::InteractError> for CrudError {
    fn from(err: deadpool_sqlite::InteractError) -> Self {
        CrudError::ConnectionError(format!("SQLite interact error: {err}"))
    }
}
