#[cfg(feature = "postgres")]
use deadpool_postgres::Pool as PostgresPool;

#[cfg(feature = "sqlite")]
use deadpool_sqlite::Pool as SqlitePool;

use crate::types::DatabaseType;

/// Connection pool for the active backend.
///
/// One variant per supported engine; the variant is chosen once at startup
/// and never re-checked by name per call.
#[derive(Clone)]
pub enum CrudPool {
    /// `PostgreSQL` connection pool
    #[cfg(feature = "postgres")]
    Postgres(PostgresPool),
    /// `SQLite` connection pool
    #[cfg(feature = "sqlite")]
    Sqlite(SqlitePool),
}

// Manual Debug implementation; the pool internals are not informative
impl std::fmt::Debug for CrudPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "postgres")]
            Self::Postgres(_) => f.debug_tuple("Postgres").field(&"<PostgresPool>").finish(),
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => f.debug_tuple("Sqlite").field(&"<SqlitePool>").finish(),
        }
    }
}

impl CrudPool {
    #[must_use]
    pub fn database_type(&self) -> DatabaseType {
        match self {
            #[cfg(feature = "postgres")]
            Self::Postgres(_) => DatabaseType::Postgres,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => DatabaseType::Sqlite,
        }
    }
}
