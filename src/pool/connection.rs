#[cfg(feature = "postgres")]
use deadpool_postgres::Object as PostgresObject;

#[cfg(feature = "sqlite")]
use deadpool_sqlite::Object as SqliteObject;

use super::{ConfigAndPool, CrudPool};
use crate::error::CrudError;
use crate::statement::Dialect;
use crate::types::DatabaseType;

/// A checked-out backend connection.
///
/// Exclusive (`&mut`) access is required by every executor entry point, so
/// one handle carries at most one logical operation at a time.
pub enum CrudPoolConnection {
    #[cfg(feature = "postgres")]
    Postgres {
        client: PostgresObject,
        translate_placeholders: bool,
    },
    #[cfg(feature = "sqlite")]
    Sqlite {
        conn: SqliteObject,
        translate_placeholders: bool,
    },
}

// Manual Debug implementation because the pooled objects do not expose Debug
impl std::fmt::Debug for CrudPoolConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "postgres")]
            Self::Postgres { .. } => f.debug_tuple("Postgres").field(&"<Client>").finish(),
            #[cfg(feature = "sqlite")]
            Self::Sqlite { .. } => f.debug_tuple("Sqlite").field(&"<Connection>").finish(),
        }
    }
}

impl ConfigAndPool {
    /// Check a connection out of the pool.
    ///
    /// # Errors
    ///
    /// Returns a pool error variant if the pool cannot provide a
    /// connection.
    pub async fn get_connection(&self) -> Result<CrudPoolConnection, CrudError> {
        match &self.pool {
            #[cfg(feature = "postgres")]
            CrudPool::Postgres(pool) => {
                let client = pool.get().await.map_err(CrudError::PoolErrorPostgres)?;
                Ok(CrudPoolConnection::Postgres {
                    client,
                    translate_placeholders: self.translate_placeholders,
                })
            }
            #[cfg(feature = "sqlite")]
            CrudPool::Sqlite(pool) => {
                let conn = pool.get().await.map_err(CrudError::PoolErrorSqlite)?;
                Ok(CrudPoolConnection::Sqlite {
                    conn,
                    translate_placeholders: self.translate_placeholders,
                })
            }
        }
    }
}

impl CrudPoolConnection {
    /// Pool-default translation toggle attached to this connection.
    #[must_use]
    pub fn translation_default(&self) -> bool {
        match self {
            #[cfg(feature = "postgres")]
            CrudPoolConnection::Postgres {
                translate_placeholders,
                ..
            } => *translate_placeholders,
            #[cfg(feature = "sqlite")]
            CrudPoolConnection::Sqlite {
                translate_placeholders,
                ..
            } => *translate_placeholders,
        }
    }

    #[must_use]
    pub fn database_type(&self) -> DatabaseType {
        match self {
            #[cfg(feature = "postgres")]
            CrudPoolConnection::Postgres { .. } => DatabaseType::Postgres,
            #[cfg(feature = "sqlite")]
            CrudPoolConnection::Sqlite { .. } => DatabaseType::Sqlite,
        }
    }

    /// The SQL dialect statements must be built in for this connection.
    #[must_use]
    pub fn dialect(&self) -> Dialect {
        Dialect::from(self.database_type())
    }
}
