use deadpool_sqlite::{Config as SqliteConfig, Runtime};

use crate::error::CrudError;
use crate::pool::{ConfigAndPool, CrudPool};
use crate::types::DatabaseType;

impl ConfigAndPool {
    /// Initialize a `SQLite` pool for the given database path (a file path,
    /// or `:memory:`).
    ///
    /// # Errors
    ///
    /// Returns `CrudError::ConnectionError` if pool creation or the initial
    /// connection test fails.
    pub async fn new_sqlite(db_path: impl Into<String>) -> Result<Self, CrudError> {
        let cfg = SqliteConfig::new(db_path.into());

        let pool = cfg.create_pool(Runtime::Tokio1).map_err(|e| {
            CrudError::ConnectionError(format!("Failed to create SQLite pool: {e}"))
        })?;

        // Smoke-test a connection and switch on WAL for file-backed databases
        {
            let conn = pool.get().await.map_err(CrudError::PoolErrorSqlite)?;
            conn.interact(|conn| {
                conn.execute_batch("PRAGMA journal_mode = WAL;")
                    .map_err(CrudError::SqliteError)
            })
            .await??;
        }

        Ok(ConfigAndPool {
            pool: CrudPool::Sqlite(pool),
            db_type: DatabaseType::Sqlite,
            translate_placeholders: false,
        })
    }
}
