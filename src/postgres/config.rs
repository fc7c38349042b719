use tokio_postgres::NoTls;

use crate::config::BackendSettings;
use crate::error::CrudError;
use crate::pool::{ConfigAndPool, CrudPool};
use crate::types::DatabaseType;

impl ConfigAndPool {
    /// Initialize a Postgres pool from backend settings.
    ///
    /// # Errors
    ///
    /// Returns `CrudError::ConfigError` if required fields are missing or
    /// `CrudError::ConnectionError` if pool creation fails.
    #[allow(clippy::unused_async)]
    pub async fn new_postgres(settings: &BackendSettings) -> Result<Self, CrudError> {
        let pg_config = settings.to_pg_config()?;

        let pool = pg_config
            .create_pool(Some(deadpool_postgres::Runtime::Tokio1), NoTls)
            .map_err(|e| {
                CrudError::ConnectionError(format!("Failed to create Postgres pool: {e}"))
            })?;

        Ok(ConfigAndPool {
            pool: CrudPool::Postgres(pool),
            db_type: DatabaseType::Postgres,
            translate_placeholders: false,
        })
    }
}
