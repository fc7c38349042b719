mod connection;
mod types;

pub use connection::CrudPoolConnection;
pub use types::CrudPool;

use crate::config::DbConfig;
use crate::error::CrudError;
use crate::types::DatabaseType;

/// The explicit context object for database access: the backend pool plus
/// the descriptor data the core needs at call time.
///
/// Built once at startup from a [`DbConfig`] (or directly via the
/// per-backend constructors); cloneable and cheap to share. There is no
/// process-wide default — every operation receives a connection obtained
/// from one of these.
#[derive(Debug, Clone)]
pub struct ConfigAndPool {
    pub pool: CrudPool,
    pub db_type: DatabaseType,
    /// Pool-default for placeholder translation, carried onto every
    /// connection this pool hands out.
    pub translate_placeholders: bool,
}

impl ConfigAndPool {
    /// Build the pool for the backend selected by the config's `default`
    /// key.
    ///
    /// # Errors
    ///
    /// Returns `CrudError::ConfigError` if the default names an unknown
    /// backend or required fields are missing, and
    /// `CrudError::ConnectionError` if pool creation fails.
    pub async fn from_config(config: &DbConfig) -> Result<Self, CrudError> {
        let settings = config.active()?;
        match settings.driver {
            #[cfg(feature = "postgres")]
            DatabaseType::Postgres => Self::new_postgres(settings).await,
            #[cfg(feature = "sqlite")]
            DatabaseType::Sqlite => Self::new_sqlite(settings.sqlite_path()?).await,
        }
    }

    /// Override the pool-default placeholder translation flag.
    #[must_use]
    pub fn with_translation(mut self, translate_placeholders: bool) -> Self {
        self.translate_placeholders = translate_placeholders;
        self
    }
}
