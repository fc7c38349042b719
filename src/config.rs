use std::collections::HashMap;

use serde::Deserialize;

use crate::error::CrudError;
use crate::types::DatabaseType;

/// Connection parameters for one named backend.
///
/// Which fields are required depends on the driver: Postgres needs
/// host-or-socket, user, password, database, and port; SQLite only needs
/// `database` (the file path, or `:memory:`).
#[derive(Debug, Clone, Deserialize)]
pub struct BackendSettings {
    pub driver: DatabaseType,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    /// Unix socket directory; stands in for `host` when set.
    #[serde(default)]
    pub socket: Option<String>,
}

impl BackendSettings {
    #[cfg(feature = "sqlite")]
    #[must_use]
    pub fn sqlite(database: impl Into<String>) -> Self {
        Self {
            driver: DatabaseType::Sqlite,
            host: None,
            user: None,
            password: None,
            database: Some(database.into()),
            port: None,
            socket: None,
        }
    }

    #[cfg(feature = "postgres")]
    #[must_use]
    pub fn postgres(
        host: impl Into<String>,
        port: u16,
        user: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            driver: DatabaseType::Postgres,
            host: Some(host.into()),
            user: Some(user.into()),
            password: Some(password.into()),
            database: Some(database.into()),
            port: Some(port),
            socket: None,
        }
    }

    fn require<'a>(field: Option<&'a str>, name: &str) -> Result<&'a str, CrudError> {
        field.ok_or_else(|| CrudError::ConfigError(format!("{name} is required")))
    }

    /// Build a deadpool-postgres config, validating required fields.
    ///
    /// # Errors
    ///
    /// Returns `CrudError::ConfigError` naming the first missing field.
    #[cfg(feature = "postgres")]
    pub(crate) fn to_pg_config(&self) -> Result<deadpool_postgres::Config, CrudError> {
        let host = self
            .socket
            .as_deref()
            .or(self.host.as_deref())
            .ok_or_else(|| CrudError::ConfigError("host or socket is required".to_string()))?;
        let user = Self::require(self.user.as_deref(), "user")?;
        let password = Self::require(self.password.as_deref(), "password")?;
        let dbname = Self::require(self.database.as_deref(), "database")?;
        let port = self
            .port
            .ok_or_else(|| CrudError::ConfigError("port is required".to_string()))?;

        let mut cfg = deadpool_postgres::Config::new();
        cfg.host = Some(host.to_string());
        cfg.user = Some(user.to_string());
        cfg.password = Some(password.to_string());
        cfg.dbname = Some(dbname.to_string());
        cfg.port = Some(port);
        Ok(cfg)
    }

    /// The SQLite database path.
    ///
    /// # Errors
    ///
    /// Returns `CrudError::ConfigError` if `database` is unset.
    #[cfg(feature = "sqlite")]
    pub(crate) fn sqlite_path(&self) -> Result<&str, CrudError> {
        Self::require(self.database.as_deref(), "database")
    }
}

/// The full configuration descriptor: named backends plus the `default` key
/// selecting the active one.
///
/// Constructed once at application startup (it derives `Deserialize`, so it
/// can be read from whatever config format the host application uses) and
/// read-only thereafter.
#[derive(Debug, Clone, Deserialize)]
pub struct DbConfig {
    /// Name of the active backend.
    pub default: String,
    /// All configured backends, by name.
    pub backends: HashMap<String, BackendSettings>,
}

impl DbConfig {
    #[must_use]
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            default: default.into(),
            backends: HashMap::new(),
        }
    }

    /// Register a named backend.
    #[must_use]
    pub fn backend(mut self, name: impl Into<String>, settings: BackendSettings) -> Self {
        self.backends.insert(name.into(), settings);
        self
    }

    /// Look up a backend by name.
    ///
    /// # Errors
    ///
    /// Returns `CrudError::ConfigError` if no backend carries that name —
    /// an explicit error, not a false-like sentinel.
    pub fn get(&self, name: &str) -> Result<&BackendSettings, CrudError> {
        self.backends
            .get(name)
            .ok_or_else(|| CrudError::ConfigError(format!("no backend named {name:?} configured")))
    }

    /// The backend selected by the `default` key.
    ///
    /// # Errors
    ///
    /// Returns `CrudError::ConfigError` if the default names an unknown
    /// backend.
    pub fn active(&self) -> Result<&BackendSettings, CrudError> {
        self.get(&self.default)
    }
}
