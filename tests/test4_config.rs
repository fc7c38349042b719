use crud_sql::prelude::*;

#[test]
fn unknown_default_backend_is_an_explicit_config_error() {
    let config = DbConfig::new("main");
    match config.active() {
        Err(CrudError::ConfigError(msg)) => assert!(msg.contains("main")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[cfg(feature = "sqlite")]
#[test]
fn active_backend_resolves_through_the_default_key() {
    let config = DbConfig::new("embedded")
        .backend("embedded", BackendSettings::sqlite(":memory:"))
        .backend("other", BackendSettings::sqlite("/tmp/other.db"));
    let settings = config.active().unwrap();
    assert_eq!(settings.database.as_deref(), Some(":memory:"));
}

#[cfg(feature = "sqlite")]
#[test]
fn config_descriptor_deserializes_from_structured_data() {
    let config: DbConfig = serde_json::from_str(
        r#"{
            "default": "embedded",
            "backends": {
                "embedded": { "driver": "sqlite", "database": ":memory:" }
            }
        }"#,
    )
    .unwrap();
    assert_eq!(config.default, "embedded");
    assert_eq!(
        config.active().unwrap().driver,
        DatabaseType::Sqlite
    );
}

#[cfg(feature = "postgres")]
#[test]
fn postgres_backend_requires_its_connection_fields() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let mut settings = BackendSettings::postgres("db.local", 5432, "app", "secret", "appdb");
        settings.port = None;
        let config = DbConfig::new("main").backend("main", settings);
        match ConfigAndPool::from_config(&config).await {
            Err(CrudError::ConfigError(msg)) => assert!(msg.contains("port")),
            other => panic!("expected ConfigError, got {other:?}"),
        }

        let mut settings = BackendSettings::postgres("db.local", 5432, "app", "secret", "appdb");
        settings.host = None;
        let config = DbConfig::new("main").backend("main", settings);
        match ConfigAndPool::from_config(&config).await {
            Err(CrudError::ConfigError(msg)) => assert!(msg.contains("host")),
            other => panic!("expected ConfigError, got {other:?}"),
        }
    });
}

#[cfg(feature = "sqlite")]
#[test]
fn sqlite_pool_builds_from_config() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let config =
            DbConfig::new("embedded").backend("embedded", BackendSettings::sqlite(":memory:"));
        let cap = ConfigAndPool::from_config(&config).await?;
        assert_eq!(cap.db_type, DatabaseType::Sqlite);

        let mut conn = cap.get_connection().await?;
        crud_sql::crud::execute_batch(&mut conn, "CREATE TABLE t (id INTEGER);").await?;
        Ok::<(), Box<dyn std::error::Error>>(())
    })?;
    Ok(())
}

#[cfg(feature = "sqlite")]
#[test]
fn sqlite_backend_requires_a_database_path() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let mut settings = BackendSettings::sqlite(":memory:");
        settings.database = None;
        let config = DbConfig::new("main").backend("main", settings);
        match ConfigAndPool::from_config(&config).await {
            Err(CrudError::ConfigError(msg)) => assert!(msg.contains("database")),
            other => panic!("expected ConfigError, got {other:?}"),
        }
    });
}
