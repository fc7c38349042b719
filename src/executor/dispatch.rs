use std::borrow::Cow;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::CrudError;
use crate::pool::CrudPoolConnection;
use crate::results::ResultSet;
use crate::statement::Statement;
use crate::translation::{TranslationMode, translate_placeholders};

#[cfg(feature = "postgres")]
use crate::postgres;
#[cfg(feature = "sqlite")]
use crate::sqlite;

/// Per-call execution options.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecOptions {
    /// Abort the operation if the backend has not answered within this
    /// duration. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Placeholder translation for this call, resolved against the pool
    /// default.
    pub translation: TranslationMode,
}

impl ExecOptions {
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_translation(mut self, translation: TranslationMode) -> Self {
        self.translation = translation;
        self
    }
}

/// Translate a statement's placeholders into the connection's style when the
/// resolved translation setting asks for it.
fn resolve_sql<'q>(
    conn: &CrudPoolConnection,
    statement: &'q Statement,
    options: &ExecOptions,
) -> Cow<'q, str> {
    let enabled = options.translation.resolve(conn.translation_default());
    translate_placeholders(&statement.sql, conn.dialect().style(), enabled)
}

async fn bounded<T>(
    timeout: Option<Duration>,
    fut: impl Future<Output = Result<T, CrudError>>,
) -> Result<T, CrudError> {
    match timeout {
        Some(limit) => match tokio::time::timeout(limit, fut).await {
            Ok(result) => result,
            Err(_) => Err(CrudError::Timeout(limit)),
        },
        None => fut.await,
    }
}

/// Execute a batch of SQL statements (DDL, setup scripts) on the given
/// connection. No parameters, no timeout.
///
/// # Errors
///
/// Returns an error propagated from the underlying backend execution.
pub async fn execute_batch(conn: &mut CrudPoolConnection, sql: &str) -> Result<(), CrudError> {
    tracing::debug!(sql, "executing batch");
    match conn {
        #[cfg(feature = "postgres")]
        CrudPoolConnection::Postgres { client, .. } => postgres::execute_batch(client, sql).await,
        #[cfg(feature = "sqlite")]
        CrudPoolConnection::Sqlite { conn, .. } => sqlite::execute_batch(conn, sql).await,
    }
}

/// Execute a SELECT statement and normalize the result into a row sequence.
/// Zero rows is a success with an empty set.
///
/// # Errors
///
/// Returns an error propagated from the backend, or `CrudError::Timeout` if
/// the configured timeout expires.
pub async fn execute_select(
    conn: &mut CrudPoolConnection,
    statement: &Statement,
    options: &ExecOptions,
) -> Result<ResultSet, CrudError> {
    let sql = resolve_sql(conn, statement, options);
    tracing::debug!(sql = %sql, params = statement.params.len(), "executing select");
    bounded(
        options.timeout,
        select_dispatch(conn, sql.as_ref(), statement),
    )
    .await
}

async fn select_dispatch(
    conn: &mut CrudPoolConnection,
    sql: &str,
    statement: &Statement,
) -> Result<ResultSet, CrudError> {
    match conn {
        #[cfg(feature = "postgres")]
        CrudPoolConnection::Postgres { client, .. } => {
            postgres::execute_select(client, sql, &statement.params).await
        }
        #[cfg(feature = "sqlite")]
        CrudPoolConnection::Sqlite { conn, .. } => {
            sqlite::execute_select(conn, sql, &statement.params).await
        }
    }
}

/// Execute a DML statement (INSERT, UPDATE, DELETE) and return the number of
/// rows affected. Zero rows affected is a legitimate success.
///
/// # Errors
///
/// Returns an error propagated from the backend, or `CrudError::Timeout` if
/// the configured timeout expires.
pub async fn execute_dml(
    conn: &mut CrudPoolConnection,
    statement: &Statement,
    options: &ExecOptions,
) -> Result<usize, CrudError> {
    let sql = resolve_sql(conn, statement, options);
    tracing::debug!(sql = %sql, params = statement.params.len(), "executing dml");
    bounded(options.timeout, dml_dispatch(conn, sql.as_ref(), statement)).await
}

async fn dml_dispatch(
    conn: &mut CrudPoolConnection,
    sql: &str,
    statement: &Statement,
) -> Result<usize, CrudError> {
    match conn {
        #[cfg(feature = "postgres")]
        CrudPoolConnection::Postgres { client, .. } => {
            postgres::execute_dml(client, sql, &statement.params).await
        }
        #[cfg(feature = "sqlite")]
        CrudPoolConnection::Sqlite { conn, .. } => {
            sqlite::execute_dml(conn, sql, &statement.params).await
        }
    }
}

/// Execute an id-reporting INSERT. The statement must already carry the
/// dialect's id mechanism: `RETURNING` on Postgres; on `SQLite` the rowid is
/// read back on the same connection.
///
/// # Errors
///
/// Returns an error propagated from the backend, or `CrudError::Timeout` if
/// the configured timeout expires.
pub async fn execute_insert_returning_id(
    conn: &mut CrudPoolConnection,
    statement: &Statement,
    options: &ExecOptions,
) -> Result<i64, CrudError> {
    let sql = resolve_sql(conn, statement, options);
    tracing::debug!(sql = %sql, params = statement.params.len(), "executing insert returning id");
    bounded(options.timeout, async {
        match conn {
            #[cfg(feature = "postgres")]
            CrudPoolConnection::Postgres { client, .. } => {
                postgres::insert_returning_id(client, sql.as_ref(), &statement.params).await
            }
            #[cfg(feature = "sqlite")]
            CrudPoolConnection::Sqlite { conn, .. } => {
                sqlite::insert_returning_rowid(conn, sql.as_ref(), &statement.params).await
            }
        }
    })
    .await
}

/// Executor surface shared by every connection kind.
#[async_trait]
pub trait DatabaseExecutor {
    /// Executes a batch of SQL statements (no parameters).
    async fn execute_batch(&mut self, sql: &str) -> Result<(), CrudError>;

    /// Executes a single SELECT statement and returns the result set.
    async fn execute_select(
        &mut self,
        statement: &Statement,
        options: &ExecOptions,
    ) -> Result<ResultSet, CrudError>;

    /// Executes a single DML statement and returns the rows affected.
    async fn execute_dml(
        &mut self,
        statement: &Statement,
        options: &ExecOptions,
    ) -> Result<usize, CrudError>;
}

#[async_trait]
impl DatabaseExecutor for CrudPoolConnection {
    async fn execute_batch(&mut self, sql: &str) -> Result<(), CrudError> {
        execute_batch(self, sql).await
    }

    async fn execute_select(
        &mut self,
        statement: &Statement,
        options: &ExecOptions,
    ) -> Result<ResultSet, CrudError> {
        execute_select(self, statement, options).await
    }

    async fn execute_dml(
        &mut self,
        statement: &Statement,
        options: &ExecOptions,
    ) -> Result<usize, CrudError> {
        execute_dml(self, statement, options).await
    }
}
