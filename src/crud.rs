//! High-level CRUD entry points.
//!
//! Each function ties the data flow together: build the statement for the
//! connection's dialect, then dispatch it through the executor. Callers that
//! need more control can build [`Statement`]s themselves and use the
//! executor directly.

use crate::clause::WhereClause;
use crate::error::CrudError;
use crate::executor::{self, ExecOptions};
use crate::pool::CrudPoolConnection;
use crate::record::Record;
use crate::results::ResultSet;
use crate::statement::{self, Dialect, SelectQuery};

/// Insert one record into `table`. Returns the number of rows affected.
///
/// # Errors
///
/// Returns `CrudError::MalformedInput` for an empty record, or a backend
/// error from execution.
pub async fn insert(
    conn: &mut CrudPoolConnection,
    table: &str,
    record: &Record,
    options: &ExecOptions,
) -> Result<usize, CrudError> {
    let statement = statement::insert(conn.dialect(), table, record)?;
    executor::execute_dml(conn, &statement, options).await
}

/// Insert one record and report the generated id from `id_column`.
///
/// On Postgres this uses `RETURNING {id_column}`; on `SQLite` the rowid is
/// read back on the same connection.
///
/// # Errors
///
/// Same conditions as [`insert`].
pub async fn insert_returning_id(
    conn: &mut CrudPoolConnection,
    table: &str,
    record: &Record,
    id_column: &str,
    options: &ExecOptions,
) -> Result<i64, CrudError> {
    let dialect = conn.dialect();
    let statement = match dialect {
        Dialect::Postgres => statement::insert_returning(dialect, table, record, id_column)?,
        Dialect::Sqlite => statement::insert(dialect, table, record)?,
    };
    executor::execute_insert_returning_id(conn, &statement, options).await
}

/// Run a SELECT described by `query`. Always returns a row sequence; zero
/// rows is a success with an empty set.
///
/// # Errors
///
/// Returns `CrudError::MalformedInput` for malformed query inputs, or a
/// backend error from execution.
pub async fn select(
    conn: &mut CrudPoolConnection,
    query: &SelectQuery,
    options: &ExecOptions,
) -> Result<ResultSet, CrudError> {
    let statement = query.build(conn.dialect())?;
    executor::execute_select(conn, &statement, options).await
}

/// Update rows matching `filter` with the values of `changes`, bounded to
/// `limit` rows (default 1).
///
/// # Errors
///
/// Returns `CrudError::MalformedInput` for an empty record or an empty
/// filter, or a backend error from execution.
pub async fn update(
    conn: &mut CrudPoolConnection,
    table: &str,
    changes: &Record,
    filter: &WhereClause,
    limit: Option<u64>,
    options: &ExecOptions,
) -> Result<usize, CrudError> {
    let statement = statement::update(conn.dialect(), table, changes, filter, limit)?;
    executor::execute_dml(conn, &statement, options).await
}

/// Delete rows matching `filter`, bounded to `limit` rows (default 1).
///
/// # Errors
///
/// Returns `CrudError::MalformedInput` for a malformed filter, or a backend
/// error from execution.
pub async fn delete(
    conn: &mut CrudPoolConnection,
    table: &str,
    filter: &WhereClause,
    limit: Option<u64>,
    options: &ExecOptions,
) -> Result<usize, CrudError> {
    let statement = statement::delete(conn.dialect(), table, filter, limit)?;
    executor::execute_dml(conn, &statement, options).await
}

/// Execute a batch of SQL statements (DDL, setup scripts) verbatim.
///
/// # Errors
///
/// Returns a backend error if the batch fails.
pub async fn execute_batch(conn: &mut CrudPoolConnection, sql: &str) -> Result<(), CrudError> {
    executor::execute_batch(conn, sql).await
}
