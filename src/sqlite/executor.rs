use deadpool_sqlite::Object as SqliteObject;
use deadpool_sqlite::rusqlite::ToSql;

use crate::convert_sql_params;
use crate::error::CrudError;
use crate::results::ResultSet;
use crate::types::{ConversionMode, RowValues};

use super::params::Params;
use super::query::build_result_set;

/// Execute a batch of SQL statements for `SQLite` using auto-commit.
///
/// # Errors
///
/// Returns `CrudError::SqliteError` if execution fails.
pub async fn execute_batch(conn: &SqliteObject, sql: &str) -> Result<(), CrudError> {
    let sql = sql.to_owned();
    conn.interact(move |conn| conn.execute_batch(&sql).map_err(CrudError::SqliteError))
        .await?
}

/// Execute a SELECT query in `SQLite` and normalize the rows.
///
/// # Errors
///
/// Returns `CrudError::SqliteError` if execution or result processing
/// fails.
pub async fn execute_select(
    conn: &SqliteObject,
    sql: &str,
    params: &[RowValues],
) -> Result<ResultSet, CrudError> {
    let values = convert_sql_params::<Params>(params, ConversionMode::Query)?.0;
    let sql = sql.to_owned();
    conn.interact(move |conn| {
        let mut stmt = conn.prepare(&sql).map_err(CrudError::SqliteError)?;
        build_result_set(&mut stmt, &values)
    })
    .await?
}

/// Execute a DML statement (INSERT, UPDATE, DELETE) in `SQLite`.
///
/// # Errors
///
/// Returns `CrudError::SqliteError` if execution fails.
pub async fn execute_dml(
    conn: &SqliteObject,
    sql: &str,
    params: &[RowValues],
) -> Result<usize, CrudError> {
    let values = convert_sql_params::<Params>(params, ConversionMode::Execute)?.0;
    let sql = sql.to_owned();
    conn.interact(move |conn| {
        let refs: Vec<&dyn ToSql> = values.iter().map(|v| v as &dyn ToSql).collect();
        conn.execute(&sql, &refs[..]).map_err(CrudError::SqliteError)
    })
    .await?
}

/// The rowid generated by the most recent successful INSERT on this
/// connection.
///
/// # Errors
///
/// Returns `CrudError::ConnectionError` if the pooled connection cannot be
/// reached.
pub async fn last_insert_id(conn: &SqliteObject) -> Result<i64, CrudError> {
    conn.interact(|conn| Ok::<_, CrudError>(conn.last_insert_rowid()))
        .await?
}

/// Execute an INSERT and report the generated rowid, on the same pooled
/// connection with no interleaving.
///
/// # Errors
///
/// Returns `CrudError::SqliteError` if the INSERT fails.
pub async fn insert_returning_rowid(
    conn: &SqliteObject,
    sql: &str,
    params: &[RowValues],
) -> Result<i64, CrudError> {
    let values = convert_sql_params::<Params>(params, ConversionMode::Execute)?.0;
    let sql = sql.to_owned();
    conn.interact(move |conn| {
        let refs: Vec<&dyn ToSql> = values.iter().map(|v| v as &dyn ToSql).collect();
        conn.execute(&sql, &refs[..]).map_err(CrudError::SqliteError)?;
        Ok(conn.last_insert_rowid())
    })
    .await?
}
