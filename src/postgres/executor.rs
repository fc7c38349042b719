use deadpool_postgres::Object as PostgresObject;

use crate::convert_sql_params;
use crate::error::CrudError;
use crate::results::ResultSet;
use crate::types::{ConversionMode, RowValues};

use super::params::Params;
use super::query::{build_result_set_from_rows, extract_value};

/// Execute a batch of SQL statements (no parameters) in Postgres.
///
/// # Errors
///
/// Returns `CrudError::PostgresError` if the batch fails.
pub async fn execute_batch(client: &PostgresObject, sql: &str) -> Result<(), CrudError> {
    client
        .batch_execute(sql)
        .await
        .map_err(CrudError::PostgresError)
}

/// Execute a SELECT in Postgres and normalize the rows.
///
/// # Errors
///
/// Returns `CrudError::PostgresError` if execution or extraction fails.
pub async fn execute_select(
    client: &PostgresObject,
    sql: &str,
    params: &[RowValues],
) -> Result<ResultSet, CrudError> {
    let converted = convert_sql_params::<Params>(params, ConversionMode::Query)?;
    let rows = client.query(sql, converted.as_refs()).await?;
    build_result_set_from_rows(&rows)
}

/// Execute a DML statement (INSERT, UPDATE, DELETE) in Postgres.
///
/// # Errors
///
/// Returns `CrudError::PostgresError` if execution fails, or
/// `CrudError::ExecutionError` if the affected-row count does not fit.
pub async fn execute_dml(
    client: &PostgresObject,
    sql: &str,
    params: &[RowValues],
) -> Result<usize, CrudError> {
    let converted = convert_sql_params::<Params>(params, ConversionMode::Execute)?;
    let affected = client.execute(sql, converted.as_refs()).await?;
    usize::try_from(affected)
        .map_err(|e| CrudError::ExecutionError(format!("rows affected out of range: {e}")))
}

/// Execute an `INSERT … RETURNING {id}` statement and read back the id.
///
/// # Errors
///
/// Returns `CrudError::ExecutionError` if the statement yields no row or a
/// non-integer id.
pub async fn insert_returning_id(
    client: &PostgresObject,
    sql: &str,
    params: &[RowValues],
) -> Result<i64, CrudError> {
    let converted = convert_sql_params::<Params>(params, ConversionMode::Execute)?;
    let rows = client.query(sql, converted.as_refs()).await?;
    let row = rows.first().ok_or_else(|| {
        CrudError::ExecutionError("INSERT .. RETURNING produced no rows".to_string())
    })?;
    match extract_value(row, 0)? {
        RowValues::Int(id) => Ok(id),
        other => Err(CrudError::ExecutionError(format!(
            "returned id is not an integer: {other:?}"
        ))),
    }
}
