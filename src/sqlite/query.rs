use deadpool_sqlite::rusqlite;
use rusqlite::types::Value;
use rusqlite::{Statement, ToSql};

use crate::error::CrudError;
use crate::results::ResultSet;
use crate::types::RowValues;

/// Extract a `RowValues` from a `SQLite` row.
///
/// # Errors
///
/// Returns `CrudError::SqliteError` if the value cannot be read.
pub fn extract_value(row: &rusqlite::Row, idx: usize) -> Result<RowValues, CrudError> {
    let value: Value = row.get(idx).map_err(CrudError::SqliteError)?;
    match value {
        Value::Null => Ok(RowValues::Null),
        Value::Integer(i) => Ok(RowValues::Int(i)),
        Value::Real(f) => Ok(RowValues::Float(f)),
        Value::Text(s) => Ok(RowValues::Text(s)),
        Value::Blob(b) => Ok(RowValues::Blob(b)),
    }
}

/// Run a prepared `SQLite` statement and build a normalized result set.
///
/// # Errors
///
/// Returns `CrudError::SqliteError` if query execution or row extraction
/// fails.
pub fn build_result_set(stmt: &mut Statement, params: &[Value]) -> Result<ResultSet, CrudError> {
    let param_refs: Vec<&dyn ToSql> = params.iter().map(|v| v as &dyn ToSql).collect();
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();
    let col_count = column_names.len();

    let mut result_set = ResultSet::with_capacity(10);
    result_set.set_column_names(std::sync::Arc::new(column_names));

    let mut rows = stmt.query(&param_refs[..])?;
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(col_count);
        for idx in 0..col_count {
            values.push(extract_value(row, idx)?);
        }
        result_set.add_row_values(values);
    }

    Ok(result_set)
}
