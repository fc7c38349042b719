use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

use crate::error::CrudError;
use crate::results::ResultSet;
use crate::types::RowValues;

/// Extract a `RowValues` from a `tokio_postgres` row at the given index,
/// based on the column's declared type.
///
/// # Errors
///
/// Returns `CrudError::PostgresError` if the column cannot be retrieved as
/// the expected Rust type.
pub fn extract_value(row: &tokio_postgres::Row, idx: usize) -> Result<RowValues, CrudError> {
    let type_name = row.columns()[idx].type_().name();

    match type_name {
        "int2" => {
            let val: Option<i16> = row.try_get(idx)?;
            Ok(val.map_or(RowValues::Null, |v| RowValues::Int(i64::from(v))))
        }
        "int4" => {
            let val: Option<i32> = row.try_get(idx)?;
            Ok(val.map_or(RowValues::Null, |v| RowValues::Int(i64::from(v))))
        }
        "int8" => {
            let val: Option<i64> = row.try_get(idx)?;
            Ok(val.map_or(RowValues::Null, RowValues::Int))
        }
        "float4" | "float8" => {
            let val: Option<f64> = row.try_get(idx)?;
            Ok(val.map_or(RowValues::Null, RowValues::Float))
        }
        "bool" => {
            let val: Option<bool> = row.try_get(idx)?;
            Ok(val.map_or(RowValues::Null, RowValues::Bool))
        }
        "timestamp" | "timestamptz" => {
            let val: Option<NaiveDateTime> = row.try_get(idx)?;
            Ok(val.map_or(RowValues::Null, RowValues::Timestamp))
        }
        "json" | "jsonb" => {
            let val: Option<JsonValue> = row.try_get(idx)?;
            Ok(val.map_or(RowValues::Null, RowValues::JSON))
        }
        "bytea" => {
            let val: Option<Vec<u8>> = row.try_get(idx)?;
            Ok(val.map_or(RowValues::Null, RowValues::Blob))
        }
        // Everything else is fetched as text
        _ => {
            let val: Option<String> = row.try_get(idx)?;
            Ok(val.map_or(RowValues::Null, RowValues::Text))
        }
    }
}

/// Build a normalized result set from raw Postgres rows.
///
/// # Errors
///
/// Propagates [`extract_value`] errors.
pub fn build_result_set_from_rows(rows: &[tokio_postgres::Row]) -> Result<ResultSet, CrudError> {
    let mut result_set = ResultSet::with_capacity(rows.len());
    if let Some(row) = rows.first() {
        let column_names: Vec<String> =
            row.columns().iter().map(|c| c.name().to_string()).collect();
        result_set.set_column_names(std::sync::Arc::new(column_names));
    }

    for row in rows {
        let col_count = row.columns().len();
        let mut values = Vec::with_capacity(col_count);
        for idx in 0..col_count {
            values.push(extract_value(row, idx)?);
        }
        result_set.add_row_values(values);
    }

    Ok(result_set)
}
