use std::fmt::Write;

use deadpool_sqlite::rusqlite;

use crate::error::CrudError;
use crate::types::{ConversionMode, ParamConverter, RowValues};

/// Convert a single `RowValues` to a rusqlite `Value`.
#[must_use]
pub fn row_value_to_sqlite_value(value: &RowValues) -> rusqlite::types::Value {
    match value {
        RowValues::Int(i) => rusqlite::types::Value::Integer(*i),
        RowValues::Float(f) => rusqlite::types::Value::Real(*f),
        RowValues::Text(s) => rusqlite::types::Value::Text(s.clone()),
        // SQLite stores booleans as 0/1 integers
        RowValues::Bool(b) => rusqlite::types::Value::Integer(i64::from(*b)),
        RowValues::Timestamp(dt) => {
            let mut buf = String::with_capacity(32);
            let _ = write!(buf, "{}", dt.format("%F %T%.f"));
            rusqlite::types::Value::Text(buf)
        }
        RowValues::Null => rusqlite::types::Value::Null,
        RowValues::JSON(json) => rusqlite::types::Value::Text(json.to_string()),
        RowValues::Blob(bytes) => rusqlite::types::Value::Blob(bytes.clone()),
    }
}

/// Unified `SQLite` parameter container.
pub struct Params(pub Vec<rusqlite::types::Value>);

impl Params {
    /// Convert a slice of `RowValues` into owned `SQLite` values.
    ///
    /// # Errors
    ///
    /// Currently infallible; kept fallible for parity with the other
    /// backends' converters.
    pub fn convert(params: &[RowValues]) -> Result<Self, CrudError> {
        let mut values = Vec::with_capacity(params.len());
        for p in params {
            values.push(row_value_to_sqlite_value(p));
        }
        Ok(Params(values))
    }

    /// Borrow the underlying values.
    #[must_use]
    pub fn as_values(&self) -> &[rusqlite::types::Value] {
        &self.0
    }

    /// Build a borrowed params slice suitable for rusqlite execution.
    #[must_use]
    pub fn as_refs(&self) -> Vec<&dyn rusqlite::ToSql> {
        self.0.iter().map(|v| v as &dyn rusqlite::ToSql).collect()
    }
}

impl ParamConverter<'_> for Params {
    type Converted = Params;

    fn convert_sql_params(
        params: &[RowValues],
        _mode: ConversionMode,
    ) -> Result<Self::Converted, CrudError> {
        Self::convert(params)
    }
}
