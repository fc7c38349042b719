use std::error::Error;

use bytes::BytesMut;
use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};

use crate::error::CrudError;
use crate::types::{ConversionMode, ParamConverter, RowValues};

/// Container for Postgres parameters with lifetime tracking.
pub struct Params<'a> {
    references: Vec<&'a (dyn ToSql + Sync)>,
}

impl<'a> Params<'a> {
    /// Convert a slice of `RowValues` to Postgres parameters.
    ///
    /// # Errors
    ///
    /// Currently infallible; kept fallible for parity with the other
    /// backends' converters.
    pub fn convert(params: &'a [RowValues]) -> Result<Params<'a>, CrudError> {
        let references: Vec<&(dyn ToSql + Sync)> =
            params.iter().map(|p| p as &(dyn ToSql + Sync)).collect();
        Ok(Params { references })
    }

    /// Borrow the parameter array in the form `tokio_postgres` expects.
    #[must_use]
    pub fn as_refs(&self) -> &[&'a (dyn ToSql + Sync)] {
        &self.references
    }
}

impl<'a> ParamConverter<'a> for Params<'a> {
    type Converted = Params<'a>;

    fn convert_sql_params(
        params: &'a [RowValues],
        _mode: ConversionMode,
    ) -> Result<Self::Converted, CrudError> {
        Self::convert(params)
    }
}

impl ToSql for RowValues {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self {
            RowValues::Int(i) => (*i).to_sql(ty, out),
            RowValues::Float(f) => (*f).to_sql(ty, out),
            RowValues::Text(s) => s.to_sql(ty, out),
            RowValues::Bool(b) => (*b).to_sql(ty, out),
            RowValues::Timestamp(dt) => dt.to_sql(ty, out),
            RowValues::Null => Ok(IsNull::Yes),
            RowValues::JSON(json) => json.to_sql(ty, out),
            RowValues::Blob(bytes) => bytes.to_sql(ty, out),
        }
    }

    fn accepts(ty: &Type) -> bool {
        match *ty {
            Type::INT2 | Type::INT4 | Type::INT8 => true,
            Type::FLOAT4 | Type::FLOAT8 => true,
            Type::TEXT | Type::VARCHAR | Type::CHAR | Type::NAME => true,
            Type::BOOL => true,
            Type::TIMESTAMP | Type::TIMESTAMPTZ | Type::DATE => true,
            Type::JSON | Type::JSONB => true,
            Type::BYTEA => true,
            _ => false,
        }
    }

    to_sql_checked!();
}
