//! Inline literal rendering — the text-building fallback.
//!
//! The primary execution path binds parameters; nothing here runs unless a
//! caller explicitly wants plain SQL text (diagnostics, SQL scripts, or a
//! dialect without parameter binding). Values are escaped and quoted;
//! numeric values stay bare.

use std::fmt::Write;

use crate::error::CrudError;
use crate::record::Record;
use crate::statement::Dialect;
use crate::translation::scan_placeholders;
use crate::types::RowValues;

/// Escape the body of a single-quoted SQL string literal by doubling quote
/// characters. Safe for both supported dialects; backslash-carrying text on
/// Postgres is additionally routed through the `E''` form by [`literal`].
#[must_use]
pub fn escape_str(raw: &str) -> String {
    raw.replace('\'', "''")
}

fn text_literal(dialect: Dialect, raw: &str) -> String {
    match dialect {
        Dialect::Sqlite => format!("'{}'", escape_str(raw)),
        Dialect::Postgres => {
            if raw.contains('\\') {
                // E-string: backslashes are escape characters and must be doubled
                format!("E'{}'", escape_str(raw).replace('\\', "\\\\"))
            } else {
                format!("'{}'", escape_str(raw))
            }
        }
    }
}

fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02X}");
    }
    out
}

/// Render one value as an inline SQL literal for the given dialect.
///
/// # Errors
///
/// Returns `CrudError::MalformedInput` for values with no SQL literal form
/// (non-finite floats).
pub fn literal(dialect: Dialect, value: &RowValues) -> Result<String, CrudError> {
    match value {
        RowValues::Int(i) => Ok(i.to_string()),
        RowValues::Float(f) => {
            if f.is_finite() {
                Ok(f.to_string())
            } else {
                Err(CrudError::MalformedInput(format!(
                    "float value {f} has no SQL literal form"
                )))
            }
        }
        RowValues::Text(s) => Ok(text_literal(dialect, s)),
        RowValues::Bool(b) => Ok(match dialect {
            Dialect::Postgres => {
                if *b {
                    "TRUE".to_string()
                } else {
                    "FALSE".to_string()
                }
            }
            // SQLite stores booleans as 0/1 integers
            Dialect::Sqlite => i64::from(*b).to_string(),
        }),
        RowValues::Timestamp(dt) => Ok(format!("'{}'", dt.format("%F %T%.f"))),
        RowValues::Null => Ok("NULL".to_string()),
        RowValues::JSON(json) => Ok(text_literal(dialect, &json.to_string())),
        RowValues::Blob(bytes) => Ok(match dialect {
            Dialect::Sqlite => format!("X'{}'", hex(bytes)),
            Dialect::Postgres => format!("'\\x{}'", hex(bytes)),
        }),
    }
}

/// Render every value of a record as an inline literal, preserving order.
///
/// # Errors
///
/// Propagates [`literal`] errors.
pub fn prepare_record(
    dialect: Dialect,
    record: &Record,
) -> Result<Vec<(String, String)>, CrudError> {
    record
        .iter()
        .map(|(column, value)| Ok((column.to_string(), literal(dialect, value)?)))
        .collect()
}

/// Substitute every numbered placeholder in `sql` with the matching
/// parameter rendered as an inline literal. Placeholders inside string
/// literals and comments are left untouched.
///
/// # Errors
///
/// Returns `CrudError::ParameterError` if a placeholder's index has no
/// matching parameter, or propagates [`literal`] errors.
pub fn inline_sql(dialect: Dialect, sql: &str, params: &[RowValues]) -> Result<String, CrudError> {
    let sites = scan_placeholders(sql, dialect.style());
    if sites.is_empty() {
        return Ok(sql.to_string());
    }

    let mut out = String::with_capacity(sql.len());
    let mut last = 0;
    for site in sites {
        let value = params.get(site.index.wrapping_sub(1)).ok_or_else(|| {
            CrudError::ParameterError(format!(
                "placeholder {} has no matching parameter ({} supplied)",
                site.index,
                params.len()
            ))
        })?;
        out.push_str(&sql[last..site.start]);
        out.push_str(&literal(dialect, value)?);
        last = site.end;
    }
    out.push_str(&sql[last..]);
    Ok(out)
}
