use std::collections::HashMap;
use std::sync::Arc;

use super::row::{DbRow, build_column_index};
use crate::types::RowValues;

/// A normalized result from a database query.
///
/// Always a row sequence — zero, one, or many rows — never a bare row. The
/// column names are stored once and shared by every row.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// The rows returned by the query.
    pub results: Vec<DbRow>,
    /// The number of rows in the set.
    pub rows_affected: usize,
    column_names: Option<Arc<Vec<String>>>,
    column_index: Option<Arc<HashMap<String, usize>>>,
}

impl ResultSet {
    /// Create a result set with preallocated row capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> ResultSet {
        ResultSet {
            results: Vec::with_capacity(capacity),
            rows_affected: 0,
            column_names: None,
            column_index: None,
        }
    }

    /// Set the column names shared by all rows. Also builds the shared
    /// name→index map.
    pub fn set_column_names(&mut self, column_names: Arc<Vec<String>>) {
        self.column_index = Some(Arc::new(build_column_index(&column_names)));
        self.column_names = Some(column_names);
    }

    #[must_use]
    pub fn get_column_names(&self) -> Option<&Arc<Vec<String>>> {
        self.column_names.as_ref()
    }

    /// Add a row of values. Column names must have been set first; a row
    /// added before that is dropped.
    pub fn add_row_values(&mut self, values: Vec<RowValues>) {
        if let (Some(column_names), Some(column_index)) = (&self.column_names, &self.column_index) {
            self.results.push(DbRow {
                column_names: column_names.clone(),
                values,
                column_index: column_index.clone(),
            });
            self.rows_affected += 1;
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&DbRow> {
        self.results.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DbRow> {
        self.results.iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a DbRow;
    type IntoIter = std::slice::Iter<'a, DbRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
