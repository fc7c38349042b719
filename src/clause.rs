use crate::error::CrudError;
use crate::statement::{Dialect, check_identifier};
use crate::types::RowValues;

/// One predicate of a WHERE clause.
///
/// Column and operator text is embedded verbatim — it is trusted input, the
/// same contract the rest of the builder applies to table names. Values are
/// never embedded; they become bound parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Raw two-token fragment with no bound value, e.g. `deleted_at IS NOT NULL`.
    Unary { column: String, operator: String },
    /// Comparison against a value, e.g. `age > ?`. The value is bound.
    Binary {
        column: String,
        operator: String,
        value: RowValues,
    },
}

impl Predicate {
    pub fn unary(column: impl Into<String>, operator: impl Into<String>) -> Self {
        Predicate::Unary {
            column: column.into(),
            operator: operator.into(),
        }
    }

    pub fn binary(
        column: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<RowValues>,
    ) -> Self {
        Predicate::Binary {
            column: column.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }

    fn check(&self) -> Result<(), CrudError> {
        let (column, operator) = match self {
            Predicate::Unary { column, operator }
            | Predicate::Binary {
                column, operator, ..
            } => (column, operator),
        };
        check_identifier("predicate column", column)?;
        check_identifier("predicate operator", operator)
    }
}

/// Ordered predicate list, implicitly AND-joined in list order.
///
/// No OR, no grouping, no nesting — the clause model is deliberately flat.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhereClause {
    predicates: Vec<Predicate>,
}

impl WhereClause {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn push(&mut self, predicate: Predicate) -> &mut Self {
        self.predicates.push(predicate);
        self
    }

    /// Append a bound comparison predicate.
    #[must_use]
    pub fn and(
        mut self,
        column: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<RowValues>,
    ) -> Self {
        self.predicates.push(Predicate::binary(column, operator, value));
        self
    }

    /// Append a raw two-token predicate (no bound value), e.g.
    /// `.and_raw("deleted_at", "IS NULL")`.
    #[must_use]
    pub fn and_raw(mut self, column: impl Into<String>, operator: impl Into<String>) -> Self {
        self.predicates.push(Predicate::unary(column, operator));
        self
    }

    /// Render the clause as a ` WHERE … AND …` fragment with numbered
    /// placeholders starting at `first_placeholder`, plus the bound
    /// parameters in predicate order.
    ///
    /// An empty clause renders as an empty fragment; callers decide whether
    /// that is acceptable for their statement shape.
    ///
    /// # Errors
    ///
    /// Returns `CrudError::MalformedInput` if any predicate has an empty
    /// column or operator.
    pub fn render(
        &self,
        dialect: Dialect,
        first_placeholder: usize,
    ) -> Result<WhereFragment, CrudError> {
        if self.predicates.is_empty() {
            return Ok(WhereFragment::empty());
        }

        let mut params = Vec::new();
        let mut next = first_placeholder;
        let mut parts = Vec::with_capacity(self.predicates.len());
        for predicate in &self.predicates {
            predicate.check()?;
            match predicate {
                Predicate::Unary { column, operator } => {
                    parts.push(format!("{column} {operator}"));
                }
                Predicate::Binary {
                    column,
                    operator,
                    value,
                } => {
                    parts.push(format!("{column} {operator} {}", dialect.placeholder(next)));
                    next += 1;
                    params.push(value.clone());
                }
            }
        }

        Ok(WhereFragment {
            sql: format!(" WHERE {}", parts.join(" AND ")),
            params,
        })
    }
}

impl FromIterator<Predicate> for WhereClause {
    fn from_iter<T: IntoIterator<Item = Predicate>>(iter: T) -> Self {
        WhereClause {
            predicates: iter.into_iter().collect(),
        }
    }
}

/// A rendered WHERE fragment: SQL text (beginning with ` WHERE`, or empty)
/// and the parameters bound by its placeholders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhereFragment {
    pub sql: String,
    pub params: Vec<RowValues>,
}

impl WhereFragment {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}
