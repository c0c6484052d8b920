//! Input tables.

use std::collections::HashSet;

use crate::inference::{InferenceError, InferenceResult};

use super::{TypeClass, Value};

/// A named column of row values.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column identifier as it appears in the source.
    pub name: String,
    /// Type class reported by the loader, if it knows one.
    pub declared_type: Option<TypeClass>,
    /// Row values in table order.
    pub values: Vec<Value>,
}

impl Column {
    /// Create a column whose type class will be inferred from its values.
    pub fn new<V: Into<Value>>(name: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Self {
            name: name.into(),
            declared_type: None,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Set the declared type class.
    pub fn with_type(mut self, type_class: TypeClass) -> Self {
        self.declared_type = Some(type_class);
        self
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A named, column-oriented table.
///
/// Construction validates the table's structure; once built it is never
/// mutated during an analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
}

impl Table {
    /// Build a table, rejecting structurally invalid input.
    ///
    /// A table with no columns or no rows is *valid* here; the engine skips
    /// and reports it instead of failing.
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> InferenceResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(InferenceError::EmptyTableName);
        }

        let mut seen = HashSet::new();
        for column in &columns {
            if column.name.trim().is_empty() {
                return Err(InferenceError::EmptyColumnName { table: name });
            }
            if !seen.insert(column.name.as_str()) {
                return Err(InferenceError::DuplicateColumn {
                    table: name.clone(),
                    column: column.name.clone(),
                });
            }
        }

        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(ragged) = columns.iter().find(|c| c.len() != expected) {
                return Err(InferenceError::RaggedColumn {
                    table: name.clone(),
                    column: ragged.name.clone(),
                    expected,
                    found: ragged.len(),
                });
            }
        }

        Ok(Self { name, columns })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by exact name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Number of rows (zero for a table without columns).
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }
}
