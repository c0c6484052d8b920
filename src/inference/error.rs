//! Input validation errors.
//!
//! Only structurally invalid input is fatal. Empty tables, missing primary
//! keys and empty samples degrade the result instead of failing it.

/// Result type for inference operations.
pub type InferenceResult<T> = Result<T, InferenceError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InferenceError {
    #[error("table name must not be empty")]
    EmptyTableName,

    #[error("table '{0}' appears more than once in the dataset")]
    DuplicateTable(String),

    #[error("table '{table}' has a column with an empty name")]
    EmptyColumnName { table: String },

    #[error("table '{table}' declares column '{column}' more than once")]
    DuplicateColumn { table: String, column: String },

    #[error("column {table}.{column} has {found} rows, expected {expected}")]
    RaggedColumn {
        table: String,
        column: String,
        expected: usize,
        found: usize,
    },
}
