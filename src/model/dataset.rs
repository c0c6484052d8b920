//! JSON dataset loader.
//!
//! A thin adapter used by the CLI; the inference core itself never performs
//! I/O. The expected document shape is:
//!
//! ```json
//! {
//!   "tables": [
//!     {
//!       "name": "patients",
//!       "columns": [
//!         { "name": "id", "type": "integer", "values": [1, 2, 3] },
//!         { "name": "name", "values": ["Ana", "Luis", null] }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::inference::InferenceError;

use super::{Column, Table, TypeClass, Value};

/// Error type for dataset loading.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Dataset file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read dataset: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse dataset: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Unknown type '{type_name}' for column {table}.{column}")]
    UnknownType {
        table: String,
        column: String,
        type_name: String,
    },

    #[error("Invalid table: {0}")]
    InvalidTable(#[from] InferenceError),
}

#[derive(Debug, Deserialize)]
struct DatasetDocument {
    tables: Vec<TableDocument>,
}

#[derive(Debug, Deserialize)]
struct TableDocument {
    name: String,
    #[serde(default)]
    columns: Vec<ColumnDocument>,
}

#[derive(Debug, Deserialize)]
struct ColumnDocument {
    name: String,
    #[serde(default, rename = "type")]
    type_name: Option<String>,
    #[serde(default)]
    values: Vec<Value>,
}

/// Parse a dataset document from a JSON string.
pub fn parse_dataset(json: &str) -> Result<Vec<Table>, DatasetError> {
    let document: DatasetDocument = serde_json::from_str(json)?;

    document
        .tables
        .into_iter()
        .map(|table| {
            let columns = table
                .columns
                .into_iter()
                .map(|column| {
                    let declared_type = match column.type_name {
                        Some(type_name) => Some(type_name.parse::<TypeClass>().map_err(|_| {
                            DatasetError::UnknownType {
                                table: table.name.clone(),
                                column: column.name.clone(),
                                type_name: type_name.clone(),
                            }
                        })?),
                        None => None,
                    };
                    Ok(Column {
                        name: column.name,
                        declared_type,
                        values: column.values,
                    })
                })
                .collect::<Result<Vec<_>, DatasetError>>()?;
            Ok(Table::new(table.name, columns)?)
        })
        .collect()
}

/// Load a dataset document from a file.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Vec<Table>, DatasetError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DatasetError::FileNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    parse_dataset(&content)
}
