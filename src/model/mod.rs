//! Input data model: tables, columns, cell values and type classes.

mod dataset;
mod table;
mod types;
mod value;

pub use dataset::{load_dataset, parse_dataset, DatasetError};
pub use table::{Column, Table};
pub use types::{ParseTypeClassError, TypeClass, ValueShape};
pub use value::Value;
