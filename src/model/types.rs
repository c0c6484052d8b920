//! Column type classes and value-shape classes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Coarse declared type of a column.
///
/// Loaders map their native types onto these classes; the scorer only ever
/// compares classes, never concrete storage types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeClass {
    Integer,
    Float,
    Text,
    Boolean,
    Temporal,
    Unknown,
}

impl TypeClass {
    /// Is this a numeric class (integer or floating point)?
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }

    /// Is this a class whose values are compared as strings?
    ///
    /// `Unknown` columns hold mixed values and are rendered as text.
    pub fn is_textual(&self) -> bool {
        matches!(self, Self::Text | Self::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "text",
            Self::Boolean => "boolean",
            Self::Temporal => "temporal",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TypeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a type name cannot be mapped to a [`TypeClass`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized type name: {0}")]
pub struct ParseTypeClassError(pub String);

impl FromStr for TypeClass {
    type Err = ParseTypeClassError;

    /// Accepts class names as well as common SQL / dataframe type names
    /// (`bigint`, `varchar`, `double`, `timestamp`, `object`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        // Strip length/precision suffixes such as varchar(32) or decimal(10,2)
        let base = lower.split('(').next().unwrap_or_default().trim();

        let class = match base {
            "integer" | "int" | "int8" | "int16" | "int32" | "int64" | "bigint" | "smallint"
            | "tinyint" | "serial" | "bigserial" => Self::Integer,
            "float" | "float32" | "float64" | "double" | "real" | "decimal" | "numeric"
            | "number" => Self::Float,
            "text" | "string" | "str" | "varchar" | "char" | "nvarchar" | "nchar" | "uuid"
            | "object" => Self::Text,
            "boolean" | "bool" | "bit" => Self::Boolean,
            "temporal" | "date" | "datetime" | "datetime64" | "timestamp" | "timestamptz"
            | "time" => Self::Temporal,
            "unknown" | "" => Self::Unknown,
            _ => return Err(ParseTypeClassError(s.to_string())),
        };
        Ok(class)
    }
}

/// Structural classification of a single value string.
///
/// Variants are declared in tie-break priority order: when two shapes are
/// equally frequent in a sample, the earlier variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueShape {
    /// Digits only, optionally signed or with a decimal part.
    Numeric,
    /// Canonical 8-4-4-4-12 hexadecimal UUID.
    Uuid,
    /// Compact alphanumeric code such as `CLI-001` or `HC042`.
    Code,
    /// Anything else.
    Text,
}

impl ValueShape {
    /// All shapes in priority order.
    pub const ALL: [ValueShape; 4] = [Self::Numeric, Self::Uuid, Self::Code, Self::Text];

    /// Are two distinct shapes close enough to hold the same identifiers?
    ///
    /// Codes frequently embed numbers or UUIDs, so both are adjacent to
    /// `Code`. Free text is adjacent to nothing.
    pub fn is_adjacent(&self, other: &ValueShape) -> bool {
        matches!(
            (self, other),
            (Self::Numeric, Self::Code)
                | (Self::Code, Self::Numeric)
                | (Self::Uuid, Self::Code)
                | (Self::Code, Self::Uuid)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Uuid => "uuid",
            Self::Code => "code",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
