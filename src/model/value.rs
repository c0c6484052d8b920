//! Cell values as delivered by a dataset loader.

use serde::{Deserialize, Serialize};

use super::TypeClass;

/// A single cell.
///
/// Deserializes from plain JSON scalars: `null`, booleans, integers,
/// floats and strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// Largest integer magnitude an `f64` represents exactly.
const F64_EXACT_INT: f64 = 9_007_199_254_740_992.0;

impl Value {
    /// Is this cell missing?
    ///
    /// Empty strings and NaN count as missing, matching how tabular
    /// loaders read blank cells.
    pub fn is_null(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            Self::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Canonical string used for sampling, distinct counting and overlap.
    ///
    /// Integral floats render like integers so that `1` and `1.0` compare
    /// equal across tables that disagree on storage type.
    pub fn sample_key(&self) -> Option<String> {
        if self.is_null() {
            return None;
        }
        let key = match self {
            Self::Null => return None,
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => {
                if f.is_finite() && f.fract() == 0.0 && f.abs() < F64_EXACT_INT {
                    (*f as i64).to_string()
                } else {
                    ryu::Buffer::new().format(*f).to_string()
                }
            }
            Self::Text(s) => s.clone(),
        };
        Some(key)
    }

    /// The type class this single value suggests.
    pub fn type_class(&self) -> Option<TypeClass> {
        match self {
            _ if self.is_null() => None,
            Self::Bool(_) => Some(TypeClass::Boolean),
            Self::Int(_) => Some(TypeClass::Integer),
            Self::Float(_) => Some(TypeClass::Float),
            Self::Text(_) => Some(TypeClass::Text),
            Self::Null => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
