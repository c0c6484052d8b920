//! Type compatibility signal.

use serde::Serialize;

use crate::inference::thresholds;
use crate::model::TypeClass;

/// Result of a type compatibility check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TypeCompatibility {
    /// Compatibility score (0.0 to 1.0).
    pub score: f64,
    /// Both sides have the same type class.
    pub is_exact: bool,
}

impl TypeCompatibility {
    /// Check compatibility between two type classes.
    ///
    /// Identical classes score 1.0. Integer and float are compatible, as are
    /// text and unknown (0.8). Everything else scores 0.0.
    pub fn check(source: TypeClass, target: TypeClass) -> Self {
        if source == target {
            return Self {
                score: thresholds::type_compat::IDENTICAL,
                is_exact: true,
            };
        }

        let compatible = (source.is_numeric() && target.is_numeric())
            || (source.is_textual() && target.is_textual());

        Self {
            score: if compatible {
                thresholds::type_compat::COMPATIBLE
            } else {
                0.0
            },
            is_exact: false,
        }
    }
}
