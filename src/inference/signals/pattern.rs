//! Value-shape similarity signal.

use crate::inference::thresholds;
use crate::model::ValueShape;

/// Score the dominant shapes of two columns.
///
/// Columns without a dominant shape (no sampled values) score 0.0.
pub fn pattern_score(source: Option<ValueShape>, target: Option<ValueShape>) -> f64 {
    match (source, target) {
        (Some(a), Some(b)) if a == b => thresholds::pattern::IDENTICAL,
        (Some(a), Some(b)) if a.is_adjacent(&b) => thresholds::pattern::ADJACENT,
        _ => 0.0,
    }
}
