//! Sampled-value overlap signal.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::inference::config::OverlapTiers;

/// Overlap between a source sample and a target sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueOverlap {
    /// |S ∩ T| / |S|, or 0.0 for an empty source sample.
    pub ratio: f64,
    /// Tiered score derived from `ratio`.
    pub score: f64,
    pub source_empty: bool,
    pub target_empty: bool,
}

impl ValueOverlap {
    pub fn measure(source: &BTreeSet<String>, target: &BTreeSet<String>, tiers: &OverlapTiers) -> Self {
        let source_empty = source.is_empty();
        let target_empty = target.is_empty();

        if source_empty || target_empty {
            return Self {
                ratio: 0.0,
                score: 0.0,
                source_empty,
                target_empty,
            };
        }

        let shared = source.intersection(target).count();
        let ratio = shared as f64 / source.len() as f64;

        Self {
            ratio,
            score: tiers.score(ratio),
            source_empty,
            target_empty,
        }
    }
}
