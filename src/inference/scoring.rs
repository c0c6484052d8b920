//! Confidence scoring for a single column pair.
//!
//! The four sub-scores are combined with the configured weights, then the
//! primary-key pair penalty and the foreign-key template bonus are applied
//! and the result is clamped to [0, 1].

use std::fmt;

use serde::Serialize;

use super::config::InferenceConfig;
use super::profiler::{ColumnProfile, TableProfile};
use super::signals::classifier::WordRelatedness;
use super::signals::naming::{matches_fk_template, NameRule, NameSide, NameSimilarity};
use super::signals::pattern::pattern_score;
use super::signals::statistics::ValueOverlap;
use super::signals::types::TypeCompatibility;
use super::RelationshipCandidate;

/// Kind of post-sum adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    /// Both columns are primary keys of their tables.
    PrimaryKeyPair,
    /// A non-key column named after the table whose key it targets.
    ForeignKeyTemplate,
}

impl AdjustmentKind {
    pub fn reason(&self) -> &'static str {
        match self {
            Self::PrimaryKeyPair => "both columns are primary keys",
            Self::ForeignKeyTemplate => "classic foreign key to primary key",
        }
    }
}

/// A single adjustment to the confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreAdjustment {
    pub kind: AdjustmentKind,
    /// Amount added (or subtracted if negative)
    pub delta: f64,
}

/// Caveats attached to a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceNote {
    /// The source column has no non-null values to compare.
    EmptySourceSample,
    /// The target column has no non-null values to compare.
    EmptyTargetSample,
}

impl fmt::Display for EvidenceNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySourceSample => write!(f, "insufficient data: source sample is empty"),
            Self::EmptyTargetSample => write!(f, "insufficient data: target sample is empty"),
        }
    }
}

/// Breakdown of how a confidence score was reached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evidence {
    pub name: f64,
    pub name_rule: NameRule,
    pub type_compatibility: f64,
    pub value_overlap: f64,
    /// Raw |S ∩ T| / |S| before tiering.
    pub overlap_ratio: f64,
    pub pattern: f64,
    /// Weighted sum before adjustments and clamping.
    pub weighted_sum: f64,
    pub adjustments: Vec<ScoreAdjustment>,
    pub notes: Vec<EvidenceNote>,
}

impl Evidence {
    /// Sum of all adjustment deltas.
    pub fn adjustment_total(&self) -> f64 {
        self.adjustments.iter().map(|a| a.delta).sum()
    }

    /// One-line human-readable breakdown.
    pub fn summary(&self) -> String {
        let mut parts = vec![
            format!("name {:.2} ({})", self.name, self.name_rule.as_str()),
            format!("type {:.2}", self.type_compatibility),
            format!(
                "overlap {:.2} (ratio {:.2})",
                self.value_overlap, self.overlap_ratio
            ),
            format!("pattern {:.2}", self.pattern),
        ];
        for adjustment in &self.adjustments {
            parts.push(format!("{} {:+.2}", adjustment.kind.reason(), adjustment.delta));
        }
        for note in &self.notes {
            parts.push(note.to_string());
        }
        parts.join(", ")
    }
}

/// Scores one (source column, target column) pair.
#[derive(Debug, Clone, Copy)]
pub struct RelationshipScorer<'a> {
    config: &'a InferenceConfig,
    relatedness: &'a dyn WordRelatedness,
}

impl<'a> RelationshipScorer<'a> {
    pub fn new(config: &'a InferenceConfig, relatedness: &'a dyn WordRelatedness) -> Self {
        Self {
            config,
            relatedness,
        }
    }

    /// Score a pair. The candidate is returned regardless of the threshold.
    pub fn score(
        &self,
        source_table: &TableProfile,
        source: &ColumnProfile,
        target_table: &TableProfile,
        target: &ColumnProfile,
    ) -> RelationshipCandidate {
        let vocabulary = self.config.vocabulary();
        let weights = self.config.weights();

        let name = NameSimilarity::compare(
            NameSide {
                column: &source.tokens,
                table: &source_table.tokens,
                is_primary_key: source.is_primary_key,
            },
            NameSide {
                column: &target.tokens,
                table: &target_table.tokens,
                is_primary_key: target.is_primary_key,
            },
            vocabulary,
            self.relatedness,
        );
        let types = TypeCompatibility::check(source.type_class, target.type_class);
        let overlap = ValueOverlap::measure(&source.sample, &target.sample, self.config.overlap_tiers());
        let pattern = pattern_score(source.dominant_shape, target.dominant_shape);

        let weighted_sum = name.score * weights.name
            + types.score * weights.type_compatibility
            + overlap.score * weights.value_overlap
            + pattern * weights.pattern;

        let mut adjustments = Vec::new();
        if source.is_primary_key && target.is_primary_key {
            adjustments.push(ScoreAdjustment {
                kind: AdjustmentKind::PrimaryKeyPair,
                delta: -self.config.pk_pair_penalty(),
            });
        } else if target.is_primary_key
            && matches_fk_template(&source.tokens, &target_table.tokens, vocabulary)
        {
            adjustments.push(ScoreAdjustment {
                kind: AdjustmentKind::ForeignKeyTemplate,
                delta: self.config.fk_template_bonus(),
            });
        }

        let mut notes = Vec::new();
        if overlap.source_empty {
            notes.push(EvidenceNote::EmptySourceSample);
        }
        if overlap.target_empty {
            notes.push(EvidenceNote::EmptyTargetSample);
        }

        let evidence = Evidence {
            name: name.score,
            name_rule: name.rule,
            type_compatibility: types.score,
            value_overlap: overlap.score,
            overlap_ratio: overlap.ratio,
            pattern,
            weighted_sum,
            adjustments,
            notes,
        };

        let confidence = (weighted_sum + evidence.adjustment_total()).clamp(0.0, 1.0);

        RelationshipCandidate {
            source_table: source_table.name.clone(),
            source_column: source.name.clone(),
            target_table: target_table.name.clone(),
            target_column: target.name.clone(),
            confidence,
            evidence,
        }
    }
}
