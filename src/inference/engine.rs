//! Inference engine.
//!
//! The engine coordinates a run: validate the input, profile every table and
//! detect its primary key, then score every column pair across ordered pairs
//! of distinct tables and rank what clears the threshold.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::model::Table;

use super::config::InferenceConfig;
use super::error::{InferenceError, InferenceResult};
use super::primary_key::{DetectedPrimaryKey, PrimaryKeyDetector};
use super::profiler::{ColumnProfiler, TableProfile};
use super::scoring::RelationshipScorer;
use super::signals::classifier::{
    LexicalRelatedness, RegexShapeClassifier, ShapeClassifier, WordRelatedness,
};
use super::signals::naming::matches_fk_template;
use super::tokenizer::NameTokenizer;
use super::RelationshipCandidate;

/// Why a table took no part in scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NoColumns,
    NoRows,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoColumns => write!(f, "table has no columns"),
            Self::NoRows => write!(f, "table has no rows"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedTable {
    pub table: String,
    pub reason: SkipReason,
}

/// Profiles of every scorable table, plus the tables that were skipped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfiledSchema {
    pub tables: Vec<TableProfile>,
    pub skipped: Vec<SkippedTable>,
}

impl ProfiledSchema {
    pub fn primary_keys(&self) -> Vec<DetectedPrimaryKey> {
        self.tables
            .iter()
            .filter_map(|t| t.primary_key.clone())
            .collect()
    }
}

/// Result of a full inference run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InferenceReport {
    /// Ranked by descending confidence.
    pub candidates: Vec<RelationshipCandidate>,
    pub primary_keys: Vec<DetectedPrimaryKey>,
    pub skipped: Vec<SkippedTable>,
}

/// Enumerates, scores, filters and ranks column pairs.
#[derive(Debug, Clone, Copy)]
pub struct CandidateGenerator<'a> {
    config: &'a InferenceConfig,
    scorer: RelationshipScorer<'a>,
}

impl<'a> CandidateGenerator<'a> {
    pub fn new(config: &'a InferenceConfig, relatedness: &'a dyn WordRelatedness) -> Self {
        Self {
            config,
            scorer: RelationshipScorer::new(config, relatedness),
        }
    }

    /// Score every column pair of every ordered pair of distinct tables.
    pub fn generate(&self, tables: &[TableProfile]) -> Vec<RelationshipCandidate> {
        let pairs: Vec<(&TableProfile, &TableProfile)> = tables
            .iter()
            .enumerate()
            .flat_map(|(i, source)| {
                tables
                    .iter()
                    .enumerate()
                    .filter(move |(j, _)| i != *j)
                    .map(move |(_, target)| (source, target))
            })
            .collect();

        let mut candidates: Vec<RelationshipCandidate> = if self.config.parallel() {
            pairs
                .par_iter()
                .flat_map_iter(|(source, target)| self.score_table_pair(source, target))
                .collect()
        } else {
            pairs
                .iter()
                .flat_map(|(source, target)| self.score_table_pair(source, target))
                .collect()
        };

        rank(&mut candidates);

        if self.config.dedupe_mirrored() {
            candidates = dedupe_mirrored(candidates);
        }

        info!(
            tables = tables.len(),
            table_pairs = pairs.len(),
            candidates = candidates.len(),
            "generated relationship candidates"
        );

        candidates
    }

    fn score_table_pair(
        &self,
        source_table: &TableProfile,
        target_table: &TableProfile,
    ) -> Vec<RelationshipCandidate> {
        let vocabulary = self.config.vocabulary();
        let mut kept = Vec::new();

        for source in &source_table.columns {
            if self.config.exclude_pk_sources()
                && source.is_primary_key
                && !matches_fk_template(&source.tokens, &target_table.tokens, vocabulary)
            {
                continue;
            }

            for target in &target_table.columns {
                let candidate = self.scorer.score(source_table, source, target_table, target);
                if candidate.confidence > self.config.min_confidence() {
                    kept.push(candidate);
                }
            }
        }

        kept
    }
}

/// Sort by descending confidence, ties by (source table, source column,
/// target table, target column).
fn rank(candidates: &mut [RelationshipCandidate]) {
    candidates.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| a.sort_key().cmp(&b.sort_key()))
    });
}

/// Keep only the first-ranked direction of each mirrored pair.
fn dedupe_mirrored(candidates: Vec<RelationshipCandidate>) -> Vec<RelationshipCandidate> {
    let mut seen: HashSet<(String, String, String, String)> = HashSet::new();
    let mut kept = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let mirror = (
            candidate.target_table.clone(),
            candidate.target_column.clone(),
            candidate.source_table.clone(),
            candidate.source_column.clone(),
        );
        if seen.contains(&mirror) {
            debug!(candidate = %candidate, "dropped mirrored candidate");
            continue;
        }
        seen.insert((
            candidate.source_table.clone(),
            candidate.source_column.clone(),
            candidate.target_table.clone(),
            candidate.target_column.clone(),
        ));
        kept.push(candidate);
    }

    kept
}

/// Entry point for relationship inference.
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    config: InferenceConfig,
    classifier: Arc<dyn ShapeClassifier>,
    relatedness: Arc<dyn WordRelatedness>,
}

impl Default for InferenceEngine {
    fn default() -> Self {
        Self::new(InferenceConfig::default())
    }
}

impl InferenceEngine {
    /// Create an engine with the regex shape classifier and lexical word
    /// relatedness built from the config's vocabulary.
    pub fn new(config: InferenceConfig) -> Self {
        let relatedness = LexicalRelatedness::new(config.vocabulary().clone(), config.lexical_threshold());
        Self {
            config,
            classifier: Arc::new(RegexShapeClassifier),
            relatedness: Arc::new(relatedness),
        }
    }

    pub fn with_shape_classifier(mut self, classifier: Arc<dyn ShapeClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_word_relatedness(mut self, relatedness: Arc<dyn WordRelatedness>) -> Self {
        self.relatedness = relatedness;
        self
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Profile every table and detect its primary key.
    ///
    /// Tables without columns or rows are skipped and reported.
    pub fn profile(&self, tables: &[Table]) -> InferenceResult<ProfiledSchema> {
        validate(tables)?;

        let vocabulary = self.config.vocabulary();
        let profiler = ColumnProfiler::new(
            self.config.sample_size(),
            self.classifier.as_ref(),
            NameTokenizer::new(vocabulary),
        );
        let detector = PrimaryKeyDetector::new(vocabulary);

        let mut skipped = Vec::new();
        let mut scorable = Vec::new();
        for table in tables {
            let reason = if table.columns().is_empty() {
                Some(SkipReason::NoColumns)
            } else if table.row_count() == 0 {
                Some(SkipReason::NoRows)
            } else {
                None
            };

            match reason {
                Some(reason) => {
                    warn!(table = table.name(), %reason, "skipping table");
                    skipped.push(SkippedTable {
                        table: table.name().to_string(),
                        reason,
                    });
                }
                None => scorable.push(table),
            }
        }

        let profile_one = |table: &&Table| {
            let mut profile = profiler.profile_table(table);
            detector.detect(&mut profile);
            profile
        };

        let tables = if self.config.parallel() {
            scorable.par_iter().map(profile_one).collect()
        } else {
            scorable.iter().map(profile_one).collect()
        };

        Ok(ProfiledSchema { tables, skipped })
    }

    /// Score and rank candidates for an already profiled schema.
    pub fn generate(&self, schema: &ProfiledSchema) -> Vec<RelationshipCandidate> {
        CandidateGenerator::new(&self.config, self.relatedness.as_ref()).generate(&schema.tables)
    }

    /// Profile, detect keys, then generate ranked candidates.
    pub fn infer(&self, tables: &[Table]) -> InferenceResult<InferenceReport> {
        let schema = self.profile(tables)?;
        let candidates = self.generate(&schema);
        Ok(InferenceReport {
            candidates,
            primary_keys: schema.primary_keys(),
            skipped: schema.skipped,
        })
    }
}

/// Reject input that cannot be scored at all.
fn validate(tables: &[Table]) -> InferenceResult<()> {
    let mut names = HashSet::new();
    for table in tables {
        if !names.insert(table.name()) {
            return Err(InferenceError::DuplicateTable(table.name().to_string()));
        }
    }
    Ok(())
}
