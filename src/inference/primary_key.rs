//! Primary-key detection.
//!
//! Detection is strictly per table. A column qualifies only if every row
//! holds a distinct non-null value; qualifying columns are then ranked by how
//! strongly their name marks them as the table's key.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::profiler::{ColumnProfile, TableProfile};
use super::signals::inflection::singularize;
use super::signals::naming::matches_fk_template;
use super::thresholds;
use super::tokenizer::NameTokens;
use super::vocabulary::Vocabulary;

/// How strongly a column name marks it as a key, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyNameTier {
    /// `id`, `uuid`, `pk`, ...
    ExactGeneric,
    /// Names the table plus an identifier token (`patient_id` in `patients`).
    TableName,
    /// Carries an identifier token without naming the table.
    Keyword,
    NumericUnnamed,
    Unnamed,
}

impl KeyNameTier {
    pub fn score(&self) -> f64 {
        match self {
            Self::ExactGeneric => thresholds::primary_key::EXACT_GENERIC,
            Self::TableName => thresholds::primary_key::TABLE_NAME,
            Self::Keyword => thresholds::primary_key::KEYWORD,
            Self::NumericUnnamed => thresholds::primary_key::NUMERIC_UNNAMED,
            Self::Unnamed => thresholds::primary_key::UNNAMED,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExactGeneric => "exact_generic",
            Self::TableName => "table_name",
            Self::Keyword => "keyword",
            Self::NumericUnnamed => "numeric_unnamed",
            Self::Unnamed => "unnamed",
        }
    }
}

impl fmt::Display for KeyNameTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The key selected for a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectedPrimaryKey {
    pub table: String,
    pub column: String,
    pub confidence: f64,
    pub tier: KeyNameTier,
}

#[derive(Debug, Clone, Copy)]
pub struct PrimaryKeyDetector<'a> {
    vocabulary: &'a Vocabulary,
}

impl<'a> PrimaryKeyDetector<'a> {
    pub fn new(vocabulary: &'a Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Name tier of a column that passed the structural gate, or `None`.
    pub fn evaluate(&self, column: &ColumnProfile, table: &NameTokens) -> Option<KeyNameTier> {
        if !column.is_unique_and_complete() {
            return None;
        }
        Some(self.name_tier(column, table))
    }

    /// Confidence for a column: (uniqueness + completeness + name tier) / 3.
    pub fn confidence(tier: KeyNameTier) -> f64 {
        (1.0 + 1.0 + tier.score()) / 3.0
    }

    /// Score every column, mark at most one as the key and record it on the table.
    ///
    /// The best name tier wins; ties go to the earliest declared column.
    pub fn detect(&self, table: &mut TableProfile) -> Option<DetectedPrimaryKey> {
        let mut best: Option<(KeyNameTier, usize)> = None;

        for (index, column) in table.columns.iter_mut().enumerate() {
            column.is_primary_key = false;
            column.pk_score = 0.0;

            if let Some(tier) = self.evaluate(column, &table.tokens) {
                column.pk_score = Self::confidence(tier);
                if best.map_or(true, |(best_tier, _)| tier < best_tier) {
                    best = Some((tier, index));
                }
            }
        }

        let detected = best.map(|(tier, index)| {
            let column = &mut table.columns[index];
            column.is_primary_key = true;
            DetectedPrimaryKey {
                table: table.name.clone(),
                column: column.name.clone(),
                confidence: column.pk_score,
                tier,
            }
        });

        match &detected {
            Some(pk) => debug!(
                table = %table.name,
                column = %pk.column,
                tier = %pk.tier,
                confidence = pk.confidence,
                "detected primary key"
            ),
            None => debug!(table = %table.name, "no primary key candidate"),
        }

        table.primary_key = detected.clone();
        detected
    }

    fn name_tier(&self, column: &ColumnProfile, table: &NameTokens) -> KeyNameTier {
        let tokens = &column.tokens;

        if tokens.tokens.len() == 1 && self.vocabulary.is_pk_name(&tokens.tokens[0]) {
            return KeyNameTier::ExactGeneric;
        }

        if self.names_table(tokens, table) {
            return KeyNameTier::TableName;
        }

        if tokens.has_identifier_marker || self.ends_with_identifier(tokens) {
            return KeyNameTier::Keyword;
        }

        if column.type_class.is_numeric() {
            KeyNameTier::NumericUnnamed
        } else {
            KeyNameTier::Unnamed
        }
    }

    fn names_table(&self, column: &NameTokens, table: &NameTokens) -> bool {
        if matches_fk_template(column, table, self.vocabulary) {
            return true;
        }
        if !column.has_identifier_marker || table.base_words.is_empty() {
            return false;
        }

        let column_words: Vec<String> = column.base_words.iter().map(|w| singularize(w)).collect();
        table
            .base_words
            .iter()
            .map(|w| singularize(w))
            .all(|w| column_words.contains(&w))
    }

    /// `clienteid`-style names glued to an identifier token.
    fn ends_with_identifier(&self, tokens: &NameTokens) -> bool {
        let joined = tokens.joined();
        self.vocabulary
            .id_suffixes()
            .filter(|suffix| suffix.chars().count() >= 2)
            .any(|suffix| joined.len() > suffix.len() && joined.ends_with(suffix))
    }
}
