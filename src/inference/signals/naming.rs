//! Name-similarity signal.
//!
//! Rules are checked in priority order and the first one that fires
//! determines the score:
//!
//! | Rule                | Score                        |
//! |---------------------|------------------------------|
//! | both primary keys   | 0.0                          |
//! | both generic        | 0.1                          |
//! | exact token match   | 1.0                          |
//! | foreign-key template| 0.9                          |
//! | base-word subset    | 0.8                          |
//! | related words       | 0.7 × related fraction       |

use std::collections::BTreeSet;

use serde::Serialize;

use crate::inference::thresholds;
use crate::inference::tokenizer::NameTokens;
use crate::inference::vocabulary::Vocabulary;

use super::classifier::WordRelatedness;
use super::inflection::singularize;

/// Which naming rule produced the name score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NameRule {
    /// Both columns are primary keys of their tables.
    PrimaryKeyConflict,
    /// Both names are generic (`name`, `status`), identical or not.
    GenericPair,
    ExactMatch,
    /// Source column is named after the target table (`patient_id`, `id_paciente`).
    ForeignKeyTemplate,
    BaseWordSubset,
    RelatedWords,
    NoMatch,
}

impl NameRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PrimaryKeyConflict => "primary_key_conflict",
            Self::GenericPair => "generic_pair",
            Self::ExactMatch => "exact_match",
            Self::ForeignKeyTemplate => "foreign_key_template",
            Self::BaseWordSubset => "base_word_subset",
            Self::RelatedWords => "related_words",
            Self::NoMatch => "no_match",
        }
    }
}

/// One side of a name comparison.
#[derive(Debug, Clone, Copy)]
pub struct NameSide<'a> {
    pub column: &'a NameTokens,
    pub table: &'a NameTokens,
    pub is_primary_key: bool,
}

/// Result of comparing two column names.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NameSimilarity {
    pub score: f64,
    pub rule: NameRule,
}

impl NameSimilarity {
    pub fn compare(
        source: NameSide<'_>,
        target: NameSide<'_>,
        vocabulary: &Vocabulary,
        relatedness: &dyn WordRelatedness,
    ) -> Self {
        if source.is_primary_key && target.is_primary_key {
            return Self::new(0.0, NameRule::PrimaryKeyConflict);
        }

        if vocabulary.is_generic_column(&source.column.tokens)
            && vocabulary.is_generic_column(&target.column.tokens)
        {
            return Self::new(thresholds::name::GENERIC_PAIR, NameRule::GenericPair);
        }

        if !source.column.tokens.is_empty() && source.column.tokens == target.column.tokens {
            return Self::new(thresholds::name::EXACT, NameRule::ExactMatch);
        }

        if (target.is_primary_key || target.column.has_identifier_marker)
            && matches_fk_template(source.column, target.table, vocabulary)
        {
            return Self::new(thresholds::name::FK_TEMPLATE, NameRule::ForeignKeyTemplate);
        }

        let source_words = singular_words(&source.column.base_words);
        let target_words = singular_words(&target.column.base_words);
        if source_words.is_empty() || target_words.is_empty() {
            return Self::new(0.0, NameRule::NoMatch);
        }

        if source_words.is_subset(&target_words) || target_words.is_subset(&source_words) {
            return Self::new(thresholds::name::BASE_WORD_SUBSET, NameRule::BaseWordSubset);
        }

        let fraction = related_fraction(&source_words, &target_words, relatedness);
        if fraction > 0.0 {
            Self::new(
                fraction * thresholds::name::RELATED_WORDS_SCALE,
                NameRule::RelatedWords,
            )
        } else {
            Self::new(0.0, NameRule::NoMatch)
        }
    }

    fn new(score: f64, rule: NameRule) -> Self {
        Self { score, rule }
    }
}

/// Does `column` follow the foreign-key template toward `table`?
///
/// Accepted forms, with an optional leading `fk` token:
/// `<table><suffix>` and `<suffix><table>` as separate tokens
/// (`patient_id`, `PatientUID`, `id_paciente`) or as one concatenated token
/// (`pacienteid`), where `<table>` is the table name as written or with its
/// last word singularized. `fk_<table>` alone also matches.
pub fn matches_fk_template(column: &NameTokens, table: &NameTokens, vocabulary: &Vocabulary) -> bool {
    let mut tokens: &[String] = &column.tokens;
    let mut has_fk_prefix = false;
    if tokens.len() > 1 && tokens[0] == "fk" {
        tokens = &tokens[1..];
        has_fk_prefix = true;
    }
    if tokens.is_empty() {
        return false;
    }

    for form in table_forms(table) {
        if has_fk_prefix && tokens == form.as_slice() {
            return true;
        }

        let n = form.len();
        if tokens.len() == n + 1 {
            if tokens[..n] == form[..] && vocabulary.is_id_suffix(&tokens[n]) {
                return true;
            }
            if vocabulary.is_id_suffix(&tokens[0]) && tokens[1..] == form[..] {
                return true;
            }
        }

        if tokens.len() == 1 {
            let joined = form.concat();
            let token = &tokens[0];
            let concatenated = vocabulary.id_suffixes().any(|suffix| {
                token.strip_prefix(joined.as_str()) == Some(suffix)
                    || token.strip_suffix(joined.as_str()) == Some(suffix)
            });
            if concatenated {
                return true;
            }
        }
    }

    false
}

/// The table's token sequence as written and with its last word singularized.
fn table_forms(table: &NameTokens) -> Vec<Vec<String>> {
    let original = table.tokens.clone();
    if original.is_empty() {
        return Vec::new();
    }

    let mut singular = original.clone();
    if let Some(last) = singular.last_mut() {
        *last = singularize(last);
    }

    if singular == original {
        vec![original]
    } else {
        vec![original, singular]
    }
}

fn singular_words(words: &BTreeSet<String>) -> BTreeSet<String> {
    words.iter().map(|w| singularize(w)).collect()
}

/// Dice-style fraction of words on either side related to some word on the other.
fn related_fraction(
    source: &BTreeSet<String>,
    target: &BTreeSet<String>,
    relatedness: &dyn WordRelatedness,
) -> f64 {
    let matched_source = source
        .iter()
        .filter(|s| target.iter().any(|t| relatedness.related(s, t)))
        .count();
    let matched_target = target
        .iter()
        .filter(|t| source.iter().any(|s| relatedness.related(s, t)))
        .count();

    (matched_source + matched_target) as f64 / (source.len() + target.len()) as f64
}
