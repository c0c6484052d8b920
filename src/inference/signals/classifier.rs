//! Pluggable classifiers used by profiling and name scoring.

use std::fmt::Debug;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::inference::thresholds;
use crate::inference::vocabulary::Vocabulary;
use crate::model::ValueShape;

use super::inflection::singularize;

/// Assigns a value-shape class to a sampled value.
pub trait ShapeClassifier: Send + Sync + Debug {
    fn classify(&self, value: &str) -> ValueShape;
}

/// Decides whether two lowercase words refer to the same concept.
pub trait WordRelatedness: Send + Sync + Debug {
    fn related(&self, a: &str, b: &str) -> bool;
}

static NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d+(\.\d+)?([eE][+-]?\d+)?$").expect("valid regex"));

static UUID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-?[0-9a-fA-F]{4}-?[0-9a-fA-F]{4}-?[0-9a-fA-F]{4}-?[0-9a-fA-F]{12}$")
        .expect("valid regex")
});

static DELIMITED_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\d]+([-_./][\p{L}\d]+)*$").expect("valid regex"));

static UPPER_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{2,6}$").expect("valid regex"));

/// Regex-based shape classifier.
///
/// - numeric: optional sign, digits, optional fraction and exponent
/// - UUID: 32 hex digits, dashed or not
/// - code: alphanumeric segments joined by `-_./` containing both a letter
///   and a digit (`P-001`, `AB12`), or a short all-caps mnemonic (`USD`)
/// - text: everything else
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexShapeClassifier;

impl ShapeClassifier for RegexShapeClassifier {
    fn classify(&self, value: &str) -> ValueShape {
        let value = value.trim();
        if NUMERIC.is_match(value) {
            ValueShape::Numeric
        } else if UUID.is_match(value) {
            ValueShape::Uuid
        } else if is_code(value) {
            ValueShape::Code
        } else {
            ValueShape::Text
        }
    }
}

fn is_code(value: &str) -> bool {
    if UPPER_CODE.is_match(value) {
        return true;
    }
    DELIMITED_CODE.is_match(value)
        && value.chars().any(|c| c.is_numeric())
        && value.chars().any(|c| c.is_alphabetic())
}

/// Word relatedness from spelling and a synonym vocabulary.
///
/// Two words are related when they are equal, one contains the other (the
/// shorter has at least three characters), they share a singular form, their
/// normalized Levenshtein similarity reaches the threshold, or the vocabulary
/// lists them under the same concept.
#[derive(Debug, Clone)]
pub struct LexicalRelatedness {
    vocabulary: Vocabulary,
    threshold: f64,
}

impl LexicalRelatedness {
    pub fn new(vocabulary: Vocabulary, threshold: f64) -> Self {
        Self {
            vocabulary,
            threshold,
        }
    }
}

impl WordRelatedness for LexicalRelatedness {
    fn related(&self, a: &str, b: &str) -> bool {
        if a.is_empty() || b.is_empty() {
            return false;
        }
        if a == b {
            return true;
        }

        let (shorter, longer) = if a.chars().count() <= b.chars().count() {
            (a, b)
        } else {
            (b, a)
        };
        if shorter.chars().count() >= thresholds::name::MIN_CONTAINMENT_LEN
            && longer.contains(shorter)
        {
            return true;
        }

        let (singular_a, singular_b) = (singularize(a), singularize(b));
        if singular_a == singular_b {
            return true;
        }

        if strsim::normalized_levenshtein(a, b) >= self.threshold {
            return true;
        }

        self.vocabulary.are_synonyms(a, b) || self.vocabulary.are_synonyms(&singular_a, &singular_b)
    }
}
