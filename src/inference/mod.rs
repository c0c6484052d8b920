//! Relationship inference between undocumented tables.
//!
//! Columns are profiled per table, primary keys are detected per table, and
//! every column pair across distinct tables is scored from four signals:
//! name similarity, type compatibility, sampled-value overlap and value shape.
//!
//! # Example
//!
//! ```
//! use schemalink::inference::InferenceEngine;
//! use schemalink::model::{Column, Table};
//!
//! let patients = Table::new(
//!     "patients",
//!     vec![Column::new("id", [1, 2, 3]), Column::new("name", ["Ana", "Luis", "Eva"])],
//! )
//! .unwrap();
//! let pets = Table::new(
//!     "pets",
//!     vec![Column::new("id", [10, 11]), Column::new("patient_id", [1, 3])],
//! )
//! .unwrap();
//!
//! let report = InferenceEngine::default().infer(&[patients, pets]).unwrap();
//! let best = &report.candidates[0];
//! assert_eq!(best.to_string(), "pets.patient_id -> patients.id (confidence 1.00)");
//! ```

mod config;
mod engine;
mod error;
mod primary_key;
mod profiler;
mod scoring;
pub mod signals;
mod tokenizer;
mod vocabulary;

use std::fmt;

use serde::Serialize;

pub use config::{ConfigError, InferenceConfig, InferenceConfigBuilder, OverlapTiers, ScoreWeights};
pub use engine::{
    CandidateGenerator, InferenceEngine, InferenceReport, ProfiledSchema, SkipReason, SkippedTable,
};
pub use error::{InferenceError, InferenceResult};
pub use primary_key::{DetectedPrimaryKey, KeyNameTier, PrimaryKeyDetector};
pub use profiler::{ColumnProfile, ColumnProfiler, NumericSummary, TableProfile};
pub use scoring::{AdjustmentKind, Evidence, EvidenceNote, RelationshipScorer, ScoreAdjustment};
pub use signals::classifier::{
    LexicalRelatedness, RegexShapeClassifier, ShapeClassifier, WordRelatedness,
};
pub use signals::naming::NameRule;
pub use tokenizer::{split_identifier, NameTokenizer, NameTokens};
pub use vocabulary::{Domain, Vocabulary};

/// Default weights, tiers and adjustment magnitudes.
///
/// These seed [`InferenceConfig::default`]; every value here can be
/// overridden through [`InferenceConfigBuilder`].
pub mod thresholds {
    /// Weights of the four sub-scores. They sum to 1.0.
    pub mod weights {
        pub const NAME: f64 = 0.30;
        pub const TYPE: f64 = 0.10;
        pub const OVERLAP: f64 = 0.50;
        pub const PATTERN: f64 = 0.10;
    }

    /// Value-overlap tier boundaries and the score each tier maps to.
    pub mod overlap {
        pub const HIGH: f64 = 0.80;
        pub const MEDIUM: f64 = 0.50;
        pub const LOW: f64 = 0.20;

        pub const HIGH_SCORE: f64 = 1.0;
        pub const MEDIUM_SCORE: f64 = 0.8;
        pub const LOW_SCORE: f64 = 0.5;
    }

    /// Name-similarity rule scores.
    pub mod name {
        /// Identical token sequences.
        pub const EXACT: f64 = 1.0;
        /// Both names are generic (`name`, `status`, ...).
        pub const GENERIC_PAIR: f64 = 0.1;
        /// `<table>_id` style reference to the target table.
        pub const FK_TEMPLATE: f64 = 0.9;
        /// One side's base words contain the other's.
        pub const BASE_WORD_SUBSET: f64 = 0.8;
        /// Scale applied to the fraction of related base words.
        pub const RELATED_WORDS_SCALE: f64 = 0.7;
        /// Minimum normalized Levenshtein similarity for related words.
        pub const LEXICAL_SIMILARITY: f64 = 0.85;
        /// Minimum length for one word to count as containing another.
        pub const MIN_CONTAINMENT_LEN: usize = 3;
    }

    /// Type-compatibility scores.
    pub mod type_compat {
        pub const IDENTICAL: f64 = 1.0;
        pub const COMPATIBLE: f64 = 0.8;
    }

    /// Value-shape scores.
    pub mod pattern {
        pub const IDENTICAL: f64 = 1.0;
        pub const ADJACENT: f64 = 0.7;
    }

    /// Signed adjustments applied after the weighted sum.
    pub mod adjustment {
        /// Subtracted when both columns are primary keys of distinct tables.
        pub const PK_PAIR_PENALTY: f64 = 0.5;
        /// Added for a non-key column that follows the FK template toward a key.
        pub const FK_TEMPLATE_BONUS: f64 = 0.2;
    }

    pub mod confidence {
        /// Candidates must score strictly above this.
        pub const MIN_CONFIDENCE: f64 = 0.30;
    }

    pub mod sampling {
        pub const DEFAULT_SAMPLE_SIZE: usize = 15;
    }

    /// Primary-key name tier scores, best first.
    pub mod primary_key {
        pub const EXACT_GENERIC: f64 = 1.0;
        pub const TABLE_NAME: f64 = 0.95;
        pub const KEYWORD: f64 = 0.70;
        pub const NUMERIC_UNNAMED: f64 = 0.40;
        pub const UNNAMED: f64 = 0.20;
    }
}

/// A suggested relationship from one column to another.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationshipCandidate {
    pub source_table: String,
    pub source_column: String,
    pub target_table: String,
    pub target_column: String,
    /// Final score, clamped to [0, 1].
    pub confidence: f64,
    pub evidence: Evidence,
}

impl RelationshipCandidate {
    /// Key used to break confidence ties deterministically.
    pub(crate) fn sort_key(&self) -> (&str, &str, &str, &str) {
        (
            &self.source_table,
            &self.source_column,
            &self.target_table,
            &self.target_column,
        )
    }

    /// Does `other` describe the same column pair in the opposite direction?
    pub fn is_mirror_of(&self, other: &RelationshipCandidate) -> bool {
        self.source_table == other.target_table
            && self.source_column == other.target_column
            && self.target_table == other.source_table
            && self.target_column == other.source_column
    }
}

impl fmt::Display for RelationshipCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} -> {}.{} (confidence {:.2})",
            self.source_table,
            self.source_column,
            self.target_table,
            self.target_column,
            self.confidence
        )
    }
}
