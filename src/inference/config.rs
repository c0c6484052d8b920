//! Inference configuration and its builder.
//!
//! Every tunable of the engine lives here. An [`InferenceConfig`] can only be
//! produced by [`InferenceConfigBuilder::build`], which validates all values,
//! so a running engine never sees an inconsistent configuration.

use serde::Serialize;

use super::thresholds;
use super::vocabulary::{Domain, Vocabulary};

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("sample size must be a positive integer")]
    ZeroSampleSize,

    #[error("{name} must be within [0, 1], got {value}")]
    OutOfRange { name: &'static str, value: f64 },

    #[error("score weights must sum to 1.0, got {0}")]
    WeightSum(f64),

    #[error("overlap tiers must satisfy 0 <= low <= medium <= high <= 1")]
    TierOrder,

    #[error("overlap.low must not exceed the low-tier score {max}, got {value}")]
    LowTierAboveScore { value: f64, max: f64 },

    #[error("unknown domain preset: {0}")]
    UnknownDomain(String),
}

/// Weights of the four sub-scores in the final weighted sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreWeights {
    pub name: f64,
    pub type_compatibility: f64,
    pub value_overlap: f64,
    pub pattern: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            name: thresholds::weights::NAME,
            type_compatibility: thresholds::weights::TYPE,
            value_overlap: thresholds::weights::OVERLAP,
            pattern: thresholds::weights::PATTERN,
        }
    }
}

impl ScoreWeights {
    fn total(&self) -> f64 {
        self.name + self.type_compatibility + self.value_overlap + self.pattern
    }
}

/// Ratio boundaries for tiering the value-overlap sub-score.
///
/// Ratios below `low` score linearly (the ratio itself), so `low` may not
/// exceed the low-tier score or the score would stop rising with the ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverlapTiers {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl Default for OverlapTiers {
    fn default() -> Self {
        Self {
            high: thresholds::overlap::HIGH,
            medium: thresholds::overlap::MEDIUM,
            low: thresholds::overlap::LOW,
        }
    }
}

impl OverlapTiers {
    /// Map an overlap ratio onto its tiered score.
    pub fn score(&self, ratio: f64) -> f64 {
        if ratio >= self.high {
            thresholds::overlap::HIGH_SCORE
        } else if ratio >= self.medium {
            thresholds::overlap::MEDIUM_SCORE
        } else if ratio >= self.low {
            thresholds::overlap::LOW_SCORE
        } else {
            ratio
        }
    }
}

/// Validated, immutable engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InferenceConfig {
    sample_size: usize,
    min_confidence: f64,
    weights: ScoreWeights,
    overlap_tiers: OverlapTiers,
    lexical_threshold: f64,
    pk_pair_penalty: f64,
    fk_template_bonus: f64,
    exclude_pk_sources: bool,
    dedupe_mirrored: bool,
    parallel: bool,
    vocabulary: Vocabulary,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            sample_size: thresholds::sampling::DEFAULT_SAMPLE_SIZE,
            min_confidence: thresholds::confidence::MIN_CONFIDENCE,
            weights: ScoreWeights::default(),
            overlap_tiers: OverlapTiers::default(),
            lexical_threshold: thresholds::name::LEXICAL_SIMILARITY,
            pk_pair_penalty: thresholds::adjustment::PK_PAIR_PENALTY,
            fk_template_bonus: thresholds::adjustment::FK_TEMPLATE_BONUS,
            exclude_pk_sources: false,
            dedupe_mirrored: false,
            parallel: true,
            vocabulary: Vocabulary::default(),
        }
    }
}

impl InferenceConfig {
    /// Start from the documented defaults.
    pub fn builder() -> InferenceConfigBuilder {
        InferenceConfigBuilder::new()
    }

    /// Maximum number of distinct values sampled per column.
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Candidates must score strictly above this to be retained.
    pub fn min_confidence(&self) -> f64 {
        self.min_confidence
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    pub fn overlap_tiers(&self) -> &OverlapTiers {
        &self.overlap_tiers
    }

    /// Minimum normalized similarity for two words to count as related.
    pub fn lexical_threshold(&self) -> f64 {
        self.lexical_threshold
    }

    /// Magnitude of the penalty applied when both columns are primary keys.
    pub fn pk_pair_penalty(&self) -> f64 {
        self.pk_pair_penalty
    }

    /// Magnitude of the bonus for a classic `<table>_id` foreign key.
    pub fn fk_template_bonus(&self) -> f64 {
        self.fk_template_bonus
    }

    /// Drop primary-key source columns unless they look like foreign keys.
    pub fn exclude_pk_sources(&self) -> bool {
        self.exclude_pk_sources
    }

    /// Keep only the stronger direction of mirrored candidates.
    pub fn dedupe_mirrored(&self) -> bool {
        self.dedupe_mirrored
    }

    /// Profile and score on the rayon thread pool.
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }
}

/// Assembles an [`InferenceConfig`].
///
/// ```
/// use schemalink::inference::{Domain, InferenceConfig};
///
/// let config = InferenceConfig::builder()
///     .sample_size(20)
///     .min_confidence(0.5)
///     .domain(Domain::Medical)
///     .id_suffix("historiaclinica")
///     .synonyms("owner", ["tutor"])
///     .build()
///     .unwrap();
///
/// assert!(config.vocabulary().is_id_suffix("mrn"));
/// ```
#[derive(Debug, Clone)]
pub struct InferenceConfigBuilder {
    config: InferenceConfig,
}

impl Default for InferenceConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InferenceConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: InferenceConfig::default(),
        }
    }

    pub fn sample_size(mut self, sample_size: usize) -> Self {
        self.config.sample_size = sample_size;
        self
    }

    pub fn min_confidence(mut self, min_confidence: f64) -> Self {
        self.config.min_confidence = min_confidence;
        self
    }

    pub fn weights(mut self, weights: ScoreWeights) -> Self {
        self.config.weights = weights;
        self
    }

    pub fn overlap_tiers(mut self, tiers: OverlapTiers) -> Self {
        self.config.overlap_tiers = tiers;
        self
    }

    pub fn lexical_threshold(mut self, threshold: f64) -> Self {
        self.config.lexical_threshold = threshold;
        self
    }

    pub fn pk_pair_penalty(mut self, penalty: f64) -> Self {
        self.config.pk_pair_penalty = penalty.abs();
        self
    }

    pub fn fk_template_bonus(mut self, bonus: f64) -> Self {
        self.config.fk_template_bonus = bonus;
        self
    }

    pub fn exclude_pk_sources(mut self, exclude: bool) -> Self {
        self.config.exclude_pk_sources = exclude;
        self
    }

    pub fn dedupe_mirrored(mut self, dedupe: bool) -> Self {
        self.config.dedupe_mirrored = dedupe;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Replace the whole vocabulary, discarding the defaults.
    pub fn vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.config.vocabulary = vocabulary;
        self
    }

    /// Add a generic identifier token.
    pub fn id_suffix(mut self, token: &str) -> Self {
        self.config.vocabulary.add_id_suffixes([token]);
        self
    }

    pub fn id_suffixes<'a>(mut self, tokens: impl IntoIterator<Item = &'a str>) -> Self {
        self.config.vocabulary.add_id_suffixes(tokens);
        self
    }

    /// Add a bare primary-key name.
    pub fn pk_name(mut self, name: &str) -> Self {
        self.config.vocabulary.add_pk_names([name]);
        self
    }

    /// Add a column name that only scores weakly against other generic names.
    pub fn generic_column(mut self, name: &str) -> Self {
        self.config.vocabulary.add_generic_columns([name]);
        self
    }

    /// Add spellings to a synonym concept, creating the concept if needed.
    pub fn synonyms<'a>(mut self, concept: &str, spellings: impl IntoIterator<Item = &'a str>) -> Self {
        self.config.vocabulary.add_synonyms(concept, spellings);
        self
    }

    /// Merge a domain preset into the vocabulary.
    pub fn domain(mut self, domain: Domain) -> Self {
        self.config
            .vocabulary
            .add_id_suffixes(domain.id_suffixes().iter().copied());
        for (concept, spellings) in domain.synonyms() {
            self.config
                .vocabulary
                .add_synonyms(concept, spellings.iter().copied());
        }
        self
    }

    /// Validate and freeze the configuration.
    pub fn build(self) -> Result<InferenceConfig, ConfigError> {
        let config = self.config;

        if config.sample_size == 0 {
            return Err(ConfigError::ZeroSampleSize);
        }

        check_unit("min_confidence", config.min_confidence)?;
        check_unit("lexical_threshold", config.lexical_threshold)?;
        check_unit("pk_pair_penalty", config.pk_pair_penalty)?;
        check_unit("fk_template_bonus", config.fk_template_bonus)?;

        let weights = &config.weights;
        check_unit("weights.name", weights.name)?;
        check_unit("weights.type_compatibility", weights.type_compatibility)?;
        check_unit("weights.value_overlap", weights.value_overlap)?;
        check_unit("weights.pattern", weights.pattern)?;
        if (weights.total() - 1.0).abs() > 1e-6 {
            return Err(ConfigError::WeightSum(weights.total()));
        }

        let tiers = &config.overlap_tiers;
        check_unit("overlap.high", tiers.high)?;
        check_unit("overlap.medium", tiers.medium)?;
        check_unit("overlap.low", tiers.low)?;
        if !(tiers.low <= tiers.medium && tiers.medium <= tiers.high) {
            return Err(ConfigError::TierOrder);
        }
        if tiers.low > thresholds::overlap::LOW_SCORE {
            return Err(ConfigError::LowTierAboveScore {
                value: tiers.low,
                max: thresholds::overlap::LOW_SCORE,
            });
        }

        Ok(config)
    }
}

fn check_unit(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { name, value })
    }
}
