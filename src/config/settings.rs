//! TOML-based configuration for schemalink.
//!
//! Every key is optional; missing keys take the engine defaults.
//!
//! Example configuration:
//! ```toml
//! [inference]
//! sample_size = 20
//! min_confidence = 0.4
//! dedupe_mirrored = true
//! domains = ["medical"]
//!
//! [inference.weights]
//! name = 0.3
//! type_compatibility = 0.1
//! value_overlap = 0.5
//! pattern = 0.1
//!
//! [inference.overlap]
//! high = 0.8
//! medium = 0.5
//! low = 0.2
//!
//! [vocabulary]
//! id_suffixes = ["legajo"]
//! pk_names = ["rowid"]
//! generic_columns = ["notes"]
//!
//! [vocabulary.synonyms]
//! owner = ["tutor", "responsable"]
//! ```

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::inference::{
    thresholds, ConfigError, Domain, InferenceConfig, OverlapTiers, ScoreWeights, Vocabulary,
};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "SCHEMALINK_CONFIG";

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub inference: InferenceSettings,
    pub vocabulary: VocabularySettings,
}

/// `[inference]` section.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct InferenceSettings {
    /// Maximum distinct values sampled per column.
    pub sample_size: usize,

    /// Candidates must score strictly above this (0.0 to 1.0).
    pub min_confidence: f64,

    /// Minimum normalized Levenshtein similarity for related words.
    pub lexical_threshold: f64,

    pub pk_pair_penalty: f64,
    pub fk_template_bonus: f64,
    pub exclude_pk_sources: bool,
    pub dedupe_mirrored: bool,
    pub parallel: bool,

    /// Domain presets merged into the vocabulary (medical, ecommerce, ...).
    pub domains: Vec<String>,

    pub weights: WeightSettings,
    pub overlap: OverlapSettings,
}

impl Default for InferenceSettings {
    fn default() -> Self {
        Self {
            sample_size: thresholds::sampling::DEFAULT_SAMPLE_SIZE,
            min_confidence: thresholds::confidence::MIN_CONFIDENCE,
            lexical_threshold: thresholds::name::LEXICAL_SIMILARITY,
            pk_pair_penalty: thresholds::adjustment::PK_PAIR_PENALTY,
            fk_template_bonus: thresholds::adjustment::FK_TEMPLATE_BONUS,
            exclude_pk_sources: false,
            dedupe_mirrored: false,
            parallel: true,
            domains: Vec::new(),
            weights: WeightSettings::default(),
            overlap: OverlapSettings::default(),
        }
    }
}

/// `[inference.weights]` section.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WeightSettings {
    pub name: f64,
    pub type_compatibility: f64,
    pub value_overlap: f64,
    pub pattern: f64,
}

impl Default for WeightSettings {
    fn default() -> Self {
        let weights = ScoreWeights::default();
        Self {
            name: weights.name,
            type_compatibility: weights.type_compatibility,
            value_overlap: weights.value_overlap,
            pattern: weights.pattern,
        }
    }
}

/// `[inference.overlap]` section.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OverlapSettings {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl Default for OverlapSettings {
    fn default() -> Self {
        let tiers = OverlapTiers::default();
        Self {
            high: tiers.high,
            medium: tiers.medium,
            low: tiers.low,
        }
    }
}

/// `[vocabulary]` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct VocabularySettings {
    /// Start from an empty vocabulary instead of the built-in one.
    pub replace_defaults: bool,

    /// Extra generic identifier tokens.
    pub id_suffixes: Vec<String>,

    /// Extra bare primary-key names.
    pub pk_names: Vec<String>,

    /// Extra generic column names (`name`, `status`, ...).
    pub generic_columns: Vec<String>,

    /// Concept → extra spellings.
    pub synonyms: BTreeMap<String, Vec<String>>,
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Parse settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `SCHEMALINK_CONFIG`
    /// 2. `./schemalink.toml`
    /// 3. `~/.config/schemalink/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("schemalink.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("schemalink").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    /// Build a validated engine configuration.
    pub fn to_config(&self) -> Result<InferenceConfig, SettingsError> {
        let inference = &self.inference;
        let vocabulary = &self.vocabulary;

        let mut builder = InferenceConfig::builder()
            .sample_size(inference.sample_size)
            .min_confidence(inference.min_confidence)
            .lexical_threshold(inference.lexical_threshold)
            .pk_pair_penalty(inference.pk_pair_penalty)
            .fk_template_bonus(inference.fk_template_bonus)
            .exclude_pk_sources(inference.exclude_pk_sources)
            .dedupe_mirrored(inference.dedupe_mirrored)
            .parallel(inference.parallel)
            .weights(ScoreWeights {
                name: inference.weights.name,
                type_compatibility: inference.weights.type_compatibility,
                value_overlap: inference.weights.value_overlap,
                pattern: inference.weights.pattern,
            })
            .overlap_tiers(OverlapTiers {
                high: inference.overlap.high,
                medium: inference.overlap.medium,
                low: inference.overlap.low,
            });

        if vocabulary.replace_defaults {
            builder = builder.vocabulary(Vocabulary::empty());
        }

        for name in &inference.domains {
            builder = builder.domain(name.parse::<Domain>()?);
        }

        builder = builder.id_suffixes(vocabulary.id_suffixes.iter().map(String::as_str));
        for name in &vocabulary.pk_names {
            builder = builder.pk_name(name);
        }
        for name in &vocabulary.generic_columns {
            builder = builder.generic_column(name);
        }
        for (concept, spellings) in &vocabulary.synonyms {
            builder = builder.synonyms(concept, spellings.iter().map(String::as_str));
        }

        Ok(builder.build()?)
    }
}
