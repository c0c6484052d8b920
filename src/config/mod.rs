//! Configuration file support for schemalink.
//!
//! Loads TOML settings and turns them into a validated
//! [`InferenceConfig`](crate::inference::InferenceConfig).

mod settings;

pub use settings::{
    InferenceSettings, OverlapSettings, Settings, SettingsError, VocabularySettings,
    WeightSettings, CONFIG_ENV_VAR,
};
