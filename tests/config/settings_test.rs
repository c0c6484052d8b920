#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use schemalink::config::{Settings, SettingsError, CONFIG_ENV_VAR};
    use schemalink::inference::{ConfigError, InferenceConfig};

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("schemalink-settings-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_full_document() {
        let settings = Settings::from_toml_str(
            r#"
            [inference]
            sample_size = 20
            min_confidence = 0.45
            lexical_threshold = 0.9
            dedupe_mirrored = true
            exclude_pk_sources = true
            parallel = false
            domains = ["medical", "ecommerce"]

            [inference.weights]
            name = 0.4
            type_compatibility = 0.1
            value_overlap = 0.4
            pattern = 0.1

            [inference.overlap]
            high = 0.9
            medium = 0.6
            low = 0.3

            [vocabulary]
            id_suffixes = ["legajo"]
            pk_names = ["rowid"]

            [vocabulary.synonyms]
            owner = ["tutor", "responsable"]
            "#,
        )
        .unwrap();

        let config = settings.to_config().unwrap();
        assert_eq!(config.sample_size(), 20);
        assert_eq!(config.min_confidence(), 0.45);
        assert_eq!(config.lexical_threshold(), 0.9);
        assert!(config.dedupe_mirrored());
        assert!(config.exclude_pk_sources());
        assert!(!config.parallel());
        assert_eq!(config.weights().name, 0.4);
        assert_eq!(config.overlap_tiers().high, 0.9);

        let vocabulary = config.vocabulary();
        assert!(vocabulary.is_id_suffix("mrn"));
        assert!(vocabulary.is_id_suffix("sku"));
        assert!(vocabulary.is_id_suffix("legajo"));
        assert!(vocabulary.is_id_suffix("id"));
        assert!(vocabulary.is_pk_name("rowid"));
        assert!(vocabulary.are_synonyms("owner", "tutor"));
        assert!(vocabulary.are_synonyms("dueño", "responsable"));
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let settings = Settings::from_toml_str("[inference]\nmin_confidence = 0.5\n").unwrap();
        let config = settings.to_config().unwrap();
        let defaults = InferenceConfig::default();
        assert_eq!(config.min_confidence(), 0.5);
        assert_eq!(config.sample_size(), defaults.sample_size());
        assert_eq!(config.weights(), defaults.weights());
        assert_eq!(config.vocabulary(), defaults.vocabulary());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let settings = Settings::from_toml_str("[inference]\nsample_size = 0\n").unwrap();
        assert!(matches!(
            settings.to_config(),
            Err(SettingsError::InvalidConfig(ConfigError::ZeroSampleSize))
        ));

        let settings = Settings::from_toml_str("[inference.weights]\nname = 0.9\n").unwrap();
        assert!(matches!(
            settings.to_config(),
            Err(SettingsError::InvalidConfig(ConfigError::WeightSum(_)))
        ));
    }

    #[test]
    fn test_malformed_toml() {
        let err = Settings::from_toml_str("[inference\nsample_size = 3").unwrap_err();
        assert!(matches!(err, SettingsError::ParseError(_)));

        let err = Settings::from_toml_str("[inference]\nsample_size = \"many\"").unwrap_err();
        assert!(matches!(err, SettingsError::ParseError(_)));
    }

    #[test]
    fn test_from_file() {
        let path = write_temp("from_file.toml", "[inference]\nsample_size = 12\n");
        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.inference.sample_size, 12);
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::from_file("/nonexistent/schemalink.toml").unwrap_err();
        assert!(matches!(err, SettingsError::FileNotFound(_)));
    }

    #[test]
    fn test_load_honors_env_var() {
        let path = write_temp("env.toml", "[inference]\nmin_confidence = 0.6\n");
        std::env::set_var(CONFIG_ENV_VAR, &path);
        let settings = Settings::load();
        std::env::remove_var(CONFIG_ENV_VAR);

        assert_eq!(settings.unwrap().inference.min_confidence, 0.6);
    }
}
