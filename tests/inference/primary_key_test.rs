#[cfg(test)]
mod tests {
    use schemalink::inference::{InferenceEngine, KeyNameTier, PrimaryKeyDetector, ProfiledSchema};
    use schemalink::model::{Column, Table};

    fn profile(tables: Vec<Table>) -> ProfiledSchema {
        InferenceEngine::default().profile(&tables).unwrap()
    }

    fn patients() -> Table {
        Table::new(
            "patients",
            vec![
                Column::new("name", ["Ana", "Luis", "Eva"]),
                Column::new("PatientUID", ["P-1", "P-2", "P-3"]),
                Column::new("age", [31, 45, 28]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_table_name_tier_beats_earlier_unnamed_columns() {
        let schema = profile(vec![patients()]);
        let pk = schema.tables[0].primary_key.clone().unwrap();
        assert_eq!(pk.column, "PatientUID");
        assert_eq!(pk.tier, KeyNameTier::TableName);
        assert!((pk.confidence - 2.95 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_detection_is_independent_of_other_tables() {
        let alone = profile(vec![patients()]);
        let other = Table::new(
            "visits",
            vec![
                Column::new("id", [1, 2]),
                Column::new("PatientUID", ["P-1", "P-1"]),
            ],
        )
        .unwrap();
        let together = profile(vec![other, patients()]);

        let together_patients = together.tables.iter().find(|t| t.name == "patients").unwrap();
        assert_eq!(alone.tables[0].primary_key, together_patients.primary_key);
        assert_eq!(alone.tables[0].columns, together_patients.columns);
    }

    #[test]
    fn test_unique_non_null_gate() {
        let table = Table::new(
            "visits",
            vec![
                Column::new("id", [Some(1), Some(2), None]),
                Column::new("visit_code", ["V1", "V1", "V2"]),
                Column::new("notes", [None::<&str>, None, None]),
            ],
        )
        .unwrap();
        let schema = profile(vec![table]);
        let visits = &schema.tables[0];
        assert!(visits.primary_key.is_none());
        assert!(visits.columns.iter().all(|c| !c.is_primary_key));
        assert!(schema.primary_keys().is_empty());
    }

    #[test]
    fn test_keyword_tier() {
        let table = Table::new(
            "orders",
            vec![
                Column::new("total", [10.5, 20.0]),
                Column::new("invoice_number", ["F-1", "F-2"]),
            ],
        )
        .unwrap();
        let schema = profile(vec![table]);
        let pk = schema.tables[0].primary_key.clone().unwrap();
        assert_eq!(pk.column, "invoice_number");
        assert_eq!(pk.tier, KeyNameTier::Keyword);
        assert!((pk.confidence - PrimaryKeyDetector::confidence(KeyNameTier::Keyword)).abs() < 1e-12);
    }

    #[test]
    fn test_localized_table_name_pattern() {
        let table = Table::new(
            "citas",
            vec![
                Column::new("fecha", ["2024-01-01", "2024-01-02"]),
                Column::new("CitaID", [100, 101]),
            ],
        )
        .unwrap();
        let schema = profile(vec![table]);
        let pk = schema.tables[0].primary_key.clone().unwrap();
        assert_eq!(pk.column, "CitaID");
        assert_eq!(pk.tier, KeyNameTier::TableName);
    }

    #[test]
    fn test_tier_scores_are_ordered() {
        let tiers = [
            KeyNameTier::ExactGeneric,
            KeyNameTier::TableName,
            KeyNameTier::Keyword,
            KeyNameTier::NumericUnnamed,
            KeyNameTier::Unnamed,
        ];
        for pair in tiers.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].score() > pair[1].score());
            assert!(PrimaryKeyDetector::confidence(pair[1]) > 0.0);
        }
    }
}
