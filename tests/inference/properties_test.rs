#[cfg(test)]
mod tests {
    use schemalink::inference::{
        InferenceConfig, InferenceEngine, LexicalRelatedness, NameRule, RelationshipCandidate,
        RelationshipScorer,
    };
    use schemalink::model::{Column, Table, Value};

    /// A small schema mixing clean keys, dirty keys, nulls and shared value domains.
    fn hospital() -> Vec<Table> {
        let ids: Vec<i64> = (1..=20).collect();
        let doctor_ids: Vec<i64> = (100..110).collect();
        vec![
            Table::new(
                "patients",
                vec![
                    Column::new("id", ids.clone()),
                    Column::new("PatientCode", ids.iter().map(|i| format!("PAT-{i:03}"))),
                    Column::new("age", ids.iter().map(|i| 20 + (i % 7))),
                    Column::new(
                        "email",
                        ids.iter().map(|i| if i % 5 == 0 { None } else { Some(format!("p{i}@mail.com")) }),
                    ),
                ],
            )
            .unwrap(),
            Table::new(
                "doctors",
                vec![
                    Column::new("doctor_id", doctor_ids.clone()),
                    Column::new("name", doctor_ids.iter().map(|i| format!("Dr {i}"))),
                ],
            )
            .unwrap(),
            Table::new(
                "appointments",
                vec![
                    Column::new("id", (1..=30).collect::<Vec<i64>>()),
                    Column::new("patient_id", (0..30).map(|i| (i % 20) + 1)),
                    Column::new("DoctorID", (0..30).map(|i| 100 + (i % 10))),
                    Column::new("OwnerPatientCode", (0..30).map(|i| format!("PAT-{:03}", (i % 25) + 1))),
                    Column::new(
                        "notes",
                        (0..30).map(|i| if i % 2 == 0 { Value::Null } else { Value::from("ok") }),
                    ),
                ],
            )
            .unwrap(),
        ]
    }

    fn all_pairs(config: &InferenceConfig) -> Vec<RelationshipCandidate> {
        let engine = InferenceEngine::new(config.clone());
        let schema = engine.profile(&hospital()).unwrap();
        let relatedness = LexicalRelatedness::new(config.vocabulary().clone(), config.lexical_threshold());
        let scorer = RelationshipScorer::new(config, &relatedness);

        let mut scored = Vec::new();
        for source_table in &schema.tables {
            for target_table in &schema.tables {
                if source_table.name == target_table.name {
                    continue;
                }
                for source in &source_table.columns {
                    for target in &target_table.columns {
                        scored.push(scorer.score(source_table, source, target_table, target));
                    }
                }
            }
        }
        scored
    }

    #[test]
    fn test_primary_keys_are_unique_and_complete() {
        let schema = InferenceEngine::default().profile(&hospital()).unwrap();
        for table in &schema.tables {
            let keys: Vec<_> = table.columns.iter().filter(|c| c.is_primary_key).collect();
            assert!(keys.len() <= 1, "{} has {} keys", table.name, keys.len());
            for key in keys {
                assert_eq!(key.uniqueness_ratio, 1.0);
                assert_eq!(key.null_ratio, 0.0);
                assert!(key.row_count > 0);
            }
            for column in &table.columns {
                if column.null_count > 0 || column.distinct_count < column.row_count {
                    assert!(!column.is_primary_key, "{}.{}", table.name, column.name);
                    assert_eq!(column.pk_score, 0.0);
                }
            }
        }
    }

    #[test]
    fn test_primary_key_pairs_have_zero_name_score() {
        let config = InferenceConfig::default();
        let schema = InferenceEngine::new(config.clone()).profile(&hospital()).unwrap();
        let is_key = |table: &str, column: &str| {
            schema
                .tables
                .iter()
                .any(|t| t.name == table && t.column(column).is_some_and(|c| c.is_primary_key))
        };

        let mut seen = 0;
        for candidate in all_pairs(&config) {
            if is_key(&candidate.source_table, &candidate.source_column)
                && is_key(&candidate.target_table, &candidate.target_column)
            {
                seen += 1;
                assert_eq!(candidate.evidence.name, 0.0);
                assert_eq!(candidate.evidence.name_rule, NameRule::PrimaryKeyConflict);
            }
        }
        assert!(seen > 0);
    }

    #[test]
    fn test_confidence_is_clamped() {
        for candidate in all_pairs(&InferenceConfig::default()) {
            assert!(
                (0.0..=1.0).contains(&candidate.confidence),
                "{candidate} out of range"
            );
            for sub_score in [
                candidate.evidence.name,
                candidate.evidence.type_compatibility,
                candidate.evidence.value_overlap,
                candidate.evidence.pattern,
            ] {
                assert!((0.0..=1.0).contains(&sub_score));
            }
        }
    }

    #[test]
    fn test_sample_respects_cap() {
        let config = InferenceConfig::builder().sample_size(5).build().unwrap();
        let schema = InferenceEngine::new(config).profile(&hospital()).unwrap();
        for column in schema.tables.iter().flat_map(|t| &t.columns) {
            assert!(column.sample.len() <= 5);
            assert_eq!(column.sample.len(), column.distinct_count.min(5));
        }
    }

    #[test]
    fn test_inference_is_idempotent() {
        let engine = InferenceEngine::default();
        let first = engine.infer(&hospital()).unwrap();
        let second = engine.infer(&hospital()).unwrap();
        assert_eq!(first, second);

        let json_first = serde_json::to_string(&first).unwrap();
        let json_second = serde_json::to_string(&second).unwrap();
        assert_eq!(json_first, json_second);
    }

    #[test]
    fn test_threshold_monotonicity() {
        let thresholds = [0.0, 0.2, 0.3, 0.5, 0.7, 0.9];
        let reports: Vec<Vec<RelationshipCandidate>> = thresholds
            .iter()
            .map(|t| {
                let config = InferenceConfig::builder().min_confidence(*t).build().unwrap();
                InferenceEngine::new(config).infer(&hospital()).unwrap().candidates
            })
            .collect();

        for (i, pair) in reports.windows(2).enumerate() {
            let (looser, stricter) = (&pair[0], &pair[1]);
            assert!(stricter.len() <= looser.len());
            assert!(stricter.iter().all(|c| looser.contains(c)));
            assert!(stricter.iter().all(|c| c.confidence > thresholds[i + 1]));
        }
    }

    #[test]
    fn test_ranking_order() {
        let report = InferenceEngine::default().infer(&hospital()).unwrap();
        for pair in report.candidates.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.confidence >= b.confidence);
            if a.confidence == b.confidence {
                assert!(
                    (&a.source_table, &a.source_column, &a.target_table, &a.target_column)
                        <= (&b.source_table, &b.source_column, &b.target_table, &b.target_column)
                );
            }
        }
    }

    #[test]
    fn test_expected_relationships_found() {
        let report = InferenceEngine::default().infer(&hospital()).unwrap();
        let has = |source: &str, target: &str| {
            report
                .candidates
                .iter()
                .any(|c| format!("{}.{}", c.source_table, c.source_column) == source
                    && format!("{}.{}", c.target_table, c.target_column) == target)
        };
        assert!(has("appointments.patient_id", "patients.id"));
        assert!(has("appointments.DoctorID", "doctors.doctor_id"));
    }
}
