#[cfg(test)]
mod tests {
    use schemalink::inference::{
        AdjustmentKind, InferenceConfig, InferenceEngine, InferenceReport, NameRule,
        RelationshipCandidate, SkipReason,
    };
    use schemalink::model::{Column, Table};

    fn clinic() -> Vec<Table> {
        vec![
            Table::new(
                "patients",
                vec![
                    Column::new("id", [1, 2, 3, 4, 5, 6]),
                    Column::new("full_name", ["Ana", "Luis", "Eva", "Juan", "Marta", "Iker"]),
                ],
            )
            .unwrap(),
            Table::new(
                "pets",
                vec![
                    Column::new("id", [1, 2, 3, 4]),
                    Column::new("patient_id", [1, 2, 2, 5]),
                    Column::new("species", ["dog", "cat", "dog", "parrot"]),
                ],
            )
            .unwrap(),
        ]
    }

    fn find<'a>(
        report: &'a InferenceReport,
        source: (&str, &str),
        target: (&str, &str),
    ) -> Option<&'a RelationshipCandidate> {
        report.candidates.iter().find(|c| {
            c.source_table == source.0
                && c.source_column == source.1
                && c.target_table == target.0
                && c.target_column == target.1
        })
    }

    #[test]
    fn test_classic_foreign_key() {
        let report = InferenceEngine::default().infer(&clinic()).unwrap();
        let candidate = find(&report, ("pets", "patient_id"), ("patients", "id")).unwrap();

        assert!(candidate.confidence >= 0.90);
        assert_eq!(candidate.evidence.value_overlap, 1.0);
        assert_eq!(candidate.evidence.name_rule, NameRule::ForeignKeyTemplate);
        assert!(candidate
            .evidence
            .adjustments
            .iter()
            .any(|a| a.kind == AdjustmentKind::ForeignKeyTemplate && a.delta > 0.0));
        assert_eq!(&report.candidates[0], candidate);
    }

    #[test]
    fn test_primary_key_pair_not_emitted() {
        let report = InferenceEngine::default().infer(&clinic()).unwrap();
        assert!(find(&report, ("pets", "id"), ("patients", "id")).is_none());
        assert!(find(&report, ("patients", "id"), ("pets", "id")).is_none());
    }

    #[test]
    fn test_non_standard_naming() {
        let tables = vec![
            Table::new(
                "patients",
                vec![
                    Column::new("PatientUID", ["PAT-001", "PAT-002", "PAT-003", "PAT-004", "PAT-005"]),
                    Column::new("name", ["Ana", "Luis", "Eva", "Juan", "Marta"]),
                ],
            )
            .unwrap(),
            Table::new(
                "pets",
                vec![
                    Column::new("id", [1, 2, 3, 4]),
                    Column::new("OwnerPatientCode", ["PAT-001", "PAT-002", "PAT-003", "PAT-009"]),
                ],
            )
            .unwrap(),
        ];

        let report = InferenceEngine::default().infer(&tables).unwrap();
        let candidate = find(&report, ("pets", "OwnerPatientCode"), ("patients", "PatientUID")).unwrap();

        assert!(candidate.confidence >= 0.7);
        assert_eq!(candidate.evidence.overlap_ratio, 0.75);
        insta::assert_snapshot!(candidate.to_string(), @"pets.OwnerPatientCode -> patients.PatientUID (confidence 0.84)");
        insta::assert_snapshot!(candidate.evidence.summary(), @"name 0.80 (base_word_subset), type 1.00, overlap 0.80 (ratio 0.75), pattern 1.00");
    }

    #[test]
    fn test_localized_id_first_foreign_key() {
        let tables = vec![
            Table::new(
                "pacientes",
                vec![
                    Column::new("id", [10, 11, 12]),
                    Column::new("nombre", ["Ana", "Luis", "Eva"]),
                ],
            )
            .unwrap(),
            Table::new(
                "citas",
                vec![
                    Column::new("id", [1, 2, 3]),
                    Column::new("id_paciente", [10, 12, 12]),
                ],
            )
            .unwrap(),
        ];

        let report = InferenceEngine::default().infer(&tables).unwrap();
        let candidate = &report.candidates[0];
        assert_eq!(candidate.source_column, "id_paciente");
        assert_eq!(candidate.target_table, "pacientes");
        assert_eq!(candidate.evidence.name_rule, NameRule::ForeignKeyTemplate);
    }

    #[test]
    fn test_empty_tables_are_skipped() {
        let mut tables = clinic();
        tables.push(Table::new("archive", vec![Column::new("id", Vec::<i64>::new())]).unwrap());
        tables.push(Table::new("placeholder", vec![]).unwrap());

        let report = InferenceEngine::default().infer(&tables).unwrap();

        let reasons: Vec<_> = report
            .skipped
            .iter()
            .map(|s| (s.table.as_str(), s.reason))
            .collect();
        assert_eq!(
            reasons,
            [("archive", SkipReason::NoRows), ("placeholder", SkipReason::NoColumns)]
        );
        assert!(report.candidates.iter().all(|c| {
            !["archive", "placeholder"].contains(&c.source_table.as_str())
                && !["archive", "placeholder"].contains(&c.target_table.as_str())
        }));
        assert!(report.primary_keys.iter().all(|pk| pk.table != "archive"));
    }

    #[test]
    fn test_empty_sample_noted_when_threshold_allows() {
        let tables = vec![
            Table::new("patients", vec![Column::new("id", [1, 2, 3])]).unwrap(),
            Table::new(
                "pets",
                vec![
                    Column::new("id", [7, 8]),
                    Column::new("patient_id", [None::<i64>, None]),
                ],
            )
            .unwrap(),
        ];
        let config = InferenceConfig::builder().min_confidence(0.0).build().unwrap();
        let report = InferenceEngine::new(config).infer(&tables).unwrap();

        let candidate = find(&report, ("pets", "patient_id"), ("patients", "id")).unwrap();
        assert_eq!(candidate.evidence.value_overlap, 0.0);
        assert!(candidate.evidence.summary().contains("insufficient data"));
    }

    #[test]
    fn test_generic_names_without_shared_values_not_emitted() {
        let tables = vec![
            Table::new(
                "patients",
                vec![
                    Column::new("id", [1, 2, 3, 4]),
                    Column::new("name", ["Ana", "Luis", "Eva", "Juan"]),
                    Column::new("status", ["admitted", "discharged", "admitted", "waiting"]),
                ],
            )
            .unwrap(),
            Table::new(
                "doctors",
                vec![
                    Column::new("id", [100, 101, 102]),
                    Column::new("name", ["Dr House", "Dr Grey", "Dr Who"]),
                    Column::new("status", ["on_call", "off_duty", "on_call"]),
                ],
            )
            .unwrap(),
        ];

        let report = InferenceEngine::default().infer(&tables).unwrap();
        for column in ["name", "status"] {
            assert!(find(&report, ("patients", column), ("doctors", column)).is_none(), "{column}");
            assert!(find(&report, ("doctors", column), ("patients", column)).is_none(), "{column}");
        }

        let config = InferenceConfig::builder().min_confidence(0.0).build().unwrap();
        let report = InferenceEngine::new(config).infer(&tables).unwrap();
        let candidate = find(&report, ("doctors", "name"), ("patients", "name")).unwrap();
        assert_eq!(candidate.evidence.name_rule, NameRule::GenericPair);
        insta::assert_snapshot!(candidate.evidence.summary(), @"name 0.10 (generic_pair), type 1.00, overlap 0.00 (ratio 0.00), pattern 1.00");
    }

    #[test]
    fn test_table_without_primary_key_gets_no_adjustments() {
        let tables = vec![
            Table::new(
                "patients",
                vec![
                    Column::new("id", [1, 2, 2, 3, 4, 5]),
                    Column::new("full_name", ["Ana", "Luis", "Eva", "Ana", "Marta", "Iker"]),
                ],
            )
            .unwrap(),
            Table::new(
                "pets",
                vec![
                    Column::new("id", [1, 1, 2, 3]),
                    Column::new("patient_id", [1, 2, 2, 5]),
                    Column::new("species", ["dog", "cat", "dog", "parrot"]),
                ],
            )
            .unwrap(),
        ];

        let report = InferenceEngine::default().infer(&tables).unwrap();
        assert!(report.primary_keys.is_empty());

        let candidate = find(&report, ("pets", "patient_id"), ("patients", "id")).unwrap();
        assert_eq!(candidate.evidence.name_rule, NameRule::ForeignKeyTemplate);
        assert!(candidate.evidence.adjustments.is_empty());
        assert!((candidate.confidence - 0.97).abs() < 1e-9);
        assert!(report
            .candidates
            .iter()
            .all(|c| c.evidence.adjustments.is_empty()));
    }

    #[test]
    fn test_top_candidate_rendering() {
        let report = InferenceEngine::default().infer(&clinic()).unwrap();
        insta::assert_snapshot!(report.candidates[0].to_string(), @"pets.patient_id -> patients.id (confidence 1.00)");
    }
}
