#[cfg(test)]
mod tests {
    use std::fs;

    use schemalink::inference::InferenceError;
    use schemalink::model::{load_dataset, parse_dataset, DatasetError, TypeClass, Value};

    #[test]
    fn test_parse_dataset() {
        let tables = parse_dataset(
            r#"{
                "tables": [
                    {
                        "name": "patients",
                        "columns": [
                            { "name": "id", "type": "integer", "values": [1, 2, 3] },
                            { "name": "name", "values": ["Ana", null, ""] }
                        ]
                    },
                    { "name": "archive" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(tables.len(), 2);
        let patients = &tables[0];
        assert_eq!(patients.row_count(), 3);

        let id = patients.column("id").unwrap();
        assert_eq!(id.declared_type, Some(TypeClass::Integer));
        assert_eq!(id.values[2], Value::Int(3));

        let name = patients.column("name").unwrap();
        assert_eq!(name.declared_type, None);
        assert!(name.values[1].is_null());
        assert!(name.values[2].is_null());

        assert!(tables[1].columns().is_empty());
    }

    #[test]
    fn test_sql_type_aliases() {
        let tables = parse_dataset(
            r#"{"tables": [{"name": "t", "columns": [
                {"name": "a", "type": "VARCHAR", "values": ["x"]},
                {"name": "b", "type": "bigint", "values": [1]},
                {"name": "c", "type": "timestamp", "values": ["2024-01-01"]}
            ]}]}"#,
        )
        .unwrap();
        let types: Vec<_> = tables[0].columns().iter().map(|c| c.declared_type).collect();
        assert_eq!(
            types,
            [Some(TypeClass::Text), Some(TypeClass::Integer), Some(TypeClass::Temporal)]
        );
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = parse_dataset(
            r#"{"tables": [{"name": "t", "columns": [{"name": "a", "type": "blob", "values": []}]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DatasetError::UnknownType { ref type_name, .. } if type_name == "blob"));
    }

    #[test]
    fn test_structural_errors_surface() {
        let err = parse_dataset(
            r#"{"tables": [{"name": "t", "columns": [
                {"name": "a", "values": [1, 2]},
                {"name": "b", "values": [1]}
            ]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DatasetError::InvalidTable(InferenceError::RaggedColumn { .. })
        ));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_dataset("{\"tables\": [").unwrap_err();
        assert!(matches!(err, DatasetError::ParseError(_)));
    }

    #[test]
    fn test_load_dataset_from_file() {
        let path = std::env::temp_dir().join(format!("schemalink-dataset-{}.json", std::process::id()));
        fs::write(&path, r#"{"tables": [{"name": "t", "columns": [{"name": "id", "values": [1]}]}]}"#).unwrap();
        let tables = load_dataset(&path).unwrap();
        assert_eq!(tables[0].name(), "t");

        let err = load_dataset("/nonexistent/dataset.json").unwrap_err();
        assert!(matches!(err, DatasetError::FileNotFound(_)));
    }
}
