use serde_json::json;
use signal_extract::*;

fn dataset(value: serde_json::Value) -> Dataset {
    Dataset::from_json(&value).unwrap()
}

// --- Construction ---

#[test]
fn test_from_json_rejects_non_mapping_row() {
    let err = Dataset::from_json(&json!([{"a": 1}, [1, 2]])).unwrap_err();
    assert_eq!(err.kind(), "validation_error");
    assert!(err.to_string().contains("row 1"), "{err}");
}

#[test]
fn test_from_json_rejects_nested_cell() {
    let err = Dataset::from_json(&json!([{"a": {"b": 1}}])).unwrap_err();
    assert!(matches!(err, AnalysisError::Validation(_)));
}

#[test]
fn test_from_json_rejects_non_sequence() {
    assert!(Dataset::from_json(&json!({"a": 1})).is_err());
    assert!(Dataset::from_json_str("not json").is_err());
}

#[test]
fn test_dataset_serde_round_trip() {
    let data = dataset(json!([{"Region": "East", "Sales": 100, "Active": true, "Note": null}]));
    let text = serde_json::to_string(&data).unwrap();
    let back: Dataset = serde_json::from_str(&text).unwrap();
    assert_eq!(back, data);
}

#[test]
fn test_numbers_round_trip_unchanged() {
    let text = r#"[{"id":9007199254740993,"price":2.5,"qty":3}]"#;
    let data = Dataset::from_json_str(text).unwrap();
    assert_eq!(serde_json::to_string(&data).unwrap(), text);
}

#[test]
fn test_row_builder() {
    let row: Row = [("Region", Value::from("East")), ("Sales", Value::from(5))]
        .into_iter()
        .collect();
    assert_eq!(row.get("Sales").and_then(Value::as_number), Some(5.0));
    assert_eq!(row.get_or_null("Missing"), &Value::Null);
}

// --- Validation ---

#[test]
fn test_validate_empty_dataset() {
    let report = validate_dataset(&Dataset::default());
    assert!(!report.is_valid);
    assert_eq!(report.row_count, 0);
    assert_eq!(report.message.as_deref(), Some("Dataset is empty"));
}

#[test]
fn test_validate_rows_without_columns() {
    let report = validate_dataset(&dataset(json!([{}, {}])));
    assert!(!report.is_valid);
    assert_eq!(report.row_count, 2);
    assert_eq!(report.column_count, 0);
}

#[test]
fn test_validate_types_and_missing() {
    let data = dataset(json!([
        {"Name": "Ann", "Age": 31, "Member": true},
        {"Name": "Bob", "Age": "unknown"},
        {"Name": null, "Age": 45, "Member": false},
        {"Age": 28, "Member": "yes"},
    ]));
    let report = validate_dataset(&data);

    assert!(report.is_valid);
    assert_eq!(report.column_count, 3);
    assert_eq!(
        report.columns.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        vec!["Name", "Age", "Member"]
    );

    let name = report.column("Name").unwrap();
    assert_eq!(name.inferred_type, ColumnType::String);
    assert_eq!(name.missing_count, 2);
    assert_eq!(name.mismatch_count, 0);

    let age = report.column("Age").unwrap();
    assert_eq!(age.inferred_type, ColumnType::Numeric);
    assert_eq!(age.missing_count, 0);
    assert_eq!(age.mismatch_count, 1);

    let member = report.column("Member").unwrap();
    assert_eq!(member.inferred_type, ColumnType::Boolean);
    assert_eq!(member.missing_count, 1);
    assert_eq!(member.mismatch_count, 1);

    assert!(report.has_type_mismatches());
    assert_eq!(report.missing_values, 3);
    assert!((report.missing_percentage - 25.0).abs() < 1e-9);
}

#[test]
fn test_validate_tie_prefers_numeric() {
    let data = dataset(json!([{"x": 1}, {"x": "one"}, {"x": true}]));
    let report = validate_dataset(&data);
    let x = report.column("x").unwrap();
    assert_eq!(x.inferred_type, ColumnType::Numeric);
    assert_eq!(x.mismatch_count, 2);
}

#[test]
fn test_validate_all_null_column_is_unknown() {
    let data = dataset(json!([{"x": null, "y": 1}, {"y": 2}]));
    let report = validate_dataset(&data);
    assert_eq!(report.column("x").unwrap().inferred_type, ColumnType::Unknown);
    assert_eq!(report.column("x").unwrap().missing_count, 2);
    assert!(report.is_valid);
}
