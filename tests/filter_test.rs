use pretty_assertions::assert_eq;
use serde_json::json;
use signal_extract::*;

fn sales() -> Dataset {
    Dataset::from_json(&json!([
        {"Sales": 5000},
        {"Sales": 6000},
        {"Sales": 4000},
    ]))
    .unwrap()
}

fn mixed() -> Dataset {
    Dataset::from_json(&json!([
        {"Name": "Acme Corp", "Sales": "7000"},
        {"Name": "Globex", "Sales": "n/a"},
        {"Name": "Initech", "Sales": 3000},
        {"Sales": 9000},
        {"Name": "acme labs", "Sales": null},
    ]))
    .unwrap()
}

fn column(rows: &[Row], name: &str) -> Vec<String> {
    rows.iter().map(|r| r.get_or_null(name).to_string()).collect()
}

#[test]
fn test_greater_than() {
    let predicate = FilterPredicate::new("Sales", "gt", 5000).unwrap();
    let rows = filter_rows(&sales(), &predicate).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("Sales"), Some(&Value::from(6000)));

    let json = serde_json::to_string(&rows[0]).unwrap();
    assert_eq!(json, r#"{"Sales":6000}"#);
}

#[test]
fn test_ordering_operators() {
    let cases = [
        ("gt", vec!["6000"]),
        ("ge", vec!["5000", "6000"]),
        ("lt", vec!["4000"]),
        ("le", vec!["5000", "4000"]),
        (">=", vec!["5000", "6000"]),
        ("<", vec!["4000"]),
    ];

    for (op, expected) in cases {
        let predicate = FilterPredicate::new("Sales", op, 5000).unwrap();
        let rows = filter_rows(&sales(), &predicate).unwrap();
        assert_eq!(column(&rows, "Sales"), expected, "operator {op}");
    }
}

#[test]
fn test_ordering_skips_non_numeric_rows() {
    let predicate = FilterPredicate::new("Sales", ">", "2500").unwrap();
    let result = filter_rows_detailed(&mixed(), &predicate).unwrap();

    assert_eq!(column(&result.rows, "Sales"), vec!["7000", "3000", "9000"]);
    assert_eq!(result.skipped_count, 2);
}

#[test]
fn test_ordering_with_non_numeric_predicate_value() {
    let predicate = FilterPredicate::new("Sales", "gt", "lots").unwrap();
    let result = filter_rows_detailed(&sales(), &predicate).unwrap();

    assert!(result.rows.is_empty());
    assert_eq!(result.skipped_count, 3);
}

#[test]
fn test_equality_coerces_then_falls_back() {
    let eq_number = FilterPredicate::new("Sales", "eq", 7000).unwrap();
    let rows = filter_rows(&mixed(), &eq_number).unwrap();
    assert_eq!(column(&rows, "Name"), vec!["Acme Corp"]);

    let eq_text = FilterPredicate::new("Name", "=", "Globex").unwrap();
    let rows = filter_rows(&mixed(), &eq_text).unwrap();
    assert_eq!(column(&rows, "Sales"), vec!["n/a"]);
}

#[test]
fn test_not_equal_keeps_missing() {
    let predicate = FilterPredicate::new("Name", "ne", "Globex").unwrap();
    let rows = filter_rows(&mixed(), &predicate).unwrap();
    assert_eq!(
        column(&rows, "Name"),
        vec!["Acme Corp", "Initech", "null", "acme labs"]
    );
}

#[test]
fn test_equal_null_matches_missing() {
    let predicate = FilterPredicate::new("Name", "eq", Value::Null).unwrap();
    let rows = filter_rows(&mixed(), &predicate).unwrap();
    assert_eq!(column(&rows, "Sales"), vec!["9000"]);
}

#[test]
fn test_contains_case_insensitive() {
    let predicate = FilterPredicate::new("Name", "contains", "ACME").unwrap();
    let rows = filter_rows(&mixed(), &predicate).unwrap();
    assert_eq!(column(&rows, "Name"), vec!["Acme Corp", "acme labs"]);
}

#[test]
fn test_contains_on_numeric_column_fails() {
    let predicate = FilterPredicate::new("Sales", "contains", "5").unwrap();
    let err = filter_rows(&sales(), &predicate).unwrap_err();
    assert!(matches!(err, AnalysisError::TypeMismatch { .. }));
    assert_eq!(err.kind(), "type_mismatch");
}

#[test]
fn test_unknown_operator() {
    let err = FilterPredicate::new("Sales", "between", 1).unwrap_err();
    assert_eq!(err, AnalysisError::UnknownOperator("between".into()));
}

#[test]
fn test_empty_dataset() {
    let predicate = FilterPredicate::new("Sales", "contains", "x").unwrap();
    let rows = filter_rows(&Dataset::default(), &predicate).unwrap();
    assert!(rows.is_empty());
}

#[test]
fn test_predicate_from_json() {
    let predicate: FilterPredicate =
        serde_json::from_value(json!({"column": "Sales", "operator": ">", "value": 4500}))
            .unwrap();
    assert_eq!(predicate.operator, FilterOperator::Gt);

    let rows = filter_rows(&sales(), &predicate).unwrap();
    assert_eq!(column(&rows, "Sales"), vec!["5000", "6000"]);

    let json = serde_json::to_value(&predicate).unwrap();
    assert_eq!(json["operator"], "gt");
}
