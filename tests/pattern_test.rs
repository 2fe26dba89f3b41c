use serde_json::json;
use signal_extract::*;

fn regions() -> Dataset {
    Dataset::from_json(&json!([
        {"Region": "East"},
        {"Region": "West"},
        {"Region": "East"},
        {"Region": null},
        {"Other": 1},
        {"Region": "North"},
        {"Region": "East"},
        {"Region": null},
    ]))
    .unwrap()
}

#[test]
fn test_unique_values_first_occurrence() {
    let pattern = detect_pattern(&regions(), "Region").unwrap();

    assert_eq!(
        pattern.unique_values,
        vec![
            Value::from("East"),
            Value::from("West"),
            Value::Null,
            Value::from("North"),
        ]
    );
    assert_eq!(pattern.count_of(&Value::from("East")), 3);
    assert_eq!(pattern.count_of(&Value::Null), 2);
    assert_eq!(pattern.count_of(&Value::from("South")), 0);
}

#[test]
fn test_counts_and_duplicates() {
    let pattern = detect_pattern(&regions(), "Region").unwrap();

    assert_eq!(pattern.total_count, 7);
    assert_eq!(pattern.missing_count, 1);
    assert_eq!(pattern.duplicate_count, 3);
    assert_eq!(
        pattern.unique_count() + pattern.duplicate_count,
        pattern.total_count
    );
}

#[test]
fn test_most_common() {
    let pattern = detect_pattern(&regions(), "Region").unwrap();
    let top: Vec<(String, usize)> = pattern
        .most_common
        .iter()
        .map(|f| (f.value.to_string(), f.count))
        .collect();

    assert_eq!(
        top,
        vec![
            ("East".to_string(), 3),
            ("null".to_string(), 2),
            ("West".to_string(), 1),
            ("North".to_string(), 1),
        ]
    );
}

#[test]
fn test_most_common_limit() {
    let pattern = ColumnPattern::detect(&regions(), "Region", 1).unwrap();
    assert_eq!(pattern.most_common.len(), 1);
    assert_eq!(pattern.frequency.len(), 4);
}

#[test]
fn test_number_and_text_are_distinct() {
    let data = Dataset::from_json(&json!([{"v": 1}, {"v": "1"}, {"v": 1.0}])).unwrap();
    let pattern = detect_pattern(&data, "v").unwrap();
    assert_eq!(pattern.unique_count(), 2);
    assert_eq!(pattern.duplicate_count, 1);
}

#[test]
fn test_unique_plus_duplicates_equals_present_rows() {
    let fixtures = [
        json!([{"c": 1}, {"c": 1}, {"c": 1}]),
        json!([{"c": "a"}, {"c": "b"}, {"c": "c"}]),
        json!([{"c": null}, {}, {"c": true}, {"c": false}, {"c": true}]),
        json!([{"c": 2.5}, {"d": 1}, {"c": "2.5"}, {"c": 2.5}]),
    ];

    for fixture in fixtures {
        let data = Dataset::from_json(&fixture).unwrap();
        let pattern = detect_pattern(&data, "c").unwrap();
        let present = data.rows().iter().filter(|r| r.contains_key("c")).count();
        assert_eq!(
            pattern.unique_count() + pattern.duplicate_count,
            present,
            "{fixture}"
        );
    }
}

#[test]
fn test_missing_column_fails() {
    let err = detect_pattern(&regions(), "Country").unwrap_err();
    assert_eq!(err.kind(), "column_not_found");
}
