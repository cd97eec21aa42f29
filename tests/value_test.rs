use lumbung::types::value::{DataType, Value};

#[test]
fn test_value_data_types() {
    assert_eq!(Value::Null.data_type(), DataType::Null);
    assert_eq!(Value::Int64(42).data_type(), DataType::Int);
    assert_eq!(Value::Float64(3.14).data_type(), DataType::Float);
    assert_eq!(Value::Text("hello".to_string()).data_type(), DataType::Text);
}

#[test]
fn test_equality_requires_matching_variant() {
    assert_eq!(Value::Null, Value::Null);
    assert_eq!(Value::Int64(5), Value::Int64(5));
    assert_ne!(Value::Int64(5), Value::Int64(6));
    assert_eq!(Value::Text("a".to_string()), Value::Text("a".to_string()));

    // No numeric coercion across variants.
    assert_ne!(Value::Int64(5), Value::Float64(5.0));
    assert_ne!(Value::Null, Value::Int64(0));
    assert_ne!(Value::Text("5".to_string()), Value::Int64(5));
}

#[test]
fn test_ordering_within_variants() {
    assert!(Value::Int64(5) < Value::Int64(10));
    assert!(Value::Float64(1.5) < Value::Float64(2.5));
    assert!(Value::Text("apple".to_string()) < Value::Text("banana".to_string()));
}

#[test]
fn test_ordering_across_variants_follows_tag_order() {
    // Null sorts before every non-null value.
    assert!(Value::Null < Value::Int64(i64::MIN));
    assert!(Value::Null < Value::Float64(f64::NEG_INFINITY));
    assert!(Value::Null < Value::Text(String::new()));

    // Int64 < Float64 < Text regardless of payload.
    assert!(Value::Int64(i64::MAX) < Value::Float64(f64::MIN));
    assert!(Value::Float64(f64::MAX) < Value::Text(String::new()));
    assert!(Value::Int64(100) < Value::Text("0".to_string()));
}

#[test]
fn test_float_comparison_keeps_ieee_semantics() {
    let nan = Value::Float64(f64::NAN);
    assert_ne!(nan, Value::Float64(f64::NAN));
    assert!(nan.partial_cmp(&Value::Float64(0.0)).is_none());
    assert!(Value::Float64(f64::INFINITY) > Value::Float64(1e308));
}

#[test]
fn test_display_formatting() {
    assert_eq!(format!("{}", Value::Null), "NULL");
    assert_eq!(format!("{}", Value::Int64(42)), "42");
    assert_eq!(format!("{}", Value::Float64(3.14)), "3.14");
    assert_eq!(format!("{}", Value::Text("hello".to_string())), "hello");
}

#[test]
fn test_type_name_resolution() {
    assert_eq!(DataType::from_type_name("INT"), DataType::Int);
    assert_eq!(DataType::from_type_name("integer"), DataType::Int);
    assert_eq!(DataType::from_type_name("FLOAT"), DataType::Float);
    assert_eq!(DataType::from_type_name("real"), DataType::Float);
    assert_eq!(DataType::from_type_name("TEXT"), DataType::Text);
    assert_eq!(DataType::from_type_name("VarChar"), DataType::Text);
    assert_eq!(DataType::from_type_name("CHAR"), DataType::Text);
    assert_eq!(DataType::from_type_name("BLOB"), DataType::Null);
    assert_eq!(DataType::from_type_name(""), DataType::Null);
}

#[test]
fn test_from_string_null_literal() {
    assert_eq!(Value::from_string("NULL", &DataType::Int), Value::Null);
    assert_eq!(Value::from_string("null", &DataType::Text), Value::Null);
    assert_eq!(Value::from_string("NuLl", &DataType::Float), Value::Null);
}

#[test]
fn test_from_string_strips_matching_quotes() {
    assert_eq!(
        Value::from_string("'Ada'", &DataType::Text),
        Value::Text("Ada".to_string())
    );
    assert_eq!(
        Value::from_string("\"Linus\"", &DataType::Text),
        Value::Text("Linus".to_string())
    );
    // Quoted strings become text even against a numeric column.
    assert_eq!(
        Value::from_string("'42'", &DataType::Int),
        Value::Text("42".to_string())
    );
}

#[test]
fn test_from_string_parses_expected_type() {
    assert_eq!(Value::from_string("42", &DataType::Int), Value::Int64(42));
    assert_eq!(Value::from_string("-7", &DataType::Int), Value::Int64(-7));
    assert_eq!(
        Value::from_string("3.5", &DataType::Float),
        Value::Float64(3.5)
    );
    assert_eq!(
        Value::from_string("1e3", &DataType::Float),
        Value::Float64(1000.0)
    );
    assert_eq!(
        Value::from_string("plain", &DataType::Text),
        Value::Text("plain".to_string())
    );
}

#[test]
fn test_from_string_falls_back_to_text() {
    assert_eq!(
        Value::from_string("abc", &DataType::Int),
        Value::Text("abc".to_string())
    );
    assert_eq!(
        Value::from_string("1.5.2", &DataType::Float),
        Value::Text("1.5.2".to_string())
    );
}

#[test]
fn test_from_string_null_typed_column() {
    // A column with an unrecognized type can hold nothing but NULL.
    assert_eq!(Value::from_string("42", &DataType::Null), Value::Null);
}

#[test]
fn test_sorting_mixed_values() {
    let mut values = vec![
        Value::Text("b".to_string()),
        Value::Int64(10),
        Value::Null,
        Value::Float64(0.5),
        Value::Int64(-3),
        Value::Text("a".to_string()),
    ];
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    assert_eq!(
        values,
        vec![
            Value::Null,
            Value::Int64(-3),
            Value::Int64(10),
            Value::Float64(0.5),
            Value::Text("a".to_string()),
            Value::Text("b".to_string()),
        ]
    );
}
