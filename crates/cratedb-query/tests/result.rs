use cratedb_query::*;

const GOOD: &str = r#"{"cols":["age","name"],"col_types":[9,4],"rows":[[7,"Calvin"],[5,"Hobbes"]],"rowcount":2,"duration":5.341253}"#;

fn cols(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn decodes_select_reply() {
    let raw = RawReply::from_body(GOOD);
    let result = QueryResult::new(raw.clone());

    assert!(!result.has_error());
    assert_eq!(result.error(), "");
    assert_eq!(result.raw(), &raw);
    assert_eq!(result.duration(), 5.341253);
    assert_eq!(result.row_count(), 2);
    assert_eq!(result.cols(), cols(&["age", "name"]).as_slice());
    assert_eq!(
        result.col_types(),
        &[
            ColumnType::new(DataType::Integer, "9"),
            ColumnType::new(DataType::String, "4"),
        ]
    );
    assert_eq!(
        result.rows(),
        &[r#"[7,"Calvin"]"#.to_string(), r#"[5,"Hobbes"]"#.to_string()]
    );
    assert_eq!(result.record_count(), 2);
}

#[test]
fn records_decode_lazily_with_column_types() {
    let result = QueryResult::new(RawReply::from_body(GOOD));

    let first = result.record(0);
    assert_eq!(first.value_by_name("age").as_i32(), 7);
    assert_eq!(first.value_by_name("age").storage(), &Storage::Int32(7));
    assert_eq!(first.value_by_name("name").as_string(), "Calvin");

    let second = result.record(1);
    assert_eq!(second.value_by_name("name").as_string(), "Hobbes");
    assert_eq!(second.value(0).as_i64(), 5);

    assert_eq!(
        first,
        Record::new(&result.rows()[0], result.cols(), result.col_types())
    );
    assert_eq!(result.record(2), Record::default());

    let names: Vec<String> = result
        .records()
        .map(|r| r.value_by_name("name").as_string())
        .collect();
    assert_eq!(names, vec!["Calvin", "Hobbes"]);
}

#[test]
fn bulk_failure_lists_failing_positions() {
    let result = QueryResult::new(RawReply::from_body(
        r#"{"results":[{"rowcount":-2},{"rowcount":1}]}"#,
    ));
    assert!(result.has_error());
    assert_eq!(result.error(), "[crate] Error in bulk arguments [1].");
}

#[test]
fn transport_error_shape_is_classified() {
    let raw = RawReply::from_body(
        r#"{"error":{"message":"Connection refused","code":7,"component":"transport"}}"#,
    );
    assert!(raw.has_error());
    assert_eq!(
        QueryResult::new(raw).error(),
        "[transport] Connection refused (7)"
    );
}

#[test]
fn results_compare_by_content() {
    let a = r#"{"cols":["a"],"col_types":[9],"rows":[[1]],"rowcount":1,"duration":1}"#;
    let b = r#"{"cols":["b"],"col_types":[9],"rows":[[1]],"rowcount":1,"duration":1}"#;
    assert_eq!(
        QueryResult::new(RawReply::from_body(a)),
        QueryResult::new(RawReply::from_body(a))
    );
    assert_ne!(
        QueryResult::new(RawReply::from_body(a)),
        QueryResult::new(RawReply::from_body(b))
    );
}

#[test]
fn mismatched_row_and_column_counts_are_tolerated() {
    let result = QueryResult::new(RawReply::from_body(
        r#"{"cols":["a","b","c"],"col_types":[9],"rows":[[1,"x"],[1,2,3,4]],"rowcount":2}"#,
    ));
    assert!(!result.has_error());

    let short = result.record(0);
    assert_eq!(short.len(), 2);
    assert_eq!(short.value_by_name("b").column_type().data_type(), DataType::NotSupported);
    assert_eq!(short.value_by_name("b").as_string(), "x");

    let long = result.record(1);
    assert_eq!(long.len(), 4);
    assert_eq!(long.value(3).name(), "");
    assert_eq!(long.value(3).as_i32(), 4);
}

#[test]
fn empty_value_accessors_are_total() {
    let v = Value::default();
    assert_eq!(v.as_i32(), 0);
    assert_eq!(v.as_string(), "");
    assert!(!v.as_bool());
}
