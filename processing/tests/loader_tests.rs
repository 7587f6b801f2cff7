use common::test_helpers::{TestWorkspace, orders_document};
use processing::{
    error::LoadError,
    loader::{load_records, preview_records, try_load_records},
};
use serde_json::json;

#[test]
fn test_load_valid_document() {
    let workspace = TestWorkspace::new();
    let path = workspace.write_json("orders.json", &orders_document());

    let records = load_records(&path);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["event_payload"]["order"]["orderId"], "ORD-1");
}

#[test]
fn test_load_empty_array() {
    let workspace = TestWorkspace::new();
    let path = workspace.write_raw("orders.json", "[]");

    assert!(try_load_records(&path).unwrap().is_empty());
    assert!(load_records(&path).is_empty());
}

#[test]
fn test_missing_file_degrades_to_empty() {
    let workspace = TestWorkspace::new();
    let path = workspace.path().join("absent.json");

    assert!(matches!(try_load_records(&path), Err(LoadError::Io { .. })));
    assert!(load_records(&path).is_empty());
}

#[test]
fn test_malformed_json_degrades_to_empty() {
    let workspace = TestWorkspace::new();
    let path = workspace.write_raw("orders.json", "[{\"event_payload\": ");

    assert!(matches!(try_load_records(&path), Err(LoadError::Parse { .. })));
    assert!(load_records(&path).is_empty());
}

#[test]
fn test_top_level_object_is_rejected() {
    let workspace = TestWorkspace::new();
    let path = workspace.write_json("orders.json", &json!({ "orders": [] }));

    match try_load_records(&path) {
        Err(LoadError::NotAList { found, .. }) => assert_eq!(found, "object"),
        other => panic!("expected NotAList, got {:?}", other),
    }
    assert!(load_records(&path).is_empty());
}

#[test]
fn test_not_a_list_message_names_the_kind() {
    let workspace = TestWorkspace::new();
    let path = workspace.write_raw("orders.json", "\"just text\"");

    let err = try_load_records(&path).unwrap_err();
    assert!(err.to_string().contains("should contain a list of records"));
    assert!(err.to_string().contains("string"));
}

#[test]
fn test_preview_limits_to_sample_size() {
    let records = vec![json!({ "n": 1 }), json!({ "n": 2 }), json!({ "n": 3 })];

    let preview = preview_records(&records, 2).unwrap();
    let parsed: Vec<serde_json::Value> = serde_json::from_str(&preview).unwrap();

    assert_eq!(parsed, vec![json!({ "n": 1 }), json!({ "n": 2 })]);
    assert!(preview.contains("\n    {\n        \"n\": 1\n    }"));
}

#[test]
fn test_preview_with_fewer_records_than_limit() {
    let records = vec![json!({ "n": 1 })];

    let preview = preview_records(&records, 2).unwrap();
    let parsed: Vec<serde_json::Value> = serde_json::from_str(&preview).unwrap();
    assert_eq!(parsed.len(), 1);

    assert_eq!(preview_records(&[], 2).unwrap(), "[]");
}
