use fluent_json::{Codec, Error, NodeError, NodeKind};

use crate::helpers::*;

#[test]
fn test_primitive_as_structure() {
    let json = json_object();
    json.set("int", 1).unwrap();

    assert_eq!(json.get("int").int().unwrap(), 1);

    assert_fails_on("$['int']", json.get("int").at(0).int());
    assert_fails_on("$['int']", json.get("int").set_at(0, 1));
    assert!(json.get("int").at(0).is_null());
    assert!(json.get("int").at(0).or_null().is_none());

    assert_fails_on("$['int']", json.get("int").get("a").int());
    assert_fails_on("$['int']", json.get("int").set("a", 1));
    assert!(json.get("int").get("a").is_null());
    assert!(json.get("int").get("a").or_null().is_none());
}

#[test]
fn test_structure_as_primitive() {
    let json = parse(r#"{"obj": {}, "arr": []}"#);

    assert_fails_on("$['obj']", json.get("obj").string());
    assert_fails_on("$['arr']", json.get("arr").string());
}

#[test]
fn test_invalid_structure_type() {
    let json = parse(r#"{"obj": {}, "arr": []}"#);

    assert_fails_on("$['obj']", json.get("obj").array());
    assert_fails_on("$['obj']", json.get("obj").at(0).string());
    assert_fails_on("$['arr']", json.get("arr").object());
    assert_fails_on("$['arr']", json.get("arr").get("a").string());
}

#[test]
fn test_null_as_primitive() {
    let json = json_object();
    json.set("null", None::<i32>).unwrap();

    assert!(json.get("null").is_null());
    assert!(json.get("null").or_null().is_none());
    assert_fails_on("$['null']", json.get("null").size());
    assert_fails_on("$['null']", json.get("null").string());
    assert_fails_on("$['null']", json.get("null").int());
    assert_fails_on("$['null']", json.get("null").long());
    assert_fails_on("$['null']", json.get("null").double());
}

#[test]
fn test_null_as_structure() {
    let json = parse(r#"{"null": null}"#);

    assert!(json.get("null").at(0).is_null());
    assert!(json.get("null").get("a").is_null());

    assert_fails_on("$['null']", json.get("null").at(0).string());
    assert_fails_on("$['null']", json.get("null").at(0).at(1).at(2).string());
    assert_fails_on("$['null']", json.get("null").get("a").string());
    assert_fails_on("$['null']", json.get("null").get("a").get("b").get("c").string());
}

#[test]
fn test_complex_structure_paths() {
    let json = parse(r#"{"inner1": {"arr1": [{"inner2": {"arr2": []}}]}}"#);

    assert_fails_on("$['inner1']", json.get("inner1").get("invalid").string());
    assert_fails_on("$['inner1']['arr1']", json.get("inner1").get("arr1").at(1).string());
    assert_fails_on(
        "$['inner1']['arr1'][0]",
        json.get("inner1").get("arr1").at(0).get("invalid").string(),
    );
    assert_fails_on(
        "$['inner1']['arr1'][0]['inner2']",
        json.get("inner1").get("arr1").at(0).get("inner2").at(0).string(),
    );
    assert_fails_on(
        "$['inner1']['arr1'][0]['inner2']['arr2']",
        json.get("inner1").get("arr1").at(0).get("inner2").get("arr2").at(0).string(),
    );
}

#[test]
fn test_mismatch_message_and_classification() {
    let json = parse(r#"{"obj": {}}"#);
    let err = json.get("obj").string().unwrap_err();

    assert!(err.is_type_error());
    assert!(!err.is_not_found());
    assert_eq!(err.module(), "node");
    assert_eq!(err.to_string(), "Element object is not string (at $['obj'])");
    match err {
        Error::Node(NodeError::StructuralMismatch { found, expected, .. }) => {
            assert_eq!(found, "object");
            assert_eq!(expected, "string");
        }
        other => panic!("Expected StructuralMismatch, got {other:?}"),
    }
}

#[test]
fn test_error_node_propagates_silently() {
    let json = parse(r#"{"n": 1}"#);
    let err_node = json.get("n").get("x");

    assert_eq!(err_node.kind(), NodeKind::Error);
    assert!(err_node.get("y").ptr_eq(&err_node));
    assert!(err_node.at(3).ptr_eq(&err_node));
    assert!(err_node.remove("y").is_err());
    assert!(err_node.append(1).is_err());
    assert!(err_node.decode::<i32>().is_err());
    assert!(err_node.to_json_string().is_err());
}

#[test]
fn test_error_nodes_equal_only_themselves() {
    let codec = Codec::global();
    let json = parse(r#"{"n": 1}"#);
    let a = json.get("n").get("x");
    let b = json.get("n").get("x");

    assert_eq!(a, a.clone());
    assert_ne!(a, b);
    assert_ne!(a, codec.null());
}

#[test]
fn test_remove_at_out_of_bounds() {
    let json = parse("[1, 2]");
    let err = json.remove_at(2).unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.path().unwrap().as_str(), "$");
    assert!(matches!(
        err,
        Error::Node(NodeError::IndexOutOfBounds { index: 2, len: 2, .. })
    ));
    assert_eq!(json.size().unwrap(), 2);
}

#[test]
fn test_mutations_fail_eagerly_on_scalars() {
    let json = parse(r#"{"s": "x"}"#);

    assert_fails_on("$['s']", json.get("s").set("a", 1));
    assert_fails_on("$['s']", json.get("s").append(1));
    assert_fails_on("$['s']", json.get("s").remove("a"));
    assert_fails_on("$['s']", json.get("s").remove_at(0));
    assert_fails_on("$['s']", json.get("s").size());
    assert_fails_on("$", json.append(1));
}

#[test]
fn test_writes_into_error_node_are_type_errors() {
    let json = json_object();
    json.set("bad", Codec::global().wrap(f64::NAN)).unwrap();
    let bad = json.get("bad");
    assert_eq!(bad.kind(), NodeKind::Error);

    let results = [
        bad.set("a", 1),
        bad.set_at(0, 1),
        bad.append(1),
        bad.remove("a"),
        bad.remove_at(0),
    ];
    for result in results {
        let err = result.unwrap_err();
        assert!(err.is_type_error(), "expected a type error, got {err}");
        assert_eq!(err.path().unwrap().as_str(), "$['bad']");
    }

    let err = bad.size().unwrap_err();
    assert!(err.is_type_error());
    assert!(err.to_string().starts_with("Element error (Unsupported value"));

    // Reading still raises the carried failure
    assert!(bad.string().unwrap_err().is_unsupported());
}
