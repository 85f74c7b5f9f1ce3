use fluent_json::{Codec, NodeKind};

use crate::helpers::*;

#[test]
fn test_new_json_is_null() {
    let json = Codec::global().new_json();

    assert_eq!(json.kind(), NodeKind::Empty);
    assert!(json.is_null());
    assert!(json.or_null().is_none());
    assert_eq!(json.size().unwrap(), 0);

    assert_eq!(json.as_string(), None);
    assert_fails_on("$", json.string());
    assert_eq!(json.as_int(), None);
    assert_fails_on("$", json.int());
    assert_eq!(json.as_long(), None);
    assert_fails_on("$", json.long());
    assert_eq!(json.as_double(), None);
    assert_fails_on("$", json.double());
    assert_eq!(json.as_bool(), None);
    assert_fails_on("$", json.bool());
}

#[test]
fn test_empty_message_names_the_placeholder() {
    let json = Codec::global().new_json();
    let err = json.string().unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Json element is empty (at $)");
}

#[test]
fn test_remains_null_after_nested_object_reads() {
    let json = Codec::global().new_json();

    assert!(json.get("a").get("b").is_null());
    assert!(json.get("a").get("b").or_null().is_none());
    assert!(json.get("a").get("b").as_object().is_none());
    assert_fails_on("$['a']", json.get("a").get("b").object());

    // Reads materialized the chain without giving it content
    assert!(json.get("a").is_materialized());
    assert!(json.get("a").is_null());
}

#[test]
fn test_remains_null_after_nested_array_reads() {
    let json = Codec::global().new_json();

    assert!(json.at(0).at(1).is_null());
    assert!(json.at(0).at(1).or_null().is_none());
    assert!(json.at(0).at(1).as_array().is_none());
    assert_fails_on("$[0]", json.at(0).at(1).array());
}

#[test]
fn test_missing_key_message() {
    let json = parse(r#"{"a": {}}"#);
    let err = json.get("a").get("b").string().unwrap_err();
    assert_eq!(err.to_string(), "No such key \"b\" in object (at $['a'])");
}

#[test]
fn test_out_of_bounds_reports_array_path() {
    let json = parse(r#"{"a": {"b": [10, 20]}}"#);

    let placeholder = json.get("a").get("b").at(5);
    assert_eq!(placeholder.path().as_str(), "$['a']['b'][5]");

    let err = placeholder.string().unwrap_err();
    assert_eq!(err.path().unwrap().as_str(), "$['a']['b']");
    assert_eq!(
        err.to_string(),
        "Index 5 out of bounds (size: 2) (at $['a']['b'])"
    );

    // Every slot up to the requested index was filled
    assert_eq!(json.get("a").get("b").size().unwrap(), 6);
    assert!(json.get("a").get("b").at(3).is_null());
}

#[test]
fn test_first_write_commits_to_object() {
    let json = Codec::global().new_json();
    json.set("a", 1).unwrap();

    assert!(!json.is_null());
    assert_eq!(json.or_null().unwrap().kind(), NodeKind::Object);
    assert_eq!(json.get("a").int().unwrap(), 1);

    let err = json.append(2).unwrap_err();
    assert!(err.is_type_error());
    assert_fails_on("$", json.set_at(0, 2));
    assert_eq!(json.at(0).kind(), NodeKind::Error);
}

#[test]
fn test_first_write_commits_to_array() {
    let json = Codec::global().new_json();
    json.append("x").unwrap();

    assert_eq!(json.or_null().unwrap().kind(), NodeKind::Array);
    assert_eq!(json.at(0).string().unwrap(), "x");
    assert_fails_on("$", json.set("a", 1));
    assert_fails_on("$", json.get("a").string());
}

#[test]
fn test_materialized_placeholder_exposes_collection() {
    let json = Codec::global().new_json();
    json.get("obj").set("k", "v").unwrap();

    let members = json.get("obj").object().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members["k"].string().unwrap(), "v");
    assert_fails_on("$['obj']", json.get("obj").array());
}

#[test]
fn test_blank_text_parses_to_placeholder() {
    let json = parse("   ");
    assert_eq!(json.kind(), NodeKind::Empty);
    assert!(json.is_null());
}

#[test]
fn test_moved_placeholder_reports_its_new_position() {
    let source = json_object();
    let target = json_object();
    target.set("k", source.get("missing")).unwrap();

    let stored = target.get("k");
    assert!(stored.is_null());
    assert!(!target.contains_key("k"));

    // The source's missing key means nothing in the target tree
    let err = stored.string().unwrap_err();
    assert_eq!(err.to_string(), "Json element is empty (at $['k'])");

    // Placeholders inside a moved subtree keep their cause
    let _ = source.get("inner").get("gone");
    target.set("copy", source.get("inner")).unwrap();
    assert_fails_on("$['copy']", target.get("copy").get("gone").string());
}
