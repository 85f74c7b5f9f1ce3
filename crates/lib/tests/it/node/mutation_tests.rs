use fluent_json::{Codec, NodeKind};

use crate::helpers::*;

#[test]
fn test_object_from_empty() {
    let json = Codec::global().new_json();
    json.set("null", None::<String>).unwrap();
    json.set("string", "string").unwrap();
    json.set("int", 1).unwrap();
    json.set("long", 1i64).unwrap();
    json.set("double", 1.0).unwrap();
    json.set("bool", true).unwrap();
    json.set("array", vec![1, 2, 3]).unwrap();
    let inner = json_object();
    inner.set("a", 1).unwrap();
    json.set("obj", inner).unwrap();

    assert_eq!(json.get("null").kind(), NodeKind::Null);
    assert!(json.get("null").or_null().is_none());
    assert_eq!(json.get("string").string().unwrap(), "string");
    assert_eq!(json.get("int").int().unwrap(), 1);
    assert_eq!(json.get("long").long().unwrap(), 1);
    assert!(json.get("bool").bool().unwrap());
    assert_eq!(json.get("array").kind(), NodeKind::Array);
    assert_eq!(ints(&json.get("array")), vec![1, 2, 3]);
    assert_eq!(json.get("obj").get("a").int().unwrap(), 1);

    assert_eq!(
        stringify(&json),
        r#"{"null":null,"string":"string","int":1,"long":1,"double":1.0,"bool":true,"array":[1,2,3],"obj":{"a":1}}"#
    );
}

#[test]
fn test_materialize_as_object() {
    let json = json_object();
    json.get("obj").get("inner1").get("inner2").set("value", 1).unwrap();

    assert!(json.get("obj").as_object().is_some());
    assert!(json.get("obj").object().is_ok());
    assert!(json.get("obj").get("inner1").as_object().is_some());
    assert_eq!(json.get("obj").get("inner1").get("inner2").get("value").int().unwrap(), 1);

    assert!(json.get("obj").as_array().is_none());
    assert_fails_on("$['obj']", json.get("obj").array());
    assert_fails_on("$['obj']['inner1']", json.get("obj").get("inner1").array());

    assert_eq!(stringify(&json), r#"{"obj":{"inner1":{"inner2":{"value":1}}}}"#);
}

#[test]
fn test_materialize_as_array() {
    let json = json_object();
    json.get("arr").at(0).set_at(0, 1).unwrap();

    assert!(json.get("arr").as_array().is_some());
    assert!(json.get("arr").at(0).as_array().is_some());
    assert_eq!(json.get("arr").at(0).at(0).int().unwrap(), 1);

    assert!(json.get("arr").as_object().is_none());
    assert_fails_on("$['arr']", json.get("arr").object());
    assert_fails_on("$['arr'][0]", json.get("arr").at(0).object());

    assert_eq!(stringify(&json), r#"{"arr":[[1]]}"#);
}

#[test]
fn test_fill_in_array_values() {
    let json = Codec::global().new_json();
    json.set_at(5, 5).unwrap();

    for item in json.array().unwrap().iter().take(5) {
        assert!(item.or_null().is_none());
        assert_eq!(item.kind(), NodeKind::Empty);
    }

    json.set_at(2, 2).unwrap();
    assert_eq!(json.at(2).int().unwrap(), 2);
    assert_eq!(json.at(5).int().unwrap(), 5);
    assert_eq!(stringify(&json), "[null,null,2,null,null,5]");
}

#[test]
fn test_fail_on_explicit_null() {
    let json = parse(r#"{"null": null}"#);

    assert_fails_on("$['null']", json.get("null").set("value", 1));
    assert_fails_on("$['null']", json.get("null").set_at(0, 1));
}

#[test]
fn test_paths_updated_on_copy() {
    let json = json_object();
    let inner = json_object();
    inner.set("value", 1).unwrap();

    json.get("obj").set("inner", &inner).unwrap();
    json.get("arr").set_at(0, &inner).unwrap();

    assert_fails_on("$['obj']['inner']['value']", json.get("obj").get("inner").get("value").bool());
    assert_fails_on("$['arr'][0]['value']", json.get("arr").at(0).get("value").bool());
    assert_eq!(
        stringify(&json),
        r#"{"obj":{"inner":{"value":1}},"arr":[{"value":1}]}"#
    );

    // The source tree is untouched
    assert_eq!(inner.get("value").path().as_str(), "$['value']");
}

#[test]
fn test_reparented_copy_is_independent() {
    let tree_a = parse(r#"{"inner": {"x": 1}}"#);
    let tree_b = json_object();

    tree_b.set("k", tree_a.get("inner")).unwrap();
    tree_b.get("k").set("x", 2).unwrap();
    tree_b.get("k").set("y", 3).unwrap();

    assert_eq!(tree_a.get("inner").get("x").int().unwrap(), 1);
    assert!(!tree_a.get("inner").contains_key("y"));
    assert_eq!(tree_b.get("k").get("x").int().unwrap(), 2);
    assert_fails_on("$['k']", tree_b.get("k").get("z").string());
}

#[test]
fn test_same_node_stored_twice_is_not_shared() {
    let json = json_object();
    let shared = json_object();
    shared.set("n", 1).unwrap();

    json.set("a", &shared).unwrap();
    json.set("b", &shared).unwrap();
    json.get("a").set("n", 2).unwrap();

    assert_eq!(json.get("b").get("n").int().unwrap(), 1);
}

#[test]
fn test_setter_chains() {
    let json = Codec::global().new_json();
    json.set("null", None::<i32>).unwrap();
    json.set("hello", 123).unwrap();
    json.get("obj").set("sub", "1234").unwrap();
    json.get("arr").set_at(1, true).unwrap();
    json.get("arr2").append(1).unwrap();
    json.get("arr2").append(2).unwrap();
    json.get("arr2").at(2).set_at(0, 3).unwrap();

    assert!(json.get("null").is_null());
    assert_eq!(json.get("hello").int().unwrap(), 123);
    assert_eq!(json.get("obj").get("sub").string().unwrap(), "1234");
    assert!(json.get("arr").at(0).is_null());
    assert!(json.get("arr").at(1).bool().unwrap());
    assert_eq!(json.get("arr2").at(0).int().unwrap(), 1);
    assert_eq!(json.get("arr2").at(1).int().unwrap(), 2);
    assert_eq!(json.get("arr2").at(2).at(0).int().unwrap(), 3);

    assert_eq!(
        stringify(&json),
        r#"{"null":null,"hello":123,"obj":{"sub":"1234"},"arr":[null,true],"arr2":[1,2,[3]]}"#
    );
}

#[test]
fn test_remove_object_key() {
    let json = json_object();
    json.set("hello", "world").unwrap();
    json.set("other", 1).unwrap();
    assert_eq!(json.get("hello").string().unwrap(), "world");

    json.remove("hello").unwrap();
    assert!(json.get("hello").is_null());

    // Removing an absent key is a no-op
    json.remove("never").unwrap();
    assert_eq!(stringify(&json), r#"{"other":1,"hello":null}"#);
}

#[test]
fn test_remove_array_index() {
    let json = json_array();
    json.set_at(0, 1).unwrap();
    json.set_at(1, 2).unwrap();
    json.set_at(2, 3).unwrap();

    assert_eq!(ints(&json), vec![1, 2, 3]);
    json.remove_at(1).unwrap();
    assert_eq!(ints(&json), vec![1, 3]);
    assert_eq!(json.at(1).path().as_str(), "$[1]");
}

#[test]
fn test_remove_preserves_insertion_order() {
    let json = parse(r#"{"a": 1, "b": 2, "c": 3}"#);
    json.remove("b").unwrap();
    assert_eq!(stringify(&json), r#"{"a":1,"c":3}"#);
}

#[test]
fn test_overwrite_keeps_position() {
    let json = parse(r#"{"a": 1, "b": 2}"#);
    json.set("a", "x").unwrap();
    assert_eq!(stringify(&json), r#"{"a":"x","b":2}"#);
}

#[test]
fn test_nodes_move_between_codecs() {
    let pretty = Codec::builder().pretty(true).build();
    let json = pretty.new_json();
    json.set("inner", parse(r#"{"x": 1}"#)).unwrap();

    let inner = json.get("inner");
    assert_eq!(inner.codec(), &pretty);
    assert_eq!(inner.get("x").codec(), &pretty);
    assert_eq!(stringify(&inner), "{\n  \"x\": 1\n}");
}
