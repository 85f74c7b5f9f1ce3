//! Translation between node trees, JSON text and `serde_json::Value`.

use std::{cell::RefCell, str::FromStr};

use indexmap::IndexMap;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    ser::{SerializeMap, SerializeSeq},
};
use serde_json::{Map, Number, Value, value::RawValue};

use super::CodecError;
use crate::{
    Codec, Error, Json, JsonPath, PrimitiveKind, Result,
    node::{Element, Primitive, read},
};

/// Builds a detached tree rooted at `path` from validated JSON text.
///
/// Numbers and booleans become [`PrimitiveKind::Unknown`] primitives holding
/// the literal exactly as written, so `1E5` stays `1E5`.
pub(crate) fn from_raw(raw: &RawValue, path: &JsonPath, codec: &Codec) -> Result<Json> {
    let text = raw.get();
    let json = match text.as_bytes().first() {
        Some(b'{') => {
            let members: IndexMap<String, &RawValue> =
                serde_json::from_str(text).map_err(CodecError::parse_failure)?;
            let mut entries = IndexMap::with_capacity(members.len());
            for (key, member) in members {
                let child = from_raw(member, &path.key(&key), codec)?.attach();
                entries.insert(key, child);
            }
            Json::object_at(entries, path.clone(), codec.clone())
        }
        Some(b'[') => {
            let items: Vec<&RawValue> =
                serde_json::from_str(text).map_err(CodecError::parse_failure)?;
            let items = items
                .into_iter()
                .enumerate()
                .map(|(index, item)| from_raw(item, &path.index(index), codec).map(Json::attach))
                .collect::<Result<Vec<_>>>()?;
            Json::array_at(items, path.clone(), codec.clone())
        }
        Some(b'"') => {
            let s: String = serde_json::from_str(text).map_err(CodecError::parse_failure)?;
            Json::primitive_at(s, PrimitiveKind::String, path.clone(), codec.clone())
        }
        Some(b'n') => Json::null_at(path.clone(), codec.clone()),
        _ => Json::primitive_at(text, PrimitiveKind::Unknown, path.clone(), codec.clone()),
    };
    Ok(json)
}

/// Builds a detached tree rooted at `path` from an already decoded value.
///
/// `committed` conversions of host values tag numbers and booleans with their
/// real kind, otherwise they are left [`PrimitiveKind::Unknown`].
pub(crate) fn from_value(value: Value, path: &JsonPath, codec: &Codec, committed: bool) -> Json {
    let tag = |kind| if committed { kind } else { PrimitiveKind::Unknown };
    match value {
        Value::Null => Json::null_at(path.clone(), codec.clone()),
        Value::Bool(b) => {
            Json::primitive_at(b.to_string(), tag(PrimitiveKind::Boolean), path.clone(), codec.clone())
        }
        Value::Number(n) => {
            Json::primitive_at(n.to_string(), tag(PrimitiveKind::Number), path.clone(), codec.clone())
        }
        Value::String(s) => Json::primitive_at(s, PrimitiveKind::String, path.clone(), codec.clone()),
        Value::Array(items) => {
            let items = items
                .into_iter()
                .enumerate()
                .map(|(index, item)| from_value(item, &path.index(index), codec, committed).attach())
                .collect();
            Json::array_at(items, path.clone(), codec.clone())
        }
        Value::Object(map) => {
            let entries: IndexMap<String, Json> = map
                .into_iter()
                .map(|(key, item)| {
                    let child = from_value(item, &path.key(&key), codec, committed).attach();
                    (key, child)
                })
                .collect();
            Json::object_at(entries, path.clone(), codec.clone())
        }
    }
}

/// Renders a tree as a `serde_json::Value`.
///
/// Unwritten placeholders render as `null`, or are skipped as object members
/// when `omit_placeholders` is set. Error nodes fail with their carried error.
pub(crate) fn to_value(json: &Json, omit_placeholders: bool) -> Result<Value> {
    match json.element() {
        Element::Null => Ok(Value::Null),
        Element::Primitive(p) => primitive_value(p),
        Element::Object(entries) => {
            let mut map = Map::new();
            for (key, child) in read(entries).iter() {
                if omit_placeholders && child.is_placeholder_null() {
                    continue;
                }
                map.insert(key.clone(), to_value(child, omit_placeholders)?);
            }
            Ok(Value::Object(map))
        }
        Element::Array(items) => read(items)
            .iter()
            .map(|child| to_value(child, omit_placeholders))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Element::Empty(empty) => match empty.wrapped() {
            Some(wrapped) => to_value(wrapped, omit_placeholders),
            None => Ok(Value::Null),
        },
        Element::Error(err) => Err(err.clone()),
        Element::Reference(reference) => match reference.raw() {
            Some(raw) => raw.to_serde_value().map_err(|err| {
                CodecError::UnsupportedValue {
                    type_name: raw.type_name().to_string(),
                    reason: err.to_string(),
                }
                .into()
            }),
            None => to_value(&reference.tree(json)?, omit_placeholders),
        },
    }
}

fn primitive_value(p: &Primitive) -> Result<Value> {
    match p.kind() {
        PrimitiveKind::String => Ok(Value::String(p.content().to_string())),
        PrimitiveKind::Boolean => Ok(Value::Bool(p.content() == "true")),
        PrimitiveKind::Number => Number::from_str(p.content())
            .map(Value::Number)
            .map_err(|err| not_a_number(p.content(), err)),
        PrimitiveKind::Unknown => {
            if let Some(b) = p.as_bool() {
                return Ok(Value::Bool(b));
            }
            Ok(Number::from_str(p.content())
                .map(Value::Number)
                .unwrap_or_else(|_| Value::String(p.content().to_string())))
        }
    }
}

fn not_a_number(content: &str, err: serde_json::Error) -> Error {
    CodecError::UnsupportedValue {
        type_name: "number".to_string(),
        reason: format!("{content:?} is not a JSON number: {err}"),
    }
    .into()
}

/// A numeric literal that prints exactly as held.
fn number_literal(content: &str) -> Result<Box<RawValue>> {
    Number::from_str(content).map_err(|err| not_a_number(content, err))?;
    RawValue::from_string(content.to_string()).map_err(|err| not_a_number(content, err))
}

/// Streams a tree to a serializer without an intermediate `Value`, so
/// numeric literals keep their text.
///
/// The first node that cannot be printed is recorded in `failure`, letting
/// callers return the typed error instead of the serializer's message.
pub(crate) struct Printer<'a> {
    json: &'a Json,
    omit_placeholders: bool,
    failure: &'a RefCell<Option<Error>>,
}

impl<'a> Printer<'a> {
    pub(crate) fn new(
        json: &'a Json,
        omit_placeholders: bool,
        failure: &'a RefCell<Option<Error>>,
    ) -> Self {
        Self {
            json,
            omit_placeholders,
            failure,
        }
    }

    fn child<'b>(&'b self, json: &'b Json) -> Printer<'b> {
        Printer::new(json, self.omit_placeholders, self.failure)
    }

    fn fail<E: serde::ser::Error>(&self, err: Error) -> E {
        let message = err.to_string();
        let mut failure = self.failure.borrow_mut();
        if failure.is_none() {
            *failure = Some(err);
        }
        E::custom(message)
    }

    fn primitive<S: Serializer>(&self, p: &Primitive, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match p.kind() {
            PrimitiveKind::String => serializer.serialize_str(p.content()),
            PrimitiveKind::Boolean => serializer.serialize_bool(p.content() == "true"),
            PrimitiveKind::Number => match number_literal(p.content()) {
                Ok(raw) => raw.serialize(serializer),
                Err(err) => Err(self.fail(err)),
            },
            PrimitiveKind::Unknown => {
                if let Some(b) = p.as_bool() {
                    return serializer.serialize_bool(b);
                }
                match number_literal(p.content()) {
                    Ok(raw) => raw.serialize(serializer),
                    Err(_) => serializer.serialize_str(p.content()),
                }
            }
        }
    }
}

impl Serialize for Printer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.json.element() {
            Element::Null => serializer.serialize_unit(),
            Element::Primitive(p) => self.primitive(p, serializer),
            Element::Object(entries) => {
                let entries = read(entries);
                let mut map = serializer.serialize_map(None)?;
                for (key, child) in entries.iter() {
                    if self.omit_placeholders && child.is_placeholder_null() {
                        continue;
                    }
                    map.serialize_entry(key, &self.child(child))?;
                }
                map.end()
            }
            Element::Array(items) => {
                let items = read(items);
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for child in items.iter() {
                    seq.serialize_element(&self.child(child))?;
                }
                seq.end()
            }
            Element::Empty(empty) => match empty.wrapped() {
                Some(wrapped) => self.child(wrapped).serialize(serializer),
                None => serializer.serialize_unit(),
            },
            Element::Error(err) => Err(self.fail(err.clone())),
            Element::Reference(reference) => match reference.raw() {
                Some(raw) => match raw.to_serde_value() {
                    Ok(value) => value.serialize(serializer),
                    Err(err) => Err(self.fail(
                        CodecError::UnsupportedValue {
                            type_name: raw.type_name().to_string(),
                            reason: err.to_string(),
                        }
                        .into(),
                    )),
                },
                None => match reference.tree(self.json) {
                    Ok(tree) => self.child(&tree).serialize(serializer),
                    Err(err) => Err(self.fail(err)),
                },
            },
        }
    }
}

/// Serializes the subtree as plain JSON, honoring the bound codec's
/// placeholder setting.
impl Serialize for Json {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let failure = RefCell::new(None);
        Printer::new(self, self.codec().config().omit_placeholders, &failure).serialize(serializer)
    }
}

/// Deserializes any JSON into a detached tree bound to the global codec,
/// with the same kind tagging as parsed text.
impl<'de> Deserialize<'de> for Json {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(from_value(value, &JsonPath::root(), Codec::global(), false))
    }
}
