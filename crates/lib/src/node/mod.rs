//! The JSON node model.
//!
//! [`Json`] is a shared handle to one node of a tree. A node is one of a closed
//! set of variants (Null, Primitive, Object, Array, Empty, Error, Reference)
//! and every tree operation is dispatched over that set, with the "not
//! applicable" behavior shared by all variants that do not override it.
//!
//! # Chaining and terminal operations
//!
//! - **Chaining** (`get`, `at`) never fails. Missing members are vivified as
//!   Empty placeholders, kind mismatches produce Error nodes. Both remember the
//!   failure and raise it later.
//! - **Terminal** accessors (`string`, `int`, `object`, ...) and mutations
//!   (`set`, `append`, `remove`, `size`) fail immediately. Every terminal
//!   accessor has an `as_*` twin that returns `None` instead.
//!
//! ```
//! use fluent_json::Codec;
//!
//! let json = Codec::global().parse(r#"{"a": {"b": [10, 20]}}"#)?;
//! assert_eq!(json.get("a").get("b").at(1).int()?, 20);
//!
//! // The failure points at the array, not at the unreachable index
//! let err = json.get("a").get("b").at(5).string().unwrap_err();
//! assert_eq!(err.path().unwrap().as_str(), "$['a']['b']");
//! # Ok::<(), fluent_json::Error>(())
//! ```

use std::{
    fmt,
    sync::{
        Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
        atomic::{AtomicBool, Ordering},
    },
};

use indexmap::IndexMap;
use tracing::trace;

use crate::{Codec, CodecError, Error, JsonPath, Result, codec::HostValue, constants::NULL_NAME};

mod collection;
mod conversions;
mod empty;
mod equality;
pub mod errors;
mod primitive;
mod reference;

pub use errors::NodeError;
pub use primitive::PrimitiveKind;

use empty::{Empty, Pending};
pub(crate) use primitive::Primitive;
use reference::Reference;

/// Variant tag of a node, as reported by [`Json::kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// JSON `null`
    Null,
    /// A scalar with its declared kind
    Primitive(PrimitiveKind),
    /// Insertion-ordered string-keyed members
    Object,
    /// Ordered elements
    Array,
    /// A placeholder that has not committed to object or array
    Empty,
    /// A deferred failure
    Error,
    /// An opaque host value that has not been converted yet
    Reference,
}

pub(crate) enum Element {
    Null,
    Primitive(Primitive),
    Object(RwLock<IndexMap<String, Json>>),
    Array(RwLock<Vec<Json>>),
    Empty(Empty),
    Error(Error),
    Reference(Reference),
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Null => f.write_str("Null"),
            Element::Primitive(p) => f.debug_tuple("Primitive").field(p).finish(),
            Element::Object(entries) => f.debug_map().entries(read(entries).iter()).finish(),
            Element::Array(items) => f.debug_list().entries(read(items).iter()).finish(),
            Element::Empty(empty) => f.debug_tuple("Empty").field(empty).finish(),
            Element::Error(err) => f.debug_tuple("Error").field(err).finish(),
            Element::Reference(r) => f.debug_tuple("Reference").field(r).finish(),
        }
    }
}

struct NodeInner {
    path: JsonPath,
    codec: Codec,
    /// Set once the node is stored under a parent
    attached: AtomicBool,
    element: Element,
}

/// A shared handle to one node of a JSON tree.
///
/// Cloning a `Json` clones the handle, not the subtree: both handles observe
/// the same node. Storing a node into a tree with [`Json::set`] and friends
/// stores a copy whenever the node would otherwise live at two positions.
#[derive(Clone)]
pub struct Json {
    inner: Arc<NodeInner>,
}

pub(crate) fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl Json {
    fn new(element: Element, path: JsonPath, codec: Codec) -> Self {
        Self {
            inner: Arc::new(NodeInner {
                path,
                codec,
                attached: AtomicBool::new(false),
                element,
            }),
        }
    }

    /// Marks a freshly built node as owned by a parent collection.
    pub(crate) fn attach(self) -> Self {
        self.inner.attached.store(true, Ordering::Release);
        self
    }

    pub(crate) fn null_at(path: JsonPath, codec: Codec) -> Self {
        Self::new(Element::Null, path, codec)
    }

    pub(crate) fn primitive_at(
        content: impl Into<String>,
        kind: PrimitiveKind,
        path: JsonPath,
        codec: Codec,
    ) -> Self {
        Self::new(Element::Primitive(Primitive::new(content, kind)), path, codec)
    }

    /// Builds an object node; the entries must already carry their final paths.
    pub(crate) fn object_at(entries: IndexMap<String, Json>, path: JsonPath, codec: Codec) -> Self {
        Self::new(Element::Object(RwLock::new(entries)), path, codec)
    }

    /// Builds an array node; the items must already carry their final paths.
    pub(crate) fn array_at(items: Vec<Json>, path: JsonPath, codec: Codec) -> Self {
        Self::new(Element::Array(RwLock::new(items)), path, codec)
    }

    pub(crate) fn empty_at(path: JsonPath, codec: Codec) -> Self {
        Self::new(Element::Empty(Empty::new(None)), path, codec)
    }

    fn placeholder_at(pending: Pending, path: JsonPath, codec: Codec) -> Self {
        Self::new(Element::Empty(Empty::new(Some(pending))), path, codec)
    }

    pub(crate) fn error_at(err: impl Into<Error>, path: JsonPath, codec: Codec) -> Self {
        Self::new(Element::Error(err.into()), path, codec)
    }

    pub(crate) fn reference_at(value: Arc<dyn HostValue>, path: JsonPath, codec: Codec) -> Self {
        Self::new(Element::Reference(Reference::new(value)), path, codec)
    }

    /// The location of this node in its tree.
    pub fn path(&self) -> &JsonPath {
        &self.inner.path
    }

    /// The codec this node is bound to.
    pub fn codec(&self) -> &Codec {
        &self.inner.codec
    }

    pub(crate) fn element(&self) -> &Element {
        &self.inner.element
    }

    /// Returns true if both handles point at the same node.
    pub fn ptr_eq(&self, other: &Json) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Returns the variant tag of this node.
    ///
    /// Empty placeholders and References report their own tag even after
    /// materialization or unwrapping; use [`Json::or_null`] to reach the
    /// committed node.
    pub fn kind(&self) -> NodeKind {
        match self.element() {
            Element::Null => NodeKind::Null,
            Element::Primitive(p) => NodeKind::Primitive(p.kind()),
            Element::Object(_) => NodeKind::Object,
            Element::Array(_) => NodeKind::Array,
            Element::Empty(_) => NodeKind::Empty,
            Element::Error(_) => NodeKind::Error,
            Element::Reference(_) => NodeKind::Reference,
        }
    }

    /// Human readable kind name used in failure messages.
    pub fn element_name(&self) -> String {
        match self.element() {
            Element::Null => NULL_NAME.to_string(),
            Element::Primitive(p) => p.element_name().to_string(),
            Element::Object(_) => "object".to_string(),
            Element::Array(_) => "array".to_string(),
            Element::Empty(empty) => empty
                .wrapped()
                .map_or_else(|| NULL_NAME.to_string(), Json::element_name),
            Element::Error(err) => format!("error ({err})"),
            Element::Reference(r) => r.element_name(self),
        }
    }

    fn mismatch(&self, expected: &str) -> Error {
        NodeError::mismatch(self.element_name(), expected, self.path()).into()
    }

    /// Returns true for an Empty placeholder that has committed to a kind, and
    /// for every node that is not a placeholder.
    pub fn is_materialized(&self) -> bool {
        match self.element() {
            Element::Empty(empty) => empty.wrapped().is_some(),
            _ => true,
        }
    }

    // ===== CHAINING =====

    /// Returns the member at `key`. Never fails.
    ///
    /// On an object this is the existing member, or a new Empty placeholder that
    /// remembers the missing key. An unmaterialized Empty commits to being an
    /// object first. On any other kind an Error node is returned; it raises its
    /// failure only once a terminal accessor is called on it.
    pub fn get(&self, key: &str) -> Json {
        match self.element() {
            Element::Object(entries) => self.object_get(entries, key),
            Element::Empty(empty) => match empty.materialize_object(self) {
                Ok(object) => object.get(key),
                Err(err) => self.error_child(err, self.path().key(key)),
            },
            Element::Error(_) => self.clone(),
            Element::Reference(r) => match r.tree(self) {
                Ok(tree) => tree.get(key),
                Err(err) => self.error_child(err, self.path().key(key)),
            },
            _ => self.error_child(self.mismatch("an object"), self.path().key(key)),
        }
    }

    /// Returns the element at `index`. Never fails.
    ///
    /// On an array, reading past the end fills every slot up to and including
    /// `index` with Empty placeholders. An unmaterialized Empty commits to being
    /// an array first. On any other kind an Error node is returned.
    ///
    /// Every slot up to `index` is allocated, so an index far past the end
    /// costs memory proportional to the index, not to the data written.
    pub fn at(&self, index: usize) -> Json {
        match self.element() {
            Element::Array(items) => self.array_get(items, index),
            Element::Empty(empty) => match empty.materialize_array(self) {
                Ok(array) => array.at(index),
                Err(err) => self.error_child(err, self.path().index(index)),
            },
            Element::Error(_) => self.clone(),
            Element::Reference(r) => match r.tree(self) {
                Ok(tree) => tree.at(index),
                Err(err) => self.error_child(err, self.path().index(index)),
            },
            _ => self.error_child(self.mismatch("an array"), self.path().index(index)),
        }
    }

    fn error_child(&self, err: Error, path: JsonPath) -> Json {
        Json::error_at(err, path, self.codec().clone())
    }

    /// Returns true if `key` holds a value. Never vivifies.
    pub fn contains_key(&self, key: &str) -> bool {
        match self.element() {
            Element::Object(entries) => read(entries)
                .get(key)
                .is_some_and(|child| !child.is_placeholder_null()),
            Element::Empty(empty) => empty.wrapped().is_some_and(|w| w.contains_key(key)),
            Element::Reference(r) => r.tree(self).is_ok_and(|tree| tree.contains_key(key)),
            _ => false,
        }
    }

    // ===== MUTATION =====

    /// Stores `value` under `key`.
    ///
    /// The stored node is a copy whenever `value` lives elsewhere, is bound to
    /// another codec or sits at a different path. `None` stores a Null node.
    /// An unmaterialized Empty commits to being an object first.
    ///
    /// # Errors
    /// Fails with a structural mismatch if this node is not an object.
    pub fn set(&self, key: &str, value: impl Into<Json>) -> Result<()> {
        self.set_node(key, value.into())
    }

    fn set_node(&self, key: &str, value: Json) -> Result<()> {
        match self.element() {
            Element::Object(entries) => {
                self.object_set(entries, key, value);
                Ok(())
            }
            Element::Empty(empty) => empty.materialize_object(self)?.set_node(key, value),
            Element::Reference(r) => r.tree(self)?.set_node(key, value),
            _ => Err(self.mismatch("an object")),
        }
    }

    /// Stores `value` at `index`, filling any gap with Empty placeholders.
    ///
    /// As with [`Json::at`], the gap is allocated slot by slot.
    ///
    /// # Errors
    /// Fails with a structural mismatch if this node is not an array.
    pub fn set_at(&self, index: usize, value: impl Into<Json>) -> Result<()> {
        self.set_at_node(index, value.into())
    }

    fn set_at_node(&self, index: usize, value: Json) -> Result<()> {
        match self.element() {
            Element::Array(items) => {
                self.array_set(items, index, value);
                Ok(())
            }
            Element::Empty(empty) => empty.materialize_array(self)?.set_at_node(index, value),
            Element::Reference(r) => r.tree(self)?.set_at_node(index, value),
            _ => Err(self.mismatch("an array")),
        }
    }

    /// Appends `value`; shorthand for `set_at(size, value)`.
    ///
    /// # Errors
    /// Fails with a structural mismatch if this node is not an array.
    pub fn append(&self, value: impl Into<Json>) -> Result<()> {
        let value = value.into();
        match self.element() {
            Element::Array(items) => {
                let index = read(items).len();
                self.array_set(items, index, value);
                Ok(())
            }
            Element::Empty(empty) => empty.materialize_array(self)?.append(value),
            Element::Reference(r) => r.tree(self)?.append(value),
            _ => Err(self.mismatch("an array")),
        }
    }

    /// Removes the member at `key`. Removing an absent key is a no-op.
    ///
    /// # Errors
    /// Fails with a structural mismatch if this node is not an object.
    pub fn remove(&self, key: &str) -> Result<()> {
        match self.element() {
            Element::Object(entries) => {
                write(entries).shift_remove(key);
                Ok(())
            }
            Element::Empty(empty) => empty.materialize_object(self)?.remove(key),
            Element::Reference(r) => r.tree(self)?.remove(key),
            _ => Err(self.mismatch("an object")),
        }
    }

    /// Removes the element at `index`, shifting later elements down.
    ///
    /// # Errors
    /// Fails with a structural mismatch if this node is not an array, or with
    /// an out of bounds failure if `index` is past the end.
    pub fn remove_at(&self, index: usize) -> Result<()> {
        match self.element() {
            Element::Array(items) => self.array_remove(items, index),
            Element::Empty(empty) => empty.materialize_array(self)?.remove_at(index),
            Element::Reference(r) => r.tree(self)?.remove_at(index),
            _ => Err(self.mismatch("an array")),
        }
    }

    /// Number of members or elements.
    ///
    /// An unmaterialized Empty has size 0.
    ///
    /// # Errors
    /// Fails with a structural mismatch on anything that is not a collection,
    /// Error nodes included.
    pub fn size(&self) -> Result<usize> {
        match self.element() {
            Element::Object(entries) => Ok(read(entries).len()),
            Element::Array(items) => Ok(read(items).len()),
            Element::Empty(empty) => empty.wrapped().map_or(Ok(0), Json::size),
            Element::Reference(r) => r.tree(self)?.size(),
            _ => Err(self.mismatch("an object or array")),
        }
    }

    // ===== NULL CHECKS =====

    /// True for Null, Error and Empty placeholders that hold nothing.
    ///
    /// A materialized Empty still counts as null while every member it holds
    /// is an unmaterialized placeholder, so reading through missing members
    /// does not make a tree look populated.
    pub fn is_null(&self) -> bool {
        match self.element() {
            Element::Null | Element::Error(_) => true,
            Element::Empty(empty) => empty.is_null(),
            Element::Reference(r) => r.tree(self).map_or(true, |tree| tree.is_null()),
            _ => false,
        }
    }

    /// `None` under the same conditions as [`Json::is_null`], otherwise the
    /// committed node (the wrapped collection for a materialized Empty).
    pub fn or_null(&self) -> Option<Json> {
        match self.element() {
            Element::Null | Element::Error(_) => None,
            Element::Empty(empty) => {
                if empty.is_null() {
                    None
                } else {
                    empty.wrapped().cloned()
                }
            }
            Element::Reference(r) => r.tree(self).ok()?.or_null(),
            _ => Some(self.clone()),
        }
    }

    pub(crate) fn is_placeholder_null(&self) -> bool {
        matches!(self.element(), Element::Empty(empty) if empty.is_null())
    }

    // ===== TERMINAL ACCESSORS =====

    /// Runs `extract` on the committed node, raising the deferred failure of
    /// placeholders and Error nodes, or a mismatch naming `expected`.
    fn terminal<T>(&self, extract: fn(&Json) -> Option<T>, expected: &str) -> Result<T> {
        match self.element() {
            Element::Error(err) => Err(err.clone()),
            Element::Empty(empty) => match empty.wrapped() {
                Some(wrapped) => wrapped.terminal(extract, expected),
                None => Err(empty.pending_error(self.path()).into()),
            },
            Element::Reference(r) => r.tree(self)?.terminal(extract, expected),
            _ => extract(self).ok_or_else(|| self.mismatch(expected)),
        }
    }

    fn scalar<T>(&self, extract: fn(&Primitive) -> Option<T>) -> Option<T> {
        match self.element() {
            Element::Primitive(p) => extract(p),
            Element::Reference(r) => r.tree(self).ok()?.scalar(extract),
            _ => None,
        }
    }

    /// The string content, or `None` if this is not a string.
    pub fn as_string(&self) -> Option<String> {
        self.scalar(Primitive::as_string)
    }

    /// The string content.
    ///
    /// # Errors
    /// Fails if this is not a string, raising any deferred failure first.
    pub fn string(&self) -> Result<String> {
        self.terminal(Json::as_string, "string")
    }

    /// The number as `i32`, or `None` if this is not an integer in range.
    pub fn as_int(&self) -> Option<i32> {
        self.scalar(Primitive::as_int)
    }

    /// The number as `i32`.
    ///
    /// # Errors
    /// Fails if this is not an integer in `i32` range.
    pub fn int(&self) -> Result<i32> {
        self.terminal(Json::as_int, "int")
    }

    /// The number as `i64`, or `None` if this is not an integer in range.
    pub fn as_long(&self) -> Option<i64> {
        self.scalar(Primitive::as_long)
    }

    /// The number as `i64`.
    ///
    /// # Errors
    /// Fails if this is not an integer in `i64` range.
    pub fn long(&self) -> Result<i64> {
        self.terminal(Json::as_long, "long")
    }

    /// The number as `f64`, or `None` if this is not a number.
    pub fn as_double(&self) -> Option<f64> {
        self.scalar(Primitive::as_double)
    }

    /// The number as `f64`.
    ///
    /// # Errors
    /// Fails if this is not a number.
    pub fn double(&self) -> Result<f64> {
        self.terminal(Json::as_double, "double")
    }

    /// The boolean value, or `None` if this is not a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        self.scalar(Primitive::as_bool)
    }

    /// The boolean value.
    ///
    /// # Errors
    /// Fails if this is not a boolean.
    pub fn bool(&self) -> Result<bool> {
        self.terminal(Json::as_bool, "bool")
    }

    /// Handles to the elements, or `None` if this is not an array.
    ///
    /// A materialized Empty that still looks null answers `None`.
    pub fn as_array(&self) -> Option<Vec<Json>> {
        match self.element() {
            Element::Array(items) => Some(read(items).clone()),
            Element::Empty(_) => self.or_null()?.as_array(),
            Element::Reference(r) => r.tree(self).ok()?.as_array(),
            _ => None,
        }
    }

    /// Handles to the elements.
    ///
    /// # Errors
    /// Fails if this is not an array.
    pub fn array(&self) -> Result<Vec<Json>> {
        self.terminal(Json::as_array, "array")
    }

    /// Handles to the members in insertion order, or `None` if this is not an object.
    ///
    /// A materialized Empty that still looks null answers `None`.
    pub fn as_object(&self) -> Option<IndexMap<String, Json>> {
        match self.element() {
            Element::Object(entries) => Some(read(entries).clone()),
            Element::Empty(_) => self.or_null()?.as_object(),
            Element::Reference(r) => r.tree(self).ok()?.as_object(),
            _ => None,
        }
    }

    /// Handles to the members in insertion order.
    ///
    /// # Errors
    /// Fails if this is not an object.
    pub fn object(&self) -> Result<IndexMap<String, Json>> {
        self.terminal(Json::as_object, "object")
    }

    // ===== REPARENTING =====

    /// Returns this node if it already lives at `path` under `codec`,
    /// otherwise a deep copy rebound to both.
    pub fn copy_if_needed(&self, path: &JsonPath, codec: &Codec) -> Json {
        if self.path() == path && self.codec() == codec {
            self.clone()
        } else {
            self.copy(path, codec)
        }
    }

    /// Deep copies this subtree so that it lives at `path` under `codec`.
    ///
    /// Every descendant gets a path composed from `path`. A Reference that is
    /// still holding its host value is copied as a Reference to the same value.
    pub fn copy(&self, path: &JsonPath, codec: &Codec) -> Json {
        self.copy_under(path, codec, None)
    }

    /// `parent` is the path deferred failures of copied placeholders report.
    /// It is `None` for the root of the copy, whose recorded cause described
    /// its old position and is dropped.
    fn copy_under(&self, path: &JsonPath, codec: &Codec, parent: Option<&JsonPath>) -> Json {
        let element = match self.element() {
            Element::Null => Element::Null,
            Element::Primitive(p) => Element::Primitive(p.clone()),
            Element::Object(entries) => {
                let copied = read(entries)
                    .iter()
                    .map(|(key, child)| {
                        let child_path = path.key(key);
                        (key.clone(), child.copy_under(&child_path, codec, Some(path)).attach())
                    })
                    .collect();
                Element::Object(RwLock::new(copied))
            }
            Element::Array(items) => {
                let copied = read(items)
                    .iter()
                    .enumerate()
                    .map(|(index, child)| {
                        child.copy_under(&path.index(index), codec, Some(path)).attach()
                    })
                    .collect();
                Element::Array(RwLock::new(copied))
            }
            Element::Empty(empty) => match empty.wrapped() {
                Some(wrapped) => return wrapped.copy_under(path, codec, parent),
                None => Element::Empty(empty.rebased(parent)),
            },
            Element::Error(err) => Element::Error(err.clone()),
            Element::Reference(r) => return r.copy_under(self, path, codec, parent),
        };
        Json::new(element, path.clone(), codec.clone())
    }

    /// Prepares `self` for storage at `path`: copies it unless it is a detached
    /// node already at that position, then marks it attached.
    fn adopt(self, path: &JsonPath, codec: &Codec) -> Json {
        let node = if self.path() == path && self.codec() == codec {
            self
        } else {
            trace!(from = %self.path(), to = %path, "reparenting subtree");
            self.copy_under(path, codec, None)
        };
        if node.inner.attached.swap(true, Ordering::AcqRel) {
            trace!(path = %path, "node already attached, storing a copy");
            return node.copy_under(path, codec, None).attach();
        }
        node
    }

    // ===== REFERENCES AND DECODING =====

    /// Calls `on_raw` with the host value of a Reference that has not been
    /// unwrapped yet, otherwise `on_tree` with the tree form of this node.
    ///
    /// # Errors
    /// Fails if an earlier unwrap of this Reference failed.
    pub fn select<T>(
        &self,
        on_raw: impl FnOnce(&dyn HostValue) -> T,
        on_tree: impl FnOnce(&Json) -> T,
    ) -> Result<T> {
        match self.element() {
            Element::Reference(r) => r.select(self, on_raw, on_tree),
            _ => Ok(on_tree(self)),
        }
    }

    /// Decodes this subtree into a host value through the bound codec.
    ///
    /// Null and unmaterialized placeholders decode from JSON `null`, so
    /// `Option<T>` targets yield `None`. A Reference is unwrapped first.
    ///
    /// # Errors
    /// Raises the carried failure of an Error node, or a decode failure if the
    /// tree does not fit `T`.
    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        match self.element() {
            Element::Error(err) => Err(err.clone()),
            Element::Reference(r) => r.tree(self)?.decode(),
            _ => {
                let value = self.codec().from_tree(self)?;
                serde_json::from_value(value).map_err(|err| {
                    CodecError::DecodeFailed {
                        type_name: std::any::type_name::<T>().to_string(),
                        reason: err.to_string(),
                    }
                    .into()
                })
            }
        }
    }

    /// Like [`Json::decode`] but `None` for null nodes and on any failure.
    pub fn decode_or_none<T: serde::de::DeserializeOwned>(&self) -> Option<T> {
        if self.is_null() {
            return None;
        }
        self.decode().ok()
    }

    /// Prints this subtree through the bound codec.
    ///
    /// # Errors
    /// Fails if the subtree contains an Error node or a value the codec cannot print.
    pub fn to_json_string(&self) -> Result<String> {
        self.codec().stringify(self)
    }
}

impl fmt::Debug for Json {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Json")
            .field("path", self.path())
            .field("element", self.element())
            .finish()
    }
}

impl fmt::Display for Json {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_json_string() {
            Ok(text) => f.write_str(&text),
            Err(err) => write!(f, "<{}: {err}>", self.element_name()),
        }
    }
}
