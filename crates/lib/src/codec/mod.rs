//! The codec boundary.
//!
//! A [`Codec`] bundles a [`JsonAdapter`] with an ordered list of
//! [`Transformer`]s and a [`CodecConfig`]. Every node is bound to one codec,
//! which it uses for printing, decoding and unwrapping References. Moving a
//! subtree to a node bound to another codec copies and rebinds it.
//!
//! Most callers only need the process default, [`Codec::global`]. A
//! customized default can be installed once, before first use, with
//! [`Codec::install_global`].

use std::{
    any::Any,
    fmt,
    sync::{Arc, OnceLock},
};

use indexmap::IndexMap;
use serde::{Serialize, de::DeserializeOwned};
use tracing::trace;

use crate::{Error, Json, JsonPath, PrimitiveKind, Result};

pub mod adapter;
mod config;
mod convert;
pub mod errors;
mod host;

pub use adapter::{JsonAdapter, SerdeJsonAdapter};
pub use config::CodecConfig;
pub use errors::CodecError;
pub use host::{HostValue, Transformer};

static GLOBAL: OnceLock<Codec> = OnceLock::new();

struct CodecInner {
    adapter: Box<dyn JsonAdapter>,
    transformers: Vec<Box<dyn Transformer>>,
    config: CodecConfig,
}

/// A shared handle to a configured codec.
///
/// Codecs compare by identity: two handles are equal only if they came from
/// the same [`CodecBuilder::build`] call.
#[derive(Clone)]
pub struct Codec {
    inner: Arc<CodecInner>,
}

impl PartialEq for Codec {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Codec {}

impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec")
            .field("config", &self.inner.config)
            .field("transformers", &self.inner.transformers.len())
            .finish_non_exhaustive()
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec {
    /// A codec with the `serde_json` adapter, no transformers and default config.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Starts building a customized codec.
    pub fn builder() -> CodecBuilder {
        CodecBuilder::default()
    }

    /// The process default codec, created on first use.
    pub fn global() -> &'static Codec {
        GLOBAL.get_or_init(Codec::new)
    }

    /// Installs `codec` as the process default.
    ///
    /// # Errors
    /// Fails with [`CodecError::GlobalAlreadySet`] if the default was already
    /// installed or used.
    pub fn install_global(codec: Codec) -> Result<()> {
        GLOBAL
            .set(codec)
            .map_err(|_| CodecError::GlobalAlreadySet.into())
    }

    pub fn config(&self) -> &CodecConfig {
        &self.inner.config
    }

    // ===== NODE CONSTRUCTORS =====

    /// A fresh unwritten root that becomes an object or array on first write.
    pub fn new_json(&self) -> Json {
        Json::empty_at(JsonPath::root(), self.clone())
    }

    pub fn null(&self) -> Json {
        Json::null_at(JsonPath::root(), self.clone())
    }

    pub fn object(&self) -> Json {
        Json::object_at(IndexMap::new(), JsonPath::root(), self.clone())
    }

    pub fn array(&self) -> Json {
        Json::array_at(Vec::new(), JsonPath::root(), self.clone())
    }

    /// A primitive holding `content` with the given declared kind.
    pub fn primitive(&self, content: impl Into<String>, kind: PrimitiveKind) -> Json {
        Json::primitive_at(content, kind, JsonPath::root(), self.clone())
    }

    /// A node that raises `err` from every terminal accessor.
    pub fn error(&self, err: impl Into<Error>) -> Json {
        Json::error_at(err, JsonPath::root(), self.clone())
    }

    // ===== HOST VALUES =====

    /// Wraps a host value as a detached root node. See [`Codec::wrap_at`].
    pub fn wrap<T: HostValue>(&self, value: T) -> Json {
        self.wrap_at(value, &JsonPath::root())
    }

    /// Wraps a host value as a node at `path`.
    ///
    /// Transformers are consulted first. Otherwise strings, booleans, numbers,
    /// `()`, existing nodes and `serde_json::Value`s become their tree form
    /// directly, non-finite floats become Error nodes, and every other value
    /// is kept as a Reference that is converted on first structural access.
    pub fn wrap_at<T: HostValue>(&self, value: T, path: &JsonPath) -> Json {
        for transformer in &self.inner.transformers {
            if let Some(json) = transformer.transform(&value, self) {
                trace!(path = %path, type_name = value.type_name(), "transformer claimed value");
                return json.copy_if_needed(path, self);
            }
        }
        self.classify(value, path)
    }

    fn classify<T: HostValue>(&self, value: T, path: &JsonPath) -> Json {
        let any: &dyn Any = value.as_any();
        let primitive = |content: String, kind| Json::primitive_at(content, kind, path.clone(), self.clone());

        if let Some(json) = any.downcast_ref::<Json>() {
            return json.copy_if_needed(path, self);
        }
        if any.is::<()>() {
            return Json::null_at(path.clone(), self.clone());
        }
        if let Some(s) = any.downcast_ref::<String>() {
            return primitive(s.clone(), PrimitiveKind::String);
        }
        if let Some(s) = any.downcast_ref::<&'static str>() {
            return primitive(s.to_string(), PrimitiveKind::String);
        }
        if let Some(c) = any.downcast_ref::<char>() {
            return primitive(c.to_string(), PrimitiveKind::String);
        }
        if let Some(b) = any.downcast_ref::<bool>() {
            return primitive(b.to_string(), PrimitiveKind::Boolean);
        }
        if let Some(text) = integer_text(any) {
            return primitive(text, PrimitiveKind::Number);
        }
        if let Some(n) = float_value(any) {
            if !n.is_finite() {
                let err = CodecError::UnsupportedValue {
                    type_name: value.type_name().to_string(),
                    reason: format!("{n} has no JSON representation"),
                };
                return Json::error_at(err, path.clone(), self.clone());
            }
            return primitive(float_text(any), PrimitiveKind::Number);
        }
        if let Some(v) = any.downcast_ref::<serde_json::Value>() {
            return convert::from_value(v.clone(), path, self, true);
        }

        trace!(path = %path, type_name = value.type_name(), "keeping host value as reference");
        Json::reference_at(Arc::new(value), path.clone(), self.clone())
    }

    // ===== ADAPTER =====

    /// Parses text through the adapter.
    ///
    /// # Errors
    /// Fails with [`CodecError::ParseFailure`] if the adapter rejects the text.
    pub fn parse(&self, text: &str) -> Result<Json> {
        self.inner.adapter.parse(text, self)
    }

    /// Prints a tree with this codec's settings.
    ///
    /// # Errors
    /// Fails if the tree holds an Error node or a value that cannot be printed.
    pub fn stringify(&self, json: &Json) -> Result<String> {
        self.inner.adapter.stringify(json, self)
    }

    /// Converts a host value into a committed tree at `path`.
    ///
    /// # Errors
    /// Fails with [`CodecError::UnsupportedValue`] if the value cannot be serialized.
    pub fn to_tree(&self, value: &dyn HostValue, path: &JsonPath) -> Result<Json> {
        self.inner.adapter.to_tree(value, path, self)
    }

    /// Converts a tree into a `serde_json::Value`.
    ///
    /// # Errors
    /// Fails if the tree holds an Error node or a value that cannot be printed.
    pub fn from_tree(&self, json: &Json) -> Result<serde_json::Value> {
        self.inner.adapter.from_tree(json, self)
    }

    /// Parses `text` and decodes it as `T`.
    ///
    /// # Errors
    /// Fails if the text does not parse or does not fit `T`.
    pub fn decode_object<T: DeserializeOwned>(&self, text: &str) -> Result<T> {
        self.parse(text)?.decode()
    }

    /// Prints any serializable value with this codec's settings.
    ///
    /// # Errors
    /// Fails with [`CodecError::UnsupportedValue`] if `value` cannot be serialized.
    pub fn encode_object<T: Serialize>(&self, value: &T) -> Result<String> {
        let value = serde_json::to_value(value).map_err(|err| CodecError::UnsupportedValue {
            type_name: std::any::type_name::<T>().to_string(),
            reason: err.to_string(),
        })?;
        self.stringify(&convert::from_value(value, &JsonPath::root(), self, true))
    }
}

fn integer_text(any: &dyn Any) -> Option<String> {
    macro_rules! try_integers {
        ($($ty:ty),*) => {
            $(
                if let Some(n) = any.downcast_ref::<$ty>() {
                    return Some(n.to_string());
                }
            )*
        };
    }
    try_integers!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
    None
}

fn float_value(any: &dyn Any) -> Option<f64> {
    any.downcast_ref::<f64>()
        .copied()
        .or_else(|| any.downcast_ref::<f32>().map(|n| f64::from(*n)))
}

/// Shortest round-trip text, which always carries a fraction or exponent.
fn float_text(any: &dyn Any) -> String {
    match any.downcast_ref::<f32>() {
        Some(n) => format!("{n:?}"),
        None => any
            .downcast_ref::<f64>()
            .map(|n| format!("{n:?}"))
            .unwrap_or_default(),
    }
}

/// Builds a [`Codec`].
///
/// ```
/// use fluent_json::{Codec, CodecConfig};
///
/// let codec = Codec::builder().pretty(true).build();
/// assert!(codec.config().pretty);
///
/// let config = CodecConfig { omit_placeholders: true, ..Default::default() };
/// let codec = Codec::builder().config(config).build();
/// assert!(codec.config().omit_placeholders);
/// ```
#[derive(Default)]
pub struct CodecBuilder {
    adapter: Option<Box<dyn JsonAdapter>>,
    transformers: Vec<Box<dyn Transformer>>,
    config: CodecConfig,
}

impl CodecBuilder {
    /// Replaces the default `serde_json` adapter.
    pub fn adapter(mut self, adapter: impl JsonAdapter + 'static) -> Self {
        self.adapter = Some(Box::new(adapter));
        self
    }

    /// Registers a transformer after the ones already registered.
    pub fn transformer(mut self, transformer: impl Transformer + 'static) -> Self {
        self.transformer_mut(transformer);
        self
    }

    /// Registers a transformer in place.
    pub fn transformer_mut(&mut self, transformer: impl Transformer + 'static) {
        self.transformers.push(Box::new(transformer));
    }

    /// Registers a closure as a transformer.
    pub fn transform_with<F>(self, f: F) -> Self
    where
        F: Fn(&dyn HostValue, &Codec) -> Option<Json> + Send + Sync + 'static,
    {
        self.transformer(f)
    }

    pub fn config(mut self, config: CodecConfig) -> Self {
        self.config = config;
        self
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.config.pretty = pretty;
        self
    }

    pub fn build(self) -> Codec {
        Codec {
            inner: Arc::new(CodecInner {
                adapter: self.adapter.unwrap_or_else(|| Box::new(SerdeJsonAdapter)),
                transformers: self.transformers,
                config: self.config,
            }),
        }
    }
}
