//!
//! fluent-json: schema-less JSON trees with fluent navigation.
//! This library provides a dynamic JSON node model where reading through missing
//! keys never fails, writes build intermediate structure on demand, and every
//! failure reports the exact location it happened at.
//!
//! ## Core Concepts
//!
//! * **Nodes (`node::Json`)**: A cheap, shared handle to one element of a tree. Every
//!   node is one of Null, Primitive, Object, Array, Empty, Error or Reference.
//! * **Paths (`path::JsonPath`)**: Breadcrumbs recorded on every node and reported by
//!   every failure (`$['user']['tags'][0]`).
//! * **Chaining vs terminal access**: `get`/`at` never fail. Missing members become
//!   Empty placeholders and kind mismatches become Error nodes; the failure is only
//!   raised once a terminal accessor (`string()`, `int()`, `object()`, ...) is called.
//! * **Materialization**: an Empty placeholder commits to being an Object or an Array on
//!   its first structural write, exactly once, even under concurrent first writers.
//! * **References**: opaque host values kept inside the tree and converted into a
//!   subtree only on first structural access.
//! * **Codecs (`codec::Codec`)**: the boundary to text parsing/printing and host value
//!   conversion, with `serde_json` as the default adapter.
//!
//! ```
//! use fluent_json::Codec;
//!
//! let codec = Codec::global();
//! let root = codec.new_json();
//! root.get("user").set("name", "Alice")?;
//! root.get("user").get("tags").append("admin")?;
//!
//! assert_eq!(root.get("user").get("name").string()?, "Alice");
//! assert_eq!(root.to_json_string()?, r#"{"user":{"name":"Alice","tags":["admin"]}}"#);
//!
//! // Reading a missing member never fails, only the terminal accessor does
//! assert!(root.get("user").get("age").as_int().is_none());
//!
//! let err = root.get("user").get("age").int().unwrap_err();
//! assert_eq!(err.path().map(|p| p.as_str()), Some("$['user']"));
//! # Ok::<(), fluent_json::Error>(())
//! ```

pub mod codec;
pub mod constants;
pub mod node;
pub mod path;

pub use codec::{Codec, CodecBuilder, CodecConfig, CodecError, HostValue, JsonAdapter, Transformer};
pub use node::{Json, NodeError, NodeKind, PrimitiveKind};
pub use path::JsonPath;

/// Result type used throughout the fluent-json library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the fluent-json library.
///
/// Errors are cheap to clone so that Error nodes and pending placeholders can
/// raise the same failure any number of times.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Structured navigation and mutation errors from the node module
    #[error(transparent)]
    Node(node::NodeError),

    /// Structured parse, print and conversion errors from the codec module
    #[error(transparent)]
    Codec(codec::CodecError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Node(_) => "node",
            Error::Codec(_) => "codec",
        }
    }

    /// The tree location this failure was recorded at, if it has one.
    pub fn path(&self) -> Option<&JsonPath> {
        match self {
            Error::Node(node_err) => Some(node_err.path()),
            Error::Codec(_) => None,
        }
    }

    /// Check if this error indicates a missing key or index.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Node(node_err) => node_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error is a kind mismatch.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Node(node_err) => node_err.is_type_error(),
            _ => false,
        }
    }

    /// Check if this error came from the text parser.
    pub fn is_parse_error(&self) -> bool {
        match self {
            Error::Codec(codec_err) => codec_err.is_parse_error(),
            _ => false,
        }
    }

    /// Check if this error reports a value the codec cannot represent.
    pub fn is_unsupported(&self) -> bool {
        match self {
            Error::Codec(codec_err) => codec_err.is_unsupported(),
            _ => false,
        }
    }

    /// Check if this error came from decoding into a host type.
    pub fn is_decode_error(&self) -> bool {
        match self {
            Error::Codec(codec_err) => codec_err.is_decode_error(),
            _ => false,
        }
    }
}
