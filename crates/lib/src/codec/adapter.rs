//! Pluggable text and host value conversion.
//!
//! A [`JsonAdapter`] is the only component that knows a concrete JSON
//! implementation. The default [`SerdeJsonAdapter`] uses `serde_json`.

use std::cell::RefCell;

use serde_json::{Value, value::RawValue};
use tracing::debug;

use super::{CodecError, HostValue, convert};
use crate::{Codec, Json, JsonPath, PrimitiveKind, Result};

/// Converts between trees and text or host values.
///
/// Nodes produced by an adapter must be bound to the `codec` passed in, so
/// that later copies and conversions go back through the same boundary.
pub trait JsonAdapter: Send + Sync {
    /// Parses `text` into a detached tree rooted at `$`.
    fn parse(&self, text: &str, codec: &Codec) -> Result<Json>;

    /// Prints a tree.
    fn stringify(&self, json: &Json, codec: &Codec) -> Result<String>;

    /// Converts a host value into a tree rooted at `path`.
    fn to_tree(&self, value: &dyn HostValue, path: &JsonPath, codec: &Codec) -> Result<Json>;

    /// Converts a tree into a `serde_json::Value` for decoding.
    fn from_tree(&self, json: &Json, codec: &Codec) -> Result<Value>;
}

/// The default adapter, backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeJsonAdapter;

impl JsonAdapter for SerdeJsonAdapter {
    /// Blank input yields an unwritten placeholder. Documents starting with
    /// `{` or `[` are parsed strictly; other text that is not a JSON scalar
    /// becomes an unparsed primitive when `bare_scalars` is enabled. Scalar
    /// literals are kept as written.
    fn parse(&self, text: &str, codec: &Codec) -> Result<Json> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(codec.new_json());
        }

        let root = JsonPath::root();
        match serde_json::from_str::<&RawValue>(text) {
            Ok(raw) => convert::from_raw(raw, &root, codec),
            Err(err) if text.starts_with('{') || text.starts_with('[') => {
                debug!(error = %err, "rejected JSON document");
                Err(CodecError::parse_failure(err).into())
            }
            Err(err) if !codec.config().bare_scalars => {
                debug!(error = %err, "rejected bare scalar");
                Err(CodecError::parse_failure(err).into())
            }
            Err(_) => Ok(codec.primitive(text, PrimitiveKind::Unknown)),
        }
    }

    fn stringify(&self, json: &Json, codec: &Codec) -> Result<String> {
        let failure = RefCell::new(None);
        let printer = convert::Printer::new(json, codec.config().omit_placeholders, &failure);
        let text = if codec.config().pretty {
            serde_json::to_string_pretty(&printer)
        } else {
            serde_json::to_string(&printer)
        };
        text.map_err(|err| {
            failure.take().unwrap_or_else(|| {
                CodecError::PrintFailed {
                    reason: err.to_string(),
                }
                .into()
            })
        })
    }

    fn to_tree(&self, value: &dyn HostValue, path: &JsonPath, codec: &Codec) -> Result<Json> {
        let value = value
            .to_serde_value()
            .map_err(|err| CodecError::UnsupportedValue {
                type_name: value.type_name().to_string(),
                reason: err.to_string(),
            })?;
        Ok(convert::from_value(value, path, codec, true))
    }

    fn from_tree(&self, json: &Json, codec: &Codec) -> Result<Value> {
        convert::to_value(json, codec.config().omit_placeholders)
    }
}
