//! Placeholders created by reading through missing members.

use std::sync::OnceLock;

use indexmap::IndexMap;
use tracing::{debug, warn};

use super::{Element, Json, NodeError, read};
use crate::{JsonPath, Result, constants::EMPTY_ELEMENT};

/// Why a placeholder exists, kept as data so copies can re-point it.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Cause {
    MissingKey { key: String },
    OutOfBounds { index: usize, len: usize },
}

/// A failure a placeholder raises when read, recorded against its parent.
#[derive(Debug, Clone)]
pub(super) struct Pending {
    cause: Cause,
    parent: JsonPath,
}

impl Pending {
    pub(super) fn missing_key(key: &str, parent: &JsonPath) -> Self {
        Self {
            cause: Cause::MissingKey {
                key: key.to_string(),
            },
            parent: parent.clone(),
        }
    }

    pub(super) fn out_of_bounds(index: usize, len: usize, parent: &JsonPath) -> Self {
        Self {
            cause: Cause::OutOfBounds { index, len },
            parent: parent.clone(),
        }
    }

    fn error(&self) -> NodeError {
        let reason = match &self.cause {
            Cause::MissingKey { key } => format!("No such key \"{key}\" in object"),
            Cause::OutOfBounds { index, len } => {
                format!("Index {index} out of bounds (size: {len})")
            }
        };
        NodeError::missing(reason, &self.parent)
    }
}

#[derive(Debug)]
pub(crate) struct Empty {
    wrapped: OnceLock<Json>,
    pending: Option<Pending>,
}

impl Empty {
    pub(super) fn new(pending: Option<Pending>) -> Self {
        Self {
            wrapped: OnceLock::new(),
            pending,
        }
    }

    pub(crate) fn wrapped(&self) -> Option<&Json> {
        self.wrapped.get()
    }

    /// The failure to raise when a value is demanded from this placeholder.
    pub(super) fn pending_error(&self, own_path: &JsonPath) -> NodeError {
        match &self.pending {
            Some(pending) => pending.error(),
            None => NodeError::missing(EMPTY_ELEMENT, own_path),
        }
    }

    /// An unmaterialized copy whose recorded failure points at `parent`.
    /// Without a parent the copy keeps no cause and reports itself as empty.
    pub(super) fn rebased(&self, parent: Option<&JsonPath>) -> Self {
        let pending = self.pending.as_ref().zip(parent).map(|(pending, parent)| Pending {
            cause: pending.cause.clone(),
            parent: parent.clone(),
        });
        Self::new(pending)
    }

    /// Null until materialized, and afterwards while every member is still an
    /// unmaterialized placeholder.
    pub(crate) fn is_null(&self) -> bool {
        let Some(wrapped) = self.wrapped.get() else {
            return true;
        };
        match wrapped.element() {
            Element::Object(entries) => read(entries).values().all(Json::is_unmaterialized),
            Element::Array(items) => read(items).iter().all(Json::is_unmaterialized),
            _ => false,
        }
    }

    pub(super) fn materialize_object(&self, node: &Json) -> Result<Json> {
        self.materialize(node, "an object", || {
            Json::object_at(IndexMap::new(), node.path().clone(), node.codec().clone())
        })
    }

    pub(super) fn materialize_array(&self, node: &Json) -> Result<Json> {
        self.materialize(node, "an array", || {
            Json::array_at(Vec::new(), node.path().clone(), node.codec().clone())
        })
    }

    /// Commits the placeholder exactly once. Concurrent callers all observe the
    /// single winning collection; a caller asking for the other kind fails.
    fn materialize(&self, node: &Json, expected: &str, build: impl FnOnce() -> Json) -> Result<Json> {
        let wrapped = self.wrapped.get_or_init(|| {
            debug!(path = %node.path(), kind = expected, "materializing placeholder");
            build().attach()
        });

        let matches = match wrapped.element() {
            Element::Object(_) => expected == "an object",
            Element::Array(_) => expected == "an array",
            _ => false,
        };
        if matches {
            Ok(wrapped.clone())
        } else {
            warn!(
                path = %node.path(),
                found = %wrapped.element_name(),
                expected,
                "placeholder already committed to another kind"
            );
            Err(NodeError::mismatch(wrapped.element_name(), expected, node.path()).into())
        }
    }
}

impl Json {
    /// True only for an Empty placeholder that never committed to a kind.
    pub(crate) fn is_unmaterialized(&self) -> bool {
        matches!(self.element(), Element::Empty(empty) if empty.wrapped().is_none())
    }
}
