//! Error types for node navigation and mutation.
//!
//! Chaining operations never produce these directly; they are stored inside
//! Error nodes or pending placeholders and only surface when a terminal
//! accessor or an eager mutation is invoked.

use thiserror::Error;

use crate::JsonPath;

/// Structured failures raised by the tree API.
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NodeError {
    /// A terminal accessor or eager write hit a node of the wrong kind
    #[error("Element {found} is not {expected} (at {path})")]
    StructuralMismatch {
        found: String,
        expected: String,
        path: JsonPath,
    },

    /// A terminal accessor reached a placeholder that was never written
    #[error("{reason} (at {path})")]
    MissingValue { reason: String, path: JsonPath },

    /// An array removal addressed an index past the end
    #[error("Index {index} out of bounds (size: {len}) (at {path})")]
    IndexOutOfBounds {
        index: usize,
        len: usize,
        path: JsonPath,
    },
}

impl NodeError {
    pub(crate) fn mismatch(
        found: impl Into<String>,
        expected: impl Into<String>,
        path: &JsonPath,
    ) -> Self {
        NodeError::StructuralMismatch {
            found: found.into(),
            expected: expected.into(),
            path: path.clone(),
        }
    }

    pub(crate) fn missing(reason: impl Into<String>, path: &JsonPath) -> Self {
        NodeError::MissingValue {
            reason: reason.into(),
            path: path.clone(),
        }
    }

    /// Check if this error is a kind mismatch
    pub fn is_type_error(&self) -> bool {
        matches!(self, NodeError::StructuralMismatch { .. })
    }

    /// Check if this error reports a missing key or index
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            NodeError::MissingValue { .. } | NodeError::IndexOutOfBounds { .. }
        )
    }

    /// The location the failure was recorded at
    pub fn path(&self) -> &JsonPath {
        match self {
            NodeError::StructuralMismatch { path, .. }
            | NodeError::MissingValue { path, .. }
            | NodeError::IndexOutOfBounds { path, .. } => path,
        }
    }
}

impl From<NodeError> for crate::Error {
    fn from(err: NodeError) -> Self {
        crate::Error::Node(err)
    }
}
