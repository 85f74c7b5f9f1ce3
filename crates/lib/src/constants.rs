//! Constants used throughout the fluent-json library.
//!
//! Central definitions for rendered path fragments and the fixed diagnostic
//! messages attached to placeholders.

/// Rendered form of a tree root path.
pub const ROOT_PATH: &str = "$";

/// Reason reported by a placeholder that was read without a recorded cause.
pub const EMPTY_ELEMENT: &str = "Json element is empty";

/// Kind name reported for unmaterialized placeholders and JSON null.
pub const NULL_NAME: &str = "null";
