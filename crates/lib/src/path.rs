//! Diagnostic paths for nodes in a JSON tree.
//!
//! Every node records where it lives so that failures can report an exact
//! location. A [`JsonPath`] is immutable and append-only: extending it always
//! produces a new path. Paths are rendered as JSONPath-style breadcrumbs
//! (`$['user']['tags'][0]`) and carry no identity beyond that string form.
//!
//! # Usage
//!
//! ```rust
//! use fluent_json::JsonPath;
//!
//! let path = JsonPath::root().key("user").index(0);
//! assert_eq!(path.as_str(), "$['user'][0]");
//!
//! // `+` builds the same thing
//! let same = &(&JsonPath::root() + "user") + 0;
//! assert_eq!(path, same);
//! ```

use std::{fmt, ops::Add};

use crate::constants::ROOT_PATH;

/// A single navigation step, as recorded by [`JsonPath::key`] and [`JsonPath::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathStep<'a> {
    /// Object member access
    Key(&'a str),
    /// Array element access
    Index(usize),
}

/// An owned, rendered location inside a JSON tree.
///
/// Equality compares the rendered form only, so two paths are equal exactly
/// when they print the same. Paths are never used for lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JsonPath {
    inner: String,
}

impl JsonPath {
    /// The path of a tree root.
    pub fn root() -> Self {
        Self {
            inner: ROOT_PATH.to_string(),
        }
    }

    /// Returns a new path extended by an object key.
    ///
    /// Quotes and backslashes inside the key are escaped so the rendered
    /// breadcrumb stays readable.
    ///
    /// ```rust
    /// # use fluent_json::JsonPath;
    /// assert_eq!(JsonPath::root().key("it's").as_str(), r"$['it\'s']");
    /// ```
    pub fn key(&self, key: &str) -> Self {
        self.push(PathStep::Key(key))
    }

    /// Returns a new path extended by an array index.
    pub fn index(&self, index: usize) -> Self {
        self.push(PathStep::Index(index))
    }

    /// Returns a new path extended by one step.
    pub fn push(&self, step: PathStep<'_>) -> Self {
        let mut inner = String::with_capacity(self.inner.len() + 8);
        inner.push_str(&self.inner);
        match step {
            PathStep::Key(key) => {
                inner.push_str("['");
                for c in key.chars() {
                    if c == '\'' || c == '\\' {
                        inner.push('\\');
                    }
                    inner.push(c);
                }
                inner.push_str("']");
            }
            PathStep::Index(index) => {
                inner.push('[');
                inner.push_str(&index.to_string());
                inner.push(']');
            }
        }
        Self { inner }
    }

    /// Returns `true` if this is the root path.
    pub fn is_root(&self) -> bool {
        self.inner == ROOT_PATH
    }

    /// Returns the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl Default for JsonPath {
    fn default() -> Self {
        Self::root()
    }
}

impl AsRef<str> for JsonPath {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

impl Add<&str> for &JsonPath {
    type Output = JsonPath;

    fn add(self, key: &str) -> JsonPath {
        self.key(key)
    }
}

impl Add<usize> for &JsonPath {
    type Output = JsonPath;

    fn add(self, index: usize) -> JsonPath {
        self.index(index)
    }
}
