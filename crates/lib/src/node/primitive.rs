//! Scalar leaves of a JSON tree.
//!
//! A primitive keeps its raw text plus a declared kind. Text that came out of
//! the parser before any type commitment is tagged [`PrimitiveKind::Unknown`]
//! and coerced on demand, so `"true"` reads as a bool and `"12"` as a number.

use serde::{Deserialize, Serialize};

/// Declared kind of a primitive's raw content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    /// Textual value
    String,
    /// Numeric value, stored in its textual form
    Number,
    /// `true` or `false`
    Boolean,
    /// Not yet committed, interpreted on access
    Unknown,
}

#[derive(Debug, Clone)]
pub(crate) struct Primitive {
    content: String,
    kind: PrimitiveKind,
}

fn parse_number(content: &str) -> Option<f64> {
    content.parse::<f64>().ok().filter(|n| n.is_finite())
}

impl Primitive {
    pub(crate) fn new(content: impl Into<String>, kind: PrimitiveKind) -> Self {
        Self {
            content: content.into(),
            kind,
        }
    }

    pub(crate) fn content(&self) -> &str {
        &self.content
    }

    pub(crate) fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    pub(crate) fn is_bool(&self) -> bool {
        match self.kind {
            PrimitiveKind::Boolean => true,
            PrimitiveKind::Unknown => self.content == "true" || self.content == "false",
            _ => false,
        }
    }

    pub(crate) fn is_number(&self) -> bool {
        match self.kind {
            PrimitiveKind::Number => true,
            PrimitiveKind::Unknown => parse_number(&self.content).is_some(),
            _ => false,
        }
    }

    pub(crate) fn is_string(&self) -> bool {
        matches!(self.kind, PrimitiveKind::String | PrimitiveKind::Unknown)
    }

    pub(crate) fn element_name(&self) -> &'static str {
        if self.is_bool() {
            "bool"
        } else if self.is_number() {
            "number"
        } else if self.is_string() {
            "string"
        } else {
            "unknown"
        }
    }

    fn numeric_content(&self) -> Option<&str> {
        match self.kind {
            PrimitiveKind::Number | PrimitiveKind::Unknown => Some(&self.content),
            _ => None,
        }
    }

    pub(crate) fn as_string(&self) -> Option<String> {
        self.is_string().then(|| self.content.clone())
    }

    pub(crate) fn as_int(&self) -> Option<i32> {
        self.numeric_content()?.parse().ok()
    }

    pub(crate) fn as_long(&self) -> Option<i64> {
        self.numeric_content()?.parse().ok()
    }

    pub(crate) fn as_double(&self) -> Option<f64> {
        parse_number(self.numeric_content()?)
    }

    pub(crate) fn as_bool(&self) -> Option<bool> {
        self.is_bool().then(|| self.content == "true")
    }
}

/// Compares decoded values, never raw text: bool with bool, number with number
/// (as `f64`), then string with string.
impl PartialEq for Primitive {
    fn eq(&self, other: &Self) -> bool {
        if self.is_bool() && other.is_bool() {
            return self.as_bool() == other.as_bool();
        }
        if self.is_number() && other.is_number() {
            return self.as_double() == other.as_double();
        }
        if self.is_string() && other.is_string() {
            return self.content == other.content;
        }
        false
    }
}
