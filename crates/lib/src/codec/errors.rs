//! Error types raised at the codec boundary.
//!
//! These cover text parsing and printing, host value classification and
//! decoding subtrees back into host values.

use std::{error::Error as StdError, sync::Arc};

use thiserror::Error;

/// Structured failures from parsing, printing and host value conversion.
#[non_exhaustive]
#[derive(Debug, Clone, Error)]
pub enum CodecError {
    /// The text parser rejected its input
    #[error("Unable to parse JSON: {reason}")]
    ParseFailure {
        reason: String,
        #[source]
        source: Arc<dyn StdError + Send + Sync>,
    },

    /// No transformer claimed the value and the default classifier cannot represent it
    #[error("Unsupported value of type {type_name}: {reason}")]
    UnsupportedValue { type_name: String, reason: String },

    /// A subtree could not be decoded into the requested host type
    #[error("Unable to decode {type_name}: {reason}")]
    DecodeFailed { type_name: String, reason: String },

    /// The tree could not be rendered as text
    #[error("Unable to print JSON: {reason}")]
    PrintFailed { reason: String },

    /// The process default codec can only be installed once
    #[error("Default codec already set")]
    GlobalAlreadySet,
}

impl CodecError {
    pub(crate) fn parse_failure(err: impl StdError + Send + Sync + 'static) -> Self {
        CodecError::ParseFailure {
            reason: err.to_string(),
            source: Arc::new(err),
        }
    }

    /// Check if this error came from the text parser
    pub fn is_parse_error(&self) -> bool {
        matches!(self, CodecError::ParseFailure { .. })
    }

    /// Check if this error reports a value the codec cannot represent
    pub fn is_unsupported(&self) -> bool {
        matches!(self, CodecError::UnsupportedValue { .. })
    }

    /// Check if this error came from decoding into a host type
    pub fn is_decode_error(&self) -> bool {
        matches!(self, CodecError::DecodeFailed { .. })
    }
}

impl From<CodecError> for crate::Error {
    fn from(err: CodecError) -> Self {
        crate::Error::Codec(err)
    }
}
