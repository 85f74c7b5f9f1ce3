use serde::{Deserialize, Serialize};

/// Behavior switches for a [`Codec`](crate::Codec).
///
/// Missing fields take their default when deserialized, so a partial config
/// document only needs the options it changes.
///
/// ```
/// use fluent_json::CodecConfig;
///
/// let config: CodecConfig = serde_json::from_str(r#"{"pretty": true}"#).unwrap();
/// assert!(config.pretty);
/// assert!(config.bare_scalars);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Indent printed output
    pub pretty: bool,
    /// Accept top-level text that is not valid JSON as an unparsed scalar
    pub bare_scalars: bool,
    /// Skip object members that are still unwritten placeholders when printing
    pub omit_placeholders: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            bare_scalars: true,
            omit_placeholders: false,
        }
    }
}
