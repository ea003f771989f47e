//! core::schema
//!
//! Declaration and alias file schemas.
//!
//! # Declaration File (`OWNERS`)
//!
//! ```yaml
//! no_inherit: true
//! approvers:
//!   - alice
//!   - admins        # alias name, expanded at resolution time
//! reviewers:
//!   - bob
//! required_reviewers:
//!   - charlie
//! ```
//!
//! # Alias File (`OWNERS_ALIASES`)
//!
//! ```yaml
//! aliases:
//!   admins:
//!     - dave
//!     - ellen
//! ```
//!
//! Missing keys decode to empty lists / `false`. An empty document, or one that
//! holds only comments or a `---` marker, decodes to the zero value rather than
//! an error. Unknown keys are ignored. Only the first document of a file is
//! read, and names are always strings, even ones that look like numbers.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::DirectoryOptions;

/// Errors from decoding declaration or alias documents.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to parse document: {0}")]
    Parse(String),

    #[error("document is not valid UTF-8")]
    InvalidUtf8,
}

/// A decoded declaration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnersConfig {
    /// Inheritance options, inlined at the top level of the document.
    #[serde(flatten)]
    pub options: DirectoryOptions,

    #[serde(deserialize_with = "nullable_list", skip_serializing_if = "Vec::is_empty")]
    pub approvers: Vec<String>,

    #[serde(deserialize_with = "nullable_list", skip_serializing_if = "Vec::is_empty")]
    pub reviewers: Vec<String>,

    #[serde(deserialize_with = "nullable_list", skip_serializing_if = "Vec::is_empty")]
    pub required_reviewers: Vec<String>,
}

/// `approvers:` with no entries is a null node in YAML; read it as an empty list.
fn nullable_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A decoded alias file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AliasesConfig {
    pub aliases: BTreeMap<String, Vec<String>>,
}

/// Decode a declaration document.
///
/// # Example
///
/// ```
/// use repoowners::core::schema::parse_owners;
///
/// let config = parse_owners("no_inherit: true\napprovers:\n- alice\n").unwrap();
/// assert!(config.options.no_inheritance);
/// assert_eq!(config.approvers, vec!["alice"]);
///
/// assert_eq!(parse_owners("---").unwrap(), Default::default());
/// ```
pub fn parse_owners(text: &str) -> Result<OwnersConfig, SchemaError> {
    decode(text)
}

/// Decode an alias document.
pub fn parse_aliases(text: &str) -> Result<AliasesConfig, SchemaError> {
    decode(text)
}

/// Decode raw file bytes as a declaration document.
pub fn parse_owners_bytes(bytes: &[u8]) -> Result<OwnersConfig, SchemaError> {
    parse_owners(std::str::from_utf8(bytes).map_err(|_| SchemaError::InvalidUtf8)?)
}

/// Decode raw file bytes as an alias document.
pub fn parse_aliases_bytes(bytes: &[u8]) -> Result<AliasesConfig, SchemaError> {
    parse_aliases(std::str::from_utf8(bytes).map_err(|_| SchemaError::InvalidUtf8)?)
}

/// Decode the first YAML document of `text` straight into `T`.
///
/// Scalars are read with the target type in hand, so `12345` in a name list
/// stays the string `"12345"`. Documents after the first are ignored.
fn decode<T>(text: &str) -> Result<T, SchemaError>
where
    T: DeserializeOwned + Default,
{
    if is_blank_document(text) {
        return Ok(T::default());
    }
    let Some(document) = serde_yaml::Deserializer::from_str(text).next() else {
        return Ok(T::default());
    };
    let decoded = Option::<T>::deserialize(document).map_err(|e| SchemaError::Parse(e.to_string()))?;
    Ok(decoded.unwrap_or_default())
}

/// True if the document holds nothing but whitespace, comments and markers.
fn is_blank_document(text: &str) -> bool {
    text.lines().map(str::trim).all(|line| {
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}
