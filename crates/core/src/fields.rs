//! Serde helper functions for form and JSON field deserialization.
//!
//! Browser forms and multipart bodies send empty strings for fields the user
//! left blank. These helpers collapse blank values to `None` so validation
//! only has to reason about present/absent.

use serde::{Deserialize, Deserializer};

/// Deserialize an optional string, treating empty strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

/// Deserialize an optional scalar as text.
///
/// Accepts strings and JSON numbers (so `"7"` and `7` both become `Some("7")`).
/// Blank strings become None.
pub fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<TextOrNumber> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(TextOrNumber::Text(s)) if !s.trim().is_empty() => Some(s),
        Some(TextOrNumber::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
