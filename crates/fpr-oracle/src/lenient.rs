//! Tolerant decoding for booleans that models sometimes emit as strings.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolOrText {
    Bool(bool),
    Text(String),
}

/// Parse `"true"` / `"false"` (case-insensitive, trimmed).
pub(crate) fn parse_bool_text(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Accept a JSON bool or the strings `"true"` / `"false"`.
pub(crate) fn bool_or_text<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match BoolOrText::deserialize(deserializer)? {
        BoolOrText::Bool(b) => Ok(b),
        BoolOrText::Text(s) => parse_bool_text(&s).ok_or_else(|| {
            serde::de::Error::custom(format!("expected a boolean, got string {s:?}"))
        }),
    }
}
