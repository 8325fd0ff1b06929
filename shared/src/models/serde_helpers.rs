//! Lenient serde helpers for values written by other clients or older drafts

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accept a record id as string or number, normalising to a string.
pub fn flexible_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

/// Same as [`flexible_id`] for ids that must be present.
pub fn required_flexible_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    flexible_id(deserializer)?.ok_or_else(|| serde::de::Error::custom("missing id"))
}

/// Treat `null`, `""` and unknown variants as "not chosen yet".
///
/// Form selects start out as an empty string, so a draft saved before the
/// user picked an option holds `""` rather than a valid variant.
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(v) => serde_json::from_value(v).ok(),
    })
}
