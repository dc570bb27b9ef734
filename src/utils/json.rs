// ABOUTME: Case-insensitive JSON decoding helpers for loosely-cased inbound payloads
// ABOUTME: Folds object keys to lowercase so serde structs can match Title, title or TITLE alike

//! Helpers for decoding JSON whose field casing is not under our control.
//!
//! LLM providers answer with `Title`, `title` or `TITLE` depending on the
//! model's mood, and API clients send whatever their serializer prefers. The
//! data model therefore decodes from a key-folded [`Value`]: every object key
//! is lower-cased recursively and the structs declare lowercase names for
//! deserialization.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Recursively lowercase every object key in `value`
#[must_use]
pub fn fold_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, inner)| (key.to_lowercase(), fold_keys(inner)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(fold_keys).collect()),
        other => other,
    }
}

/// Decode an already-parsed JSON value into `T` with case-insensitive field matching
///
/// # Errors
///
/// Returns the underlying `serde_json` error when `value` does not
/// structurally match `T`.
pub fn from_value_case_insensitive<T: DeserializeOwned>(value: Value) -> serde_json::Result<T> {
    serde_json::from_value(fold_keys(value))
}

/// Deserialize `null` as the type's default instead of failing
///
/// # Errors
///
/// Propagates any error other than an explicit `null`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fold_keys_is_recursive() {
        let folded = fold_keys(json!({
            "Title": "Soup",
            "Nutrition": { "ProteinGrams": 1.5 },
            "Steps": [{ "Text": "stir" }]
        }));

        assert_eq!(folded["title"], "Soup");
        assert_eq!(folded["nutrition"]["proteingrams"], 1.5);
        assert_eq!(folded["steps"][0]["text"], "stir");
    }

    #[test]
    fn test_fold_keys_leaves_values_untouched() {
        let folded = fold_keys(json!({ "Key": "MiXeD Value" }));
        assert_eq!(folded["key"], "MiXeD Value");
    }
}
