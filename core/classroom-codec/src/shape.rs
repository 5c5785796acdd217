//! Envelope unwrapping for payloads of unknown shape.
//!
//! Depending on endpoint and API version, the same record arrives bare, as a
//! one-element array, or nested under `data`, `result`, `items` and friends.
//! Both extractors are total: absence yields an empty slice or `None`, never
//! an error.

use serde_json::Value;

/// Envelope keys probed for lists, after any caller-supplied keys.
pub const LIST_ENVELOPE_KEYS: &[&str] = &["data", "result", "results", "items", "records", "rows", "list"];

/// Envelope keys probed for single entities.
pub const ENTITY_ENVELOPE_KEYS: &[&str] = &["data", "result", "status", "item"];

/// Extracts a list of entities.
///
/// Arrays are returned as-is. Objects are probed under `extra_keys` and then
/// [`LIST_ENVELOPE_KEYS`]; the first present key whose own extraction is
/// non-empty wins. Anything else yields an empty slice.
///
/// # Example
///
/// ```
/// use classroom_codec::extract_list;
/// use serde_json::json;
///
/// let raw = json!({"data": {"statuses": [1, 2]}});
/// assert_eq!(extract_list(&raw, &["statuses"]).len(), 2);
/// assert!(extract_list(&json!("nope"), &[]).is_empty());
/// ```
pub fn extract_list<'a>(value: &'a Value, extra_keys: &[&str]) -> &'a [Value] {
    match value {
        Value::Array(items) => items.as_slice(),
        Value::Object(record) => extra_keys
            .iter()
            .chain(LIST_ENVELOPE_KEYS)
            .filter_map(|key| record.get(*key))
            .map(|nested| extract_list(nested, extra_keys))
            .find(|nested| !nested.is_empty())
            .unwrap_or(&[]),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => &[],
    }
}

/// Extracts a single entity.
///
/// - null → `None`
/// - array → its first element (not unwrapped further), `None` if empty or
///   null
/// - object → the first non-null entity found under
///   [`ENTITY_ENVELOPE_KEYS`], otherwise the object itself
/// - scalar → itself
pub fn extract_entity(value: &Value) -> Option<&Value> {
    match value {
        Value::Null => None,
        Value::Array(items) => items.first().filter(|first| !first.is_null()),
        Value::Object(record) => ENTITY_ENVELOPE_KEYS
            .iter()
            .filter_map(|key| record.get(*key))
            .find_map(extract_entity)
            .or(Some(value)),
        Value::Bool(_) | Value::Number(_) | Value::String(_) => Some(value),
    }
}
