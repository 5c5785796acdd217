//! Ordered field probing over untyped JSON.

use rand::Rng;
use serde_json::Value;

const TOKEN_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const TOKEN_LEN: usize = 11;

/// Stringifies scalars. Strings pass through; numbers and booleans are
/// rendered; null, arrays and objects become the empty string.
pub(crate) fn safe_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Looks up a dotted path (`education.studentId`) on an object.
pub(crate) fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, key| current.as_object()?.get(key))
}

/// Returns the first candidate path whose value is present and not null.
///
/// A present-but-unusable value (an object where a string was expected)
/// still stops the probe; it is stringified to empty by the caller.
pub(crate) fn first_present<'a>(value: &'a Value, paths: &[&str]) -> Option<&'a Value> {
    paths
        .iter()
        .filter_map(|path| lookup(value, path))
        .find(|v| !v.is_null())
}

/// [`first_present`] followed by [`safe_string`]; absent yields empty.
pub(crate) fn first_string(value: &Value, paths: &[&str]) -> String {
    first_present(value, paths).map(safe_string).unwrap_or_default()
}

/// Returns `Some(s)` for non-empty strings.
pub(crate) fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

/// A short random lowercase base-36 token for synthesized ids.
pub(crate) fn random_token() -> String {
    let mut rng = rand::thread_rng();
    (0..TOKEN_LEN)
        .map(|_| char::from(TOKEN_ALPHABET[rng.gen_range(0..TOKEN_ALPHABET.len())]))
        .collect()
}
