//! Canonical identifiers and viewer-relative like matching.
//!
//! Upstream "like" lists mix raw user-id strings, emails and embedded user
//! objects. Everything is reduced to a trimmed, lowercase identifier so that
//! membership tests don't care which representation or casing was used.

use crate::fields::safe_string;
use crate::token::TokenClaims;
use classroom_types::ProfileSummary;
use serde_json::Value;
use std::collections::HashSet;

/// Object fields probed, in order, for an identifier.
const IDENTITY_FIELDS: &[&str] = &["_id", "id", "userId", "email"];

/// Resolves one "who is this" value to a canonical identifier.
///
/// - string → trimmed and lowercased, `None` if empty
/// - object → the first non-empty of `_id`, `id`, `userId`, `email`
/// - anything else → `None`
///
/// # Example
///
/// ```
/// use classroom_codec::resolve_identifier;
/// use serde_json::json;
///
/// assert_eq!(resolve_identifier(&json!("  A@B.com ")), Some("a@b.com".into()));
/// assert_eq!(resolve_identifier(&json!({"_id": "", "id": 7})), Some("7".into()));
/// assert_eq!(resolve_identifier(&json!(7)), None);
/// ```
#[must_use]
pub fn resolve_identifier(entry: &Value) -> Option<String> {
    match entry {
        Value::String(s) => canonical(s),
        Value::Object(record) => IDENTITY_FIELDS
            .iter()
            .filter_map(|field| record.get(*field))
            .find_map(|candidate| canonical(&safe_string(candidate))),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::Array(_) => None,
    }
}

/// Builds a set of canonical identifiers, dropping empty values.
pub fn as_identifier_set<'a>(values: impl IntoIterator<Item = &'a str>) -> HashSet<String> {
    values.into_iter().filter_map(canonical).collect()
}

/// Resolves every like entry and de-duplicates the result.
///
/// The set's size is what a status reports as its like count; unresolvable
/// entries and repeats are not counted.
pub fn resolve_like_set(entries: &[Value]) -> HashSet<String> {
    entries.iter().filter_map(resolve_identifier).collect()
}

fn canonical(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// The identifiers under which the requesting viewer may appear in a like
/// list: profile id, profile email, token-subject id and token-subject email.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerIdentifiers(HashSet<String>);

impl ViewerIdentifiers {
    /// Creates a viewer set from raw identifier strings.
    pub fn new<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        Self(as_identifier_set(values))
    }

    /// A viewer nobody can match; every status maps with `is_liked == false`.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Collects identifiers from the viewer's mapped profile and decoded
    /// token claims.
    ///
    /// Pass `None` for the profile when the profile lookup failed; the token
    /// claims alone are then used.
    #[must_use]
    pub fn from_sources(profile: Option<&ProfileSummary>, claims: Option<&TokenClaims>) -> Self {
        let from_profile = profile
            .into_iter()
            .flat_map(|p| [Some(p.id.as_str()), p.email()]);
        let from_claims = claims
            .into_iter()
            .flat_map(|c| [c.id.as_deref(), c.email.as_deref()]);
        Self::new(from_profile.chain(from_claims).flatten())
    }

    /// Returns true if `identifier` names this viewer (case and whitespace
    /// insensitive).
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        canonical(identifier).is_some_and(|id| self.0.contains(&id))
    }

    /// Returns true if any viewer identifier appears in `likes`.
    #[must_use]
    pub fn has_liked(&self, likes: &HashSet<String>) -> bool {
        !self.0.is_disjoint(likes)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<'a> FromIterator<&'a str> for ViewerIdentifiers {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self::new(iter)
    }
}
