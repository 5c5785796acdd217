//! Bearer token helpers.
//!
//! The classroom API issues JWTs. Nothing here verifies a signature: the
//! payload is only read to learn who the viewer is, and any malformed token
//! simply yields no claims.
//!
//! Sign-in responses are as inconsistent as everything else upstream, so the
//! token itself may sit under `token`, `access_token`, `data.token`,
//! `data.access_token` or `token.access_token`, with or without a `Bearer `
//! prefix.

use crate::fields::{first_string, lookup, non_empty};
use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Standard alphabet, forgiving about padding and trailing bits.
const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

const BEARER: &str = "bearer";

/// Claim names probed for the subject id.
const ID_CLAIMS: &[&str] = &["id", "_id", "userId", "sub"];

/// Fields of a sign-in response that may hold the token string.
const SIGNIN_TOKEN_PATHS: &[&str] = &["token", "access_token", "data.token", "data.access_token"];

/// Decodes the payload (second segment) of a JWT without verifying it.
///
/// Returns `None` when the token has fewer than two segments, the segment is
/// not base64url, or the decoded text is not JSON.
///
/// # Example
///
/// ```
/// use classroom_codec::decode_jwt_payload;
///
/// // {"id":"u1"}
/// let payload = decode_jwt_payload("h.eyJpZCI6InUxIn0.s").unwrap();
/// assert_eq!(payload["id"], "u1");
/// assert!(decode_jwt_payload("abc").is_none());
/// ```
#[must_use]
pub fn decode_jwt_payload(token: &str) -> Option<Value> {
    let segment = token.split('.').nth(1)?;

    let mut base64: String = segment
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    while base64.len() % 4 != 0 {
        base64.push('=');
    }

    let bytes = match LENIENT_STANDARD.decode(&base64) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to decode token payload: {}", e);
            return None;
        }
    };
    let text = String::from_utf8_lossy(&bytes);

    match serde_json::from_str(&text) {
        Ok(payload) => Some(payload),
        Err(e) => {
            warn!("Failed to parse token payload: {}", e);
            None
        }
    }
}

/// The subject of a bearer token, as far as the classroom API tells us.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject id (`id`, `_id`, `userId` or `sub`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Subject email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl TokenClaims {
    /// Reads claims from a decoded payload.
    #[must_use]
    pub fn from_payload(payload: &Value) -> Self {
        Self {
            id: non_empty(first_string(payload, ID_CLAIMS)),
            email: non_empty(first_string(payload, &["email"])),
        }
    }

    /// Decodes a token and reads its claims. `None` if the token is malformed.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        decode_jwt_payload(token).map(|payload| Self::from_payload(&payload))
    }

    /// Returns true if neither claim is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.email.is_none()
    }
}

/// Strips a leading `Bearer` scheme (any case, followed by any whitespace)
/// and trims the rest.
///
/// ```
/// use classroom_codec::token::normalize_bearer;
///
/// assert_eq!(normalize_bearer("bearer  abc.def "), Some("abc.def".into()));
/// assert_eq!(normalize_bearer("Bearer\tabc"), Some("abc".into()));
/// assert_eq!(normalize_bearer("Bearer "), None);
/// ```
#[must_use]
pub fn normalize_bearer(raw: &str) -> Option<String> {
    let without_scheme = match raw.get(..BEARER.len()) {
        Some(scheme) if scheme.eq_ignore_ascii_case(BEARER) => {
            let rest = &raw[BEARER.len()..];
            let token = rest.trim_start();
            if token.len() < rest.len() { token } else { raw }
        }
        _ => raw,
    };
    non_empty(without_scheme.trim().to_string())
}

/// Finds the bearer token in a sign-in response.
#[must_use]
pub fn extract_signin_token(payload: &Value) -> Option<String> {
    let direct = SIGNIN_TOKEN_PATHS
        .iter()
        .filter_map(|path| lookup(payload, path))
        .filter_map(Value::as_str)
        .find_map(normalize_bearer);

    direct.or_else(|| {
        lookup(payload, "token.access_token")
            .and_then(Value::as_str)
            .and_then(normalize_bearer)
    })
}

/// Finds the profile a sign-in response may carry alongside the token.
#[must_use]
pub fn extract_signin_profile(payload: &Value) -> Option<&Value> {
    ["profile", "data.profile"]
        .iter()
        .filter_map(|path| lookup(payload, path))
        .find(|profile| !profile.is_null())
}
