//! Raw response bodies to JSON.
//!
//! The request layer hands over the bytes it received, the `Content-Type`
//! header and the status code. This module picks the charset, decodes and
//! parses, and turns failed responses into a readable [`CodecError`].

use crate::charset;
use crate::error::{CodecError, CodecResult};
use crate::fields::non_empty;
use serde_json::Value;
use tracing::warn;

const NO_CONTENT: u16 = 204;

/// Extracts the `charset=` parameter of a `Content-Type` header value.
///
/// The parameter name is matched case-insensitively anywhere in the header;
/// the value is trimmed, unquoted and lowercased.
///
/// ```
/// use classroom_codec::charset_from_content_type;
///
/// assert_eq!(
///     charset_from_content_type("application/json; Charset=\"TIS-620\""),
///     Some("tis-620".into())
/// );
/// assert_eq!(charset_from_content_type("application/json"), None);
/// ```
#[must_use]
pub fn charset_from_content_type(content_type: &str) -> Option<String> {
    let lower = content_type.to_ascii_lowercase();
    let start = lower.find("charset=")? + "charset=".len();
    let value = lower[start..].split(';').next().unwrap_or_default();
    non_empty(value.trim().trim_matches('"').trim().to_string())
}

/// Decodes `bytes` with the fallback chain and parses the text as JSON.
///
/// # Errors
///
/// Returns [`CodecError::InvalidJson`] when the decoded text is not JSON.
pub fn parse_json(bytes: &[u8], charset_hint: Option<&str>) -> CodecResult<Value> {
    let text = charset::decode(bytes, charset_hint);
    Ok(serde_json::from_str(&text)?)
}

/// A response body as received, with the charset its transport declared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPayload {
    pub bytes: Vec<u8>,
    pub charset: Option<String>,
}

impl RawPayload {
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>, charset: Option<String>) -> Self {
        Self {
            bytes: bytes.into(),
            charset,
        }
    }

    /// Builds a payload, reading the charset from a `Content-Type` header.
    #[must_use]
    pub fn from_content_type(bytes: impl Into<Vec<u8>>, content_type: Option<&str>) -> Self {
        Self::new(bytes, content_type.and_then(charset_from_content_type))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Decodes the body to text. Never fails.
    #[must_use]
    pub fn decode_text(&self) -> String {
        charset::decode(&self.bytes, self.charset.as_deref())
    }

    /// Decodes and parses the body.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidJson`] when the body is not JSON.
    pub fn parse_json(&self) -> CodecResult<Value> {
        parse_json(&self.bytes, self.charset.as_deref())
    }
}

/// Interprets a complete upstream response.
///
/// - non-2xx: [`CodecError::Upstream`] carrying the body's `message` or
///   `error` string, else the trimmed body text, else `status_text`
/// - 204 or an empty body: `Ok(None)`
/// - otherwise the parsed JSON body
///
/// # Errors
///
/// Returns [`CodecError::Upstream`] for failed responses and
/// [`CodecError::InvalidJson`] for a successful response whose body is not
/// JSON.
pub fn interpret_response(
    status: u16,
    status_text: &str,
    content_type: Option<&str>,
    bytes: &[u8],
) -> CodecResult<Option<Value>> {
    interpret_payload(status, status_text, &RawPayload::from_content_type(bytes, content_type))
}

/// [`interpret_response`] for a body whose charset is already known.
///
/// # Errors
///
/// Same as [`interpret_response`].
pub fn interpret_payload(status: u16, status_text: &str, payload: &RawPayload) -> CodecResult<Option<Value>> {
    if !(200..300).contains(&status) {
        let message = upstream_message(payload).unwrap_or_else(|| status_text.to_string());
        warn!("Classroom API responded with {}: {}", status, message);
        return Err(CodecError::Upstream { status, message });
    }

    if payload.is_empty() || status == NO_CONTENT {
        return Ok(None);
    }

    payload.parse_json().map(Some)
}

fn upstream_message(payload: &RawPayload) -> Option<String> {
    if payload.is_empty() {
        return None;
    }

    let text = payload.decode_text();
    let from_json = serde_json::from_str::<Value>(&text).ok().and_then(|body| {
        ["message", "error"]
            .iter()
            .filter_map(|key| body.get(*key))
            .filter_map(Value::as_str)
            .find_map(|msg| non_empty(msg.trim().to_string()))
    });

    from_json.or_else(|| non_empty(text.trim().to_string()))
}
