//! Response normalization for the classroom API.
//!
//! The upstream classroom service is inconsistent about almost everything it
//! sends back. This crate turns whatever arrives into the records defined in
//! `classroom-types`:
//! - [`charset`]: byte decoding with a Thai-legacy-aware fallback chain
//! - [`shape`]: envelope unwrapping (`data`, `result`, `items`, ...)
//! - [`identity`]: canonical identifiers and viewer-relative like matching
//! - [`mapper`]: typed records built from untyped JSON
//! - [`token`]: best-effort bearer token and sign-in payload helpers
//! - [`payload`]: raw response bodies to JSON
//!
//! # Failure model
//!
//! Decoding, unwrapping and mapping are total: ambiguous charsets, unexpected
//! nesting and missing identity fields all degrade to a best-effort value.
//! The only error surfaced is a body that is not JSON under any attempted
//! charset (plus, for [`payload::interpret_response`], a non-success status).
//!
//! Nothing here performs I/O or holds mutable state; every function can be
//! called from any thread.

pub mod charset;
mod error;
mod fields;
pub mod identity;
pub mod mapper;
pub mod payload;
pub mod shape;
pub mod token;

pub use charset::{decode, decode_thai_legacy};
pub use error::{CodecError, CodecResult};
pub use identity::{as_identifier_set, resolve_identifier, ViewerIdentifiers};
pub use mapper::{
    map_comment, map_like_result, map_members, map_profile, map_status, map_status_list,
};
pub use payload::{
    charset_from_content_type, interpret_payload, interpret_response, parse_json, RawPayload,
};
pub use shape::{extract_entity, extract_list};
pub use token::{
    decode_jwt_payload, extract_signin_profile, extract_signin_token, normalize_bearer,
    TokenClaims,
};
