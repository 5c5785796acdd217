//! Shared types and the normalization pipeline behind `classroom-inspect`.
//!
//! The binary only parses arguments and does file I/O; everything between the
//! raw bytes and the printed JSON lives here so it can be tested directly.

use anyhow::{bail, Context, Result};
use classroom_codec::{
    extract_signin_profile, extract_signin_token, interpret_payload, map_like_result, map_members,
    map_profile, map_status, map_status_list, parse_json, RawPayload, TokenClaims,
    ViewerIdentifiers,
};
use classroom_types::{ClassroomMember, ProfileSummary, StatusItem};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Which classroom endpoint a payload came from.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// `GET status`: a feed of statuses.
    Statuses,
    /// `POST status`: one freshly created status.
    Status,
    /// `GET class/{year}`: the member directory.
    Members,
    /// `GET profile`: the signed-in user.
    Profile,
    /// `POST`/`DELETE like`: a like toggle result.
    Like,
    /// `POST signin`: a token and possibly the signed-in profile.
    Login,
}

/// Normalized output, shaped the way the web layer returns it.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Normalized {
    Statuses(Vec<StatusItem>),
    Status(Option<StatusItem>),
    Members(Vec<ClassroomMember>),
    Profile(Option<ProfileSummary>),
    Session(SignInSession),
}

/// What a sign-in response yields: the bearer token, whatever its payload
/// says about the subject, and the profile if one came along.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SignInSession {
    pub token: String,
    pub claims: Option<TokenClaims>,
    pub profile: Option<ProfileSummary>,
}

/// Everything needed to normalize one payload.
#[derive(Debug, Clone)]
pub struct InspectRequest {
    pub kind: PayloadKind,
    pub http_status: u16,
    pub content_type: Option<String>,
    /// Overrides the charset of `content_type`.
    pub charset: Option<String>,
    /// Extra identifiers the viewer is known by.
    pub viewer: Vec<String>,
    pub token: Option<String>,
    /// Raw body of the viewer's `profile` response.
    pub viewer_profile: Option<Vec<u8>>,
    pub status_id: Option<String>,
    pub liked: bool,
}

impl InspectRequest {
    /// A request for a successful response of the given kind with no viewer.
    #[must_use]
    pub fn new(kind: PayloadKind) -> Self {
        Self {
            kind,
            http_status: 200,
            content_type: None,
            charset: None,
            viewer: Vec::new(),
            token: None,
            viewer_profile: None,
            status_id: None,
            liked: false,
        }
    }

    fn payload(&self, body: &[u8]) -> RawPayload {
        match &self.charset {
            Some(charset) => RawPayload::new(body, Some(charset.clone())),
            None => RawPayload::from_content_type(body, self.content_type.as_deref()),
        }
    }
}

/// Builds the viewer identifier set the way the web layer does: the viewer's
/// own profile and token claims, plus any explicitly supplied identifiers.
pub fn build_viewer(request: &InspectRequest) -> ViewerIdentifiers {
    let claims = request.token.as_deref().and_then(TokenClaims::from_token);
    if request.token.is_some() && claims.is_none() {
        warn!("Token could not be decoded, ignoring its claims");
    }

    let profile = request
        .viewer_profile
        .as_deref()
        .and_then(|bytes| match parse_json(bytes, None) {
            Ok(raw) => Some(map_profile(&raw)),
            Err(e) => {
                warn!("Viewer profile lookup failed: {}", e);
                None
            }
        });

    let from_sources = ViewerIdentifiers::from_sources(profile.as_ref(), claims.as_ref());
    let viewer: ViewerIdentifiers = from_sources
        .iter()
        .chain(request.viewer.iter().map(String::as_str))
        .collect();
    debug!("Viewer known by {} identifier(s)", viewer.len());
    viewer
}

/// Normalizes one response body.
///
/// # Errors
///
/// Fails when the upstream status is not a success, when the body is not
/// JSON, when a `like` payload is given without a status id, or when a
/// sign-in response carries no token.
pub fn run(request: &InspectRequest, body: &[u8]) -> Result<Normalized> {
    let raw = interpret_payload(
        request.http_status,
        &format!("HTTP {}", request.http_status),
        &request.payload(body),
    )
    .context("Failed to read classroom payload")?;

    let raw = match (raw, request.kind) {
        (Some(raw), _) => raw,
        // A like toggle is still a status even when upstream echoes nothing,
        // and an empty sign-in is reported as missing its token.
        (None, PayloadKind::Like | PayloadKind::Login) => Value::Null,
        (None, kind) => {
            info!("Payload is empty");
            return Ok(match kind {
                PayloadKind::Statuses => Normalized::Statuses(Vec::new()),
                PayloadKind::Members => Normalized::Members(Vec::new()),
                PayloadKind::Profile => Normalized::Profile(None),
                _ => Normalized::Status(None),
            });
        }
    };

    let viewer = build_viewer(request);
    let normalized = match request.kind {
        PayloadKind::Statuses => Normalized::Statuses(map_status_list(&raw, &viewer)),
        PayloadKind::Status => Normalized::Status(Some(map_status(&raw, &viewer))),
        PayloadKind::Members => Normalized::Members(map_members(&raw)),
        PayloadKind::Profile => Normalized::Profile(Some(map_profile(&raw))),
        PayloadKind::Like => {
            let Some(status_id) = request.status_id.as_deref() else {
                bail!("--status-id is required for like payloads");
            };
            Normalized::Status(Some(map_like_result(&raw, status_id, request.liked, &viewer)))
        }
        PayloadKind::Login => Normalized::Session(sign_in(&raw)?),
    };
    info!("Normalized {:?} payload ({} bytes)", request.kind, body.len());
    Ok(normalized)
}

fn sign_in(raw: &Value) -> Result<SignInSession> {
    let Some(token) = extract_signin_token(raw) else {
        bail!("Sign-in response carries no token");
    };
    let claims = TokenClaims::from_token(&token).filter(|claims| !claims.is_empty());
    let profile = extract_signin_profile(raw).map(map_profile);
    debug!("Sign-in token found (profile included: {})", profile.is_some());
    Ok(SignInSession {
        token,
        claims,
        profile,
    })
}

/// Serializes the output for printing.
///
/// # Errors
///
/// Fails only if serialization itself fails.
pub fn render(normalized: &Normalized, pretty: bool) -> Result<String> {
    let value: Value = serde_json::to_value(normalized).context("Failed to serialize output")?;
    let text = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(text)
}
