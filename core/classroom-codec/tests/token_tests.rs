use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use classroom_codec::token::{
    extract_signin_profile, extract_signin_token, normalize_bearer,
};
use classroom_codec::{decode_jwt_payload, TokenClaims};
use serde_json::json;

fn make_token(payload: &serde_json::Value) -> String {
    let body = URL_SAFE_NO_PAD.encode(serde_json::to_vec(payload).unwrap());
    format!("eyJhbGciOiJIUzI1NiJ9.{body}.signature")
}

// ── decode_jwt_payload ───────────────────────────────────────────

#[test]
fn decodes_unpadded_base64url_payload() {
    let payload = json!({"id": "u1", "email": "u1@kku.ac.th", "name": "ทดสอบ?>"});
    assert_eq!(decode_jwt_payload(&make_token(&payload)), Some(payload));
}

#[test]
fn decodes_two_segment_token() {
    let token = make_token(&json!({"id": "u1"}));
    let two: String = token.rsplit_once('.').unwrap().0.to_string();
    assert_eq!(decode_jwt_payload(&two).unwrap()["id"], "u1");
}

#[test]
fn malformed_tokens_yield_none() {
    assert_eq!(decode_jwt_payload("abc"), None);
    assert_eq!(decode_jwt_payload(""), None);
    assert_eq!(decode_jwt_payload("a."), None);
    assert_eq!(decode_jwt_payload("a.!!!!.c"), None);
    // valid base64, not JSON
    let not_json = URL_SAFE_NO_PAD.encode(b"hello");
    assert_eq!(decode_jwt_payload(&format!("a.{not_json}.c")), None);
}

// ── TokenClaims ──────────────────────────────────────────────────

#[test]
fn claims_from_token() {
    let token = make_token(&json!({"id": "u1", "email": "u1@x"}));
    let claims = TokenClaims::from_token(&token).unwrap();
    assert_eq!(claims.id.as_deref(), Some("u1"));
    assert_eq!(claims.email.as_deref(), Some("u1@x"));
    assert!(!claims.is_empty());
}

#[test]
fn claims_fall_back_to_sub() {
    let claims = TokenClaims::from_payload(&json!({"sub": 99}));
    assert_eq!(claims.id.as_deref(), Some("99"));
    assert_eq!(claims.email, None);
}

#[test]
fn claims_from_unrelated_payload_are_empty() {
    assert!(TokenClaims::from_payload(&json!({"iat": 1})).is_empty());
    assert!(TokenClaims::from_token("abc").is_none());
}

// ── Sign-in helpers ──────────────────────────────────────────────

#[test]
fn bearer_prefix_is_stripped() {
    assert_eq!(normalize_bearer("Bearer abc"), Some("abc".into()));
    assert_eq!(normalize_bearer("BEARER   abc "), Some("abc".into()));
    assert_eq!(normalize_bearer("abc"), Some("abc".into()));
    assert_eq!(normalize_bearer("   "), None);
    assert_eq!(normalize_bearer("ไทย"), Some("ไทย".into()));
}

#[test]
fn bearer_scheme_accepts_any_whitespace_separator() {
    assert_eq!(normalize_bearer("Bearer\tabc"), Some("abc".into()));
    assert_eq!(normalize_bearer("bearer\n  abc"), Some("abc".into()));
    assert_eq!(normalize_bearer("Bearer\u{00A0}abc"), Some("abc".into()));
    assert_eq!(normalize_bearer("Bearerabc"), Some("Bearerabc".into()));
    assert_eq!(normalize_bearer("Bearer"), Some("Bearer".into()));
    assert_eq!(normalize_bearer("Bearer \t"), None);
}

#[test]
fn signin_token_locations() {
    assert_eq!(extract_signin_token(&json!({"token": "t1"})), Some("t1".into()));
    assert_eq!(extract_signin_token(&json!({"access_token": "Bearer t2"})), Some("t2".into()));
    assert_eq!(extract_signin_token(&json!({"data": {"token": "t3"}})), Some("t3".into()));
    assert_eq!(
        extract_signin_token(&json!({"data": {"access_token": "t4"}})),
        Some("t4".into())
    );
    assert_eq!(
        extract_signin_token(&json!({"token": {"access_token": "t5"}})),
        Some("t5".into())
    );
}

#[test]
fn signin_token_skips_blank_candidates() {
    let payload = json!({"token": " ", "data": {"token": "t3"}});
    assert_eq!(extract_signin_token(&payload), Some("t3".into()));
    assert_eq!(extract_signin_token(&json!({"message": "ok"})), None);
}

#[test]
fn signin_profile_locations() {
    assert_eq!(
        extract_signin_profile(&json!({"profile": {"_id": "u1"}})),
        Some(&json!({"_id": "u1"}))
    );
    assert_eq!(
        extract_signin_profile(&json!({"profile": null, "data": {"profile": "u2"}})),
        Some(&json!("u2"))
    );
    assert_eq!(extract_signin_profile(&json!({})), None);
}
