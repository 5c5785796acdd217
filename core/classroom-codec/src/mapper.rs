//! Typed records from untyped classroom JSON.
//!
//! Every mapper is total. Fields are read by probing an ordered list of
//! candidate names (the upstream renamed most of them at least once), and
//! identity fields are synthesized when nothing usable was sent.

use crate::fields::{first_present, first_string, non_empty, random_token, safe_string};
use crate::identity::{resolve_like_set, ViewerIdentifiers};
use crate::shape::{extract_entity, extract_list};
use chrono::{SecondsFormat, Utc};
use classroom_types::{ClassroomMember, Comment, ProfileSummary, StatusItem};
use serde_json::Value;
use tracing::debug;

const PROFILE_ID: &[&str] = &["_id", "id", "userId", "profileId"];
const PROFILE_EMAIL: &[&str] = &["email", "username", "mail"];
const PROFILE_FULL_NAME: &[&str] = &["full_name", "fullName"];
const PROFILE_FIRST_NAME: &[&str] = &["firstname", "first_name", "firstName"];
const PROFILE_LAST_NAME: &[&str] = &["lastname", "last_name", "lastName"];
const PROFILE_STUDENT_ID: &[&str] = &["student_id", "studentId", "education.studentId"];
const PROFILE_CLASS_YEAR: &[&str] = &["class_year", "education.enrollmentYear", "enrollmentYear"];
const PROFILE_AVATAR: &[&str] = &["avatar_url", "image", "avatar", "profileImage"];

const COMMENT_ID: &[&str] = &["_id", "id", "comment_id"];
const STATUS_ID: &[&str] = &["_id", "id", "status_id"];
const BODY: &[&str] = &["content", "body", "message", "text"];
const CREATED_AT: &[&str] = &["createdAt", "created_at", "timestamp"];
const OWNER: &[&str] = &["createdBy", "owner", "user"];

const LIKE_KEYS: &[&str] = &["like", "likes", "favorites"];
const COMMENT_KEYS: &[&str] = &["comment", "comments"];

const MEMBER_CONTACT: &[&str] = &["contact", "phone", "mobile"];
const MEMBER_BIO: &[&str] = &["bio", "about"];

static EMPTY_RECORD: Value = Value::Null;

/// Maps a profile.
///
/// Scalars (an id or an email on its own) become a degenerate profile whose
/// id and name are the scalar itself. Objects are probed field by field; the
/// id falls back to the email, then the full name, then a random token, so it
/// is never empty.
#[must_use]
pub fn map_profile(raw: &Value) -> ProfileSummary {
    match raw {
        Value::String(_) | Value::Number(_) | Value::Bool(_) => {
            let text = safe_string(raw);
            let email = if raw.is_string() && text.contains('@') {
                text.clone()
            } else {
                String::new()
            };
            ProfileSummary::new(text.clone(), email, text)
        }
        Value::Null | Value::Array(_) | Value::Object(_) => map_profile_record(raw),
    }
}

fn map_profile_record(source: &Value) -> ProfileSummary {
    let email = first_string(source, PROFILE_EMAIL);
    let full_name = match first_present(source, PROFILE_FULL_NAME) {
        Some(name) => safe_string(name),
        None => {
            let first = first_string(source, PROFILE_FIRST_NAME);
            let last = first_string(source, PROFILE_LAST_NAME);
            format!("{first} {last}").trim().to_string()
        }
    };

    let id = [first_string(source, PROFILE_ID), email.clone(), full_name.clone()]
        .into_iter()
        .find(|candidate| !candidate.is_empty())
        .unwrap_or_else(random_token);
    let full_name = [full_name, email.clone()]
        .into_iter()
        .find(|candidate| !candidate.is_empty())
        .unwrap_or_else(|| id.clone());

    let mut profile = ProfileSummary::new(id, email, full_name);
    profile.student_id = non_empty(first_string(source, PROFILE_STUDENT_ID));
    profile.class_year = parse_class_year(&first_string(source, PROFILE_CLASS_YEAR));
    profile.avatar_url = non_empty(first_string(source, PROFILE_AVATAR));
    profile
}

/// Non-numeric and zero years are treated as absent.
fn parse_class_year(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    let year = raw.parse::<i32>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|y| y.is_finite() && y.fract() == 0.0 && y.abs() <= f64::from(i32::MAX))
            .map(|y| y as i32)
    })?;
    (year != 0).then_some(year)
}

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Maps a comment belonging to `status_id`.
///
/// A missing id is synthesized as `{status_id}-{random}`; a missing timestamp
/// becomes the current time.
#[must_use]
pub fn map_comment(raw: &Value, status_id: &str) -> Comment {
    let source = extract_entity(raw).unwrap_or(&EMPTY_RECORD);

    let id = match first_present(source, COMMENT_ID) {
        Some(id) => safe_string(id),
        None => format!("{status_id}-{}", random_token()),
    };

    Comment {
        id,
        status_id: status_id.to_string(),
        body: first_string(source, BODY),
        created_at: created_at(source),
        owner: owner(source),
    }
}

fn created_at(source: &Value) -> String {
    match first_present(source, CREATED_AT) {
        Some(ts) => safe_string(ts),
        None => now_iso(),
    }
}

fn owner(source: &Value) -> ProfileSummary {
    map_profile(first_present(source, OWNER).unwrap_or(&EMPTY_RECORD))
}

/// Maps a status, computing `like_count` and `is_liked` for `viewer`.
///
/// Like entries may be id strings, emails or user objects; they are resolved
/// to canonical identifiers and de-duplicated. `like_count` is the size of
/// that set, not the length of the upstream array.
#[must_use]
pub fn map_status(raw: &Value, viewer: &ViewerIdentifiers) -> StatusItem {
    let record = extract_entity(raw).unwrap_or(&EMPTY_RECORD);

    let id = match first_present(record, STATUS_ID) {
        Some(id) => safe_string(id),
        None => random_token(),
    };

    let likes = first_present(record, LIKE_KEYS)
        .map(|entries| resolve_like_set(extract_list(entries, LIKE_KEYS)))
        .unwrap_or_default();

    let comments = first_present(record, COMMENT_KEYS)
        .map(|entries| extract_list(entries, COMMENT_KEYS))
        .unwrap_or_default()
        .iter()
        .map(|comment| map_comment(comment, &id))
        .collect();

    StatusItem {
        body: first_string(record, BODY),
        created_at: created_at(record),
        owner: owner(record),
        like_count: likes.len(),
        is_liked: viewer.has_liked(&likes),
        comments,
        id,
    }
}

/// Maps a status feed.
///
/// Lists are looked for under `statuses` and the usual envelopes. When none
/// is found, whatever entity the payload carries is mapped as one status, so
/// a single-object response is not dropped. Only `null` and empty arrays
/// yield no statuses.
#[must_use]
pub fn map_status_list(raw: &Value, viewer: &ViewerIdentifiers) -> Vec<StatusItem> {
    let list = extract_list(raw, &["statuses"]);
    if !list.is_empty() {
        return list.iter().map(|item| map_status(item, viewer)).collect();
    }

    match extract_entity(raw) {
        Some(entity) => {
            debug!("No status list found, mapping payload as a single status");
            vec![map_status(entity, viewer)]
        }
        None => Vec::new(),
    }
}

/// Maps the response to a like or unlike call.
///
/// The upstream may echo the status, an envelope or nothing useful at all,
/// so the caller's `status_id` and requested `liked` state override whatever
/// was mapped.
#[must_use]
pub fn map_like_result(raw: &Value, status_id: &str, liked: bool, viewer: &ViewerIdentifiers) -> StatusItem {
    let mut status = map_status(raw, viewer);
    status.id = status_id.to_string();
    status.is_liked = liked;
    for comment in &mut status.comments {
        comment.status_id = status_id.to_string();
    }
    status
}

/// Maps a classroom member directory.
#[must_use]
pub fn map_members(raw: &Value) -> Vec<ClassroomMember> {
    extract_list(raw, &["members"])
        .iter()
        .map(|item| {
            let mut member = ClassroomMember::new(map_profile(item));
            member.contact = non_empty(first_string(item, MEMBER_CONTACT));
            member.bio = non_empty(first_string(item, MEMBER_BIO));
            member
        })
        .collect()
}
