use classroom_codec::{
    map_comment, map_like_result, map_members, map_profile, map_status, map_status_list,
    ViewerIdentifiers,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn nobody() -> ViewerIdentifiers {
    ViewerIdentifiers::anonymous()
}

// ── map_profile ──────────────────────────────────────────────────

#[test]
fn profile_from_full_record() {
    let p = map_profile(&json!({
        "_id": "u1",
        "email": "a@kku.ac.th",
        "firstname": "Somchai",
        "lastname": "Jaidee",
        "education": {"studentId": "653380001-1", "enrollmentYear": "2022"},
        "image": "https://img/u1.png"
    }));
    assert_eq!(p.id, "u1");
    assert_eq!(p.email, "a@kku.ac.th");
    assert_eq!(p.full_name, "Somchai Jaidee");
    assert_eq!(p.student_id.as_deref(), Some("653380001-1"));
    assert_eq!(p.class_year, Some(2022));
    assert_eq!(p.avatar_url.as_deref(), Some("https://img/u1.png"));
    assert!(p.company.is_none() && p.school.is_none() && p.teacher.is_none());
}

#[test]
fn profile_field_precedence() {
    let p = map_profile(&json!({
        "id": "second",
        "_id": "first",
        "username": "user@x",
        "fullName": "Display",
        "firstname": "Ignored",
        "class_year": 2020,
        "enrollmentYear": 2019,
        "studentId": "S-1"
    }));
    assert_eq!(p.id, "first");
    assert_eq!(p.email, "user@x");
    assert_eq!(p.full_name, "Display");
    assert_eq!(p.class_year, Some(2020));
    assert_eq!(p.student_id.as_deref(), Some("S-1"));
}

#[test]
fn profile_synthesizes_id_from_names() {
    let p = map_profile(&json!({"firstname": "A", "lastname": "B"}));
    assert!(!p.id.is_empty());
    assert_eq!(p.full_name, "A B");
}

#[test]
fn profile_id_falls_back_to_email() {
    let p = map_profile(&json!({"email": "x@y.z"}));
    assert_eq!(p.id, "x@y.z");
    assert_eq!(p.full_name, "x@y.z");
}

#[test]
fn profile_from_empty_record_gets_random_id() {
    let a = map_profile(&json!({}));
    let b = map_profile(&json!(null));
    assert!(!a.id.is_empty());
    assert!(!b.id.is_empty());
    assert_ne!(a.id, b.id);
    assert_eq!(a.full_name, a.id);
}

#[test]
fn profile_from_scalars() {
    let by_email = map_profile(&json!("someone@kku.ac.th"));
    assert_eq!(by_email.id, "someone@kku.ac.th");
    assert_eq!(by_email.email, "someone@kku.ac.th");
    assert_eq!(by_email.full_name, "someone@kku.ac.th");

    let by_id = map_profile(&json!("u42"));
    assert_eq!(by_id.id, "u42");
    assert_eq!(by_id.email, "");

    let numeric = map_profile(&json!(42));
    assert_eq!(numeric.id, "42");
    assert_eq!(numeric.full_name, "42");
}

#[test]
fn profile_non_numeric_class_year_is_absent() {
    let p = map_profile(&json!({"_id": "u", "class_year": "ปี 3"}));
    assert_eq!(p.class_year, None);
}

#[test]
fn profile_numeric_id_is_stringified() {
    let p = map_profile(&json!({"id": 1001}));
    assert_eq!(p.id, "1001");
}

// ── map_comment ──────────────────────────────────────────────────

#[test]
fn comment_fields() {
    let c = map_comment(
        &json!({
            "_id": "c1",
            "content": "nice",
            "createdAt": "2024-05-01T10:00:00.000Z",
            "createdBy": {"_id": "u2", "email": "u2@x"}
        }),
        "s1",
    );
    assert_eq!(c.id, "c1");
    assert_eq!(c.status_id, "s1");
    assert_eq!(c.body, "nice");
    assert_eq!(c.created_at, "2024-05-01T10:00:00.000Z");
    assert_eq!(c.owner.id, "u2");
}

#[test]
fn comment_synthesizes_id_and_timestamp() {
    let c = map_comment(&json!({"text": "hey"}), "s9");
    assert!(c.id.starts_with("s9-"));
    assert!(c.id.len() > "s9-".len());
    assert_eq!(c.body, "hey");
    assert!(chrono::DateTime::parse_from_rfc3339(&c.created_at).is_ok());
}

#[test]
fn comment_unwraps_envelope_and_owner_scalar() {
    let c = map_comment(&json!({"data": {"id": "c2", "body": "b", "user": "u7"}}), "s1");
    assert_eq!(c.id, "c2");
    assert_eq!(c.owner.id, "u7");
}

// ── map_status ───────────────────────────────────────────────────

#[test]
fn status_like_count_and_viewer_flag() {
    let raw = json!({"_id": "s1", "likes": ["u1", {"_id": "u2"}]});
    let s = map_status(&raw, &ViewerIdentifiers::new(["U2"]));
    assert_eq!(s.like_count, 2);
    assert!(s.is_liked);
}

#[test]
fn status_like_count_is_distinct_resolved_identifiers() {
    let raw = json!({"_id": "s1", "like": ["U1", "u1", {"email": "u1"}, null, 3, ""]});
    let s = map_status(&raw, &nobody());
    assert_eq!(s.like_count, 1);
    assert!(!s.is_liked);
}

#[test]
fn status_likes_may_be_enveloped() {
    let raw = json!({"_id": "s1", "favorites": {"data": [{"userId": "me"}]}});
    let s = map_status(&raw, &ViewerIdentifiers::new(["ME"]));
    assert_eq!(s.like_count, 1);
    assert!(s.is_liked);
}

#[test]
fn status_viewer_not_in_likes() {
    let raw = json!({"_id": "s1", "likes": ["u1"]});
    let s = map_status(&raw, &ViewerIdentifiers::new(["u2", "u2@x"]));
    assert!(!s.is_liked);
}

#[test]
fn status_comments_point_back_to_status() {
    let raw = json!({
        "_id": "s1",
        "content": "hello",
        "comments": [{"_id": "c1", "content": "a"}, {"_id": "c2", "content": "b"}]
    });
    let s = map_status(&raw, &nobody());
    let bodies: Vec<&str> = s.comments.iter().map(|c| c.body.as_str()).collect();
    assert_eq!(bodies, vec!["a", "b"]);
    assert!(s.comments.iter().all(|c| c.status_id == "s1"));
}

#[test]
fn status_without_id_gets_one() {
    let s = map_status(&json!({"content": "x"}), &nobody());
    assert!(!s.id.is_empty());
    assert_eq!(s.like_count, 0);
    assert!(s.comments.is_empty());
}

#[test]
fn status_owners_are_independent_copies() {
    let raw = json!([
        {"_id": "s1", "owner": {"_id": "u1"}},
        {"_id": "s2", "owner": {"_id": "u1"}}
    ]);
    let mut list = map_status_list(&raw, &nobody());
    assert_eq!(list[0].owner, list[1].owner);
    list[0].owner.full_name = "changed".into();
    assert_ne!(list[0].owner, list[1].owner);
}

// ── map_status_list ──────────────────────────────────────────────

#[test]
fn status_list_single_enveloped_object() {
    let raw = json!({"data": {"_id": "s1", "content": "hi", "comment": [{"content": "ok"}]}});
    let list = map_status_list(&raw, &nobody());
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, "s1");
    assert_eq!(list[0].body, "hi");
    assert_eq!(list[0].comments.len(), 1);
    assert_eq!(list[0].comments[0].body, "ok");
}

#[test]
fn status_list_under_statuses_key() {
    let raw = json!({"result": {"statuses": [{"_id": "a"}, {"_id": "b"}]}});
    let ids: Vec<String> = map_status_list(&raw, &nobody()).into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn status_list_from_bare_array() {
    let raw = json!([{"_id": "a", "likes": ["me"]}, {"_id": "b"}]);
    let list = map_status_list(&raw, &ViewerIdentifiers::new(["me"]));
    assert_eq!(list.len(), 2);
    assert!(list[0].is_liked);
    assert!(!list[1].is_liked);
}

#[test]
fn status_list_without_entity_is_empty() {
    assert!(map_status_list(&json!([]), &nobody()).is_empty());
    assert!(map_status_list(&json!(null), &nobody()).is_empty());
    assert!(map_status_list(&json!([null]), &nobody()).is_empty());
}

#[test]
fn status_list_wraps_any_other_payload_as_one_status() {
    for raw in [json!({}), json!({"data": []}), json!("ok"), json!({"statuses": null})] {
        let list = map_status_list(&raw, &nobody());
        assert_eq!(list.len(), 1, "payload {raw}");
        assert!(!list[0].id.is_empty());
        assert_eq!(list[0].like_count, 0);
        assert!(list[0].comments.is_empty());
    }
}

// ── map_like_result ──────────────────────────────────────────────

#[test]
fn like_result_overrides_id_and_flag() {
    let raw = json!({"data": {"likes": ["u1", "u2"]}});
    let s = map_like_result(&raw, "s5", true, &nobody());
    assert_eq!(s.id, "s5");
    assert!(s.is_liked);
    assert_eq!(s.like_count, 2);

    let s = map_like_result(&json!({"message": "ok"}), "s5", false, &ViewerIdentifiers::new(["u1"]));
    assert_eq!(s.id, "s5");
    assert!(!s.is_liked);
}

// ── map_members ──────────────────────────────────────────────────

#[test]
fn members_with_contact_and_bio() {
    let raw = json!({"data": {"members": [
        {"_id": "u1", "firstname": "A", "lastname": "B", "phone": "080", "about": "hi"},
        {"_id": "u2", "email": "u2@x", "contact": "", "bio": null}
    ]}});
    let members = map_members(&raw);
    assert_eq!(members.len(), 2);
    assert_eq!(members[0].profile.full_name, "A B");
    assert_eq!(members[0].contact.as_deref(), Some("080"));
    assert_eq!(members[0].bio.as_deref(), Some("hi"));
    assert_eq!(members[1].contact, None);
    assert_eq!(members[1].bio, None);
}

#[test]
fn members_from_non_list_is_empty() {
    assert!(map_members(&json!({"_id": "u1"})).is_empty());
    assert!(map_members(&json!(null)).is_empty());
}

#[test]
fn members_from_scalar_entries() {
    let members = map_members(&json!(["u1", "x@y.z"]));
    assert_eq!(members[0].profile.id, "u1");
    assert_eq!(members[1].profile.email, "x@y.z");
    assert_eq!(members[1].contact, None);
}
