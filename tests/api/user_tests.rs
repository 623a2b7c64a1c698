//! User API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

use crate::common::{nickname, unique_email, TestApp};

#[tokio::test]
async fn test_add_user_returns_stored_row() {
    let app = TestApp::new();
    let email = unique_email();

    let response = app
        .post_json(
            "/user",
            &json!({ "nickname": "alice", "email": email, "password": "password123" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.id(), 1);
    assert_eq!(response.body["nickname"], "alice");
    assert_eq!(response.body["email"], email.as_str());
    assert_eq!(response.body["status"]["state"], "active");
    assert!(response.body["created_at"].is_string());
}

#[tokio::test]
async fn test_user_json_never_contains_password() {
    let app = TestApp::new();
    let id = app.create_user(&unique_email()).await;

    let response = app.get(&format!("/user/{}", id)).await;

    assert!(!response.text.contains("password"));
    assert!(!response.text.contains("argon2"));
}

#[tokio::test]
async fn test_password_is_stored_hashed() {
    let app = TestApp::new();
    let id = app.create_user(&unique_email()).await;

    let row = app.store.user_row(id).unwrap();
    assert!(row.password_hash.starts_with("$argon2"));
    assert!(forum_server::shared::password::verify_password("password123", &row.password_hash));
}

#[tokio::test]
async fn test_get_user_after_add() {
    let app = TestApp::new();
    let email = unique_email();
    let name = nickname();
    let created = app
        .post_json(
            "/user",
            &json!({ "nickname": name, "email": email, "password": "password123" }),
        )
        .await;

    let fetched = app.get(&format!("/user/{}", created.id())).await;

    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body, created.body);
}

#[tokio::test]
async fn test_duplicate_active_email_is_rejected() {
    let app = TestApp::new();
    let email = unique_email();
    app.create_user(&email).await;

    let response = app
        .post_json(
            "/user",
            &json!({ "nickname": "copy", "email": email, "password": "password123" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "user with this email already registered");
    assert_eq!(app.get("/user/list/").await.ids().len(), 1);
}

/// AddUser(a@x.com) -> 1; again -> 400; DeleteUser(1); AddUser(a@x.com) -> new id
#[tokio::test]
async fn test_email_is_reusable_after_soft_delete() {
    let app = TestApp::new();
    let body = json!({ "nickname": "a", "email": "a@x.com", "password": "password123" });

    let first = app.post_json("/user", &body).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.id(), 1);

    let again = app.post_json("/user", &body).await;
    assert_eq!(again.status, StatusCode::BAD_REQUEST);

    let deleted = app.delete("/user/1").await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body, json!({ "message": "successfully deleted" }));

    let reused = app.post_json("/user", &body).await;
    assert_eq!(reused.status, StatusCode::OK);
    assert_ne!(reused.id(), 1);
}

#[tokio::test]
async fn test_deleted_user_is_hidden() {
    let app = TestApp::new();
    let kept = app.create_user(&unique_email()).await;
    let removed = app.create_user(&unique_email()).await;

    app.delete(&format!("/user/{}", removed)).await;

    let response = app.get(&format!("/user/{}", removed)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error(), "no user with this id");
    assert_eq!(app.get("/user/list/").await.ids(), vec![kept]);
}

#[tokio::test]
async fn test_soft_delete_scrubs_row() {
    let app = TestApp::new();
    let id = app.create_user(&unique_email()).await;

    app.delete(&format!("/user/{}", id)).await;

    let row = app.store.user_row(id).unwrap();
    assert_eq!(row.nickname, "Deleted user");
    assert_eq!(row.email, None);
    assert!(!row.is_active());
}

#[tokio::test]
async fn test_delete_user_is_idempotent() {
    let app = TestApp::new();
    let id = app.create_user(&unique_email()).await;

    app.delete(&format!("/user/{}", id)).await;
    let first_removal = app.store.user_row(id).unwrap().status;

    let again = app.delete(&format!("/user/{}", id)).await;
    assert_eq!(again.status, StatusCode::OK);
    assert_eq!(app.store.user_row(id).unwrap().status, first_removal);

    let unknown = app.delete("/user/4242").await;
    assert_eq!(unknown.status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_user_drops_memberships_but_keeps_posts() {
    let app = TestApp::new();
    let user = app.create_user(&unique_email()).await;
    let chat = app.create_chat("general").await;
    app.post_json(&format!("/chat/{}/members", chat), &json!({ "user_id": user }))
        .await;
    let post = app
        .post_json("/post", &json!({ "content": "hello", "author_id": user }))
        .await;

    app.delete(&format!("/user/{}", user)).await;

    assert!(!app.store.is_member(user, chat));
    assert_eq!(app.get(&format!("/post/{}", post.id())).await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_user_fields() {
    let app = TestApp::new();
    let id = app.create_user(&unique_email()).await;
    let new_email = unique_email();

    let response = app
        .put_json(
            &format!("/user/{}", id),
            &json!({ "nickname": "renamed", "email": new_email }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["nickname"], "renamed");
    assert_eq!(response.body["email"], new_email.as_str());
}

#[tokio::test]
async fn test_update_user_to_taken_email_is_rejected() {
    let app = TestApp::new();
    let taken = unique_email();
    app.create_user(&taken).await;
    let id = app.create_user(&unique_email()).await;

    let response = app
        .put_json(&format!("/user/{}", id), &json!({ "email": taken }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "user with this email already registered");
}

#[tokio::test]
async fn test_update_user_keeping_own_email() {
    let app = TestApp::new();
    let email = unique_email();
    let id = app.create_user(&email).await;

    let response = app
        .put_json(&format!("/user/{}", id), &json!({ "email": email, "nickname": "same" }))
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_missing_user_is_404() {
    let app = TestApp::new();

    let response = app.put_json("/user/99", &json!({ "nickname": "ghost" })).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[test_case("abc" ; "not a number")]
#[test_case("0" ; "zero")]
#[test_case("-5" ; "negative")]
#[test_case("%FF" ; "not utf8")]
#[tokio::test]
async fn test_malformed_user_id_is_400(raw: &str) {
    let app = TestApp::new();

    let response = app.get(&format!("/user/{}", raw)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "invalid user id");
    assert_eq!(response.content_type.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let app = TestApp::new();

    let response = app.post_raw("/user", "{\"nickname\": ").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "json is invalid");
}

#[test_case(json!({ "nickname": "a", "email": "nope", "password": "password123" }) ; "bad email")]
#[test_case(json!({ "nickname": "", "email": "a@x.com", "password": "password123" }) ; "empty nickname")]
#[test_case(json!({ "nickname": "a", "email": "a@x.com", "password": "short" }) ; "short password")]
#[tokio::test]
async fn test_invalid_user_fields_are_400(body: serde_json::Value) {
    let app = TestApp::new();

    let response = app.post_json("/user", &body).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.get("/user/list/").await.ids().is_empty());
}

#[tokio::test]
async fn test_empty_update_leaves_user_unchanged() {
    let app = TestApp::new();
    let email = unique_email();
    let id = app.create_user(&email).await;

    let response = app.put_json(&format!("/user/{}", id), &json!({})).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["email"], email.as_str());
}
