//! Post API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{unique_email, TestApp};

#[tokio::test]
async fn test_add_post_with_unknown_author_inserts_nothing() {
    let app = TestApp::new();
    let before = app.get("/post/list/").await;

    let response = app
        .post_json("/post", &json!({ "content": "hello", "author_id": 999 }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "no such author with this id");
    assert_eq!(app.get("/post/list/").await.body, before.body);
}

#[tokio::test]
async fn test_add_post_by_deleted_user_is_rejected() {
    let app = TestApp::new();
    let author = app.create_user(&unique_email()).await;
    app.delete(&format!("/user/{}", author)).await;

    let response = app
        .post_json("/post", &json!({ "content": "hello", "author_id": author }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_post_crud() {
    let app = TestApp::new();
    let author = app.create_user(&unique_email()).await;

    let created = app
        .post_json("/post", &json!({ "content": "first", "author_id": author }))
        .await;
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.body["author_id"], author);
    let id = created.id();

    let fetched = app.get(&format!("/post/{}", id)).await;
    assert_eq!(fetched.body["content"], "first");

    let updated = app
        .put_json(&format!("/post/{}", id), &json!({ "content": "edited" }))
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["content"], "edited");
    assert_eq!(updated.body["author_id"], author);

    let deleted = app.delete(&format!("/post/{}", id)).await;
    assert_eq!(deleted.body, json!({ "message": "successfully deleted" }));
    assert_eq!(app.get(&format!("/post/{}", id)).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_cannot_change_author() {
    let app = TestApp::new();
    let author = app.create_user(&unique_email()).await;
    let other = app.create_user(&unique_email()).await;
    let id = app
        .post_json("/post", &json!({ "content": "mine", "author_id": author }))
        .await
        .id();

    let updated = app
        .put_json(
            &format!("/post/{}", id),
            &json!({ "content": "still mine", "author_id": other }),
        )
        .await;

    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["author_id"], author);
}

#[tokio::test]
async fn test_list_posts_ordered_by_id() {
    let app = TestApp::new();
    let author = app.create_user(&unique_email()).await;
    for content in ["one", "two", "three"] {
        app.post_json("/post", &json!({ "content": content, "author_id": author }))
            .await;
    }

    assert_eq!(app.get("/post/list/").await.ids(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_update_missing_post_is_404() {
    let app = TestApp::new();

    let response = app.put_json("/post/5", &json!({ "content": "x" })).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_post_is_ok() {
    let app = TestApp::new();

    assert_eq!(app.delete("/post/77").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_post_id_is_400() {
    let app = TestApp::new();

    let response = app.delete("/post/first").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "invalid post id");
}
