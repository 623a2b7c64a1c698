//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure. The router under test
//! is the real one; only the repositories are replaced by an in-memory store
//! that enforces the same constraints as the PostgreSQL schema.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::{DateTime, Utc};
use fake::faker::name::en::FirstName;
use fake::Fake;
use parking_lot::Mutex;
use serde_json::Value;
use tower::ServiceExt;

use forum_server::application::services::{
    ChatServiceImpl, MessageServiceImpl, PostServiceImpl, UserServiceImpl,
};
use forum_server::domain::{
    AccountStatus, Chat, ChatRepository, Message, MessageRepository, NewChat, NewMessage, NewPost,
    NewUser, Post, PostRepository, User, UserChanges, UserRepository, DELETED_USER_NICKNAME,
};
use forum_server::presentation::http::create_router;
use forum_server::shared::error::AppError;
use forum_server::startup::AppState;

#[derive(Default)]
struct Tables {
    sequences: BTreeMap<&'static str, i64>,
    users: BTreeMap<i64, User>,
    posts: BTreeMap<i64, Post>,
    messages: BTreeMap<i64, Message>,
    chats: BTreeMap<i64, Chat>,
    /// `(user_id, chat_id)`, the `user_x_chat` primary key
    memberships: BTreeSet<(i64, i64)>,
}

impl Tables {
    fn next_id(&mut self, table: &'static str) -> i64 {
        let id = self.sequences.entry(table).or_insert(0);
        *id += 1;
        *id
    }
}

/// In-memory stand-in for all four repositories.
///
/// Each table has its own id sequence starting at 1, like BIGSERIAL. The
/// active-email index and the foreign keys are checked on write.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn membership_count(&self, chat_id: i64) -> usize {
        self.tables
            .lock()
            .memberships
            .iter()
            .filter(|(_, chat)| *chat == chat_id)
            .count()
    }

    pub fn is_member(&self, user_id: i64, chat_id: i64) -> bool {
        self.tables.lock().memberships.contains(&(user_id, chat_id))
    }

    pub fn message_count(&self, chat_id: i64) -> usize {
        self.tables
            .lock()
            .messages
            .values()
            .filter(|m| m.chat_id == chat_id)
            .count()
    }

    /// Raw row lookup that ignores the soft-delete filter.
    pub fn user_row(&self, id: i64) -> Option<User> {
        self.tables.lock().users.get(&id).cloned()
    }
}

fn email_taken(tables: &Tables, email: &str, except: Option<i64>) -> bool {
    tables
        .users
        .values()
        .any(|u| u.is_active() && u.email.as_deref() == Some(email) && Some(u.id) != except)
}

fn unique_violation() -> AppError {
    AppError::Conflict("user email violates a uniqueness constraint".into())
}

fn fk_violation(what: &str) -> AppError {
    AppError::InvalidReference(format!("{} references a missing row", what))
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_active_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.tables.lock().users.get(&id).filter(|u| u.is_active()).cloned())
    }

    async fn find_active_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .tables
            .lock()
            .users
            .values()
            .find(|u| u.is_active() && u.email.as_deref() == Some(email))
            .cloned())
    }

    async fn list_active(&self) -> Result<Vec<User>, AppError> {
        Ok(self.tables.lock().users.values().filter(|u| u.is_active()).cloned().collect())
    }

    async fn create(&self, user: &NewUser) -> Result<User, AppError> {
        let mut tables = self.tables.lock();
        if email_taken(&tables, &user.email, None) {
            return Err(unique_violation());
        }

        let now = Utc::now();
        let created = User {
            id: tables.next_id("users"),
            nickname: user.nickname.clone(),
            email: Some(user.email.clone()),
            password_hash: user.password_hash.clone(),
            status: AccountStatus::Active,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: i64, changes: &UserChanges) -> Result<Option<User>, AppError> {
        let mut tables = self.tables.lock();
        if let Some(email) = &changes.email {
            if email_taken(&tables, email, Some(id)) {
                return Err(unique_violation());
            }
        }

        let Some(user) = tables.users.get_mut(&id).filter(|u| u.is_active()) else {
            return Ok(None);
        };
        if let Some(nickname) = &changes.nickname {
            user.nickname = nickname.clone();
        }
        if let Some(email) = &changes.email {
            user.email = Some(email.clone());
        }
        if let Some(hash) = &changes.password_hash {
            user.password_hash = hash.clone();
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn soft_delete(&self, id: i64, removed_at: DateTime<Utc>) -> Result<(), AppError> {
        let mut tables = self.tables.lock();
        if let Some(user) = tables.users.get_mut(&id).filter(|u| u.is_active()) {
            user.nickname = DELETED_USER_NICKNAME.to_string();
            user.email = None;
            user.status = AccountStatus::Deleted { removed_at };
            user.updated_at = removed_at;
        }
        tables.memberships.retain(|(user_id, _)| *user_id != id);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError> {
        Ok(self.tables.lock().posts.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Post>, AppError> {
        Ok(self.tables.lock().posts.values().cloned().collect())
    }

    async fn create(&self, post: &NewPost) -> Result<Post, AppError> {
        let mut tables = self.tables.lock();
        if !tables.users.contains_key(&post.author_id) {
            return Err(fk_violation("post author"));
        }

        let now = Utc::now();
        let created = Post {
            id: tables.next_id("posts"),
            content: post.content.clone(),
            author_id: post.author_id,
            created_at: now,
            updated_at: now,
        };
        tables.posts.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_content(&self, id: i64, content: &str) -> Result<Option<Post>, AppError> {
        Ok(self.tables.lock().posts.get_mut(&id).map(|post| {
            post.content = content.to_string();
            post.updated_at = Utc::now();
            post.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.tables.lock().posts.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl MessageRepository for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Message>, AppError> {
        Ok(self.tables.lock().messages.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Message>, AppError> {
        Ok(self.tables.lock().messages.values().cloned().collect())
    }

    async fn list_by_chat(&self, chat_id: i64) -> Result<Vec<Message>, AppError> {
        Ok(self
            .tables
            .lock()
            .messages
            .values()
            .filter(|m| m.chat_id == chat_id)
            .cloned()
            .collect())
    }

    async fn create(&self, message: &NewMessage) -> Result<Message, AppError> {
        let mut tables = self.tables.lock();
        if !tables.users.contains_key(&message.sender_id) {
            return Err(fk_violation("message sender"));
        }
        if !tables.chats.contains_key(&message.chat_id) {
            return Err(fk_violation("message chat"));
        }

        let now = Utc::now();
        let created = Message {
            id: tables.next_id("messages"),
            content: message.content.clone(),
            sender_id: message.sender_id,
            chat_id: message.chat_id,
            sent_at: now,
            updated_at: now,
        };
        tables.messages.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_content(&self, id: i64, content: &str) -> Result<Option<Message>, AppError> {
        Ok(self.tables.lock().messages.get_mut(&id).map(|message| {
            message.content = content.to_string();
            message.updated_at = Utc::now();
            message.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.tables.lock().messages.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl ChatRepository for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Chat>, AppError> {
        Ok(self.tables.lock().chats.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Chat>, AppError> {
        Ok(self.tables.lock().chats.values().cloned().collect())
    }

    async fn create(&self, chat: &NewChat) -> Result<Chat, AppError> {
        let mut tables = self.tables.lock();
        let now = Utc::now();
        let created = Chat {
            id: tables.next_id("chats"),
            name: chat.name.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.chats.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_name(&self, id: i64, name: &str) -> Result<Option<Chat>, AppError> {
        Ok(self.tables.lock().chats.get_mut(&id).map(|chat| {
            chat.name = name.to_string();
            chat.updated_at = Utc::now();
            chat.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut tables = self.tables.lock();
        tables.memberships.retain(|(_, chat_id)| *chat_id != id);
        tables.messages.retain(|_, m| m.chat_id != id);
        tables.chats.remove(&id);
        Ok(())
    }

    async fn add_member(&self, chat_id: i64, user_id: i64) -> Result<(), AppError> {
        let mut tables = self.tables.lock();
        if !tables.users.contains_key(&user_id) || !tables.chats.contains_key(&chat_id) {
            return Err(fk_violation("chat member"));
        }
        tables.memberships.insert((user_id, chat_id));
        Ok(())
    }

    async fn list_members(&self, chat_id: i64) -> Result<Vec<User>, AppError> {
        let tables = self.tables.lock();
        Ok(tables
            .memberships
            .iter()
            .filter(|(_, chat)| *chat == chat_id)
            .filter_map(|(user_id, _)| tables.users.get(user_id))
            .filter(|u| u.is_active())
            .cloned()
            .collect())
    }
}

/// Test application builder
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
}

impl TestApp {
    /// Build the real router over a fresh in-memory store
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::default());

        let state = AppState {
            users: Arc::new(UserServiceImpl::new(store.clone())),
            posts: Arc::new(PostServiceImpl::new(store.clone(), store.clone())),
            messages: Arc::new(MessageServiceImpl::new(store.clone(), store.clone(), store.clone())),
            chats: Arc::new(ChatServiceImpl::new(store.clone(), store.clone())),
        };

        Self {
            router: create_router(state),
            store,
        }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<String>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        TestResponse::from_response(response).await
    }

    /// Make a GET request to the application
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body.to_string())).await
    }

    /// Make a POST request with a raw body, for malformed JSON cases
    pub async fn post_raw(&self, uri: &str, body: &str) -> TestResponse {
        self.send(Method::POST, uri, Some(body.to_string())).await
    }

    /// Make a PUT request with JSON body
    pub async fn put_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(Method::PUT, uri, Some(body.to_string())).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None).await
    }

    /// Register a user and return its id
    pub async fn create_user(&self, email: &str) -> i64 {
        let response = self
            .post_json(
                "/user",
                &serde_json::json!({
                    "nickname": nickname(),
                    "email": email,
                    "password": "password123",
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        response.id()
    }

    pub async fn create_chat(&self, name: &str) -> i64 {
        let response = self.post_json("/chat", &serde_json::json!({ "name": name })).await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        response.id()
    }
}

/// Status and parsed JSON body of a response
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub content_type: Option<String>,
    pub text: String,
}

impl TestResponse {
    async fn from_response(response: Response) -> Self {
        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8_lossy(&bytes).into_owned();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        Self {
            status,
            body,
            content_type,
            text,
        }
    }

    pub fn id(&self) -> i64 {
        self.body["id"].as_i64().expect("response body has no id")
    }

    pub fn error(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }

    /// Ids of a JSON array body
    pub fn ids(&self) -> Vec<i64> {
        self.body
            .as_array()
            .expect("response body is not an array")
            .iter()
            .filter_map(|item| item["id"].as_i64())
            .collect()
    }
}

/// Generate a unique test email
pub fn unique_email() -> String {
    format!("test_{}@example.com", uuid::Uuid::new_v4().simple())
}

/// Generate a test nickname
pub fn nickname() -> String {
    FirstName().fake()
}
