//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::track_metrics;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(user_routes())
        .merge(post_routes())
        .merge(message_routes())
        .merge(chat_routes())
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .route_layer(middleware::from_fn(track_metrics))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user", post(handlers::user::add_user))
        .route("/user/list/", get(handlers::user::get_all_users))
        .route(
            "/user/{id}",
            get(handlers::user::get_user)
                .put(handlers::user::update_user)
                .delete(handlers::user::delete_user),
        )
}

fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/post", post(handlers::post::add_post))
        .route("/post/list/", get(handlers::post::get_all_posts))
        .route(
            "/post/{id}",
            get(handlers::post::get_post)
                .put(handlers::post::update_post)
                .delete(handlers::post::delete_post),
        )
}

fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/message", post(handlers::message::add_message))
        .route("/message/list/", get(handlers::message::get_all_messages))
        .route(
            "/message/{id}",
            get(handlers::message::get_message)
                .put(handlers::message::update_message)
                .delete(handlers::message::delete_message),
        )
}

fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(handlers::chat::add_chat))
        .route("/chat/list/", get(handlers::chat::get_all_chats))
        .route(
            "/chat/{id}",
            get(handlers::chat::get_chat)
                .put(handlers::chat::update_chat)
                .delete(handlers::chat::delete_chat),
        )
        .route(
            "/chat/{id}/members",
            get(handlers::chat::get_members).post(handlers::chat::add_member),
        )
        .route("/chat/{id}/messages", get(handlers::chat::get_messages))
}
