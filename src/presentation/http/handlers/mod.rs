//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints. Each handler parses the path
//! and body, calls exactly one service operation and maps the outcome.

pub mod chat;
pub mod health;
pub mod message;
pub mod post;
pub mod user;
