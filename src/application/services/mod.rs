//! Application Services
//!
//! The validation layer over the repositories: uniqueness of active emails,
//! existence of referenced users and chats, soft-delete visibility.
//!
//! ## Available Services
//!
//! - **UserService**: registration, profile updates, soft delete
//! - **PostService**: post CRUD with author checks
//! - **ChatService**: chat CRUD, cascade delete, membership
//! - **MessageService**: message CRUD with sender/chat checks

pub mod chat_service;
pub mod message_service;
pub mod post_service;
pub mod user_service;

pub use chat_service::{ChatError, ChatService, ChatServiceImpl};
pub use message_service::{CreateMessageDto, MessageError, MessageService, MessageServiceImpl};
pub use post_service::{CreatePostDto, PostError, PostService, PostServiceImpl};
pub use user_service::{CreateUserDto, UpdateUserDto, UserError, UserService, UserServiceImpl};
