//! # Domain Entities
//!
//! Core domain entities representing the main business objects of the forum.
//! All entities map directly to their corresponding database tables.
//!
//! - **User**: registered account, soft deleted rather than removed
//! - **Post**: forum post written by a user
//! - **Chat**: named conversation with members (`user_x_chat`)
//! - **Message**: text sent by a user into a chat
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod chat;
mod message;
mod post;
mod user;

pub use chat::{Chat, ChatRepository, NewChat};
pub use message::{Message, MessageRepository, NewMessage};
pub use post::{NewPost, Post, PostRepository};
pub use user::{AccountStatus, NewUser, User, UserChanges, UserRepository, DELETED_USER_NICKNAME};

#[cfg(test)]
pub use chat::MockChatRepository;
#[cfg(test)]
pub use message::MockMessageRepository;
#[cfg(test)]
pub use post::MockPostRepository;
#[cfg(test)]
pub use user::MockUserRepository;
