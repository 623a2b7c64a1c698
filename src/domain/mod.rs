//! # Domain Layer
//!
//! The domain layer contains the entities of the forum and the repository
//! contracts the rest of the crate is written against. It is independent of
//! any external frameworks or infrastructure concerns.
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository traits define data access contracts
//! - Soft-deleted users are filtered inside the user repository, nowhere else

pub mod entities;

// Re-export commonly used types
pub use entities::*;
