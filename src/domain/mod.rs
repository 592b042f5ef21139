//! Domain layer - Core bot objects and the seams to the outside world
//!
//! This layer contains:
//! - Entities: Payload, Post, Notification, Command, User
//! - Traits: Abstractions for collaborators (ForumSession, SockModule, RandomSource)

pub mod entities;
pub mod traits;
