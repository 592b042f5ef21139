//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Commands: text transforms and the command adapter
//! - Errors: Bot, command, config and module errors
//! - Messaging: Command parsing, dispatch, notification bridge
//! - Services: Bootstrap pipeline

pub mod commands;
pub mod errors;
pub mod messaging;
pub mod services;
