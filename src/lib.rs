//! sockbot - a pluggable bot runtime for discussion forums
//!
//! Modules register commands and notification hooks; the bootstrap pipeline
//! decides which of them run and in what order.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod modules;

pub use application::errors::{BotError, CommandError, ConfigError, PluginError};
pub use application::services::{Bootstrap, StartedBot};
pub use domain::traits::{ForumConnector, ForumSession, NotificationDispatcher, SockModule};
