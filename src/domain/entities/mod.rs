//! Domain entities - Core business objects with no external dependencies

pub mod command;
pub mod notification;
pub mod payload;
pub mod user;

pub use command::{handler_fn, Command, CommandContext, CommandHandler, CommandResult, CommandTable};
pub use notification::{Notification, NotificationEvent, NotificationKind, Post, Topic};
pub use payload::Payload;
pub use user::User;
