//! Message handling - explicit commands and passive notification hooks

pub mod bridge;
pub mod dispatcher;
pub mod parser;

pub use bridge::{provenance_suffix, reply_with_command, DispatchReport, NotificationBridge, ReactPolicy};
pub use dispatcher::CommandDispatcher;
pub use parser::{CommandParser, Invocation, ParsedCommand};
