//! Domain traits - Abstractions for infrastructure implementations

pub mod forum;
pub mod module;
pub mod random;

pub use forum::{ForumConnector, ForumSession, NotificationDispatcher};
pub use module::{ModuleConfiguration, DEFAULT_PRIORITY, ModuleContext, NotifyOutcome, SockModule};
pub use random::RandomSource;
