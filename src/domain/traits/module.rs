use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::sync::Arc;

use super::ForumSession;
use crate::application::errors::BotError;
use crate::domain::entities::{CommandContext, CommandTable, NotificationEvent};
use crate::infrastructure::config::Config;

/// Priority given to modules that do not declare one
pub const DEFAULT_PRIORITY: i64 = 50;

static NO_COMMANDS: Lazy<CommandTable> = Lazy::new(CommandTable::new);

/// Author-declared configuration defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleConfiguration {
    pub enabled: bool,
}

impl ModuleConfiguration {
    pub fn disabled() -> Self {
        Self { enabled: false }
    }
}

/// How a module answered a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    Handled,
    Ignored,
}

/// Collaborators handed to every hook invocation
#[derive(Clone)]
pub struct ModuleContext {
    pub session: Arc<dyn ForumSession>,
    pub config: Arc<Config>,
}

impl ModuleContext {
    pub fn new(session: Arc<dyn ForumSession>, config: Arc<Config>) -> Self {
        Self { session, config }
    }

    /// Command context scoped to one module's table
    pub fn commands<'a>(&self, table: &'a CommandTable) -> CommandContext<'a> {
        CommandContext::new(Arc::clone(&self.session), table)
    }
}

/// Contract every bot module implements
#[async_trait]
pub trait SockModule: Send + Sync {
    /// Unique identifier, also the key under `modules` in the config file
    fn name(&self) -> &str;

    fn version(&self) -> &str;

    /// Lower starts earlier; `None` falls back to [`DEFAULT_PRIORITY`]
    fn priority(&self) -> Option<i64> {
        None
    }

    fn description(&self) -> &str {
        ""
    }

    /// `None` means the module declares no defaults at all
    fn configuration(&self) -> Option<ModuleConfiguration> {
        None
    }

    fn commands(&self) -> &CommandTable {
        &NO_COMMANDS
    }

    /// Called once after login, in priority order. The default does nothing
    async fn begin(&self, _ctx: &ModuleContext) -> Result<(), BotError> {
        Ok(())
    }

    /// Passive reaction to an inbound notification. The default ignores it
    async fn on_notify(
        &self,
        _event: &NotificationEvent,
        _ctx: &ModuleContext,
    ) -> Result<NotifyOutcome, BotError> {
        Ok(NotifyOutcome::Ignored)
    }
}
