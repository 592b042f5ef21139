use async_trait::async_trait;
use std::sync::Arc;

use super::module::{ModuleContext, SockModule};
use crate::application::errors::BotError;
use crate::domain::entities::User;
use crate::infrastructure::config::Config;

/// Forum session - abstraction over the discussion-forum client
#[async_trait]
pub trait ForumSession: Send + Sync {
    /// Log in; `None` means the forum did not accept the credentials
    async fn authenticate(&self) -> Result<Option<User>, BotError>;

    /// Reply to a post
    async fn create_post(&self, topic_id: u64, post_number: u64, text: &str) -> Result<(), BotError>;

    /// Audit output
    fn log(&self, message: &str);
}

/// Delivers inbound notifications to the started modules
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn begin(
        &self,
        modules: Vec<Arc<dyn SockModule>>,
        ctx: ModuleContext,
    ) -> Result<(), BotError>;
}

/// Builds the forum collaborators once the configuration is known
pub trait ForumConnector: Send + Sync {
    fn session(&self, config: &Config) -> Result<Arc<dyn ForumSession>, BotError>;

    fn notifier(&self, config: &Config) -> Result<Arc<dyn NotificationDispatcher>, BotError>;
}
