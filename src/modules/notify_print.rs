//! NotifyPrint - system module that logs every inbound notification

use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::domain::entities::NotificationEvent;
use crate::domain::traits::{ModuleContext, NotifyOutcome, SockModule};

#[derive(Debug, Default)]
pub struct NotifyPrint;

impl NotifyPrint {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SockModule for NotifyPrint {
    fn name(&self) -> &str {
        "NotifyPrint"
    }

    fn version(&self) -> &str {
        "0.1.0"
    }

    fn priority(&self) -> Option<i64> {
        Some(0)
    }

    fn description(&self) -> &str {
        "Prints notifications as they arrive"
    }

    async fn on_notify(&self, event: &NotificationEvent, _ctx: &ModuleContext) -> Result<NotifyOutcome, BotError> {
        let from = event.notification.username.as_deref().unwrap_or("someone");
        tracing::info!(
            "Notification {} from {} on {}#{}",
            event.kind.as_str(),
            from,
            event.notification.topic_id,
            event.notification.post_number
        );
        Ok(NotifyOutcome::Handled)
    }
}
