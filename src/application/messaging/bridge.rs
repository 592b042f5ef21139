//! Notification-to-command bridge
//!
//! Hands each inbound notification to the started modules' passive hooks and
//! provides the shared "run a command on the post and reply" path those hooks
//! use. Hooks run one after another for a single event, but separate events
//! may be dispatched concurrently, so module hooks must not keep per-event
//! state of their own.

use std::sync::Arc;

use crate::application::errors::{BotError, CommandError};
use crate::domain::entities::{CommandResult, CommandTable, NotificationEvent, NotificationKind, Payload, Post};
use crate::domain::traits::{ModuleContext, NotifyOutcome, SockModule};

/// Joins provenance log entries in the reply footer
pub const PROVENANCE_SEPARATOR: &str = " → ";

/// Footer appended to automatic replies so readers can see what was applied
pub fn provenance_suffix(log: &[String]) -> String {
    format!("\n\n<small>Filed under: {}", log.join(PROVENANCE_SEPARATOR))
}

/// Which notification kinds a module reacts to on its own
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactPolicy {
    kinds: Vec<NotificationKind>,
}

impl ReactPolicy {
    pub fn new(kinds: Vec<NotificationKind>) -> Self {
        Self { kinds }
    }

    /// The post to work on, if the event kind is wanted and the post has text
    pub fn applies<'e>(&self, event: &'e NotificationEvent) -> Option<&'e Post> {
        if !self.kinds.contains(&event.kind) {
            return None;
        }
        event.post_with_content()
    }
}

impl Default for ReactPolicy {
    /// Private messages, mentions and replies
    fn default() -> Self {
        Self::new(vec![
            NotificationKind::PrivateMessage,
            NotificationKind::Mentioned,
            NotificationKind::Replied,
        ])
    }
}

/// Run `command` from `table` on the notified post and post the result, with
/// its provenance footer, as a reply. Nothing is posted if the command fails.
pub async fn reply_with_command(
    ctx: &ModuleContext,
    table: &CommandTable,
    command: &str,
    event: &NotificationEvent,
    post: &Post,
) -> Result<CommandResult, BotError> {
    let result = {
        let cmd = table
            .get(command)
            .ok_or_else(|| CommandError::NotFound(command.to_string()))?;
        let payload = Payload::for_post(command, post.clone()).with_kind(event.kind.clone());
        cmd.invoke(&ctx.commands(table), payload)?
    };

    let text = format!("{}{}", result.msg, provenance_suffix(&result.log));
    ctx.session
        .create_post(event.notification.topic_id, event.notification.post_number, &text)
        .await?;
    Ok(result)
}

/// Outcome of handing one event to every module
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub handled: Vec<String>,
    pub ignored: Vec<String>,
    pub failed: Vec<(String, String)>,
}

/// Delivers notifications to module hooks in priority order
#[derive(Clone)]
pub struct NotificationBridge {
    modules: Arc<Vec<Arc<dyn SockModule>>>,
    ctx: ModuleContext,
}

impl NotificationBridge {
    pub fn new(modules: Vec<Arc<dyn SockModule>>, ctx: ModuleContext) -> Self {
        Self {
            modules: Arc::new(modules),
            ctx,
        }
    }

    pub fn context(&self) -> &ModuleContext {
        &self.ctx
    }

    pub fn modules(&self) -> &[Arc<dyn SockModule>] {
        &self.modules
    }

    /// A failing hook is logged and reported; the remaining modules still run
    pub async fn dispatch(&self, event: &NotificationEvent) -> DispatchReport {
        let mut report = DispatchReport::default();
        for module in self.modules.iter() {
            let name = module.name().to_string();
            match module.on_notify(event, &self.ctx).await {
                Ok(NotifyOutcome::Handled) => report.handled.push(name),
                Ok(NotifyOutcome::Ignored) => report.ignored.push(name),
                Err(e) => {
                    tracing::warn!("Module {} failed on {} notification: {}", name, event.kind.as_str(), e);
                    report.failed.push((name, e.to_string()));
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{handler_fn, Command, Notification};
    use crate::infrastructure::adapters::RecordingForum;
    use crate::infrastructure::config::Config;

    fn ctx(forum: Arc<RecordingForum>) -> ModuleContext {
        ModuleContext::new(forum, Arc::new(Config::default()))
    }

    fn mention(text: &str) -> NotificationEvent {
        NotificationEvent::new(NotificationKind::Mentioned, Notification::new(7, 3)).with_post(Post::new(7, 3, text))
    }

    #[test]
    fn test_suffix_format() {
        let log = vec!["history".to_string(), "history".to_string()];
        assert_eq!(provenance_suffix(&log), "\n\n<small>Filed under: history → history");
    }

    #[test]
    fn test_policy() {
        let policy = ReactPolicy::default();
        assert!(policy.applies(&mention("hi")).is_some());
        assert!(policy.applies(&mention("")).is_none());

        let liked = NotificationEvent::new(NotificationKind::Other("liked".into()), Notification::new(1, 1))
            .with_post(Post::new(1, 1, "hi"));
        assert!(policy.applies(&liked).is_none());

        let no_post = NotificationEvent::new(NotificationKind::Replied, Notification::new(1, 1));
        assert!(policy.applies(&no_post).is_none());
    }

    #[tokio::test]
    async fn test_reply_posts_text_with_footer() {
        let forum = Arc::new(RecordingForum::new());
        let table = CommandTable::new().with(
            Command::new("shout").with_handler(handler_fn(|_, p| {
                let text = p.input_text().unwrap_or_default().to_uppercase();
                Ok(CommandResult::replace(text, vec![p.command.clone()]))
            })),
        );
        let event = mention("hello");
        let post = event.post_with_content().unwrap().clone();

        let result = reply_with_command(&ctx(forum.clone()), &table, "shout", &event, &post)
            .await
            .unwrap();

        assert_eq!(result.msg, "HELLO");
        assert_eq!(
            forum.posts(),
            vec![(7, 3, "HELLO\n\n<small>Filed under: shout".to_string())]
        );
    }

    #[tokio::test]
    async fn test_failed_command_posts_nothing() {
        let forum = Arc::new(RecordingForum::new());
        let table = CommandTable::new().with(Command::new("broken").with_handler(handler_fn(|_, _| {
            Err(CommandError::Validation("Key and IV must be the same length".to_string()))
        })));
        let event = mention("hello");
        let post = event.post_with_content().unwrap().clone();

        let err = reply_with_command(&ctx(forum.clone()), &table, "broken", &event, &post)
            .await
            .unwrap_err();

        assert!(matches!(err, BotError::Command(CommandError::Validation(_))));
        assert!(forum.posts().is_empty());
    }
}
