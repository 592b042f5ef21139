//! Console adapter for development/testing
//!
//! Replies are printed instead of posted, and notifications are read from
//! stdin, one per line:
//!
//! ```text
//! @mentioned 12 3 please encrypt this      kind, topic, post number, text
//! just some text                           a mention on topic 1
//! !xorbc key | reverse -- some draft       an explicit command on a draft
//! ```

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::{JoinHandle, JoinSet};

use crate::application::errors::BotError;
use crate::application::messaging::{provenance_suffix, CommandDispatcher, NotificationBridge};
use crate::domain::entities::{Notification, NotificationEvent, NotificationKind, Post, User};
use crate::domain::traits::{ForumConnector, ForumSession, ModuleContext, NotificationDispatcher, SockModule};
use crate::infrastructure::config::{Config, ForumConfig};

/// Topic used for plain stdin lines
const CONSOLE_TOPIC: u64 = 1;

/// Forum session that logs in as the configured user and prints replies
pub struct ConsoleForum {
    base_url: String,
    username: Option<String>,
}

impl ConsoleForum {
    pub fn new(config: &ForumConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            username: config.username.clone(),
        }
    }
}

#[async_trait]
impl ForumSession for ConsoleForum {
    async fn authenticate(&self) -> Result<Option<User>, BotError> {
        tracing::info!("Connecting to {} (console mode)", self.base_url);
        let user = self
            .username
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(|u| User::new(1, u));
        if user.is_none() {
            tracing::warn!("No forum username configured");
        }
        Ok(user)
    }

    async fn create_post(&self, topic_id: u64, post_number: u64, text: &str) -> Result<(), BotError> {
        println!("[reply {}#{}] {}", topic_id, post_number, text);
        Ok(())
    }

    fn log(&self, message: &str) {
        tracing::info!(target: "sockbot::forum", "{}", message);
    }
}

/// Reads notifications and commands from stdin until EOF
#[derive(Default)]
pub struct StdinNotifier {
    task: Mutex<Option<JoinHandle<()>>>,
}

impl StdinNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until stdin is exhausted and every event has been handled
    pub async fn finished(&self) {
        let task = self.task.lock().ok().and_then(|mut t| t.take());
        if let Some(task) = task {
            if let Err(e) = task.await {
                tracing::error!("Console notifier stopped: {}", e);
            }
        }
    }
}

#[async_trait]
impl NotificationDispatcher for StdinNotifier {
    async fn begin(&self, modules: Vec<Arc<dyn SockModule>>, ctx: ModuleContext) -> Result<(), BotError> {
        let commands = CommandDispatcher::new(
            ctx.config.command_prefix.clone(),
            modules.clone(),
            Arc::clone(&ctx.session),
        );
        let bridge = NotificationBridge::new(modules, ctx);
        tracing::info!("Listening for notifications on stdin");

        let task = tokio::spawn(console_loop(bridge, commands));
        let mut slot = self
            .task
            .lock()
            .map_err(|_| BotError::Internal("Lock poisoned".to_string()))?;
        *slot = Some(task);
        Ok(())
    }
}

async fn console_loop(bridge: NotificationBridge, commands: CommandDispatcher) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut events = JoinSet::new();
    let mut post_number = 0;

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Failed to read stdin: {}", e);
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if commands.parser().is_command(line) {
            run_console_command(&commands, line);
            continue;
        }

        post_number += 1;
        let event = parse_event_line(line, post_number);
        let bridge = bridge.clone();
        // events are not serialized; hooks for separate lines may overlap
        events.spawn(async move {
            let report = bridge.dispatch(&event).await;
            tracing::debug!("Notification handled: {:?}", report);
        });
    }

    while let Some(joined) = events.join_next().await {
        if let Err(e) = joined {
            tracing::warn!("Notification task failed: {}", e);
        }
    }
}

fn run_console_command(commands: &CommandDispatcher, line: &str) {
    if line == format!("{}help", commands.parser().prefix()) {
        println!("{}", commands.help());
        return;
    }
    match commands.process_text(line) {
        Ok(Some(result)) => println!("{}{}", result.msg, provenance_suffix(&result.log)),
        Ok(None) => {}
        Err(e) => println!("Error: {}", e),
    }
}

/// Turn a stdin line into a notification event.
///
/// `@kind topic post text` sets every field; anything else is a mention on
/// the console topic with the given post number.
pub fn parse_event_line(line: &str, post_number: u64) -> NotificationEvent {
    if let Some(rest) = line.strip_prefix('@') {
        let mut parts = rest.splitn(4, ' ');
        if let (Some(kind), Some(topic), Some(post), Some(text)) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        {
            if let (Ok(topic), Ok(post)) = (topic.parse::<u64>(), post.parse::<u64>()) {
                return NotificationEvent::new(NotificationKind::parse(kind), Notification::new(topic, post))
                    .with_post(Post::new(topic, post, text));
            }
        }
    }
    NotificationEvent::new(
        NotificationKind::Mentioned,
        Notification::new(CONSOLE_TOPIC, post_number),
    )
    .with_post(Post::new(CONSOLE_TOPIC, post_number, line))
}

/// Console collaborators: prints replies, reads stdin
pub struct ConsoleConnector {
    notifier: Arc<StdinNotifier>,
}

impl ConsoleConnector {
    pub fn new(notifier: Arc<StdinNotifier>) -> Self {
        Self { notifier }
    }
}

impl ForumConnector for ConsoleConnector {
    fn session(&self, config: &Config) -> Result<Arc<dyn ForumSession>, BotError> {
        let session: Arc<dyn ForumSession> = Arc::new(ConsoleForum::new(&config.forum));
        Ok(session)
    }

    fn notifier(&self, _config: &Config) -> Result<Arc<dyn NotificationDispatcher>, BotError> {
        let notifier: Arc<dyn NotificationDispatcher> = self.notifier.clone();
        Ok(notifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_event_line() {
        let event = parse_event_line("@private_message 12 3 hello there", 9);
        assert_eq!(event.kind, NotificationKind::PrivateMessage);
        assert_eq!(event.notification, Notification::new(12, 3));
        assert_eq!(event.post.map(|p| p.cleaned), Some("hello there".to_string()));
    }

    #[test]
    fn test_plain_line_is_mention() {
        let event = parse_event_line("hello", 4);
        assert_eq!(event.kind, NotificationKind::Mentioned);
        assert_eq!(event.notification.post_number, 4);
        assert_eq!(event.notification.topic_id, CONSOLE_TOPIC);
    }

    #[test]
    fn test_bad_numbers_fall_back_to_mention() {
        let event = parse_event_line("@replied x y text", 2);
        assert_eq!(event.kind, NotificationKind::Mentioned);
        assert_eq!(event.post.map(|p| p.cleaned), Some("@replied x y text".to_string()));
    }

    #[tokio::test]
    async fn test_console_login_needs_username() {
        let mut forum = ForumConfig::default();
        assert_eq!(ConsoleForum::new(&forum).authenticate().await.unwrap(), None);

        forum.username = Some("sockbot".to_string());
        let user = ConsoleForum::new(&forum).authenticate().await.unwrap();
        assert_eq!(user.map(|u| u.username), Some("sockbot".to_string()));
    }
}
