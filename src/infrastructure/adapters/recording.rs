//! In-memory forum session that records what the bot did

use async_trait::async_trait;
use std::sync::Mutex;

use crate::application::errors::BotError;
use crate::domain::entities::User;
use crate::domain::traits::ForumSession;

/// Forum session that keeps audit lines and replies in memory
#[derive(Debug, Default)]
pub struct RecordingForum {
    identity: Option<User>,
    logs: Mutex<Vec<String>>,
    posts: Mutex<Vec<(u64, u64, String)>>,
}

impl RecordingForum {
    /// A session whose login is rejected
    pub fn new() -> Self {
        Self::default()
    }

    /// A session that logs in as `user`
    pub fn logged_in(user: User) -> Self {
        Self {
            identity: Some(user),
            ..Self::default()
        }
    }

    pub fn logged(&self) -> Vec<String> {
        self.logs.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Replies as `(topic_id, post_number, text)`
    pub fn posts(&self) -> Vec<(u64, u64, String)> {
        self.posts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ForumSession for RecordingForum {
    async fn authenticate(&self) -> Result<Option<User>, BotError> {
        Ok(self.identity.clone())
    }

    async fn create_post(&self, topic_id: u64, post_number: u64, text: &str) -> Result<(), BotError> {
        let mut posts = self
            .posts
            .lock()
            .map_err(|_| BotError::Internal("Lock poisoned".to_string()))?;
        posts.push((topic_id, post_number, text.to_string()));
        Ok(())
    }

    fn log(&self, message: &str) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.push(message.to_string());
        }
    }
}
