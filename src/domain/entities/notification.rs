use serde::{Deserialize, Serialize};

/// Kind of inbound forum notification
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    PrivateMessage,
    Mentioned,
    Replied,
    Quoted,
    Posted,
    Other(String),
}

impl NotificationKind {
    /// Parse the forum's snake_case notification name
    pub fn parse(s: &str) -> Self {
        match s {
            "private_message" => NotificationKind::PrivateMessage,
            "mentioned" => NotificationKind::Mentioned,
            "replied" => NotificationKind::Replied,
            "quoted" => NotificationKind::Quoted,
            "posted" => NotificationKind::Posted,
            other => NotificationKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            NotificationKind::PrivateMessage => "private_message",
            NotificationKind::Mentioned => "mentioned",
            NotificationKind::Replied => "replied",
            NotificationKind::Quoted => "quoted",
            NotificationKind::Posted => "posted",
            NotificationKind::Other(s) => s,
        }
    }
}

/// Where a notification points to
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Notification {
    pub topic_id: u64,
    pub post_number: u64,
    pub username: Option<String>,
}

impl Notification {
    pub fn new(topic_id: u64, post_number: u64) -> Self {
        Self {
            topic_id,
            post_number,
            username: None,
        }
    }

    pub fn from_user(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Topic {
    pub id: u64,
    pub title: String,
}

/// A received forum post
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Post {
    pub topic_id: u64,
    pub post_number: u64,
    pub username: Option<String>,
    /// Post body with quotes and markup stripped
    pub cleaned: String,
}

impl Post {
    pub fn new(topic_id: u64, post_number: u64, cleaned: impl Into<String>) -> Self {
        Self {
            topic_id,
            post_number,
            username: None,
            cleaned: cleaned.into(),
        }
    }

    pub fn has_content(&self) -> bool {
        !self.cleaned.trim().is_empty()
    }
}

/// One inbound event as delivered to module hooks
#[derive(Debug, Clone)]
pub struct NotificationEvent {
    pub kind: NotificationKind,
    pub notification: Notification,
    pub topic: Option<Topic>,
    pub post: Option<Post>,
}

impl NotificationEvent {
    pub fn new(kind: NotificationKind, notification: Notification) -> Self {
        Self {
            kind,
            notification,
            topic: None,
            post: None,
        }
    }

    pub fn with_post(mut self, post: Post) -> Self {
        self.post = Some(post);
        self
    }

    pub fn with_topic(mut self, topic: Topic) -> Self {
        self.topic = Some(topic);
        self
    }

    /// The post if it has text a command can work on
    pub fn post_with_content(&self) -> Option<&Post> {
        self.post.as_ref().filter(|p| p.has_content())
    }
}
