use std::collections::BTreeMap;

use super::{NotificationKind, Post};

/// Per-invocation input bundle for a command handler
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    /// Message body that has not been posted yet
    pub draft: Option<String>,
    /// Post the command was issued against
    pub post: Option<Post>,
    pub kind: Option<NotificationKind>,
    /// Resolved command name, `random:<name>` when picked at random
    pub command: String,
    pub params: BTreeMap<String, String>,
}

impl Payload {
    pub fn for_draft(command: impl Into<String>, draft: impl Into<String>) -> Self {
        Self {
            draft: Some(draft.into()),
            command: command.into(),
            ..Self::default()
        }
    }

    pub fn for_post(command: impl Into<String>, post: Post) -> Self {
        Self {
            post: Some(post),
            command: command.into(),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: NotificationKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// True when the draft, not a received post, is the target
    pub fn targets_draft(&self) -> bool {
        self.draft.as_deref().is_some_and(|d| !d.is_empty())
    }

    /// Draft text if present, else the cleaned post text
    pub fn input_text(&self) -> Option<&str> {
        if self.targets_draft() {
            return self.draft.as_deref();
        }
        self.post.as_ref().map(|p| p.cleaned.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_wins_over_post() {
        let mut payload = Payload::for_post("reverse", Post::new(1, 1, "post"));
        payload.draft = Some("draft".to_string());
        assert_eq!(payload.input_text(), Some("draft"));
    }

    #[test]
    fn test_empty_draft_falls_back_to_post() {
        let mut payload = Payload::for_post("reverse", Post::new(1, 1, "post"));
        payload.draft = Some(String::new());
        assert!(!payload.targets_draft());
        assert_eq!(payload.input_text(), Some("post"));
    }

    #[test]
    fn test_nothing_to_read() {
        assert_eq!(Payload::default().input_text(), None);
    }
}
