//! Command adapter - turns a text transform into a command handler

use crate::application::errors::CommandError;
use crate::domain::entities::{handler_fn, CommandHandler, CommandResult, Payload};

/// Output of a text transform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    pub text: String,
    /// Provenance entry; the command name is recorded when absent
    pub log: Option<String>,
}

impl Transformed {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            log: None,
        }
    }

    pub fn with_log(text: impl Into<String>, log: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            log: Some(log.into()),
        }
    }
}

/// Wrap a transform so it logs its target, reads the draft or post, and
/// replaces the message with the transformed text.
pub fn crypt_command<T>(transform: T) -> CommandHandler
where
    T: Fn(&str, &Payload) -> Result<Transformed, CommandError> + Send + Sync + 'static,
{
    handler_fn(move |ctx, payload| {
        let target = if payload.targets_draft() { "draft" } else { "post" };
        ctx.session
            .log(&format!("Encrypt {} with {}", target, payload.command));

        let input = payload
            .input_text()
            .ok_or_else(|| CommandError::InvalidArgs("no draft or post to transform".to_string()))?;

        let Transformed { text, log } = transform(input, &payload)?;
        let entry = log.unwrap_or_else(|| payload.command.clone());
        Ok(CommandResult::replace(text, vec![entry]))
    })
}
