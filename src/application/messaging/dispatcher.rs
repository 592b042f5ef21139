//! Command dispatcher - resolves explicit user commands to module handlers

use std::collections::BTreeMap;
use std::sync::Arc;

use super::parser::{CommandParser, Invocation, ParsedCommand};
use crate::application::errors::CommandError;
use crate::domain::entities::{Command, CommandContext, CommandResult, Payload, Post};
use crate::domain::traits::{ForumSession, SockModule};

/// Routes parsed commands to the first started module that exposes them
pub struct CommandDispatcher {
    parser: CommandParser,
    modules: Vec<Arc<dyn SockModule>>,
    session: Arc<dyn ForumSession>,
}

impl CommandDispatcher {
    /// `modules` must already be in priority order
    pub fn new(
        prefix: impl Into<String>,
        modules: Vec<Arc<dyn SockModule>>,
        session: Arc<dyn ForumSession>,
    ) -> Self {
        Self {
            parser: CommandParser::new(prefix),
            modules,
            session,
        }
    }

    pub fn parser(&self) -> &CommandParser {
        &self.parser
    }

    /// Run an invocation line against a draft; `None` if the text is not a command
    pub fn process_text(&self, text: &str) -> Result<Option<CommandResult>, CommandError> {
        if !self.parser.is_command(text) {
            return Ok(None);
        }
        let Invocation { chain, draft } = self
            .parser
            .parse_invocation(text)
            .ok_or_else(|| CommandError::InvalidArgs(format!("cannot parse command: {text}")))?;
        self.run_chain(&chain, &draft).map(Some)
    }

    /// Apply one command to a draft
    pub fn run(&self, parsed: &ParsedCommand, draft: &str) -> Result<CommandResult, CommandError> {
        self.invoke(parsed, Payload::for_draft(parsed.name.clone(), draft))
    }

    /// Apply one command to a received post
    pub fn run_on_post(&self, parsed: &ParsedCommand, post: Post) -> Result<CommandResult, CommandError> {
        self.invoke(parsed, Payload::for_post(parsed.name.clone(), post))
    }

    /// Apply commands in order, each one reading the previous result.
    /// The logs of every step are kept in order.
    pub fn run_chain(&self, chain: &[ParsedCommand], draft: &str) -> Result<CommandResult, CommandError> {
        let mut msg = draft.to_string();
        let mut log = Vec::with_capacity(chain.len());
        for parsed in chain {
            let step = self.run(parsed, &msg)?;
            msg = step.msg;
            log.extend(step.log);
        }
        Ok(CommandResult::replace(msg, log))
    }

    /// One line per command: name, parameters and description
    pub fn help(&self) -> String {
        let mut lines = Vec::new();
        for module in &self.modules {
            for cmd in module.commands().all() {
                let mut line = format!("{}{}", self.parser.prefix(), cmd.name);
                for param in &cmd.params {
                    line.push(' ');
                    line.push_str(param);
                    if param.starts_with('[') {
                        line.push(']');
                    }
                }
                line.push_str(&format!(" - {}", cmd.description.as_deref().unwrap_or("")));
                lines.push(line);
            }
        }
        lines.sort();
        format!("Available commands:\n{}", lines.join("\n"))
    }

    fn invoke(&self, parsed: &ParsedCommand, mut payload: Payload) -> Result<CommandResult, CommandError> {
        let (module, command) = self
            .resolve(&parsed.name)
            .ok_or_else(|| CommandError::NotFound(parsed.name.clone()))?;

        payload.params = bind_params(command, &parsed.args)?;
        tracing::debug!("Dispatching {} to module {}", parsed.name, module.name());

        let ctx = CommandContext::new(Arc::clone(&self.session), module.commands());
        command.invoke(&ctx, payload)
    }

    fn resolve(&self, name: &str) -> Option<(&Arc<dyn SockModule>, &Command)> {
        self.modules
            .iter()
            .find_map(|m| m.commands().get(name).map(|c| (m, c)))
    }
}

/// Bind positional args to declared params, filling gaps from defaults
pub fn bind_params(command: &Command, args: &[String]) -> Result<BTreeMap<String, String>, CommandError> {
    if args.len() > command.params.len() {
        return Err(CommandError::InvalidArgs(format!(
            "{} takes at most {} arguments, got {}",
            command.name,
            command.params.len(),
            args.len()
        )));
    }

    let mut bound = command.defaults.clone();
    for (i, (name, optional)) in command.param_specs().enumerate() {
        match args.get(i) {
            Some(value) => {
                bound.insert(name.to_string(), value.clone());
            }
            None if !optional && !bound.contains_key(name) => {
                return Err(CommandError::InvalidArgs(format!(
                    "missing parameter '{}' for {}",
                    name, command.name
                )));
            }
            None => {}
        }
    }
    Ok(bound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::RecordingForum;
    use crate::infrastructure::random::ScriptedRandom;
    use crate::modules::Crypt;

    fn dispatcher() -> CommandDispatcher {
        let crypt: Arc<dyn SockModule> = Arc::new(Crypt::new(Arc::new(ScriptedRandom::new(vec![0]))));
        CommandDispatcher::new("!", vec![crypt], Arc::new(RecordingForum::new()))
    }

    #[test]
    fn test_bind_defaults_and_optional() {
        let cmd = Command::new("xorbc")
            .with_param("[key")
            .with_param("[iv")
            .with_default("key", "42");

        let bound = bind_params(&cmd, &[]).unwrap();
        assert_eq!(bound.get("key").map(String::as_str), Some("42"));
        assert!(!bound.contains_key("iv"));

        let bound = bind_params(&cmd, &["ab".to_string(), "cd".to_string()]).unwrap();
        assert_eq!(bound.get("key").map(String::as_str), Some("ab"));
        assert_eq!(bound.get("iv").map(String::as_str), Some("cd"));
    }

    #[test]
    fn test_bind_missing_required_and_extra() {
        let cmd = Command::new("needs").with_param("who");
        assert!(matches!(bind_params(&cmd, &[]), Err(CommandError::InvalidArgs(_))));
        let extra = vec!["a".to_string(), "b".to_string()];
        assert!(matches!(bind_params(&cmd, &extra), Err(CommandError::InvalidArgs(_))));
    }

    #[test]
    fn test_xorbc_uses_default_key() {
        let d = dispatcher();
        let result = d.process_text("!xorbc -- abc").unwrap().unwrap();
        assert_eq!(result.msg, "UP6");
        assert_eq!(result.log, vec!["xorbc(key: [52,50], iv: [0,0])".to_string()]);
    }

    #[test]
    fn test_chain_keeps_every_log_entry() {
        let d = dispatcher();
        let result = d.process_text("!rot13 | reverse -- abc").unwrap().unwrap();
        assert_eq!(result.msg, "pon");
        assert_eq!(result.log, vec!["rot13".to_string(), "reverse".to_string()]);
        assert!(result.replace_msg);
    }

    #[test]
    fn test_encrypt_then_decrypt_chain() {
        let d = dispatcher();
        let result = d.process_text("!xorbc key abc | rxorbc key abc -- round trip").unwrap().unwrap();
        assert_eq!(result.msg, "round trip");
    }

    #[test]
    fn test_validation_error_surfaces() {
        let d = dispatcher();
        let err = d.process_text("!xorbc ab abc -- text").unwrap_err();
        assert_eq!(err.to_string(), "Key and IV must be the same length");
    }

    #[test]
    fn test_unknown_command_and_plain_text() {
        let d = dispatcher();
        assert_eq!(d.process_text("!nope -- x").unwrap_err(), CommandError::NotFound("nope".to_string()));
        assert_eq!(d.process_text("just chatting").unwrap(), None);
    }

    #[test]
    fn test_random_through_dispatcher() {
        let d = dispatcher();
        let result = d.process_text("!random -- abc").unwrap().unwrap();
        // first pickable command by name is `reverse`
        assert_eq!(result.msg, "cba");
        assert_eq!(result.log, vec!["random:reverse".to_string()]);
    }

    #[test]
    fn test_help_lists_commands() {
        let help = dispatcher().help();
        assert!(help.contains("!xorbc [key] [iv] - XOR with block chaining."));
        assert!(help.contains("!rot13 - Rot13 encoding."));
    }
}
