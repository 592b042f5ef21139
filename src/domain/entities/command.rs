use std::collections::BTreeMap;
use std::sync::Arc;

use super::Payload;
use crate::application::errors::CommandError;
use crate::domain::traits::ForumSession;

/// What a command hands back: the new message text and its processing trail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub replace_msg: bool,
    pub msg: String,
    /// One entry per transform applied
    pub log: Vec<String>,
}

impl CommandResult {
    pub fn replace(msg: impl Into<String>, log: Vec<String>) -> Self {
        Self {
            replace_msg: true,
            msg: msg.into(),
            log,
        }
    }
}

/// Collaborators available to a running command handler
pub struct CommandContext<'a> {
    pub session: Arc<dyn ForumSession>,
    /// Command table of the module that owns the running command
    pub commands: &'a CommandTable,
}

impl<'a> CommandContext<'a> {
    pub fn new(session: Arc<dyn ForumSession>, commands: &'a CommandTable) -> Self {
        Self { session, commands }
    }
}

/// Command handler function type
pub type CommandHandler =
    Arc<dyn Fn(&CommandContext<'_>, Payload) -> Result<CommandResult, CommandError> + Send + Sync>;

/// Wrap a closure as a [`CommandHandler`]
pub fn handler_fn<F>(f: F) -> CommandHandler
where
    F: Fn(&CommandContext<'_>, Payload) -> Result<CommandResult, CommandError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A named, parameterised command exposed by a module
#[derive(Clone)]
pub struct Command {
    pub name: String,
    pub description: Option<String>,
    pub handler: Option<CommandHandler>,
    /// Parameter name to default value
    pub defaults: BTreeMap<String, String>,
    /// Accepted parameter names in positional order, `[` prefix marks optional
    pub params: Vec<String>,
    /// Eligible for the `random` meta-command
    pub random_pickable: bool,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            handler: None,
            defaults: BTreeMap::new(),
            params: Vec::new(),
            random_pickable: false,
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.params.push(param.into());
        self
    }

    pub fn with_default(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.insert(name.into(), value.into());
        self
    }

    pub fn random_pickable(mut self) -> Self {
        self.random_pickable = true;
        self
    }

    pub fn with_handler(mut self, handler: CommandHandler) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Parameter names with the optional marker stripped, paired with optionality
    pub fn param_specs(&self) -> impl Iterator<Item = (&str, bool)> {
        self.params.iter().map(|p| match p.strip_prefix('[') {
            Some(name) => (name, true),
            None => (p.as_str(), false),
        })
    }

    pub fn invoke(&self, ctx: &CommandContext<'_>, payload: Payload) -> Result<CommandResult, CommandError> {
        match &self.handler {
            Some(handler) => handler(ctx, payload),
            None => Err(CommandError::ExecutionFailed(format!(
                "Command {} not implemented",
                self.name
            ))),
        }
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("random_pickable", &self.random_pickable)
            .finish_non_exhaustive()
    }
}

/// Commands of one module, ordered by name
#[derive(Default, Clone, Debug)]
pub struct CommandTable {
    commands: BTreeMap<String, Command>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, command: Command) {
        self.commands.insert(command.name.clone(), command);
    }

    pub fn with(mut self, command: Command) -> Self {
        self.register(command);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    pub fn all(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    /// Names of commands the random meta-command may choose from
    pub fn random_pickable(&self) -> Vec<&str> {
        self.commands
            .values()
            .filter(|c| c.random_pickable)
            .map(|c| c.name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
