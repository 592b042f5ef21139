//! Command parser - turns `!name arg ...` text into structured invocations

/// One parsed command with its positional arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Vec<String>,
}

/// A command chain plus the draft text it applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub chain: Vec<ParsedCommand>,
    pub draft: String,
}

/// Parses command lines such as `!xorbc key iv | reverse -- some text`
pub struct CommandParser {
    command_prefix: String,
}

impl CommandParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.command_prefix
    }

    pub fn is_command(&self, text: &str) -> bool {
        text.trim_start().starts_with(&self.command_prefix)
    }

    /// Parse a single `!name args` segment
    pub fn parse(&self, text: &str) -> Option<ParsedCommand> {
        let cmd_text = text.trim_start().strip_prefix(&self.command_prefix)?;
        Self::parse_segment(cmd_text)
    }

    /// Parse a full invocation line. Commands are separated by `|`, the draft
    /// follows the first ` -- `. Only the first command needs the prefix.
    pub fn parse_invocation(&self, text: &str) -> Option<Invocation> {
        let cmd_text = text.trim_start().strip_prefix(&self.command_prefix)?;
        let (commands, draft) = match cmd_text.split_once(" -- ") {
            Some((commands, draft)) => (commands, draft),
            None => (cmd_text, ""),
        };

        let chain = commands
            .split('|')
            .map(|segment| {
                let segment = segment.trim();
                Self::parse_segment(segment.strip_prefix(&self.command_prefix).unwrap_or(segment))
            })
            .collect::<Option<Vec<_>>>()?;

        Some(Invocation {
            chain,
            draft: draft.to_string(),
        })
    }

    fn parse_segment(segment: &str) -> Option<ParsedCommand> {
        let mut parts = segment.split_whitespace();
        let name = parts.next()?.to_lowercase();
        let args = parts.map(|s| s.to_string()).collect();
        Some(ParsedCommand { name, args })
    }
}
