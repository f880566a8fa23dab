use {async_trait::async_trait, std::fmt};

/// What a command sends back to the channel it was invoked from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandReply {
    /// Normal reply.
    Reply(String),
    /// Error reply; chat frontends usually prefix it with "Error: ".
    Error(String),
}

impl CommandReply {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Reply(text) | Self::Error(text) => text,
        }
    }
}

impl fmt::Display for CommandReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reply(text) => f.write_str(text),
            Self::Error(text) => write!(f, "Error: {text}"),
        }
    }
}

/// User-invocable chat command.
#[async_trait]
pub trait ChatCommand: Send + Sync {
    fn name(&self) -> &str;

    /// One-line usage, e.g. `[<repository>]`.
    fn usage(&self) -> &str;

    fn help(&self) -> &str;

    /// Run the command with its already-split arguments.
    async fn execute(&self, args: &[&str]) -> CommandReply;
}
