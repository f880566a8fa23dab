use {std::collections::HashMap, tracing::debug};

use crate::command::{ChatCommand, CommandReply};

/// Registry of the commands a bot answers to.
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn ChatCommand>>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    pub fn register(&mut self, command: Box<dyn ChatCommand>) {
        self.commands.insert(command.name().to_string(), command);
    }

    pub fn get(&self, name: &str) -> Option<&dyn ChatCommand> {
        self.commands.get(name).map(|c| c.as_ref())
    }

    /// Registered command names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Split `line` on whitespace and run the command named by its first word.
    pub async fn dispatch(&self, line: &str) -> CommandReply {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return CommandReply::Error("Empty command.".into());
        };
        let args: Vec<&str> = words.collect();

        match self.get(name) {
            Some(command) => {
                debug!(command = name, args = args.len(), "dispatching command");
                command.execute(&args).await
            },
            None => CommandReply::Error(format!("Unknown command: {name}")),
        }
    }
}
