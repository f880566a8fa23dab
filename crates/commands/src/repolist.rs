use std::sync::Arc;

use {async_trait::async_trait, plugin_downloader_repos::RepositoryRegistry, tracing::debug};

use crate::command::{ChatCommand, CommandReply};

pub const NO_PLUGIN_FOUND: &str = "No plugin found in this repository.";

/// `repolist [<repository>]`
///
/// Without argument, lists the configured repositories. With one, lists the
/// plugins available in that repository.
pub struct RepoListCommand {
    registry: Arc<RepositoryRegistry>,
}

impl RepoListCommand {
    pub fn new(registry: Arc<RepositoryRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl ChatCommand for RepoListCommand {
    fn name(&self) -> &str {
        "repolist"
    }

    fn usage(&self) -> &str {
        "[<repository>]"
    }

    fn help(&self) -> &str {
        "Displays the list of plugins in the <repository>. If <repository> is not given, \
         returns a list of available repositories."
    }

    async fn execute(&self, args: &[&str]) -> CommandReply {
        match args {
            [] => CommandReply::Reply(self.registry.list_repository_names().join(", ")),
            [repository] => {
                debug!(repository, "listing plugins");
                match self.registry.list_plugins(repository).await {
                    None => CommandReply::Error(format!("Unknown repository: {repository}")),
                    Some(plugins) if plugins.is_empty() => {
                        CommandReply::Error(NO_PLUGIN_FOUND.into())
                    },
                    Some(plugins) => CommandReply::Reply(plugins.join(", ")),
                }
            },
            _ => CommandReply::Error(format!("usage: {} {}", self.name(), self.usage())),
        }
    }
}
