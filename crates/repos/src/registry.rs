use std::{collections::HashMap, sync::Arc};

use {
    plugin_downloader_config::{PluginDownloaderConfig, Provider, RepositoryConfig},
    tracing::{info, warn},
};

use crate::{
    api::{GithubApi, RepositoryApi},
    browser::RepositoryBrowser,
    error::BrowseError,
    identifier::RepositoryIdentifier,
};

/// A named, browsable repository.
#[derive(Clone)]
pub struct RepositoryEntry {
    name: String,
    identifier: RepositoryIdentifier,
    provider: Provider,
    browser: RepositoryBrowser,
}

impl RepositoryEntry {
    pub fn new(
        name: &str,
        identifier: RepositoryIdentifier,
        provider: Provider,
        browser: RepositoryBrowser,
    ) -> Self {
        Self {
            name: name.into(),
            identifier,
            provider,
            browser,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn identifier(&self) -> &RepositoryIdentifier {
        &self.identifier
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// See [`RepositoryBrowser::list_plugins`].
    pub async fn list_plugins(&self) -> Vec<String> {
        self.browser.list_plugins(&self.identifier).await
    }
}

impl std::fmt::Debug for RepositoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryEntry")
            .field("name", &self.name)
            .field("identifier", &self.identifier)
            .field("provider", &self.provider)
            .finish_non_exhaustive()
    }
}

/// Short name → repository, in configuration order. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct RepositoryRegistry {
    entries: Vec<RepositoryEntry>,
}

impl RepositoryRegistry {
    /// Build the registry from config, one API client per distinct endpoint.
    ///
    /// When several entries share a name, the first one wins.
    pub fn from_config(config: &PluginDownloaderConfig) -> Result<Self, BrowseError> {
        let mut clients: HashMap<(Provider, String), Arc<dyn RepositoryApi>> = HashMap::new();
        let mut entries = Vec::with_capacity(config.repositories.len());

        for repo in &config.repositories {
            let base_url = repo.effective_base_url(&config.api).to_string();
            let api = match clients.get(&(repo.provider, base_url.clone())) {
                Some(api) => Arc::clone(api),
                None => {
                    let api = connect(repo, &base_url, &config.api.user_agent)?;
                    clients.insert((repo.provider, base_url), Arc::clone(&api));
                    api
                },
            };

            let identifier = RepositoryIdentifier::new(&repo.owner, &repo.repo, &repo.path);
            entries.push(RepositoryEntry::new(
                &repo.name,
                identifier,
                repo.provider,
                RepositoryBrowser::new(api),
            ));
        }

        let registry = Self::from_entries(entries);
        info!(repositories = registry.len(), "repository registry loaded");
        Ok(registry)
    }

    /// When several entries share a name, the first one wins.
    pub fn from_entries(entries: impl IntoIterator<Item = RepositoryEntry>) -> Self {
        let mut kept: Vec<RepositoryEntry> = Vec::new();
        for entry in entries {
            if kept.iter().any(|e| e.name == entry.name) {
                warn!(name = %entry.name, "duplicate repository name, ignoring later entry");
                continue;
            }
            kept.push(entry);
        }
        Self { entries: kept }
    }

    /// Registered names, in configuration order.
    pub fn list_repository_names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&RepositoryEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Plugins of the repository registered as `name`; `None` if there is none.
    pub async fn list_plugins(&self, name: &str) -> Option<Vec<String>> {
        match self.get(name) {
            Some(entry) => Some(entry.list_plugins().await),
            None => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &RepositoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn connect(
    repo: &RepositoryConfig,
    base_url: &str,
    user_agent: &str,
) -> Result<Arc<dyn RepositoryApi>, BrowseError> {
    match repo.provider {
        Provider::Github => Ok(Arc::new(GithubApi::new(base_url, user_agent)?)),
    }
}
