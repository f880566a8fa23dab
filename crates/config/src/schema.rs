/// Config schema types (remote API endpoint, repository registry).
use serde::{Deserialize, Serialize};

/// Base URL of the GitHub v2 JSON API the registry talks to by default.
pub const DEFAULT_API_BASE: &str = "http://github.com/api/v2/json";

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginDownloaderConfig {
    pub api: ApiConfig,

    /// Repositories exposed by `repolist`, in display order.
    pub repositories: Vec<RepositoryConfig>,
}

impl Default for PluginDownloaderConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            repositories: default_repositories(),
        }
    }
}

/// Remote API endpoint settings shared by every repository entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL, without trailing slash (e.g. `http://github.com/api/v2/json`).
    pub base_url: String,

    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.into(),
            user_agent: format!("plugin-downloader/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Hosting provider of a repository. Only GitHub is supported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Github,
}

/// A single registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Short name users type after `repolist`.
    pub name: String,

    /// Account owning the repository.
    pub owner: String,

    /// Repository name on the hosting service.
    pub repo: String,

    /// Slash-separated directory holding the plugins. Defaults to the root.
    #[serde(default = "default_path")]
    pub path: String,

    #[serde(default)]
    pub provider: Provider,

    /// Override `api.base_url` for this entry only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl RepositoryConfig {
    pub fn new(name: &str, owner: &str, repo: &str) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            repo: repo.into(),
            path: default_path(),
            provider: Provider::default(),
            base_url: None,
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: &str) -> Self {
        self.path = path.into();
        self
    }

    /// The API base URL this entry resolves against.
    pub fn effective_base_url<'a>(&'a self, api: &'a ApiConfig) -> &'a str {
        self.base_url.as_deref().unwrap_or(&api.base_url)
    }
}

fn default_path() -> String {
    "/".into()
}

fn default_repositories() -> Vec<RepositoryConfig> {
    vec![
        RepositoryConfig::new("ProgVal", "ProgVal", "Supybot-plugins"),
        RepositoryConfig::new("quantumlemur", "quantumlemur", "Supybot-plugins"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_lists_known_repositories() {
        let config = PluginDownloaderConfig::default();
        let names: Vec<_> = config.repositories.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["ProgVal", "quantumlemur"]);
        assert!(config.repositories.iter().all(|r| r.path == "/"));
        assert_eq!(config.api.base_url, DEFAULT_API_BASE);
    }

    #[test]
    fn repository_defaults_fill_optional_fields() {
        let entry: RepositoryConfig =
            toml::from_str("name = \"R\"\nowner = \"o\"\nrepo = \"n\"").unwrap();
        assert_eq!(entry.path, "/");
        assert_eq!(entry.provider, Provider::Github);
        assert!(entry.base_url.is_none());
    }

    #[test]
    fn base_url_override_wins() {
        let api = ApiConfig::default();
        let mut entry = RepositoryConfig::new("R", "o", "n");
        assert_eq!(entry.effective_base_url(&api), DEFAULT_API_BASE);

        entry.base_url = Some("http://localhost:1234".into());
        assert_eq!(entry.effective_base_url(&api), "http://localhost:1234");
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let result: Result<RepositoryConfig, _> =
            toml::from_str("name = \"R\"\nowner = \"o\"\nrepo = \"n\"\nprovider = \"gitlab\"");
        assert!(result.is_err());
    }
}
