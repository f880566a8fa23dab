//! Configuration for the plugin downloader: schema, discovery and loading.
//!
//! Config files are looked up as `plugin-downloader.{toml,yaml,yml,json}`,
//! first in the working directory, then in `~/.config/plugin-downloader/`.
//! `${ENV_VAR}` placeholders are substituted before parsing.

pub mod env_subst;
pub mod loader;
pub mod schema;

pub use {
    loader::{config_dir, discover_and_load, find_config_file, load_config, to_toml_string},
    schema::{ApiConfig, PluginDownloaderConfig, Provider, RepositoryConfig},
};
