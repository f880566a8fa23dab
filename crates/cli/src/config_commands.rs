use std::{fmt::Write as _, path::Path};

use {
    anyhow::{Context, Result},
    clap::Subcommand,
    plugin_downloader_config::{PluginDownloaderConfig, find_config_file, to_toml_string},
    plugin_downloader_repos::RepositoryRegistry,
};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the path of the config file in use.
    Path,
    /// Print the effective configuration as TOML.
    Show,
}

/// Load the explicit config file if one was given, otherwise discover one.
pub fn load(explicit: Option<&Path>) -> Result<PluginDownloaderConfig> {
    match explicit {
        Some(path) => plugin_downloader_config::load_config(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(plugin_downloader_config::discover_and_load()),
    }
}

pub fn handle_config(
    action: ConfigAction,
    explicit: Option<&Path>,
    config: &PluginDownloaderConfig,
) -> Result<()> {
    match action {
        ConfigAction::Path => {
            match explicit.map(Path::to_path_buf).or_else(find_config_file) {
                Some(path) => println!("{}", path.display()),
                None => println!("no config file found, using defaults"),
            }
            Ok(())
        },
        ConfigAction::Show => {
            print!("{}", to_toml_string(config)?);
            Ok(())
        },
    }
}

/// One line per entry: `name  owner/repo  /subpath`.
pub fn render_repositories(registry: &RepositoryRegistry) -> String {
    let width = registry.iter().map(|e| e.name().len()).max().unwrap_or(0);
    let mut out = String::new();
    for entry in registry.iter() {
        let id = entry.identifier();
        let _ = writeln!(
            out,
            "{:<width$}  {}  /{}",
            entry.name(),
            id,
            id.subpath().join("/")
        );
    }
    out
}
