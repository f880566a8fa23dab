use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{env_subst::substitute_env, schema::PluginDownloaderConfig};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &[
    "plugin-downloader.toml",
    "plugin-downloader.yaml",
    "plugin-downloader.yml",
    "plugin-downloader.json",
];

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> anyhow::Result<PluginDownloaderConfig> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let raw = substitute_env(&raw);
    parse_config(&raw, path)
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `./plugin-downloader.{toml,yaml,yml,json}` (project-local)
/// 2. `~/.config/plugin-downloader/plugin-downloader.{toml,yaml,yml,json}` (user-global)
///
/// Returns `PluginDownloaderConfig::default()` if no config file is found or
/// the one found cannot be parsed.
pub fn discover_and_load() -> PluginDownloaderConfig {
    let Some(path) = find_config_file() else {
        debug!("no config file found, using defaults");
        return PluginDownloaderConfig::default();
    };

    debug!(path = %path.display(), "loading config");
    match load_config(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            PluginDownloaderConfig::default()
        },
    }
}

/// Find the first config file in standard locations.
pub fn find_config_file() -> Option<PathBuf> {
    if let Some(p) = find_in(Path::new(".")) {
        return Some(p);
    }
    config_dir().and_then(|dir| find_in(&dir))
}

fn find_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.exists())
}

/// Returns the user-global config directory: `~/.config/plugin-downloader/`.
pub fn config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.home_dir().join(".config").join("plugin-downloader"))
}

/// Serialize `config` as pretty TOML.
pub fn to_toml_string(config: &PluginDownloaderConfig) -> anyhow::Result<String> {
    toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("serialize config: {e}"))
}

fn parse_config(raw: &str, path: &Path) -> anyhow::Result<PluginDownloaderConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => Ok(toml::from_str(raw)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(raw)?),
        "json" => Ok(serde_json::from_str(raw)?),
        _ => anyhow::bail!("unsupported config format: .{ext}"),
    }
}
