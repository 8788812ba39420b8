//! Locating and loading `config.toml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use vmc_client::ClientConfig;

/// Application name used for the platform config directory.
pub const APP_NAME: &str = "college-finder";

/// Platform config file, e.g. `~/.config/college-finder/config.toml` on Linux.
pub fn default_config_path() -> PathBuf {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

/// Settings given on the command line; they win over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub page_size: Option<usize>,
}

/// Load the client config from `path` (or the platform default) and apply
/// command line overrides.
pub fn load_config(path: Option<&Path>, overrides: &Overrides) -> Result<ClientConfig> {
    let path = path.map_or_else(default_config_path, Path::to_path_buf);
    let mut config = ClientConfig::load_from(&path)
        .with_context(|| format!("load config from {}", path.display()))?;
    if let Some(base_url) = &overrides.base_url {
        config = config.with_base_url(base_url.as_str());
    }
    if let Some(page_size) = overrides.page_size {
        config = config.with_page_size(page_size);
    }
    tracing::debug!(base_url = %config.base_url, page_size = config.page_size, "Config loaded");
    Ok(config)
}
