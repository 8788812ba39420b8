//! Configuration for the directory client.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

/// Directory address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api/students/";

/// Rows per results page.
pub const DEFAULT_PAGE_SIZE: usize = 7;

/// Seconds before a lookup is abandoned.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Client settings, usually read from `config.toml`.
///
/// Every key is optional; missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL the endpoint paths are resolved against.
    pub base_url: String,

    /// Request timeout in seconds. `0` disables the timeout.
    pub timeout_secs: u64,

    /// Rows per results page.
    pub page_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ClientConfig {
    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(ClientError::Config(format!(
                    "failed to read {}: {err}",
                    path.display()
                )));
            }
        };
        Self::from_toml(&content)
            .map_err(|e| ClientError::Config(format!("{}: {e}", path.display())))
    }

    /// Parse settings from TOML text.
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Override the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Request timeout, if enabled.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}
