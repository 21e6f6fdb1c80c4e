//! Client settings that persist across runs.

use std::path::{Path, PathBuf};
use std::time::Duration;

use mailroom_api::ClientConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Default backend address.
pub const DEFAULT_API_URL: &str = "http://localhost:3333";

/// Error type for loading and saving settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Reading or writing the settings file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid JSON.
    #[error("Invalid settings file: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured backend address is unusable.
    #[error("Invalid API configuration: {0}")]
    Api(#[from] mailroom_api::Error),
}

/// Application settings, stored as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the webmail backend.
    pub api_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Keep the session token in the system keyring between runs.
    ///
    /// Each CLI command is its own process, so with `false` the token from
    /// `login` is gone once that command exits and later commands run
    /// logged out.
    pub remember_session: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 30,
            remember_session: true,
        }
    }
}

impl Settings {
    /// Default settings file: `<config dir>/mailroom/settings.json`.
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mailroom")
            .join("settings.json")
    }

    /// Loads settings from `path`, falling back to defaults when the file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self, SettingsError> {
        if !tokio::fs::try_exists(path).await? {
            debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Saves settings to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, contents).await?;

        info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Builds the HTTP client configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `api_url` is not a valid HTTP(S) URL.
    pub fn client_config(&self) -> Result<ClientConfig, SettingsError> {
        Ok(ClientConfig::new(&self.api_url)?.with_timeout(self.timeout()))
    }
}
