//! Extension configuration loaded from JSON

use crate::constants::{backend, config, events, joiner};
use crate::error::Result;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for wiring the extension to a backend and event source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionConfig {
    /// Backend address, e.g. `http://127.0.0.1:8188`
    pub server_url: String,
    /// Prefix in front of every extension route
    pub route_prefix: String,
    /// Event channel carrying widget feedback
    pub feedback_channel: String,
    /// Name prefix for joiner inputs
    pub joiner_input_prefix: String,
    /// Transport timeout for outbound requests
    pub request_timeout_ms: u64,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            server_url: backend::DEFAULT_SERVER_URL.to_string(),
            route_prefix: backend::DEFAULT_ROUTE_PREFIX.to_string(),
            feedback_channel: events::FEEDBACK_CHANNEL.to_string(),
            joiner_input_prefix: joiner::INPUT_PREFIX.to_string(),
            request_timeout_ms: backend::DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl ExtensionConfig {
    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Platform config location, e.g. `~/.config/vibe-nodes/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(config::APP_DIR).join(config::FILE_NAME))
    }

    /// Load from `path` (or the default location), falling back to defaults
    ///
    /// An explicitly given path that cannot be read or parsed is an error; a
    /// missing file at the default location is not.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            info!("Loading configuration from {}", path.display());
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => {
                info!("Loading configuration from {}", path.display());
                Self::load(&path)
            }
            _ => {
                warn!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}
