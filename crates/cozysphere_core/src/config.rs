//! Client configuration.
//!
//! The base URL is deployment configuration: injected once at client
//! construction, immutable afterwards. No process-wide singleton.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

/// Default hub address used by the original deployment.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5001/api";

/// Configuration for a [`HubClient`](crate::client::HubClient).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubConfig {
    /// Root address all endpoint paths are appended to,
    /// e.g. `http://192.168.1.20:5001/api`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Optional request timeout in seconds. Unset means platform defaults,
    /// matching the original client's behavior.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl HubConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = Some(timeout.as_secs());
        self
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ClientError::Config {
            path: path.display().to_string(),
            cause: Box::new(e),
        })?;
        toml::from_str(&contents).map_err(|e| ClientError::Config {
            path: path.display().to_string(),
            cause: Box::new(e),
        })
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
