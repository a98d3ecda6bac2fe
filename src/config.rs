use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{HostawayError, Result};

pub const DEFAULT_BASE_URI: &str = "https://api.hostaway.com/v1/";
pub const DEFAULT_TIMEOUT_SECS: f64 = 30.0;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ClientConfig {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_uri: Option<String>,
    /// Seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<f64>,
}

impl ClientConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            base_uri: None,
            timeout: None,
        }
    }

    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = Some(base_uri.into());
        self
    }

    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// Base URI with exactly one trailing slash, so relative paths join under it.
    pub fn base_uri(&self) -> String {
        let base = self.base_uri.as_deref().unwrap_or(DEFAULT_BASE_URI);
        format!("{}/", base.trim_end_matches('/'))
    }

    /// Configured timeout, or 30s when unset, non-positive or too large for a `Duration`.
    pub fn timeout(&self) -> Duration {
        self.timeout
            .filter(|secs| *secs > 0.0)
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
            .unwrap_or(Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS))
    }

    pub fn has_credentials(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| HostawayError::Config(e.to_string()))
    }

    /// Reads a TOML file such as:
    ///
    /// ```toml
    /// client_id = "12345"
    /// client_secret = "secret"
    /// timeout = 10.0
    /// ```
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(HostawayError::Config(format!(
                "Configuration file '{}' not found",
                path.display()
            )));
        }

        let config_str = fs::read_to_string(path)
            .map_err(|e| HostawayError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&config_str)
    }

    /// Reads `HOSTAWAY_CLIENT_ID`, `HOSTAWAY_CLIENT_SECRET`, `HOSTAWAY_BASE_URI`
    /// and `HOSTAWAY_TIMEOUT`, after loading a `.env` file if one is present.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let timeout = match lookup("HOSTAWAY_TIMEOUT") {
            Some(raw) => Some(raw.trim().parse::<f64>().map_err(|_| {
                HostawayError::Config(format!("HOSTAWAY_TIMEOUT is not a number: {}", raw))
            })?),
            None => None,
        };

        Ok(Self {
            client_id: lookup("HOSTAWAY_CLIENT_ID").unwrap_or_default(),
            client_secret: lookup("HOSTAWAY_CLIENT_SECRET").unwrap_or_default(),
            base_uri: lookup("HOSTAWAY_BASE_URI").filter(|uri| !uri.is_empty()),
            timeout,
        })
    }
}
