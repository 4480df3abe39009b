use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use super::{ConfigError, Result, read_file};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
    pub max_response_bytes: u64,
    pub max_probe_bytes: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            connect_timeout_secs: 10,
            read_timeout_secs: 120,
            max_response_bytes: 100 * 1024 * 1024,
            max_probe_bytes: 20 * 1024 * 1024,
        }
    }
}

impl ClientConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config: ClientConfig = read_file::<_, ConfigError>(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.base_url()?;
        if self.connect_timeout_secs == 0 || self.read_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeouts must be at least one second".to_string(),
            ));
        }
        if self.max_response_bytes == 0 || self.max_probe_bytes == 0 {
            return Err(ConfigError::Invalid(
                "size limits must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(self.base_url.trim())
            .map_err(|error| ConfigError::Invalid(format!("base_url `{}`: {error}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "base_url must use http or https, got `{}`",
                url.scheme()
            )));
        }
        Ok(url)
    }

    pub fn token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }

    pub fn agent(&self) -> ureq::Agent {
        ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(self.connect_timeout_secs))
            .timeout_read(Duration::from_secs(self.read_timeout_secs))
            .user_agent(concat!("imgtools/", env!("CARGO_PKG_VERSION")))
            .build()
    }
}
