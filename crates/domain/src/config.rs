//! Client configuration structures

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::types::auth::Credentials;

/// Connection settings for the Fanella service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Origin plus version prefix (e.g., "https://api.fanella.ai/v1")
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl ClientConfig {
    /// Config pointing at `base_url` with every other field defaulted.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Self::default() }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Join the base URL with a base-relative path.
    ///
    /// A trailing slash on the base is dropped so `/sources` never turns
    /// into `//sources`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Everything needed to build a client: where to connect and as whom.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FanellaConfig {
    pub client: ClientConfig,
    pub credentials: Credentials,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_local_server() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000/v1");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let config = ClientConfig::with_base_url("https://api.fanella.ai/v1/");
        assert_eq!(config.url("/sources"), "https://api.fanella.ai/v1/sources");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: FanellaConfig = serde_json::from_str(
            r#"{ "client": { "base_url": "https://api.fanella.ai/v1" } }"#,
        )
        .unwrap();

        assert_eq!(config.client.base_url, "https://api.fanella.ai/v1");
        assert_eq!(config.client.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.credentials.client_id.is_empty());
    }
}
