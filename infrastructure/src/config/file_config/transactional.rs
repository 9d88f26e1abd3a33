//! Transactional mail configuration from TOML (`[transactional]` section)

use serde::{Deserialize, Serialize};

/// Raw transactional-mail configuration from TOML
///
/// The API key may be given inline or named via `api_key_env`; the inline
/// value wins when both are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTransactionalConfig {
    /// API key for the transactional provider
    pub api_key: Option<String>,
    /// Environment variable to read the key from when `api_key` is unset
    pub api_key_env: String,
    /// Provider base URL
    pub base_url: String,
    /// Platform sender address (the technical From)
    pub from_address: Option<String>,
    /// Display name for the platform sender
    pub from_name: Option<String>,
}

impl Default for FileTransactionalConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: "SENDGRID_API_KEY".to_string(),
            base_url: "https://api.sendgrid.com".to_string(),
            from_address: None,
            from_name: None,
        }
    }
}

impl FileTransactionalConfig {
    /// Resolve the API key: inline value first, then the named env var
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.is_empty())
    }
}
