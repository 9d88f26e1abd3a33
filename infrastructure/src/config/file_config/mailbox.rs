//! Mailbox provider configuration from TOML (`[mailbox]` section)

use serde::{Deserialize, Serialize};

/// Raw mailbox-provider configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMailboxConfig {
    /// Provider base URL
    pub base_url: String,
    /// API key for the provider application
    pub api_key: Option<String>,
    /// Environment variable to read the key from when `api_key` is unset
    pub api_key_env: String,
    /// Redirect registered with the provider; the consent page hands the
    /// user a one-time code to paste back into the CLI
    pub redirect_uri: String,
}

impl Default for FileMailboxConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.us.nylas.com".to_string(),
            api_key: None,
            api_key_env: "NYLAS_API_KEY".to_string(),
            redirect_uri: "http://localhost:8080/oauth/callback".to_string(),
        }
    }
}

impl FileMailboxConfig {
    /// Resolve the API key: inline value first, then the named env var
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.is_empty())
    }
}
