//! Delivery configuration from TOML (`[delivery]` section)

use serde::{Deserialize, Serialize};

/// Raw delivery configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDeliveryConfig {
    /// Per-message send timeout in seconds
    pub send_timeout_seconds: Option<u64>,
}
