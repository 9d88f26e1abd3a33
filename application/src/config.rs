//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave,
//! such as per-message delivery timeouts.

use std::time::Duration;

/// Default per-message send timeout in seconds.
pub const DEFAULT_SEND_TIMEOUT_SECS: u64 = 30;

/// Delivery behavior configuration.
///
/// Controls runtime behavior of outreach dispatch like the timeout limit
/// for a single message send.
#[derive(Debug, Clone)]
pub struct DeliveryPolicy {
    /// Maximum time to wait for one message to send before counting it failed.
    pub send_timeout: Duration,
}

impl Default for DeliveryPolicy {
    fn default() -> Self {
        Self {
            send_timeout: Duration::from_secs(DEFAULT_SEND_TIMEOUT_SECS),
        }
    }
}

impl DeliveryPolicy {
    /// Creates a DeliveryPolicy with a send timeout specified in seconds.
    pub fn with_timeout_seconds(seconds: u64) -> Self {
        Self {
            send_timeout: Duration::from_secs(seconds),
        }
    }

    /// Creates a DeliveryPolicy from an optional timeout in seconds.
    ///
    /// If `seconds` is `None`, the default timeout is used.
    pub fn from_timeout_seconds(seconds: Option<u64>) -> Self {
        seconds.map_or_else(Self::default, Self::with_timeout_seconds)
    }
}
