//! Mail gateway port
//!
//! Defines the interface the send pipeline uses to hand one outreach message
//! to whatever transport is usable. Implementations (adapters) live in the
//! infrastructure layer; the standard one resolves a transport per message at
//! send time.

use askedith_domain::delivery::{OutboundEmail, SendReceipt};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while handing a message to a transport
#[derive(Error, Debug)]
pub enum TransportError {
    /// The mailbox transport has no usable credential; recoverable by
    /// re-running authorization.
    #[error("Mailbox not connected - authorization required")]
    NeedsAuthorization,

    #[error("Transport not configured: {0}")]
    NotConfigured(String),

    #[error("Provider rejected the message: {0}")]
    Rejected(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timeout")]
    Timeout,
}

/// Gateway for outbound mail
///
/// One call delivers one categorized message and reports a receipt. Transport
/// selection, credential lookup, and best-effort foldering are adapter
/// concerns; callers only see success or a [`TransportError`].
#[async_trait]
pub trait MailGateway: Send + Sync {
    /// Deliver a single message
    async fn send(&self, email: &OutboundEmail) -> Result<SendReceipt, TransportError>;
}
