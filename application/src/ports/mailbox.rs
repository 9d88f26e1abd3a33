//! Mailbox provider port
//!
//! One interface for the connected-mailbox provider with the full capability
//! set: authorize, check connection, send, file into a category folder, and
//! list what was filed. A single infrastructure client implements it against
//! a configurable REST provider.

use askedith_domain::delivery::{OutboundEmail, SendReceipt};
use askedith_domain::resource::Category;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur talking to the mailbox provider
#[derive(Error, Debug)]
pub enum MailboxError {
    #[error("Authorization failed: {0}")]
    AuthorizationFailed(String),

    /// The durable grant is no longer valid; recoverable by re-authorizing.
    #[error("Mailbox grant expired or revoked")]
    GrantExpired,

    #[error("Provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// The start of an authorization flow
///
/// The URL is opened by the caregiver in a browser; the provider redirects
/// back with a one-time code that [`MailboxPort::complete_authorization`]
/// exchanges for a durable credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationStart {
    /// Provider-hosted consent URL
    pub auth_url: String,
    /// Opaque token echoed back by the provider to tie the callback to
    /// this flow
    pub state: String,
}

/// Durable credential from a completed code exchange
///
/// Persisted by the credential store keyed by mailbox address; the provider
/// client presents it on every grant-scoped call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailboxCredential {
    /// The connected mailbox address
    pub email: String,
    /// Provider-issued grant identifier
    pub grant_id: String,
    /// When the exchange completed
    pub connected_at: DateTime<Utc>,
}

impl MailboxCredential {
    pub fn new(email: impl Into<String>, grant_id: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            grant_id: grant_id.into(),
            connected_at: Utc::now(),
        }
    }
}

/// A message previously filed into a category folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiledMessage {
    pub id: String,
    pub subject: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<DateTime<Utc>>,
}

/// Port for the connected-mailbox provider
#[async_trait]
pub trait MailboxPort: Send + Sync {
    /// Start an authorization flow for the given mailbox address
    async fn begin_authorization(&self, email: &str)
    -> Result<AuthorizationStart, MailboxError>;

    /// Exchange a one-time code for a durable credential
    async fn complete_authorization(
        &self,
        email: &str,
        code: &str,
    ) -> Result<MailboxCredential, MailboxError>;

    /// Whether the grant behind this credential is still valid
    async fn check_connection(&self, credential: &MailboxCredential)
    -> Result<bool, MailboxError>;

    /// Send a message through the connected mailbox
    async fn send(
        &self,
        credential: &MailboxCredential,
        email: &OutboundEmail,
    ) -> Result<SendReceipt, MailboxError>;

    /// File a sent message into the folder for its category.
    ///
    /// Callers treat failures here as best-effort: logged, never propagated
    /// into the send outcome.
    async fn file_into_category(
        &self,
        credential: &MailboxCredential,
        message_id: &str,
        category: &Category,
    ) -> Result<(), MailboxError>;

    /// List the messages previously filed for a category
    async fn list_by_category(
        &self,
        credential: &MailboxCredential,
        category: &Category,
    ) -> Result<Vec<FiledMessage>, MailboxError>;
}
