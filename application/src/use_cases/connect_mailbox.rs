//! Connect mailbox use case
//!
//! Orchestrates the authorization handshake for the caregiver's own
//! mailbox and answers connection-status queries. A completed handshake
//! stores the durable credential so later sends can use the mailbox
//! transport without re-authorizing.

use crate::ports::credential_store::{CredentialStore, CredentialStoreError};
use crate::ports::mailbox::{AuthorizationStart, MailboxCredential, MailboxError, MailboxPort};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors from the connect-mailbox flow
#[derive(Error, Debug)]
pub enum ConnectMailboxError {
    #[error(transparent)]
    Mailbox(#[from] MailboxError),

    #[error("Credential store error: {0}")]
    Credentials(#[from] CredentialStoreError),
}

/// Whether a mailbox is connected, and which one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionStatus {
    pub connected: bool,
    /// Address of the stored mailbox, if any
    pub address: Option<String>,
}

impl ConnectionStatus {
    fn disconnected() -> Self {
        Self {
            connected: false,
            address: None,
        }
    }
}

/// Use case for connecting and inspecting the caregiver's mailbox
pub struct ConnectMailboxUseCase<M: MailboxPort, C: CredentialStore> {
    mailbox: Arc<M>,
    credentials: Arc<C>,
}

impl<M: MailboxPort, C: CredentialStore> ConnectMailboxUseCase<M, C> {
    pub fn new(mailbox: Arc<M>, credentials: Arc<C>) -> Self {
        Self {
            mailbox,
            credentials,
        }
    }

    /// Start the authorization handshake for `email`.
    ///
    /// The returned URL must be opened by the user in a browser; the
    /// provider hands them a one-time code to feed to [`Self::complete`].
    pub async fn begin(&self, email: &str) -> Result<AuthorizationStart, ConnectMailboxError> {
        let start = self.mailbox.begin_authorization(email).await?;
        Ok(start)
    }

    /// Exchange the one-time code and persist the resulting credential.
    pub async fn complete(
        &self,
        email: &str,
        code: &str,
    ) -> Result<MailboxCredential, ConnectMailboxError> {
        let credential = self.mailbox.complete_authorization(email, code).await?;
        self.credentials.store(&credential)?;
        info!("Mailbox {} connected", credential.email);
        Ok(credential)
    }

    /// Whether the stored credential (if any) still grants access.
    pub async fn status(&self) -> Result<ConnectionStatus, ConnectMailboxError> {
        let Some(credential) = self.credentials.load()? else {
            return Ok(ConnectionStatus::disconnected());
        };
        let connected = self.mailbox.check_connection(&credential).await?;
        Ok(ConnectionStatus {
            connected,
            address: Some(credential.email),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use askedith_domain::delivery::{OutboundEmail, SendReceipt};
    use askedith_domain::resource::Category;
    use async_trait::async_trait;
    use crate::ports::mailbox::FiledMessage;
    use std::sync::Mutex;

    struct FakeMailbox {
        grant_alive: bool,
    }

    #[async_trait]
    impl MailboxPort for FakeMailbox {
        async fn begin_authorization(
            &self,
            email: &str,
        ) -> Result<AuthorizationStart, MailboxError> {
            Ok(AuthorizationStart {
                auth_url: format!("https://auth.example.com/?login_hint={email}"),
                state: "state-1".into(),
            })
        }

        async fn complete_authorization(
            &self,
            email: &str,
            code: &str,
        ) -> Result<MailboxCredential, MailboxError> {
            if code == "bad" {
                return Err(MailboxError::AuthorizationFailed("invalid code".into()));
            }
            Ok(MailboxCredential::new(email, "grant-123"))
        }

        async fn check_connection(
            &self,
            _credential: &MailboxCredential,
        ) -> Result<bool, MailboxError> {
            Ok(self.grant_alive)
        }

        async fn send(
            &self,
            _credential: &MailboxCredential,
            _email: &OutboundEmail,
        ) -> Result<SendReceipt, MailboxError> {
            unimplemented!("not exercised here")
        }

        async fn file_into_category(
            &self,
            _credential: &MailboxCredential,
            _message_id: &str,
            _category: &Category,
        ) -> Result<(), MailboxError> {
            Ok(())
        }

        async fn list_by_category(
            &self,
            _credential: &MailboxCredential,
            _category: &Category,
        ) -> Result<Vec<FiledMessage>, MailboxError> {
            Ok(vec![])
        }
    }

    #[derive(Default)]
    struct MemoryCredentials {
        stored: Mutex<Option<MailboxCredential>>,
    }

    impl CredentialStore for MemoryCredentials {
        fn load(&self) -> Result<Option<MailboxCredential>, CredentialStoreError> {
            Ok(self.stored.lock().unwrap().clone())
        }

        fn store(&self, credential: &MailboxCredential) -> Result<(), CredentialStoreError> {
            *self.stored.lock().unwrap() = Some(credential.clone());
            Ok(())
        }

        fn clear(&self) -> Result<bool, CredentialStoreError> {
            Ok(self.stored.lock().unwrap().take().is_some())
        }
    }

    fn use_case(
        grant_alive: bool,
    ) -> (
        ConnectMailboxUseCase<FakeMailbox, MemoryCredentials>,
        Arc<MemoryCredentials>,
    ) {
        let credentials = Arc::new(MemoryCredentials::default());
        let use_case =
            ConnectMailboxUseCase::new(Arc::new(FakeMailbox { grant_alive }), credentials.clone());
        (use_case, credentials)
    }

    #[tokio::test]
    async fn begin_returns_the_auth_url() {
        let (use_case, _) = use_case(true);
        let start = use_case.begin("carer@example.com").await.unwrap();
        assert!(start.auth_url.contains("carer@example.com"));
        assert!(!start.state.is_empty());
    }

    #[tokio::test]
    async fn complete_persists_the_credential() {
        let (use_case, credentials) = use_case(true);

        let credential = use_case
            .complete("carer@example.com", "one-time-code")
            .await
            .unwrap();

        assert_eq!(credential.grant_id, "grant-123");
        let stored = credentials.stored.lock().unwrap().clone().unwrap();
        assert_eq!(stored.email, "carer@example.com");
    }

    #[tokio::test]
    async fn failed_exchange_stores_nothing() {
        let (use_case, credentials) = use_case(true);

        let err = use_case.complete("carer@example.com", "bad").await.unwrap_err();

        assert!(matches!(err, ConnectMailboxError::Mailbox(_)));
        assert!(credentials.stored.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn status_without_credential_is_disconnected() {
        let (use_case, _) = use_case(true);
        let status = use_case.status().await.unwrap();
        assert!(!status.connected);
        assert!(status.address.is_none());
    }

    #[tokio::test]
    async fn status_with_live_grant_is_connected() {
        let (use_case, _) = use_case(true);
        use_case.complete("carer@example.com", "code").await.unwrap();

        let status = use_case.status().await.unwrap();

        assert!(status.connected);
        assert_eq!(status.address.as_deref(), Some("carer@example.com"));
    }

    #[tokio::test]
    async fn status_with_dead_grant_keeps_the_address() {
        let (use_case, credentials) = use_case(false);
        use_case.complete("carer@example.com", "code").await.unwrap();

        let status = use_case.status().await.unwrap();

        assert!(!status.connected);
        assert_eq!(status.address.as_deref(), Some("carer@example.com"));
        assert!(credentials.stored.lock().unwrap().is_some());
    }
}
