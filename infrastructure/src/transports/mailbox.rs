//! Connected-mailbox transport

use super::TransportAdapter;
use askedith_application::ports::credential_store::CredentialStore;
use askedith_application::ports::mail_gateway::TransportError;
use askedith_application::ports::mailbox::{MailboxError, MailboxPort};
use askedith_domain::delivery::{OutboundEmail, SendReceipt, TransportKind};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

/// Sends through the caregiver's own connected mailbox
///
/// Usable only while a stored credential exists. After a successful send
/// the message is filed into the category folder; filing failures are
/// logged and never affect the send outcome.
pub struct MailboxTransport<M: MailboxPort> {
    mailbox: Arc<M>,
    credentials: Arc<dyn CredentialStore>,
}

impl<M: MailboxPort> MailboxTransport<M> {
    pub fn new(mailbox: Arc<M>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            mailbox,
            credentials,
        }
    }
}

fn map_error(e: MailboxError) -> TransportError {
    match e {
        MailboxError::GrantExpired => TransportError::NeedsAuthorization,
        MailboxError::AuthorizationFailed(m) => TransportError::NotConfigured(m),
        MailboxError::Provider { status, message } => {
            TransportError::Rejected(format!("provider error {status}: {message}"))
        }
        MailboxError::Network(m) => TransportError::Network(m),
        MailboxError::UnexpectedResponse(m) => {
            TransportError::Rejected(format!("unexpected provider response: {m}"))
        }
    }
}

#[async_trait]
impl<M: MailboxPort> TransportAdapter for MailboxTransport<M> {
    fn kind(&self) -> TransportKind {
        TransportKind::Mailbox
    }

    async fn is_usable(&self) -> bool {
        match self.credentials.load() {
            Ok(credential) => credential.is_some(),
            Err(e) => {
                warn!("Could not read mailbox credential: {}", e);
                false
            }
        }
    }

    async fn deliver(&self, email: &OutboundEmail) -> Result<SendReceipt, TransportError> {
        let credential = self
            .credentials
            .load()
            .map_err(|e| {
                warn!("Could not read mailbox credential: {}", e);
                TransportError::NeedsAuthorization
            })?
            .ok_or(TransportError::NeedsAuthorization)?;

        let receipt = self
            .mailbox
            .send(&credential, email)
            .await
            .map_err(map_error)?;

        // Filing is best-effort; the message is already out.
        if let Some(message_id) = &receipt.message_id {
            if let Err(e) = self
                .mailbox
                .file_into_category(&credential, message_id, &email.category)
                .await
            {
                warn!(
                    "Could not file message into '{}' folder: {}",
                    email.category, e
                );
            }
        }

        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use askedith_application::ports::credential_store::CredentialStoreError;
    use askedith_application::ports::mailbox::{
        AuthorizationStart, FiledMessage, MailboxCredential,
    };
    use askedith_domain::resource::Category;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeMailbox {
        grant_alive: bool,
        filing_fails: bool,
        filed: AtomicUsize,
    }

    impl FakeMailbox {
        fn healthy() -> Self {
            Self {
                grant_alive: true,
                filing_fails: false,
                filed: AtomicUsize::new(0),
            }
        }

        fn with_broken_filing() -> Self {
            Self {
                filing_fails: true,
                ..Self::healthy()
            }
        }

        fn with_dead_grant() -> Self {
            Self {
                grant_alive: false,
                ..Self::healthy()
            }
        }
    }

    #[async_trait]
    impl MailboxPort for FakeMailbox {
        async fn begin_authorization(
            &self,
            _email: &str,
        ) -> Result<AuthorizationStart, MailboxError> {
            unimplemented!("not exercised here")
        }

        async fn complete_authorization(
            &self,
            _email: &str,
            _code: &str,
        ) -> Result<MailboxCredential, MailboxError> {
            unimplemented!("not exercised here")
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
            if !self.grant_alive {
                return Err(MailboxError::GrantExpired);
            }
            Ok(SendReceipt::new(TransportKind::Mailbox, "msg-42"))
        }

        async fn file_into_category(
            &self,
            _credential: &MailboxCredential,
            _message_id: &str,
            _category: &Category,
        ) -> Result<(), MailboxError> {
            if self.filing_fails {
                return Err(MailboxError::Provider {
                    status: 500,
                    message: "folders unavailable".to_string(),
                });
            }
            self.filed.fetch_add(1, Ordering::SeqCst);
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

    impl MemoryCredentials {
        fn connected() -> Self {
            Self {
                stored: Mutex::new(Some(MailboxCredential::new("carer@example.com", "g-1"))),
            }
        }
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

    fn email() -> OutboundEmail {
        OutboundEmail::new("intake@provider.example.com", "s", "b", Category::HomeCare)
    }

    #[tokio::test]
    async fn unusable_without_a_stored_credential() {
        let transport = MailboxTransport::new(
            Arc::new(FakeMailbox::healthy()),
            Arc::new(MemoryCredentials::default()),
        );

        assert!(!transport.is_usable().await);
        let err = transport.deliver(&email()).await.unwrap_err();
        assert!(matches!(err, TransportError::NeedsAuthorization));
    }

    #[tokio::test]
    async fn delivers_and_files_with_a_credential() {
        let mailbox = Arc::new(FakeMailbox::healthy());
        let transport =
            MailboxTransport::new(mailbox.clone(), Arc::new(MemoryCredentials::connected()));

        assert!(transport.is_usable().await);
        let receipt = transport.deliver(&email()).await.unwrap();

        assert_eq!(receipt.transport, TransportKind::Mailbox);
        assert_eq!(receipt.message_id.as_deref(), Some("msg-42"));
        assert_eq!(mailbox.filed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn filing_failure_does_not_fail_the_send() {
        let transport = MailboxTransport::new(
            Arc::new(FakeMailbox::with_broken_filing()),
            Arc::new(MemoryCredentials::connected()),
        );

        let receipt = transport.deliver(&email()).await.unwrap();
        assert_eq!(receipt.transport, TransportKind::Mailbox);
    }

    #[tokio::test]
    async fn expired_grant_needs_authorization() {
        let transport = MailboxTransport::new(
            Arc::new(FakeMailbox::with_dead_grant()),
            Arc::new(MemoryCredentials::connected()),
        );

        let err = transport.deliver(&email()).await.unwrap_err();
        assert!(matches!(err, TransportError::NeedsAuthorization));
    }
}
