//! Mail transports
//!
//! Three ways out the door, tried in fixed preference order per message:
//! the caregiver's connected mailbox, the transactional API, and the
//! always-available simulation.

pub mod mailbox;
pub mod simulation;
pub mod transactional;

pub use mailbox::MailboxTransport;
pub use simulation::SimulationTransport;
pub use transactional::TransactionalTransport;

use askedith_application::ports::mail_gateway::{MailGateway, TransportError};
use askedith_domain::delivery::{OutboundEmail, SendReceipt, TransportKind};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// One way to carry a message
#[async_trait]
pub trait TransportAdapter: Send + Sync {
    fn kind(&self) -> TransportKind;

    /// Whether this transport could carry a message right now
    async fn is_usable(&self) -> bool;

    async fn deliver(&self, email: &OutboundEmail) -> Result<SendReceipt, TransportError>;
}

/// `MailGateway` that resolves a transport per message at send time
///
/// Transports are tried for usability in construction order; the first
/// usable one carries the message, and its result is the message's outcome.
/// A failed delivery does not fall through to the next transport.
pub struct DispatchingMailer {
    transports: Vec<Arc<dyn TransportAdapter>>,
}

impl DispatchingMailer {
    pub fn new(transports: Vec<Arc<dyn TransportAdapter>>) -> Self {
        Self { transports }
    }

    async fn resolve(&self) -> Option<&dyn TransportAdapter> {
        for transport in &self.transports {
            if transport.is_usable().await {
                return Some(transport.as_ref());
            }
        }
        None
    }
}

#[async_trait]
impl MailGateway for DispatchingMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<SendReceipt, TransportError> {
        let Some(transport) = self.resolve().await else {
            return Err(TransportError::NotConfigured(
                "no usable mail transport".to_string(),
            ));
        };
        debug!("Sending to {} via {}", email.to, transport.kind());
        transport.deliver(email).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use askedith_domain::resource::Category;

    // -- Mock TransportAdapter ------------------------------------------------

    struct MockTransport {
        kind: TransportKind,
        usable: bool,
        fails: bool,
    }

    impl MockTransport {
        fn usable(kind: TransportKind) -> Arc<dyn TransportAdapter> {
            Arc::new(Self {
                kind,
                usable: true,
                fails: false,
            })
        }

        fn unusable(kind: TransportKind) -> Arc<dyn TransportAdapter> {
            Arc::new(Self {
                kind,
                usable: false,
                fails: false,
            })
        }

        fn failing(kind: TransportKind) -> Arc<dyn TransportAdapter> {
            Arc::new(Self {
                kind,
                usable: true,
                fails: true,
            })
        }
    }

    #[async_trait]
    impl TransportAdapter for MockTransport {
        fn kind(&self) -> TransportKind {
            self.kind
        }

        async fn is_usable(&self) -> bool {
            self.usable
        }

        async fn deliver(&self, _email: &OutboundEmail) -> Result<SendReceipt, TransportError> {
            if self.fails {
                Err(TransportError::Rejected("mock rejection".to_string()))
            } else {
                Ok(SendReceipt::new(self.kind, "mock-id"))
            }
        }
    }

    fn email() -> OutboundEmail {
        OutboundEmail::new("a@example.com", "subject", "body", Category::HomeCare)
    }

    // -- Resolution order tests -------------------------------------------

    #[tokio::test]
    async fn first_usable_transport_wins() {
        let mailer = DispatchingMailer::new(vec![
            MockTransport::unusable(TransportKind::Mailbox),
            MockTransport::usable(TransportKind::Transactional),
            MockTransport::usable(TransportKind::Simulation),
        ]);

        let receipt = mailer.send(&email()).await.unwrap();
        assert_eq!(receipt.transport, TransportKind::Transactional);
    }

    #[tokio::test]
    async fn preference_order_is_construction_order() {
        let mailer = DispatchingMailer::new(vec![
            MockTransport::usable(TransportKind::Mailbox),
            MockTransport::usable(TransportKind::Transactional),
        ]);

        let receipt = mailer.send(&email()).await.unwrap();
        assert_eq!(receipt.transport, TransportKind::Mailbox);
    }

    #[tokio::test]
    async fn failure_does_not_fall_through() {
        let mailer = DispatchingMailer::new(vec![
            MockTransport::failing(TransportKind::Mailbox),
            MockTransport::usable(TransportKind::Simulation),
        ]);

        let err = mailer.send(&email()).await.unwrap_err();
        assert!(matches!(err, TransportError::Rejected(_)));
    }

    #[tokio::test]
    async fn no_usable_transport_is_not_configured() {
        let mailer = DispatchingMailer::new(vec![MockTransport::unusable(
            TransportKind::Mailbox,
        )]);

        let err = mailer.send(&email()).await.unwrap_err();
        assert!(matches!(err, TransportError::NotConfigured(_)));
    }
}
