//! Application layer for AskEdith
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::DeliveryPolicy;
pub use ports::{
    credential_store::{CredentialStore, CredentialStoreError},
    delivery_log::{DeliveryEvent, DeliveryLogger, NoDeliveryLogger},
    mail_gateway::{MailGateway, TransportError},
    mailbox::{AuthorizationStart, FiledMessage, MailboxCredential, MailboxError, MailboxPort},
    progress::{DeliveryProgress, NoProgress},
    resource_catalog::{CatalogError, ResourceCatalog},
    state_store::{StateStoreError, WizardStateStore},
};
pub use use_cases::connect_mailbox::{
    ConnectMailboxError, ConnectMailboxUseCase, ConnectionStatus,
};
pub use use_cases::fetch_resources::FetchResourcesUseCase;
pub use use_cases::send_outreach::{SendOutreachInput, SendOutreachUseCase};
pub use use_cases::wizard_controller::{WizardController, WizardControllerError};
