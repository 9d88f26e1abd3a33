//! Infrastructure layer for AskEdith
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod catalog;
pub mod config;
pub mod logging;
pub mod mailbox;
pub mod state;
pub mod transports;

// Re-export commonly used types
pub use catalog::{HttpCatalog, SeedCatalog};
pub use config::{
    CatalogSource, ConfigError, ConfigIssue, ConfigLoader, FileCatalogConfig, FileConfig,
    FileDeliveryConfig, FileMailboxConfig, FileOutputConfig, FileTransactionalConfig,
    FileWizardConfig, Severity,
};
pub use logging::JsonlDeliveryLog;
pub use mailbox::{FileCredentialStore, MailboxClient};
pub use state::FileWizardStore;
pub use transports::{
    DispatchingMailer, MailboxTransport, SimulationTransport, TransactionalTransport,
    TransportAdapter,
};
