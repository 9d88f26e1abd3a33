//! Mailbox credential store port
//!
//! Persists the durable credential from a completed authorization so the
//! mailbox transport stays usable across runs. At most one credential is
//! stored at a time; connecting a different mailbox replaces it.

use super::mailbox::MailboxCredential;
use thiserror::Error;

/// Errors from the credential store
#[derive(Error, Debug)]
pub enum CredentialStoreError {
    #[error("Could not read stored credential: {0}")]
    Read(String),

    #[error("Could not persist credential: {0}")]
    Write(String),

    #[error("Stored credential is malformed: {0}")]
    Malformed(String),
}

/// Durable storage for the mailbox credential
pub trait CredentialStore: Send + Sync {
    /// The stored credential, if any
    fn load(&self) -> Result<Option<MailboxCredential>, CredentialStoreError>;

    /// Persist a credential, replacing any prior one
    fn store(&self, credential: &MailboxCredential) -> Result<(), CredentialStoreError>;

    /// Remove the stored credential; `Ok(true)` when one existed
    fn clear(&self) -> Result<bool, CredentialStoreError>;
}
