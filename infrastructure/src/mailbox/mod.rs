//! Connected-mailbox provider client and credential persistence

mod client;
mod credentials;

pub use client::MailboxClient;
pub use credentials::FileCredentialStore;
