//! File-backed mailbox credential store

use askedith_application::ports::credential_store::{CredentialStore, CredentialStoreError};
use askedith_application::ports::mailbox::MailboxCredential;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::debug;

/// Mailbox credential persisted as JSON at a fixed path
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Store at the conventional location under the platform data directory
    pub fn in_data_dir() -> Option<Self> {
        dirs::data_dir()
            .map(|d| Self::with_path(d.join("askedith").join("mailbox_credential.json")))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<MailboxCredential>, CredentialStoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CredentialStoreError::Read(e.to_string())),
        };
        let credential = serde_json::from_str(&raw)
            .map_err(|e| CredentialStoreError::Malformed(e.to_string()))?;
        Ok(Some(credential))
    }

    fn store(&self, credential: &MailboxCredential) -> Result<(), CredentialStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| CredentialStoreError::Write(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(credential)
            .map_err(|e| CredentialStoreError::Write(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| CredentialStoreError::Write(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| CredentialStoreError::Write(e.to_string()))?;
        debug!("Stored mailbox credential for {}", credential.email);
        Ok(())
    }

    fn clear(&self) -> Result<bool, CredentialStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CredentialStoreError::Write(e.to_string())),
        }
    }
}
