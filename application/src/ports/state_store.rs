//! Wizard state store port
//!
//! Persists the questionnaire state between runs so a caregiver can resume
//! where they left off instead of retyping answers.

use askedith_domain::questionnaire::WizardState;
use thiserror::Error;

/// Errors from the state store
#[derive(Error, Debug)]
pub enum StateStoreError {
    #[error("Could not read saved session: {0}")]
    Read(String),

    #[error("Could not save session: {0}")]
    Write(String),

    #[error("Saved session is corrupt: {0}")]
    Corrupt(String),
}

/// Durable storage for in-progress wizard sessions
pub trait WizardStateStore: Send + Sync {
    /// The saved state, if a session exists
    fn load(&self) -> Result<Option<WizardState>, StateStoreError>;

    /// Persist the current state, replacing any prior snapshot
    fn save(&self, state: &WizardState) -> Result<(), StateStoreError>;

    /// Discard the saved session; `Ok(true)` when one existed
    fn clear(&self) -> Result<bool, StateStoreError>;
}
