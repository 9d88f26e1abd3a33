//! File-backed wizard session store
//!
//! Persists the whole wizard state as one JSON blob. Writes go through a
//! temp file plus rename so an interrupted write never truncates the saved
//! session.

use askedith_application::ports::state_store::{StateStoreError, WizardStateStore};
use askedith_domain::questionnaire::WizardState;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::debug;

/// Wizard state persisted as JSON at a fixed path
pub struct FileWizardStore {
    path: PathBuf,
}

impl FileWizardStore {
    /// Store at the conventional location under the platform data directory
    pub fn in_data_dir() -> Option<Self> {
        dirs::data_dir().map(|d| Self::with_path(d.join("askedith").join("wizard_state.json")))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl WizardStateStore for FileWizardStore {
    fn load(&self) -> Result<Option<WizardState>, StateStoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StateStoreError::Read(e.to_string())),
        };
        let state =
            serde_json::from_str(&raw).map_err(|e| StateStoreError::Corrupt(e.to_string()))?;
        Ok(Some(state))
    }

    fn save(&self, state: &WizardState) -> Result<(), StateStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StateStoreError::Write(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| StateStoreError::Write(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| StateStoreError::Write(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| StateStoreError::Write(e.to_string()))?;
        debug!("Saved wizard state to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<bool, StateStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StateStoreError::Write(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use askedith_domain::questionnaire::{AnswerValue, Questionnaire, WizardAction};

    fn store_in(dir: &tempfile::TempDir) -> FileWizardStore {
        FileWizardStore::with_path(dir.path().join("wizard_state.json"))
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn saved_state_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let q = Questionnaire::intake();

        let mut state = WizardState::new();
        state
            .apply(&q, WizardAction::SubmitAnswer(AnswerValue::text("Mom")))
            .unwrap();
        store.save(&state).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, state);
        assert_eq!(loaded.answers.get("care_recipient"), Some("Mom"));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store =
            FileWizardStore::with_path(dir.path().join("nested").join("wizard_state.json"));

        store.save(&WizardState::new()).unwrap();

        assert!(store.load().unwrap().is_some());
    }

    #[test]
    fn corrupt_blob_is_a_distinct_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{ not json").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, StateStoreError::Corrupt(_)));
    }

    #[test]
    fn clear_reports_whether_a_session_existed() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(!store.clear().unwrap());
        store.save(&WizardState::new()).unwrap();
        assert!(store.clear().unwrap());
        assert!(store.load().unwrap().is_none());
    }
}
