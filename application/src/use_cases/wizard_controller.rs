//! Wizard controller use case
//!
//! Drives one caregiver session: applies reducer actions to the wizard
//! state and persists the full state after every successful change, so an
//! interrupted session can be resumed.

use crate::ports::state_store::{StateStoreError, WizardStateStore};
use askedith_domain::questionnaire::{
    QuestionSpec, Questionnaire, Stage, WizardAction, WizardError, WizardState,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors from the wizard controller
#[derive(Error, Debug)]
pub enum WizardControllerError {
    #[error(transparent)]
    Wizard(#[from] WizardError),

    #[error("Session store error: {0}")]
    Store(#[from] StateStoreError),
}

/// Use case driving the questionnaire wizard
#[derive(Debug)]
pub struct WizardController<S: WizardStateStore> {
    questionnaire: Questionnaire,
    store: Arc<S>,
    state: WizardState,
}

impl<S: WizardStateStore> WizardController<S> {
    /// Begin a fresh session
    pub fn start(questionnaire: Questionnaire, store: Arc<S>) -> Self {
        Self {
            questionnaire,
            store,
            state: WizardState::new(),
        }
    }

    /// Resume the saved session if one exists, otherwise begin fresh.
    ///
    /// A position saved against an older questionnaire is clamped into
    /// range instead of failing.
    pub fn resume(
        questionnaire: Questionnaire,
        store: Arc<S>,
    ) -> Result<Self, WizardControllerError> {
        let state = match store.load()? {
            Some(mut saved) => {
                saved.clamp_position(&questionnaire);
                debug!("Resumed session at question {}", saved.current_question);
                saved
            }
            None => WizardState::new(),
        };
        Ok(Self {
            questionnaire,
            store,
            state,
        })
    }

    /// Apply one action and persist the resulting state.
    ///
    /// Validation failures leave both the in-memory state and the saved
    /// snapshot untouched. A reset deletes the snapshot instead of saving.
    pub fn apply(&mut self, action: WizardAction) -> Result<Stage, WizardControllerError> {
        let is_reset = matches!(action, WizardAction::Reset);
        let stage = self.state.apply(&self.questionnaire, action)?;
        if is_reset {
            self.store.clear()?;
        } else {
            self.store.save(&self.state)?;
        }
        Ok(stage)
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    pub fn stage(&self) -> Stage {
        self.state.stage(&self.questionnaire)
    }

    /// The question the wizard is currently on, or `None` at the results stage
    pub fn current_question(&self) -> Option<&QuestionSpec> {
        match self.stage() {
            Stage::Question(position) => self.questionnaire.get(position),
            Stage::Results => None,
        }
    }

    /// Whether any answer has been recorded or the position has moved
    pub fn has_progress(&self) -> bool {
        !self.state.answers.is_empty() || self.state.current_question > 1
    }
}
