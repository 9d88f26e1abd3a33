//! Wizard session state and its reducer
//!
//! [`WizardState`] is the aggregate for one caregiver session: position in
//! the questionnaire, accumulated answers, matched resources, the selection,
//! and the composed outreach drafts. It is mutated only through
//! [`WizardState::apply`], which validates, mutates, and reports the stage
//! the wizard is now on. The whole aggregate serializes as one JSON blob.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::answer::{AnswerSet, AnswerValue};
use super::spec::Questionnaire;
use super::validation::{self, ValidationError};
use crate::outreach::OutreachEmail;
use crate::resource::entities::Resource;

/// Where the wizard currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// On the question at this 1-based position
    Question(usize),
    /// Past the last question: resource matching, preview, and send
    Results,
}

/// Errors from applying a wizard action
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WizardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("no question at position {0}")]
    NoSuchQuestion(usize),

    #[error("no matched resource with id {0}")]
    UnknownResource(u32),
}

/// An action fed to the reducer
#[derive(Debug, Clone, PartialEq)]
pub enum WizardAction {
    /// Validate and store an answer for the current question, then advance
    SubmitAnswer(AnswerValue),
    /// Skip the current question if it is optional, storing the sentinel
    SkipQuestion,
    /// Step back one question without validating
    GoBack,
    /// Replace the matched resource list
    SetResources(Vec<Resource>),
    /// Select resources (by id) to contact; clears stale drafts
    SelectResources(Vec<u32>),
    /// Replace the composed outreach drafts
    SetEmails(Vec<OutreachEmail>),
    /// Move the preview to the next draft
    AdvanceEmail,
    /// Move the preview to the previous draft
    RewindEmail,
    /// Clear answers, selections, and drafts; matched resources are kept
    Reset,
}

/// One caregiver session (aggregate root)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardState {
    /// 1-based question position; one past the end means the results stage
    pub current_question: usize,
    pub answers: AnswerSet,
    pub resources: Vec<Resource>,
    pub selected_resource_ids: Vec<u32>,
    pub emails_to_send: Vec<OutreachEmail>,
    pub current_email_index: usize,
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            current_question: 1,
            answers: AnswerSet::new(),
            resources: Vec::new(),
            selected_resource_ids: Vec::new(),
            emails_to_send: Vec::new(),
            current_email_index: 0,
        }
    }

    /// The stage this state is on, relative to the questionnaire
    pub fn stage(&self, questionnaire: &Questionnaire) -> Stage {
        if self.current_question > questionnaire.len() {
            Stage::Results
        } else {
            Stage::Question(self.current_question)
        }
    }

    /// Clamp a resumed position into `1..=len+1`.
    ///
    /// A state saved against an older questionnaire may point past the end;
    /// resuming snaps it to the results stage rather than an invalid index.
    pub fn clamp_position(&mut self, questionnaire: &Questionnaire) {
        if self.current_question < 1 {
            self.current_question = 1;
        } else if self.current_question > questionnaire.len() + 1 {
            self.current_question = questionnaire.len() + 1;
        }
    }

    /// Selected resources in selection order
    pub fn selected_resources(&self) -> Vec<&Resource> {
        self.selected_resource_ids
            .iter()
            .filter_map(|id| self.resources.iter().find(|r| r.id == *id))
            .collect()
    }

    /// The draft currently in preview, if any
    pub fn current_email(&self) -> Option<&OutreachEmail> {
        self.emails_to_send.get(self.current_email_index)
    }

    /// Apply one action, returning the stage the wizard is now on.
    ///
    /// On error the state is left untouched.
    pub fn apply(
        &mut self,
        questionnaire: &Questionnaire,
        action: WizardAction,
    ) -> Result<Stage, WizardError> {
        match action {
            WizardAction::SubmitAnswer(value) => {
                let spec = questionnaire
                    .get(self.current_question)
                    .ok_or(WizardError::NoSuchQuestion(self.current_question))?;
                let stored = validation::validate(spec, &value)?;
                self.answers.insert(spec.key.clone(), stored);
                self.current_question += 1;
            }

            WizardAction::SkipQuestion => {
                let spec = questionnaire
                    .get(self.current_question)
                    .ok_or(WizardError::NoSuchQuestion(self.current_question))?;
                if spec.required {
                    return Err(ValidationError::Required.into());
                }
                self.answers.insert_skipped(spec.key.clone());
                self.current_question += 1;
            }

            WizardAction::GoBack => {
                if self.current_question > 1 {
                    self.current_question -= 1;
                }
            }

            WizardAction::SetResources(resources) => {
                self.resources = resources;
            }

            WizardAction::SelectResources(ids) => {
                let mut selected = Vec::new();
                for id in ids {
                    if !self.resources.iter().any(|r| r.id == id) {
                        return Err(WizardError::UnknownResource(id));
                    }
                    if !selected.contains(&id) {
                        selected.push(id);
                    }
                }
                self.selected_resource_ids = selected;
                // Drafts composed for a previous selection are stale.
                self.emails_to_send.clear();
                self.current_email_index = 0;
            }

            WizardAction::SetEmails(emails) => {
                self.emails_to_send = emails;
                self.current_email_index = 0;
            }

            WizardAction::AdvanceEmail => {
                if self.current_email_index + 1 < self.emails_to_send.len() {
                    self.current_email_index += 1;
                }
            }

            WizardAction::RewindEmail => {
                self.current_email_index = self.current_email_index.saturating_sub(1);
            }

            WizardAction::Reset => {
                self.answers.clear();
                self.selected_resource_ids.clear();
                self.emails_to_send.clear();
                self.current_email_index = 0;
                self.current_question = 1;
            }
        }

        Ok(self.stage(questionnaire))
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::entities::{Category, Resource};

    fn intake() -> Questionnaire {
        Questionnaire::intake()
    }

    fn answered_state(q: &Questionnaire) -> WizardState {
        let mut state = WizardState::new();
        state
            .apply(q, WizardAction::SubmitAnswer(AnswerValue::text("Mom")))
            .unwrap();
        state
    }

    fn some_resource(id: u32) -> Resource {
        Resource::new(id, Category::HomeCare, format!("Provider {id}"), "p@example.com")
    }

    #[test]
    fn test_valid_submit_advances() {
        let q = intake();
        let mut state = WizardState::new();

        let stage = state
            .apply(&q, WizardAction::SubmitAnswer(AnswerValue::text("Mom")))
            .unwrap();

        assert_eq!(stage, Stage::Question(2));
        assert_eq!(state.answers.get("care_recipient"), Some("Mom"));
    }

    #[test]
    fn test_invalid_submit_stays_put() {
        let q = intake();
        let mut state = WizardState::new();

        let err = state
            .apply(&q, WizardAction::SubmitAnswer(AnswerValue::text("   ")))
            .unwrap_err();

        assert!(matches!(err, WizardError::Validation(_)));
        assert_eq!(state.current_question, 1);
        assert!(state.answers.is_empty());
    }

    #[test]
    fn test_last_question_enters_results() {
        let q = intake();
        let mut state = WizardState::new();
        state.current_question = q.len();

        let mut fields = std::collections::BTreeMap::new();
        fields.insert("last_name".to_string(), "Singh".to_string());
        fields.insert("email".to_string(), "singh@example.com".to_string());
        fields.insert("phone".to_string(), "612-555-0100".to_string());
        fields.insert("postal_code".to_string(), "55401".to_string());

        let stage = state
            .apply(&q, WizardAction::SubmitAnswer(AnswerValue::Contact(fields)))
            .unwrap();

        assert_eq!(stage, Stage::Results);
        assert_eq!(state.stage(&q), Stage::Results);
    }

    #[test]
    fn test_back_is_noop_on_first_question() {
        let q = intake();
        let mut state = WizardState::new();

        let stage = state.apply(&q, WizardAction::GoBack).unwrap();
        assert_eq!(stage, Stage::Question(1));
    }

    #[test]
    fn test_back_steps_out_of_results() {
        let q = intake();
        let mut state = WizardState::new();
        state.current_question = q.len() + 1;

        let stage = state.apply(&q, WizardAction::GoBack).unwrap();
        assert_eq!(stage, Stage::Question(q.len()));
    }

    #[test]
    fn test_skip_requires_optional_question() {
        let q = intake();
        let mut state = WizardState::new();

        // Question 1 is required.
        assert!(state.apply(&q, WizardAction::SkipQuestion).is_err());

        // Question 7 (concerns) is optional.
        state.current_question = 7;
        let stage = state.apply(&q, WizardAction::SkipQuestion).unwrap();
        assert_eq!(stage, Stage::Question(8));
        assert!(state.answers.is_skipped("concerns"));
    }

    #[test]
    fn test_submit_past_end_is_an_error() {
        let q = intake();
        let mut state = WizardState::new();
        state.current_question = q.len() + 1;

        let err = state
            .apply(&q, WizardAction::SubmitAnswer(AnswerValue::text("x")))
            .unwrap_err();
        assert!(matches!(err, WizardError::NoSuchQuestion(_)));
    }

    #[test]
    fn test_select_resources_validates_ids() {
        let q = intake();
        let mut state = answered_state(&q);
        state
            .apply(&q, WizardAction::SetResources(vec![some_resource(1), some_resource(2)]))
            .unwrap();

        let err = state
            .apply(&q, WizardAction::SelectResources(vec![1, 99]))
            .unwrap_err();
        assert_eq!(err, WizardError::UnknownResource(99));
        assert!(state.selected_resource_ids.is_empty());

        state
            .apply(&q, WizardAction::SelectResources(vec![2, 1, 2]))
            .unwrap();
        assert_eq!(state.selected_resource_ids, vec![2, 1]);
    }

    #[test]
    fn test_reselection_clears_stale_drafts() {
        let q = intake();
        let mut state = answered_state(&q);
        state
            .apply(&q, WizardAction::SetResources(vec![some_resource(1)]))
            .unwrap();
        state.apply(&q, WizardAction::SelectResources(vec![1])).unwrap();
        state
            .apply(
                &q,
                WizardAction::SetEmails(vec![crate::outreach::compose(
                    &some_resource(1),
                    &state.answers,
                )]),
            )
            .unwrap();
        assert_eq!(state.emails_to_send.len(), 1);

        state.apply(&q, WizardAction::SelectResources(vec![1])).unwrap();
        assert!(state.emails_to_send.is_empty());
        assert_eq!(state.current_email_index, 0);
    }

    #[test]
    fn test_preview_navigation_clamps() {
        let q = intake();
        let mut state = answered_state(&q);
        state
            .apply(&q, WizardAction::SetResources(vec![some_resource(1), some_resource(2)]))
            .unwrap();
        state.apply(&q, WizardAction::SelectResources(vec![1, 2])).unwrap();
        let drafts = crate::outreach::compose_batch(
            &state.selected_resources().into_iter().cloned().collect::<Vec<_>>(),
            &state.answers,
        );
        state.apply(&q, WizardAction::SetEmails(drafts)).unwrap();

        state.apply(&q, WizardAction::AdvanceEmail).unwrap();
        assert_eq!(state.current_email_index, 1);
        state.apply(&q, WizardAction::AdvanceEmail).unwrap();
        assert_eq!(state.current_email_index, 1);

        state.apply(&q, WizardAction::RewindEmail).unwrap();
        state.apply(&q, WizardAction::RewindEmail).unwrap();
        assert_eq!(state.current_email_index, 0);
    }

    #[test]
    fn test_reset_keeps_resources() {
        let q = intake();
        let mut state = answered_state(&q);
        state
            .apply(&q, WizardAction::SetResources(vec![some_resource(1)]))
            .unwrap();
        state.apply(&q, WizardAction::SelectResources(vec![1])).unwrap();

        let stage = state.apply(&q, WizardAction::Reset).unwrap();

        assert_eq!(stage, Stage::Question(1));
        assert!(state.answers.is_empty());
        assert!(state.selected_resource_ids.is_empty());
        assert!(state.emails_to_send.is_empty());
        assert_eq!(state.resources.len(), 1);
    }

    #[test]
    fn test_state_round_trips_as_json() {
        let q = intake();
        let mut state = answered_state(&q);
        state
            .apply(&q, WizardAction::SetResources(vec![some_resource(7)]))
            .unwrap();
        state.apply(&q, WizardAction::SelectResources(vec![7])).unwrap();

        let json = serde_json::to_string(&state).unwrap();
        let back: WizardState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_clamp_position_snaps_stale_resume() {
        let q = intake();
        let mut state = WizardState::new();
        state.current_question = 42;
        state.clamp_position(&q);
        assert_eq!(state.stage(&q), Stage::Results);

        state.current_question = 0;
        state.clamp_position(&q);
        assert_eq!(state.stage(&q), Stage::Question(1));
    }
}
