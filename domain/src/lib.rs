//! Domain layer for askedith
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Intake questionnaire
//!
//! A caregiver answers a fixed, ordered list of questions ([`Questionnaire`]).
//! Answers accumulate in an [`AnswerSet`] and the whole session lives in a
//! single serializable aggregate, [`WizardState`], mutated only through
//! [`WizardState::apply`].
//!
//! ## Resources and outreach
//!
//! Matched elder-care providers are [`Resource`] records. For each selected
//! resource the composer renders one deterministic [`OutreachEmail`]; the
//! delivery value objects describe what happened when those were sent.

pub mod delivery;
pub mod outreach;
pub mod questionnaire;
pub mod resource;

// Re-export commonly used types
pub use delivery::{
    BatchStatus, DeliveryOutcome, DeliveryReport, OutboundEmail, SendReceipt, TransportKind,
};
pub use outreach::{NOT_SPECIFIED, OutreachEmail, compose, compose_batch};
pub use questionnaire::{
    answer::{Answer, AnswerSet, AnswerValue, SKIPPED},
    spec::{ContactField, ContactFieldKind, QuestionKind, QuestionSpec, Questionnaire, SELECT_ALL},
    validation::ValidationError,
    wizard::{Stage, WizardAction, WizardError, WizardState},
};
pub use resource::{
    entities::{Category, Resource},
    filter::{CatalogFilter, haversine_miles},
};
