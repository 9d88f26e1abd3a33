//! Outreach email composition
//!
//! Pure functions from `(Resource, AnswerSet)` to [`OutreachEmail`]. The
//! mapping from semantic meaning (who needs care, living situation, budget,
//! timeline, contact block) to question keys is fixed here; any missing or
//! skipped answer renders as the literal [`NOT_SPECIFIED`] placeholder.
//! No I/O: identical inputs always yield identical strings.

use crate::questionnaire::answer::AnswerSet;
use crate::resource::entities::Resource;

use super::message::OutreachEmail;

/// Placeholder substituted for any answer the caregiver did not provide
pub const NOT_SPECIFIED: &str = "Not specified";

fn answer_or_placeholder<'a>(answers: &'a AnswerSet, key: &str) -> &'a str {
    answers.text(key).filter(|v| !v.is_empty()).unwrap_or(NOT_SPECIFIED)
}

fn contact_or_placeholder(answers: &AnswerSet, field: &str) -> String {
    answers
        .contact_field("contact", field)
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| NOT_SPECIFIED.to_string())
}

fn care_needs_line(answers: &AnswerSet) -> String {
    match answers.selections("care_needs") {
        Some(needs) if !needs.is_empty() => needs.join(", "),
        _ => NOT_SPECIFIED.to_string(),
    }
}

/// Render the outreach email for one resource
pub fn compose(resource: &Resource, answers: &AnswerSet) -> OutreachEmail {
    let recipient = answer_or_placeholder(answers, "care_recipient");
    let age = answer_or_placeholder(answers, "care_recipient_age");
    let living = answer_or_placeholder(answers, "living_situation");
    let needs = care_needs_line(answers);
    let budget = answer_or_placeholder(answers, "budget");
    let timeline = answer_or_placeholder(answers, "timeline");
    let concerns = answer_or_placeholder(answers, "concerns");

    let last_name = contact_or_placeholder(answers, "last_name");
    let email = contact_or_placeholder(answers, "email");
    let phone = contact_or_placeholder(answers, "phone");
    let postal_code = contact_or_placeholder(answers, "postal_code");

    let subject = format!("Care inquiry for {recipient} - {}", resource.category);

    let body = format!(
        "Hello {provider},\n\
         \n\
         I found {provider} through AskEdith while looking for {category} support \
         for my family. Here is a quick picture of our situation:\n\
         \n\
         - Who needs care: {recipient}\n\
         - Age: {age}\n\
         - Living situation: {living}\n\
         - Help needed: {needs}\n\
         - Monthly budget: {budget}\n\
         - Timeline: {timeline}\n\
         \n\
         Additional notes: {concerns}\n\
         \n\
         Could you tell me more about your services and current availability? \
         You can reach me using the details below.\n\
         \n\
         Best regards,\n\
         The {last_name} family\n\
         Phone: {phone}\n\
         Email: {email}\n\
         ZIP: {postal_code}\n",
        provider = resource.display_name(),
        category = resource.category,
    );

    OutreachEmail {
        resource_id: resource.id,
        resource_name: resource.display_name().to_string(),
        category: resource.category.clone(),
        to: resource.email.clone(),
        subject,
        body,
    }
}

/// Render one email per resource, in input order
pub fn compose_batch(resources: &[Resource], answers: &AnswerSet) -> Vec<OutreachEmail> {
    resources.iter().map(|r| compose(r, answers)).collect()
}
