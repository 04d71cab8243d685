//! Terminal rendering of the form state.

use colored::Colorize;
use serde_json::{json, Value};

use crate::{FieldIssue, TripRequestForm};

/// Label of the submit button for the current state
pub fn render_status(form: &TripRequestForm) -> &'static str {
    if form.loading() {
        "Generating..."
    } else {
        "Generate Itinerary"
    }
}

/// Error line or itinerary, whichever the last submission produced
pub fn render_outcome(form: &TripRequestForm) -> String {
    let mut sections = Vec::new();

    if !form.error_message().is_empty() {
        sections.push(format!("Error: {}", form.error_message()).red().to_string());
    }

    if !form.itinerary().is_empty() {
        sections.push(format!("{}\n\n{}", "Your Itinerary".bold(), form.itinerary()));
    }

    sections.join("\n\n")
}

pub fn render_issue(issue: &FieldIssue) -> String {
    format!("Error: {}", issue).red().to_string()
}

pub fn render_cancelled() -> String {
    "Request cancelled".yellow().to_string()
}

/// Machine-readable outcome: the itinerary, or the structured error payload.
pub fn render_json(form: &TripRequestForm, failure: Option<Value>) -> Value {
    match failure {
        Some(payload) => payload,
        None => json!({ "itinerary_text": form.itinerary() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ItineraryResponse, TripError};

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn status_follows_loading() {
        let mut form = TripRequestForm::new();
        assert_eq!(render_status(&form), "Generate Itinerary");

        let submission = form.begin_submit();
        assert_eq!(render_status(&form), "Generating...");

        form.settle(submission.ticket, Ok(ItineraryResponse::default()));
        assert_eq!(render_status(&form), "Generate Itinerary");
    }

    #[test]
    fn outcome_shows_itinerary() {
        plain();
        let mut form = TripRequestForm::new();
        let submission = form.begin_submit();
        form.settle(submission.ticket, Ok(ItineraryResponse::new("Day 1: Magic Kingdom")));

        assert_eq!(
            render_outcome(&form),
            "Your Itinerary\n\nDay 1: Magic Kingdom"
        );
    }

    #[test]
    fn outcome_shows_error() {
        plain();
        let mut form = TripRequestForm::new();
        let submission = form.begin_submit();
        form.settle(submission.ticket, Err(TripError::Aborted));

        assert_eq!(
            render_outcome(&form),
            "Error: Request was cancelled before it completed"
        );
    }

    #[test]
    fn json_prefers_failure_payload() {
        let form = TripRequestForm::new();
        let payload = TripError::Aborted.to_error_payload();
        assert_eq!(render_json(&form, Some(payload.clone())), payload);
        assert_eq!(render_json(&form, None), json!({ "itinerary_text": "" }));
    }
}
