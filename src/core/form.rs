use std::fmt;

use tracing::{debug, info, warn};

use super::ages::parse_children_ages;
use super::submission::{Submission, SubmissionTicket};
use crate::{
    error::Result,
    services::itinerary_client::ItineraryService,
    types::{ItineraryRequest, ItineraryResponse},
};

const DEFAULT_ADULTS: i64 = 2;
const DEFAULT_CHILDREN: i64 = 0;

/// Inputs of the trip request form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    TravelDates,
    NumberOfAdults,
    NumberOfChildren,
    ChildrenAges,
    Preferences,
}

impl FormField {
    /// Fields in display order
    pub const ALL: [FormField; 5] = [
        FormField::TravelDates,
        FormField::NumberOfAdults,
        FormField::NumberOfChildren,
        FormField::ChildrenAges,
        FormField::Preferences,
    ];

    /// Label shown next to the input
    pub fn label(&self) -> &'static str {
        match self {
            FormField::TravelDates => "Travel Dates",
            FormField::NumberOfAdults => "Number of Adults",
            FormField::NumberOfChildren => "Number of Children",
            FormField::ChildrenAges => "Children Ages (comma-separated)",
            FormField::Preferences => "Preferences",
        }
    }

    /// Example text shown in an empty input
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            FormField::TravelDates => Some("e.g. June 14 - June 17"),
            FormField::ChildrenAges => Some("e.g. 5, 9"),
            FormField::Preferences => Some("e.g. Minimize wait times, loves princesses, etc."),
            FormField::NumberOfAdults | FormField::NumberOfChildren => None,
        }
    }

    /// Smallest accepted value for numeric fields
    pub fn minimum(&self) -> Option<i64> {
        match self {
            FormField::NumberOfAdults => Some(1),
            FormField::NumberOfChildren => Some(0),
            _ => None,
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A constraint the current form values do not satisfy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: FormField,
    pub message: String,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Where the form is in its submission cycle.
///
/// `Succeeded` and `Failed` are idle states that remember how the last
/// submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionPhase {
    pub fn is_idle(&self) -> bool {
        !matches!(self, SubmissionPhase::Submitting)
    }
}

/// State of the trip request form: the user's inputs plus the outcome of
/// the latest submission.
#[derive(Debug, Clone)]
pub struct TripRequestForm {
    travel_dates: String,
    number_of_adults: Option<i64>,
    number_of_children: Option<i64>,
    children_ages: String,
    preferences: String,
    itinerary: String,
    error_message: String,
    loading: bool,
    phase: SubmissionPhase,
    sequence: u64,
}

impl Default for TripRequestForm {
    fn default() -> Self {
        Self::new()
    }
}

impl TripRequestForm {
    /// Create an empty form with the default party of two adults
    pub fn new() -> Self {
        Self {
            travel_dates: String::new(),
            number_of_adults: Some(DEFAULT_ADULTS),
            number_of_children: Some(DEFAULT_CHILDREN),
            children_ages: String::new(),
            preferences: String::new(),
            itinerary: String::new(),
            error_message: String::new(),
            loading: false,
            phase: SubmissionPhase::Idle,
            sequence: 0,
        }
    }

    /// Travel dates, as typed
    pub fn travel_dates(&self) -> &str {
        &self.travel_dates
    }

    /// `None` when the last input could not be read as a number
    pub fn number_of_adults(&self) -> Option<i64> {
        self.number_of_adults
    }

    /// `None` when the last input could not be read as a number
    pub fn number_of_children(&self) -> Option<i64> {
        self.number_of_children
    }

    /// Raw comma-separated text, as typed
    pub fn children_ages(&self) -> &str {
        &self.children_ages
    }

    /// Free-form preferences, as typed
    pub fn preferences(&self) -> &str {
        &self.preferences
    }

    /// Itinerary text of the last successful submission, empty otherwise
    pub fn itinerary(&self) -> &str {
        &self.itinerary
    }

    /// Error text of the last failed submission, empty otherwise
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// True while the latest submission has not settled
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Current position in the submission cycle
    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// Ticket of the most recent submission, if any
    pub fn latest_ticket(&self) -> Option<SubmissionTicket> {
        (self.sequence > 0).then_some(SubmissionTicket::new(self.sequence))
    }

    /// Set the travel dates
    pub fn set_travel_dates(&mut self, value: impl Into<String>) {
        self.travel_dates = value.into();
    }

    /// Set the number of adults
    pub fn set_number_of_adults(&mut self, value: i64) {
        self.number_of_adults = Some(value);
    }

    /// Set the number of children
    pub fn set_number_of_children(&mut self, value: i64) {
        self.number_of_children = Some(value);
    }

    /// Set the raw comma-separated children ages
    pub fn set_children_ages(&mut self, value: impl Into<String>) {
        self.children_ages = value.into();
    }

    /// Set the preferences
    pub fn set_preferences(&mut self, value: impl Into<String>) {
        self.preferences = value.into();
    }

    /// Apply raw input to a single field. Numeric fields go through
    /// [`coerce_number`]; nothing is validated here.
    pub fn update(&mut self, field: FormField, raw: &str) {
        match field {
            FormField::TravelDates => self.set_travel_dates(raw),
            FormField::NumberOfAdults => self.number_of_adults = coerce_field(field, raw),
            FormField::NumberOfChildren => self.number_of_children = coerce_field(field, raw),
            FormField::ChildrenAges => self.set_children_ages(raw),
            FormField::Preferences => self.set_preferences(raw),
        }
    }

    /// Check the constraints a browser would enforce before submitting:
    /// travel dates present, and numeric fields readable and at or above
    /// their minimum. `submit` does not call this.
    pub fn validate(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();

        if self.travel_dates.trim().is_empty() {
            issues.push(FieldIssue {
                field: FormField::TravelDates,
                message: "is required".to_string(),
            });
        }

        for (field, value) in [
            (FormField::NumberOfAdults, self.number_of_adults),
            (FormField::NumberOfChildren, self.number_of_children),
        ] {
            let minimum = field.minimum().unwrap_or(0);
            match value {
                None => issues.push(FieldIssue {
                    field,
                    message: "must be a whole number".to_string(),
                }),
                Some(count) if count < minimum => issues.push(FieldIssue {
                    field,
                    message: format!("must be at least {minimum}"),
                }),
                Some(_) => {}
            }
        }

        issues
    }

    /// Payload for the current inputs. Does not touch form state.
    pub fn build_request(&self) -> ItineraryRequest {
        ItineraryRequest {
            travel_dates: self.travel_dates.clone(),
            number_of_adults: self.number_of_adults,
            number_of_children: self.number_of_children,
            children_ages: parse_children_ages(&self.children_ages),
            preferences: self.preferences.clone(),
        }
    }

    /// Start a submission: mark the form as loading, clear the previous
    /// outcome and hand out a ticket with the payload to send.
    pub fn begin_submit(&mut self) -> Submission {
        self.sequence += 1;
        self.loading = true;
        self.phase = SubmissionPhase::Submitting;
        self.error_message.clear();
        self.itinerary.clear();

        let ticket = SubmissionTicket::new(self.sequence);
        let request = self.build_request();
        info!(ticket = ticket.sequence(), "Submitting trip request");
        debug!(payload = ?request, "trip request payload");

        Submission { ticket, request }
    }

    /// Apply the outcome of a submission.
    ///
    /// Outcomes for anything but the latest ticket are dropped and leave the
    /// form untouched. Returns whether the outcome was applied.
    pub fn settle(
        &mut self,
        ticket: SubmissionTicket,
        outcome: Result<ItineraryResponse>,
    ) -> bool {
        if ticket.sequence() != self.sequence {
            debug!(
                ticket = ticket.sequence(),
                latest = self.sequence,
                "Ignoring stale submission outcome"
            );
            return false;
        }

        match outcome {
            Ok(response) => {
                self.itinerary = response.text_or_fallback();
                self.phase = SubmissionPhase::Succeeded;
                info!(ticket = ticket.sequence(), "Itinerary received");
            }
            Err(err) => {
                warn!(ticket = ticket.sequence(), "Trip request failed: {}", err);
                self.error_message = err.user_message();
                self.phase = SubmissionPhase::Failed;
            }
        }
        self.loading = false;

        true
    }

    /// Submit the form through `service` and wait for the outcome.
    pub async fn submit<S>(&mut self, service: &S) -> SubmissionPhase
    where
        S: ItineraryService + ?Sized,
    {
        let Submission { ticket, request } = self.begin_submit();
        let outcome = service.generate(&request).await;
        self.settle(ticket, outcome);
        self.phase
    }
}

/// Read numeric input the way a number field does: surrounding whitespace
/// is ignored, empty input is zero, and anything that is not a whole number
/// yields `None`.
pub fn coerce_number(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0);
    }

    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }

    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && value.fract() == 0.0)
        .filter(|value| value.abs() < i64::MAX as f64)
        .map(|value| value as i64)
}

fn coerce_field(field: FormField, raw: &str) -> Option<i64> {
    let value = coerce_number(raw);
    if value.is_none() {
        warn!("{} is not a whole number: {:?}", field, raw);
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TripError;
    use async_trait::async_trait;

    #[derive(Debug)]
    struct CannedService(Option<&'static str>);

    #[async_trait]
    impl ItineraryService for CannedService {
        async fn generate(&self, _request: &ItineraryRequest) -> Result<ItineraryResponse> {
            match self.0 {
                Some(text) => Ok(ItineraryResponse::new(text)),
                None => Err(TripError::Server {
                    status: 500,
                    status_text: "Internal Server Error".to_string(),
                }),
            }
        }
    }

    #[test]
    fn starts_with_defaults() {
        let form = TripRequestForm::new();
        assert_eq!(form.travel_dates(), "");
        assert_eq!(form.number_of_adults(), Some(2));
        assert_eq!(form.number_of_children(), Some(0));
        assert_eq!(form.itinerary(), "");
        assert_eq!(form.error_message(), "");
        assert!(!form.loading());
        assert_eq!(form.phase(), SubmissionPhase::Idle);
        assert!(form.latest_ticket().is_none());
    }

    #[test]
    fn coerces_numbers_like_a_number_input() {
        assert_eq!(coerce_number("3"), Some(3));
        assert_eq!(coerce_number(" 4 "), Some(4));
        assert_eq!(coerce_number(""), Some(0));
        assert_eq!(coerce_number("3.0"), Some(3));
        assert_eq!(coerce_number("2.5"), None);
        assert_eq!(coerce_number("two"), None);
        assert_eq!(coerce_number("NaN"), None);
    }

    #[test]
    fn update_touches_one_field() {
        let mut form = TripRequestForm::new();
        form.update(FormField::NumberOfAdults, "abc");
        assert_eq!(form.number_of_adults(), None);
        assert_eq!(form.number_of_children(), Some(0));

        form.update(FormField::ChildrenAges, "5, 9");
        assert_eq!(form.children_ages(), "5, 9");
        assert_eq!(form.travel_dates(), "");
    }

    #[test]
    fn validate_reports_browser_constraints() {
        let mut form = TripRequestForm::new();
        form.update(FormField::NumberOfAdults, "0");
        form.update(FormField::NumberOfChildren, "x");

        let issues = form.validate();
        let fields: Vec<FormField> = issues.iter().map(|issue| issue.field).collect();
        assert_eq!(
            fields,
            vec![
                FormField::TravelDates,
                FormField::NumberOfAdults,
                FormField::NumberOfChildren
            ]
        );
        assert_eq!(issues[1].to_string(), "Number of Adults: must be at least 1");

        form.set_travel_dates("June 14 - June 17");
        form.set_number_of_adults(1);
        form.set_number_of_children(0);
        assert!(form.validate().is_empty());
    }

    #[test]
    fn loading_spans_begin_to_settle() {
        let mut form = TripRequestForm::new();
        let submission = form.begin_submit();
        assert!(form.loading());
        assert_eq!(form.phase(), SubmissionPhase::Submitting);

        assert!(form.settle(submission.ticket, Ok(ItineraryResponse::new("Day 1"))));
        assert!(!form.loading());
        assert_eq!(form.itinerary(), "Day 1");
        assert_eq!(form.phase(), SubmissionPhase::Succeeded);
    }

    #[test]
    fn stale_outcomes_are_ignored() {
        let mut form = TripRequestForm::new();
        let first = form.begin_submit();
        let second = form.begin_submit();

        assert!(!form.settle(first.ticket, Ok(ItineraryResponse::new("old plan"))));
        assert!(form.loading());
        assert_eq!(form.itinerary(), "");

        assert!(form.settle(second.ticket, Ok(ItineraryResponse::new("new plan"))));
        assert!(!form.loading());
        assert_eq!(form.itinerary(), "new plan");
        assert_eq!(form.latest_ticket(), Some(second.ticket));
    }

    #[test]
    fn resubmitting_clears_previous_outcome() {
        let mut form = TripRequestForm::new();
        form.set_travel_dates("May 1 - May 3");

        let phase = tokio_test::block_on(form.submit(&CannedService(None)));
        assert_eq!(phase, SubmissionPhase::Failed);
        assert_eq!(form.error_message(), "Server error: Internal Server Error");
        assert_eq!(form.itinerary(), "");

        let phase = tokio_test::block_on(form.submit(&CannedService(Some("Day 1: parks"))));
        assert_eq!(phase, SubmissionPhase::Succeeded);
        assert_eq!(form.error_message(), "");
        assert_eq!(form.itinerary(), "Day 1: parks");
        assert!(phase.is_idle());
    }
}
