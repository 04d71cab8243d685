//! trip-planner-rs: collect trip details and request a generated itinerary
//!
//! The [`TripRequestForm`] holds what the traveller entered, turns it into an
//! [`ItineraryRequest`] and records how the request settled. The request
//! itself goes through an [`ItineraryService`], normally the HTTP
//! [`ItineraryClient`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use trip_planner_rs::{ItineraryClient, SubmissionPhase, TripRequestForm};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ItineraryClient::from_env()?;
//!
//!     let mut form = TripRequestForm::new();
//!     form.set_travel_dates("June 14 - June 17");
//!     form.set_children_ages("5, 9");
//!     form.set_number_of_children(2);
//!
//!     match form.submit(&client).await {
//!         SubmissionPhase::Succeeded => println!("{}", form.itinerary()),
//!         _ => eprintln!("Error: {}", form.error_message()),
//!     }
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod error;
pub(crate) mod services;
pub mod types;

pub use core::{
    coerce_number, parse_children_ages, FieldIssue, FormField, PendingRequest, Submission,
    SubmissionPhase, SubmissionTicket, TripRequestForm,
};
pub use error::{Result, TripError};
pub use services::itinerary_client::{
    ItineraryClient, ItineraryService, BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_TIMEOUT,
    TIMEOUT_ENV,
};
pub use types::{request_schema, ItineraryRequest, ItineraryResponse, MISSING_ITINERARY_TEXT};

#[cfg(feature = "cli")]
pub mod cli;
