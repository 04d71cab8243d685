pub mod ages;
pub mod form;
pub mod submission;

pub use ages::{parse_children_ages, parse_leading_int};
pub use form::{coerce_number, FieldIssue, FormField, SubmissionPhase, TripRequestForm};
pub use submission::{PendingRequest, Submission, SubmissionTicket};
