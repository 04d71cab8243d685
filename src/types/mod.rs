pub mod request;
pub mod response;

pub use request::{request_schema, ItineraryRequest};
pub use response::{ItineraryResponse, MISSING_ITINERARY_TEXT};
