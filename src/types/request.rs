use schemars::JsonSchema;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// Body posted to the itinerary generation endpoint.
///
/// Numeric fields are `None` when the form held a value that could not be
/// read as an integer; they serialize as `null` in that case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct ItineraryRequest {
    /// Free-form travel dates (e.g., "June 14 - June 17")
    pub travel_dates: String,
    /// Number of adults in the party
    pub number_of_adults: Option<i64>,
    /// Number of children in the party
    pub number_of_children: Option<i64>,
    /// Ages of the children, in the order they were entered
    pub children_ages: Vec<i64>,
    /// Free-form preferences (e.g., "Minimize wait times")
    pub preferences: String,
}

impl ItineraryRequest {
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// JSON schema describing the request body
pub fn request_schema() -> Result<Value> {
    Ok(serde_json::to_value(schemars::schema_for!(ItineraryRequest))?)
}
