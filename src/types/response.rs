use serde_json::Value;

/// Shown when a successful response carries no usable `itinerary_text`.
pub const MISSING_ITINERARY_TEXT: &str = "No itinerary text returned.";

/// Successful reply from the itinerary generation endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItineraryResponse {
    pub itinerary_text: Option<String>,
}

impl ItineraryResponse {
    pub fn new(itinerary_text: impl Into<String>) -> Self {
        Self {
            itinerary_text: Some(itinerary_text.into()),
        }
    }

    /// Read a response body of any shape. Only a non-empty string
    /// `itinerary_text` counts as itinerary text.
    pub fn from_value(value: &Value) -> Self {
        let itinerary_text = value
            .get("itinerary_text")
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .map(str::to_string);

        Self { itinerary_text }
    }

    pub fn text_or_fallback(&self) -> String {
        self.itinerary_text
            .clone()
            .unwrap_or_else(|| MISSING_ITINERARY_TEXT.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_itinerary_text() {
        let response = ItineraryResponse::from_value(&json!({"itinerary_text": "Day 1: ..."}));
        assert_eq!(response.text_or_fallback(), "Day 1: ...");
    }

    #[test]
    fn other_shapes_fall_back() {
        for body in [
            json!({}),
            json!({"itinerary_text": ""}),
            json!({"itinerary_text": 42}),
            json!({"itinerary_text": null}),
            json!(["Day 1"]),
            json!("Day 1"),
        ] {
            let response = ItineraryResponse::from_value(&body);
            assert_eq!(response.text_or_fallback(), MISSING_ITINERARY_TEXT, "{body}");
        }
    }
}
