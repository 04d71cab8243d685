use std::time::Duration;

use thiserror::Error;

/// Shown when an error renders to an empty message.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Main error type for trip requests
#[derive(Error, Debug)]
pub enum TripError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server error: {status_text}")]
    Server { status: u16, status_text: String },

    #[error("{0}")]
    Network(#[source] reqwest::Error),

    #[error("Invalid JSON in response: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Request was cancelled before it completed")]
    Aborted,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, TripError>;

impl TripError {
    /// Build a server error from a non-success status code.
    ///
    /// The status text is the canonical reason phrase for the code, not a
    /// custom phrase the server may have sent (`500 Database Down` reads as
    /// "Internal Server Error").
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        let status_text = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_u16().to_string());

        TripError::Server {
            status: status.as_u16(),
            status_text,
        }
    }

    /// Message displayed in place of the itinerary
    pub fn user_message(&self) -> String {
        or_generic_message(self.to_string())
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            TripError::Config(_) => "CONFIG_ERROR",
            TripError::Server { .. } => "SERVER_ERROR",
            TripError::Network(_) => "NETWORK_ERROR",
            TripError::Parse(_) => "PARSE_ERROR",
            TripError::Timeout(_) => "TIMEOUT_ERROR",
            TripError::Aborted => "ABORTED",
            TripError::Validation(_) => "VALIDATION_ERROR",
            TripError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        let mut payload = serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.user_message(),
            }
        });

        if let TripError::Server { status, .. } = self {
            payload["error"]["status"] = serde_json::json!(status);
        }

        payload
    }
}

fn or_generic_message(message: String) -> String {
    if message.trim().is_empty() {
        GENERIC_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_uses_reason_phrase() {
        let error = TripError::from_status(reqwest::StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(error.to_string(), "Server error: Service Unavailable");
        assert_eq!(error.error_code(), "SERVER_ERROR");
    }

    #[test]
    fn server_error_without_reason_falls_back_to_code() {
        let status = reqwest::StatusCode::from_u16(599).unwrap();
        let error = TripError::from_status(status);
        assert_eq!(error.to_string(), "Server error: 599");
    }

    #[test]
    fn blank_messages_use_generic_text() {
        assert_eq!(or_generic_message("  ".to_string()), GENERIC_ERROR_MESSAGE);
        assert_eq!(
            TripError::Aborted.user_message(),
            "Request was cancelled before it completed"
        );
    }

    #[test]
    fn payload_carries_status_for_server_errors() {
        let payload = TripError::from_status(reqwest::StatusCode::BAD_GATEWAY).to_error_payload();
        assert_eq!(payload["error"]["code"], "SERVER_ERROR");
        assert_eq!(payload["error"]["status"], 502);
        assert_eq!(payload["error"]["message"], "Server error: Bad Gateway");

        let payload = TripError::Aborted.to_error_payload();
        assert!(payload["error"].get("status").is_none());
    }
}
