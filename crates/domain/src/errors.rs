//! Error types used throughout the client

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A single per-field validation failure extracted from an error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// Structured error raised at the OpenProject API boundary.
///
/// Carries the HTTP status (absent for transport failures), the raw decoded
/// error body, and the human-readable detail extracted from the hypermedia
/// error envelope: composite `_embedded.errors` messages and per-field
/// validation failures. When both are present the message concatenates all
/// fragments in discovery order.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub status: Option<u16>,
    pub body: Value,
    pub error_code: Option<String>,
    pub embedded_errors: Vec<String>,
    pub violations: Vec<FieldViolation>,
}

impl ApiError {
    /// Build an error from a failure response (HTTP status >= 400).
    ///
    /// The body is the opportunistically decoded response payload; pass an
    /// empty object when the body was missing or not valid JSON.
    pub fn from_response(status: u16, reason: &str, body: Value) -> Self {
        let mut message = format!("API request failed: {status} {reason}");

        let embedded_errors = collect_embedded_messages(&body);
        if !embedded_errors.is_empty() {
            message = embedded_errors.join("; ");
        }

        let error_code =
            body.get("error_code").and_then(Value::as_str).map(str::to_owned);

        let violations = collect_violations(&body);
        if !violations.is_empty() {
            let details: Vec<String> = violations
                .iter()
                .map(|v| format!("{}: {}", v.field, v.message))
                .collect();
            message = format!("{message}. Validation errors: {}", details.join("; "));
        }

        Self { message, status: Some(status), body, error_code, embedded_errors, violations }
    }

    /// Build an error with no HTTP status, for failures that never produced
    /// a response (connection errors, timeouts, undecodable bodies).
    pub fn bare(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            body: Value::Object(serde_json::Map::new()),
            error_code: None,
            embedded_errors: Vec::new(),
            violations: Vec::new(),
        }
    }

    /// Whether the remote service reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }
}

/// Pull the message strings out of a HAL `_embedded.errors` envelope.
fn collect_embedded_messages(body: &Value) -> Vec<String> {
    body.get("_embedded")
        .and_then(|e| e.get("errors"))
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e.get("message"))
                .filter_map(Value::as_str)
                .filter(|m| !m.is_empty())
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

/// Flatten a top-level `errors` object (field -> message or [messages])
/// into a list of per-field violations.
fn collect_violations(body: &Value) -> Vec<FieldViolation> {
    let mut violations = Vec::new();
    let Some(errors) = body.get("errors").and_then(Value::as_object) else {
        return violations;
    };

    for (field, value) in errors {
        match value {
            Value::Array(messages) => {
                for message in messages {
                    violations.push(FieldViolation {
                        field: field.clone(),
                        message: stringify(message),
                    });
                }
            }
            other => violations.push(FieldViolation {
                field: field.clone(),
                message: stringify(other),
            }),
        }
    }

    violations
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Main error type for Opbridge
#[derive(Debug, Error, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum Error {
    /// Failure raised at the network boundary: transport error, undecodable
    /// response, or remote rejection.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Caller-supplied input failed a local shape check; no request was made.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for Opbridge operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn plain_failure_keeps_base_message() {
        let err = ApiError::from_response(500, "Internal Server Error", json!({}));

        assert_eq!(err.message, "API request failed: 500 Internal Server Error");
        assert_eq!(err.status, Some(500));
        assert!(err.embedded_errors.is_empty());
        assert!(err.violations.is_empty());
    }

    #[test]
    fn embedded_envelope_messages_replace_base_message() {
        let body = json!({
            "_embedded": {
                "errors": [
                    {"message": "Subject can't be blank."},
                    {"message": "Project is invalid."}
                ]
            }
        });

        let err = ApiError::from_response(422, "Unprocessable Entity", body);

        assert_eq!(err.message, "Subject can't be blank.; Project is invalid.");
        assert_eq!(
            err.embedded_errors,
            vec!["Subject can't be blank.", "Project is invalid."]
        );
    }

    #[test]
    fn validation_errors_are_appended_field_by_field() {
        let body = json!({
            "errors": {
                "dueDate": ["must be after start date", "must be a date"]
            }
        });

        let err = ApiError::from_response(422, "Unprocessable Entity", body);

        assert_eq!(err.violations.len(), 2);
        assert_eq!(err.violations[0].field, "dueDate");
        assert_eq!(
            err.message,
            "API request failed: 422 Unprocessable Entity. \
             Validation errors: dueDate: must be after start date; dueDate: must be a date"
        );
    }

    #[test]
    fn embedded_and_validation_fragments_concatenate_in_discovery_order() {
        let body = json!({
            "_embedded": {"errors": [{"message": "Multiple field constraints violated."}]},
            "errors": {"subject": "is too long"}
        });

        let err = ApiError::from_response(422, "Unprocessable Entity", body);

        assert_eq!(
            err.message,
            "Multiple field constraints violated.. Validation errors: subject: is too long"
        );
    }

    #[test]
    fn error_code_is_lifted_from_body() {
        let body = json!({"error_code": "urn:openproject-org:api:v3:errors:NotFound"});
        let err = ApiError::from_response(404, "Not Found", body);

        assert_eq!(
            err.error_code.as_deref(),
            Some("urn:openproject-org:api:v3:errors:NotFound")
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn bare_errors_carry_no_status() {
        let err = ApiError::bare("Request failed: connection refused");

        assert_eq!(err.status, None);
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Request failed: connection refused");
    }

    #[test]
    fn precondition_failures_display_their_reason() {
        let err = Error::InvalidInput("Hours must be positive".into());
        assert_eq!(err.to_string(), "Invalid input: Hours must be positive");
    }
}
