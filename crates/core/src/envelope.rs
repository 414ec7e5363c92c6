//! Request validation and the JSON envelope returned to HTTP clients.
//!
//! Everything here is a plain value: [`handle`] decides the full response for a
//! request (status and body) without touching a socket, so the HTTP layer only
//! has to copy an [`ApiResponse`] onto the wire.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::stats::{compute_stats, Stats};
use crate::transform::{transform, TransformError};

pub const DEFAULT_MODE: &str = "auto";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Request body must be a JSON object")]
    InvalidBody,

    #[error("Field `text` must be a non-empty string")]
    InvalidText,
}

/// A validated processing request.
///
/// `mode` is kept as the raw string the client sent; it is only resolved by
/// the transformer, so an unknown mode is a processing failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRequest {
    pub text: String,
    pub mode: String,
}

/// Success envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessResponse {
    pub success: bool,
    pub result: String,
    pub stats: Stats,
    pub mode: String,
    pub timestamp: String,
}

/// Failure envelope. Never carries internal details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    pub message: String,
}

impl ErrorBody {
    fn new(error: &str, message: &str) -> Self {
        Self {
            success: false,
            error: error.to_string(),
            message: message.to_string(),
        }
    }
}

/// Status code plus optional JSON body, ready to be written by the HTTP layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Option<serde_json::Value>,
}

impl ApiResponse {
    pub fn ok(envelope: &ProcessResponse) -> Self {
        Self::json(200, envelope)
    }

    pub fn preflight() -> Self {
        Self {
            status: 200,
            body: None,
        }
    }

    pub fn method_not_allowed() -> Self {
        Self::json(
            405,
            &ErrorBody::new("method not allowed", "use POST to submit text"),
        )
    }

    pub fn bad_request() -> Self {
        Self::json(
            400,
            &ErrorBody::new("invalid input", "provide a non-empty text field"),
        )
    }

    pub fn internal_error() -> Self {
        Self::json(
            500,
            &ErrorBody::new(
                "internal server error",
                "an error occurred while processing the request",
            ),
        )
    }

    fn json<T: Serialize>(status: u16, body: &T) -> Self {
        Self {
            status,
            body: Some(serde_json::to_value(body).unwrap_or(serde_json::Value::Null)),
        }
    }
}

/// What the HTTP layer should send, plus anything it should log server-side.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub response: ApiResponse,
    pub internal_error: Option<String>,
}

impl From<ApiResponse> for Outcome {
    fn from(response: ApiResponse) -> Self {
        Self {
            response,
            internal_error: None,
        }
    }
}

/// Extract a [`ProcessRequest`] from a decoded JSON body.
pub fn validate_request(body: &serde_json::Value) -> Result<ProcessRequest, ValidationError> {
    let object = body.as_object().ok_or(ValidationError::InvalidBody)?;

    let text = match object.get("text") {
        Some(serde_json::Value::String(text)) if !text.is_empty() => text.clone(),
        _ => return Err(ValidationError::InvalidText),
    };

    let mode = match object.get("mode") {
        None => DEFAULT_MODE.to_string(),
        Some(serde_json::Value::String(mode)) => mode.clone(),
        Some(other) => other.to_string(),
    };

    Ok(ProcessRequest { text, mode })
}

/// Run the transformation and assemble the success envelope.
pub fn process(
    request: &ProcessRequest,
    timestamp: DateTime<Utc>,
) -> Result<ProcessResponse, TransformError> {
    let result = transform(&request.text, &request.mode)?;
    let stats = compute_stats(&request.text, &result);

    Ok(ProcessResponse {
        success: true,
        result,
        stats,
        mode: request.mode.clone(),
        timestamp: format_timestamp(timestamp),
    })
}

/// ISO-8601 UTC with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Decide the response for one HTTP request.
///
/// `method` is the upper-case HTTP method and `body` the raw request body.
pub fn handle(method: &str, body: &[u8], now: DateTime<Utc>) -> Outcome {
    match method {
        "OPTIONS" => return ApiResponse::preflight().into(),
        "POST" => {}
        _ => return ApiResponse::method_not_allowed().into(),
    }

    let request = match serde_json::from_slice::<serde_json::Value>(body)
        .map_err(|_| ValidationError::InvalidBody)
        .and_then(|value| validate_request(&value))
    {
        Ok(request) => request,
        Err(_) => return ApiResponse::bad_request().into(),
    };

    match process(&request, now) {
        Ok(envelope) => ApiResponse::ok(&envelope).into(),
        Err(e) => Outcome {
            response: ApiResponse::internal_error(),
            internal_error: Some(e.to_string()),
        },
    }
}
