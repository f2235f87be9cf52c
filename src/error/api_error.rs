//! Errors exposed at the outer boundary (e.g. an HTTP response body).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constraint::ValidationError;

/// Code carried by every [`ApiValidationError`].
pub const VALIDATION_ERROR_CODE: &str = "ValidationError";

const VALIDATION_ERROR_MESSAGE: &str = "Input validation failed";

/// The uniform error an operator returns when its input fails validation.
///
/// Serializes to
/// `{"code": "ValidationError", "message": ..., "timestamp": <ISO-8601>, "details": [...]}`.
///
/// # Example
///
/// ```rust
/// use verdict::{ApiValidationError, ValidationError};
///
/// let error = ApiValidationError::new(ValidationError::root("expected object"));
/// assert_eq!(error.code, "ValidationError");
/// assert_eq!(error.details.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ApiValidationError {
    /// Always [`VALIDATION_ERROR_CODE`].
    pub code: String,
    /// Human-readable summary.
    pub message: String,
    /// When the failure was produced.
    pub timestamp: DateTime<Utc>,
    /// The normalized constraint tree.
    pub details: ValidationError,
}

impl ApiValidationError {
    /// Wraps a constraint list, stamped with the current time.
    pub fn new(details: ValidationError) -> Self {
        Self::at(details, Utc::now())
    }

    /// Wraps a constraint list with an explicit timestamp.
    pub fn at(details: ValidationError, timestamp: DateTime<Utc>) -> Self {
        Self {
            code: VALIDATION_ERROR_CODE.to_string(),
            message: VALIDATION_ERROR_MESSAGE.to_string(),
            timestamp,
            details,
        }
    }
}

/// A general error surfaced to callers outside the crate.
///
/// Business steps that do not need their own error enum can fail with this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("{code}: {message}")]
pub struct ApiError {
    /// Machine-readable code, e.g. `ValidationError` or `TodoAlreadyExists`.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// A short message suitable for UI labels.
    pub short_message: String,
    /// Optional structured detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiError {
    /// Creates an error without details; the short message repeats `message`.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            code: code.into(),
            short_message: message.clone(),
            message,
            details: None,
        }
    }

    /// Sets the short message.
    pub fn with_short_message(mut self, short_message: impl Into<String>) -> Self {
        self.short_message = short_message.into();
        self
    }

    /// Attaches structured details.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Returns true if this error came from failed input validation.
    pub fn is_validation(&self) -> bool {
        self.code == VALIDATION_ERROR_CODE
    }
}

impl From<ApiValidationError> for ApiError {
    fn from(error: ApiValidationError) -> Self {
        let details = serde_json::to_value(&error.details).ok();
        Self {
            code: error.code,
            short_message: "Invalid input".to_string(),
            message: error.message,
            details,
        }
    }
}
