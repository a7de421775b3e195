//! HTTP error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Structured error body. Validation failures add one detail per violated
/// rule; nothing from the storage engine's internals is echoed outward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ApiErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ApiErrorBody {
                message: message.into(),
                details: None,
            },
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn validation(details: Vec<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ApiErrorBody {
                message: "Validation error".to_string(),
                details: Some(details),
            },
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { message } => Self::not_found(message),
            DomainError::Validation { messages } => Self::validation(messages),
            DomainError::DuplicateEmail { .. } => Self::conflict(err.to_string()),
            DomainError::InvalidId { message } => Self::bad_request(message),
            DomainError::Hashing { .. } => Self::internal("Error processing credentials"),
            DomainError::Storage { .. } => Self::unavailable("Storage unavailable"),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.body.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_creation() {
        let err = ApiError::bad_request("Invalid user ID");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.body.message, "Invalid user ID");
        assert!(err.body.details.is_none());
    }

    #[test]
    fn test_validation_error_carries_details() {
        let err = ApiError::validation(vec![
            "firstname is required".to_string(),
            "password must be at least 6 characters long".to_string(),
        ]);

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.body.message, "Validation error");
        assert_eq!(err.body.details.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_domain_error_mapping() {
        let cases = [
            (DomainError::not_found("gone"), StatusCode::NOT_FOUND),
            (
                DomainError::validation(vec!["bad".to_string()]),
                StatusCode::BAD_REQUEST,
            ),
            (
                DomainError::duplicate_email("a@b.co"),
                StatusCode::CONFLICT,
            ),
            (DomainError::invalid_id("nope"), StatusCode::BAD_REQUEST),
            (
                DomainError::hashing("boom"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                DomainError::storage("down"),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];

        for (domain_err, expected_status) in cases {
            let api_err: ApiError = domain_err.into();
            assert_eq!(api_err.status, expected_status);
        }
    }

    #[test]
    fn test_storage_error_hides_internals() {
        let api_err: ApiError =
            DomainError::storage("connection refused at 10.0.0.5:5432").into();

        assert!(!api_err.body.message.contains("10.0.0.5"));
    }

    #[test]
    fn test_error_serialization_omits_empty_details() {
        let err = ApiError::not_found("Account '42' not found");
        let json = serde_json::to_string(&err.body).unwrap();

        assert!(json.contains("Account '42' not found"));
        assert!(!json.contains("details"));
    }
}
