//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Coupon API                         │
//! │                                                                         │
//! │  Handler: Result<Response, ApiError>                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  JsonRejection ──────────────────────────────┐                         │
//! │  CoreError::InvalidInput / InvalidBasket ────┤──► 400 Bad Request      │
//! │  DbError::UniqueViolation ───────────────────┘                         │
//! │  CoreError::CouponNotFound ──────────────────────► 404 Invalid Coupon  │
//! │  any other DbError ─── logged, generic message ──► 500                 │
//! │                                                                         │
//! │  Body:                                                                  │
//! │  { "timestamp": "...", "status": 400, "error": "Bad Request",          │
//! │    "messages": ["Coupon code cannot be null or blank."],               │
//! │    "path": "/api/create" }                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::rejection::JsonRejection;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use coupon_core::CoreError;
use coupon_db::DbError;

use crate::services::ServiceError;

/// Error title for an unknown coupon code.
pub const INVALID_COUPON: &str = "Invalid Coupon Code";

/// Error title for client input errors.
pub const BAD_REQUEST: &str = "Bad Request";

/// Error title for server-side failures.
pub const INTERNAL_ERROR: &str = "Internal Server Error";

/// Error title when the store is unreachable.
pub const SERVICE_UNAVAILABLE: &str = "Service Unavailable";

/// API error returned from handlers.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub messages: Vec<String>,
    pub path: String,
}

/// Wire shape of an error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub messages: Vec<String>,
    pub path: String,
}

impl ApiError {
    /// Creates a new API error with a single message.
    pub fn new(status: StatusCode, error: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError {
            status,
            error: error.into(),
            messages: vec![message.into()],
            path: String::new(),
        }
    }

    /// Creates a 400 error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, BAD_REQUEST, message)
    }

    /// Creates a 404 error for an unknown coupon code.
    pub fn coupon_not_found(message: impl Into<String>) -> Self {
        ApiError::new(StatusCode::NOT_FOUND, INVALID_COUPON, message)
    }

    /// Creates a 500 error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR, message)
    }

    /// Creates a 503 error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        ApiError::new(StatusCode::SERVICE_UNAVAILABLE, SERVICE_UNAVAILABLE, message)
    }

    /// Attaches the request path.
    pub fn with_path(mut self, uri: &Uri) -> Self {
        self.path = uri.path().to_string();
        self
    }

    /// Builds the serializable body.
    pub fn to_response_body(&self) -> ErrorResponse {
        ErrorResponse {
            timestamp: Utc::now(),
            status: self.status.as_u16(),
            error: self.error.clone(),
            messages: self.messages.clone(),
            path: self.path.clone(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.error, self.status.as_u16(), self.messages.join("; "))
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.to_response_body())).into_response()
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::CouponNotFound(_) => ApiError::coupon_not_found(err.to_string()),
            CoreError::InvalidInput(_) | CoreError::InvalidBasket => {
                ApiError::bad_request(err.to_string())
            }
        }
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation { field, value } => {
                ApiError::bad_request(format!("Coupon {} '{}' already exists", field, value))
            }
            DbError::ConnectionFailed(ref e) | DbError::Internal(ref e) => {
                tracing::error!(error = %e, "Store unavailable");
                ApiError::internal("Coupon store unavailable")
            }
            DbError::PoolExhausted => {
                tracing::error!("Connection pool exhausted");
                ApiError::internal("Coupon store busy")
            }
            other => {
                // Log the actual error but return a generic message
                tracing::error!(error = %other, "Store operation failed");
                ApiError::internal("Coupon store operation failed")
            }
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Core(e) => e.into(),
            ServiceError::Db(e) => e.into(),
        }
    }
}

/// Malformed or mistyped JSON bodies.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coupon_core::ValidationError;

    #[test]
    fn test_core_error_mapping() {
        let err = ApiError::from(CoreError::InvalidBasket);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error, BAD_REQUEST);
        assert_eq!(err.messages, vec!["Basket Value cannot be null or negative."]);

        let err = ApiError::from(CoreError::from(ValidationError::InvalidDiscount));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.messages, vec!["Discount Value cannot be null or negative."]);

        let err = ApiError::from(CoreError::CouponNotFound("xyz".into()));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.error, INVALID_COUPON);
        assert_eq!(err.messages, vec!["Coupon not found: xyz"]);
    }

    #[test]
    fn test_db_error_mapping() {
        let err = ApiError::from(DbError::duplicate("code", "abc"));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.messages, vec!["Coupon code 'abc' already exists"]);

        let err = ApiError::from(DbError::QueryFailed("syntax error near SELECT".into()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        // Internal detail is not leaked
        assert!(!err.messages[0].contains("syntax"));

        let err = ApiError::from(DbError::invalid_data("discount", "bad"));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_response_body_shape() {
        let uri: Uri = "/api/coupon/xyz?x=1".parse().unwrap();
        let err = ApiError::coupon_not_found("Coupon not found: xyz").with_path(&uri);

        let json = serde_json::to_value(err.to_response_body()).unwrap();
        assert_eq!(json["status"], 404);
        assert_eq!(json["error"], "Invalid Coupon Code");
        assert_eq!(json["messages"][0], "Coupon not found: xyz");
        assert_eq!(json["path"], "/api/coupon/xyz");
        assert!(json["timestamp"].is_string());
    }
}
