//! # REST API Interface Layer
//!
//! HTTP endpoints for the campus ledger. This layer handles:
//! - JSON request/response serialization against the `shared` DTOs
//! - Translation of domain errors to HTTP status codes
//! - Request logging
//!
//! It is a pure translation layer: no business logic lives here.

pub mod attendance_apis;
pub mod fee_apis;
pub mod leave_apis;
pub mod mappers;
pub mod marks_apis;
pub mod qr_apis;
pub mod student_apis;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::NaiveDate;
use log::error;
use serde_json::json;

use crate::domain::DomainError;

/// Map a domain error to its HTTP status and a `{"error": ...}` body.
pub(crate) fn domain_error_response(err: DomainError) -> Response {
    let status = match &err {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Conflict(_) | DomainError::AlreadyDone => StatusCode::CONFLICT,
        DomainError::InvalidInput(_) | DomainError::ExceedsBalance { .. } => {
            StatusCode::BAD_REQUEST
        }
        DomainError::Expired => StatusCode::GONE,
        DomainError::Storage(inner) => {
            error!("Storage failure: {:#}", inner);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

pub(crate) fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": message })),
    )
        .into_response()
}

/// Parse a `YYYY-MM-DD` calendar day from the wire.
pub(crate) fn parse_day(value: &str, field: &str) -> Result<NaiveDate, Response> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| bad_request(&format!("{} must be a YYYY-MM-DD date", field)))
}
