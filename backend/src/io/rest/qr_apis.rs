//! # REST API for QR Attendance Sessions
//!
//! Endpoints for the QR session lifecycle: generate, scan, end, extend.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::info;

use super::{bad_request, domain_error_response, mappers};
use crate::domain::commands::qr::{GenerateSessionCommand, ScanSessionCommand};
use crate::AppState;
use shared::{ExtendQrSessionRequest, GenerateQrSessionRequest, ScanQrRequest, ScanQrResponse};

/// Create a new session for a (teacher, subject) pair
pub async fn generate_session(
    State(state): State<AppState>,
    Json(request): Json<GenerateQrSessionRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/attendance/qr/generate - teacher: {}, subject: {}",
        request.teacher_id, request.subject_id
    );

    let command = GenerateSessionCommand {
        teacher_id: request.teacher_id,
        subject_id: request.subject_id,
        valid_minutes: request.valid_minutes,
    };
    match state.qr_session_service.generate(command) {
        Ok(session) => {
            (StatusCode::CREATED, Json(mappers::qr_session_to_dto(session))).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// Record a student scan; the token is the session code or session id
pub async fn scan_session(
    State(state): State<AppState>,
    Json(request): Json<ScanQrRequest>,
) -> impl IntoResponse {
    info!("POST /api/attendance/qr/scan - student: {}", request.student_id);

    let token = match request.code.or(request.session_id) {
        Some(token) => token,
        None => return bad_request("either code or sessionId is required"),
    };

    let command = ScanSessionCommand {
        student_id: request.student_id,
        token,
    };
    match state.qr_session_service.scan(command) {
        Ok(result) => {
            let response = ScanQrResponse {
                session_id: result.session_id,
                record: mappers::attendance_record_to_dto(result.record),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// Deactivate a session; idempotent
pub async fn end_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/attendance/qr/{}/end", id);

    match state.qr_session_service.end(&id) {
        Ok(session) => {
            (StatusCode::OK, Json(mappers::qr_session_to_dto(session))).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// Push the expiry forward and reactivate the session
pub async fn extend_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ExtendQrSessionRequest>,
) -> impl IntoResponse {
    info!("POST /api/attendance/qr/{}/extend", id);

    match state
        .qr_session_service
        .extend(&id, request.additional_minutes)
    {
        Ok(session) => {
            (StatusCode::OK, Json(mappers::qr_session_to_dto(session))).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::test_utils::TestHelper;

    fn setup_test_state() -> (AppState, TestHelper) {
        let helper = TestHelper::new();
        (AppState::new(helper.store.clone()), helper)
    }

    #[tokio::test]
    async fn test_scan_without_token_is_bad_request() {
        let (state, helper) = setup_test_state();
        let student = helper.create_test_student("CS-101").unwrap();
        let request = ScanQrRequest {
            student_id: student.id,
            code: None,
            session_id: None,
        };
        let response = scan_session(State(state), Json(request))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_duplicate_scan_is_conflict() {
        let (state, helper) = setup_test_state();
        let student = helper.create_test_student("CS-101").unwrap();

        let session = state
            .qr_session_service
            .generate(GenerateSessionCommand {
                teacher_id: "teacher::1".to_string(),
                subject_id: "subject::algo".to_string(),
                valid_minutes: None,
            })
            .unwrap();

        let request = ScanQrRequest {
            student_id: student.id,
            code: Some(session.code),
            session_id: None,
        };
        let first = scan_session(State(state.clone()), Json(request.clone()))
            .await
            .into_response();
        assert_eq!(first.status(), StatusCode::OK);

        let second = scan_session(State(state), Json(request))
            .await
            .into_response();
        assert_eq!(second.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_end_missing_session_is_not_found() {
        let (state, _helper) = setup_test_state();
        let response = end_session(State(state), Path("qrsession::nope".to_string()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
