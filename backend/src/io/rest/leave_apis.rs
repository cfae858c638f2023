//! # REST API for Leave Applications
//!
//! Endpoints for submitting, deciding and listing leave applications.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::info;
use serde::Deserialize;

use super::{domain_error_response, mappers, parse_day};
use crate::domain::commands::leave::{LeaveListQuery, SetLeaveStatusCommand, SubmitLeaveCommand};
use crate::AppState;
use shared::{SetLeaveStatusRequest, SubmitLeaveRequest};

/// Query parameters for leave listing
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveListParams {
    pub student_id: Option<String>,
    pub status: Option<shared::LeaveStatus>,
}

/// Submit a pending leave application
pub async fn submit_leave(
    State(state): State<AppState>,
    Json(request): Json<SubmitLeaveRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/leaves - student: {}, {} to {}",
        request.student_id, request.start_date, request.end_date
    );

    let start_date = match parse_day(&request.start_date, "startDate") {
        Ok(d) => d,
        Err(response) => return response,
    };
    let end_date = match parse_day(&request.end_date, "endDate") {
        Ok(d) => d,
        Err(response) => return response,
    };

    let command = SubmitLeaveCommand {
        student_id: request.student_id,
        start_date,
        end_date,
        reason: request.reason,
        leave_type: request.leave_type,
    };
    match state.leave_service.submit(command) {
        Ok(application) => (
            StatusCode::CREATED,
            Json(mappers::leave_application_to_dto(application)),
        )
            .into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// Approve or reject an application; approval back-fills attendance
pub async fn set_leave_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SetLeaveStatusRequest>,
) -> impl IntoResponse {
    info!("PUT /api/leaves/{}/status - {:?}", id, request.status);

    let command = SetLeaveStatusCommand {
        id,
        status: mappers::leave_status_from_dto(request.status),
        approver_id: request.approver_id,
        rejection_reason: request.rejection_reason,
    };
    match state.leave_service.set_status(command) {
        Ok(application) => (
            StatusCode::OK,
            Json(mappers::leave_application_to_dto(application)),
        )
            .into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// List applications with optional student and status filters
pub async fn list_leaves(
    State(state): State<AppState>,
    Query(params): Query<LeaveListParams>,
) -> impl IntoResponse {
    info!("GET /api/leaves - params: {:?}", params);

    let query = LeaveListQuery {
        student_id: params.student_id,
        status: params.status.map(mappers::leave_status_from_dto),
    };
    match state.leave_service.list_applications(query) {
        Ok(applications) => {
            let dtos: Vec<shared::LeaveApplication> = applications
                .into_iter()
                .map(mappers::leave_application_to_dto)
                .collect();
            (StatusCode::OK, Json(dtos)).into_response()
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
    async fn test_submit_with_inverted_range_is_bad_request() {
        let (state, helper) = setup_test_state();
        let student = helper.create_test_student("CS-101").unwrap();

        let request = SubmitLeaveRequest {
            student_id: student.id,
            start_date: "2024-01-03".to_string(),
            end_date: "2024-01-01".to_string(),
            reason: "trip".to_string(),
            leave_type: "personal".to_string(),
        };
        let response = submit_leave(State(state), Json(request))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_decide_missing_application_is_not_found() {
        let (state, _helper) = setup_test_state();
        let request = SetLeaveStatusRequest {
            status: shared::LeaveStatus::Approved,
            approver_id: "teacher::1".to_string(),
            rejection_reason: None,
        };
        let response = set_leave_status(State(state), Path("leave::nope".to_string()), Json(request))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
