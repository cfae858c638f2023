//! # REST API for Marks
//!
//! Endpoints for recording exam results and the per-student summary.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::info;

use super::{domain_error_response, mappers};
use crate::domain::commands::marks::RecordMarkCommand;
use crate::AppState;
use shared::RecordMarkRequest;

/// Record one exam result; re-recording the same exam overwrites it
pub async fn record_mark(
    State(state): State<AppState>,
    Json(request): Json<RecordMarkRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/marks - student: {}, {} {}",
        request.student_id, request.subject_id, request.exam_type
    );

    let command = RecordMarkCommand {
        student_id: request.student_id,
        subject_id: request.subject_id,
        exam_type: request.exam_type,
        marks_obtained: request.marks_obtained,
        max_marks: request.max_marks,
    };
    match state.marks_service.record_mark(command) {
        Ok(record) => {
            (StatusCode::CREATED, Json(mappers::mark_record_to_dto(record))).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// Totals, percentage and grade across a student's marks
pub async fn marks_summary(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/marks/summary/{}", student_id);

    match state.marks_service.student_summary(&student_id) {
        Ok(summary) => {
            (StatusCode::OK, Json(mappers::marks_summary_to_dto(summary))).into_response()
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
    async fn test_record_mark_out_of_bounds_is_bad_request() {
        let (state, helper) = setup_test_state();
        let student = helper.create_test_student("CS-101").unwrap();

        let request = RecordMarkRequest {
            student_id: student.id,
            subject_id: "algo".to_string(),
            exam_type: "midterm".to_string(),
            marks_obtained: 120.0,
            max_marks: 100.0,
        };
        let response = record_mark(State(state), Json(request))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_summary_for_unknown_student_is_not_found() {
        let (state, _helper) = setup_test_state();
        let response = marks_summary(State(state), Path("student::ghost".to_string()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
