//! # REST API for Attendance
//!
//! Endpoints for the attendance ledger: bulk marking, per-record edits,
//! listing and the per-student summary.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::info;
use serde::Deserialize;

use super::{domain_error_response, mappers, parse_day};
use crate::domain::commands::attendance::{
    AttendanceEntry, AttendanceListQuery, AttendanceSummaryQuery, MarkAttendanceCommand,
};
use crate::AppState;
use shared::{
    AttendanceEntryError, MarkAttendanceRequest, MarkAttendanceResponse, UpdateAttendanceRequest,
};

/// Query parameters for attendance listing
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceListParams {
    pub student_id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Query parameters for the attendance summary
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRangeParams {
    pub from: Option<String>,
    pub to: Option<String>,
}

fn parse_optional_day(
    value: Option<&str>,
    field: &str,
) -> Result<Option<chrono::NaiveDate>, axum::response::Response> {
    value.map(|v| parse_day(v, field)).transpose()
}

/// Bulk upsert attendance for one calendar day
pub async fn mark_attendance(
    State(state): State<AppState>,
    Json(request): Json<MarkAttendanceRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/attendance/mark - date: {}, {} records",
        request.date,
        request.records.len()
    );

    let date = match parse_day(&request.date, "date") {
        Ok(d) => d,
        Err(response) => return response,
    };
    let command = MarkAttendanceCommand {
        date,
        entries: request
            .records
            .into_iter()
            .map(|entry| AttendanceEntry {
                student_id: entry.student_id,
                status: mappers::attendance_status_from_dto(entry.status),
            })
            .collect(),
    };

    match state.attendance_service.mark_attendance(command) {
        Ok(result) => {
            let response = MarkAttendanceResponse {
                records: result
                    .records
                    .into_iter()
                    .map(mappers::attendance_record_to_dto)
                    .collect(),
                errors: result
                    .errors
                    .into_iter()
                    .map(|e| AttendanceEntryError {
                        student_id: e.student_id,
                        error: e.error,
                    })
                    .collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// Overwrite the status of one record
pub async fn update_attendance(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateAttendanceRequest>,
) -> impl IntoResponse {
    info!("PUT /api/attendance/{}", id);

    let status = mappers::attendance_status_from_dto(request.status);
    match state.attendance_service.update_attendance(&id, status) {
        Ok(record) => {
            (StatusCode::OK, Json(mappers::attendance_record_to_dto(record))).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// Delete one record
pub async fn delete_attendance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/attendance/{}", id);

    match state.attendance_service.delete_attendance(&id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// List records with optional student and date-range filters
pub async fn list_attendance(
    State(state): State<AppState>,
    Query(params): Query<AttendanceListParams>,
) -> impl IntoResponse {
    info!("GET /api/attendance - params: {:?}", params);

    let from = match parse_optional_day(params.from.as_deref(), "from") {
        Ok(d) => d,
        Err(response) => return response,
    };
    let to = match parse_optional_day(params.to.as_deref(), "to") {
        Ok(d) => d,
        Err(response) => return response,
    };

    let query = AttendanceListQuery {
        student_id: params.student_id,
        from,
        to,
    };
    match state.attendance_service.list_attendance(query) {
        Ok(records) => {
            let dtos: Vec<shared::AttendanceRecord> = records
                .into_iter()
                .map(mappers::attendance_record_to_dto)
                .collect();
            (StatusCode::OK, Json(dtos)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// Per-student counts and percentage over an optional date range
pub async fn attendance_summary(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
    Query(params): Query<AttendanceRangeParams>,
) -> impl IntoResponse {
    info!("GET /api/attendance/summary/{}", student_id);

    let from = match parse_optional_day(params.from.as_deref(), "from") {
        Ok(d) => d,
        Err(response) => return response,
    };
    let to = match parse_optional_day(params.to.as_deref(), "to") {
        Ok(d) => d,
        Err(response) => return response,
    };

    let query = AttendanceSummaryQuery {
        student_id,
        from,
        to,
    };
    match state.attendance_service.summary(query) {
        Ok(summary) => (
            StatusCode::OK,
            Json(mappers::attendance_summary_to_dto(summary)),
        )
            .into_response(),
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
    async fn test_mark_attendance_rejects_bad_date() {
        let (state, _helper) = setup_test_state();
        let request = MarkAttendanceRequest {
            date: "03/04/2024".to_string(),
            records: Vec::new(),
        };
        let response = mark_attendance(State(state), Json(request))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_mark_attendance_reports_per_entry_errors() {
        let (state, helper) = setup_test_state();
        let student = helper.create_test_student("CS-101").unwrap();

        let request = MarkAttendanceRequest {
            date: "2024-03-04".to_string(),
            records: vec![
                shared::AttendanceEntry {
                    student_id: student.id,
                    status: shared::AttendanceStatus::Present,
                },
                shared::AttendanceEntry {
                    student_id: "student::ghost".to_string(),
                    status: shared::AttendanceStatus::Present,
                },
            ],
        };
        let response = mark_attendance(State(state), Json(request))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_delete_missing_record_returns_not_found() {
        let (state, _helper) = setup_test_state();
        let response = delete_attendance(State(state), Path("attendance::nope".to_string()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
