//! # REST API for Fees
//!
//! Endpoints for the fee ledger: opening records, appending payments and the
//! defaulter report.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::info;
use serde::Deserialize;

use super::{domain_error_response, mappers, parse_day};
use crate::domain::commands::fees::{CreateFeeRecordCommand, RecordPaymentCommand};
use crate::AppState;
use shared::{CreateFeeRecordRequest, RecordPaymentRequest};

/// Query parameters for fee record listing
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeListParams {
    pub student_id: Option<String>,
}

/// Open a fee record for one (student, semester)
pub async fn create_fee_record(
    State(state): State<AppState>,
    Json(request): Json<CreateFeeRecordRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/fees - student: {}, semester: {}",
        request.student_id, request.semester_id
    );

    let due_date = match request.due_date.as_deref() {
        Some(value) => match parse_day(value, "dueDate") {
            Ok(d) => Some(d),
            Err(response) => return response,
        },
        None => None,
    };

    let command = CreateFeeRecordCommand {
        student_id: request.student_id,
        semester_id: request.semester_id,
        total_amount: request.total_amount,
        due_date,
    };
    match state.fee_service.create_record(command) {
        Ok(record) => {
            (StatusCode::CREATED, Json(mappers::fee_record_to_dto(record))).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// Append one payment to a fee record
pub async fn record_payment(
    State(state): State<AppState>,
    Path(record_id): Path<String>,
    Json(request): Json<RecordPaymentRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/fees/{}/payments - amount: {:.2}",
        record_id, request.amount
    );

    let command = RecordPaymentCommand {
        record_id,
        amount: request.amount,
        method: request.method,
    };
    match state.fee_service.record_payment(command) {
        Ok(record) => (StatusCode::OK, Json(mappers::fee_record_to_dto(record))).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// List fee records, optionally filtered by student
pub async fn list_fee_records(
    State(state): State<AppState>,
    Query(params): Query<FeeListParams>,
) -> impl IntoResponse {
    info!("GET /api/fees - params: {:?}", params);

    match state.fee_service.list_records(params.student_id.as_deref()) {
        Ok(records) => {
            let dtos: Vec<shared::FeeRecord> =
                records.into_iter().map(mappers::fee_record_to_dto).collect();
            (StatusCode::OK, Json(dtos)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// Unpaid records past their due date, largest balance first
pub async fn list_defaulters(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/fees/defaulters");

    match state.fee_service.defaulters() {
        Ok(entries) => {
            let dtos: Vec<shared::DefaulterEntry> =
                entries.into_iter().map(mappers::defaulter_to_dto).collect();
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
    async fn test_create_then_overpay_is_bad_request() {
        let (state, helper) = setup_test_state();
        let student = helper.create_test_student("CS-101").unwrap();

        let create = CreateFeeRecordRequest {
            student_id: student.id,
            semester_id: "sem::5".to_string(),
            total_amount: 100.0,
            due_date: None,
        };
        let record = state
            .fee_service
            .create_record(CreateFeeRecordCommand {
                student_id: create.student_id.clone(),
                semester_id: create.semester_id.clone(),
                total_amount: create.total_amount,
                due_date: None,
            })
            .unwrap();

        let response = record_payment(
            State(state),
            Path(record.id),
            Json(RecordPaymentRequest {
                amount: 150.0,
                method: None,
            }),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_with_bad_due_date_is_bad_request() {
        let (state, helper) = setup_test_state();
        let student = helper.create_test_student("CS-101").unwrap();

        let request = CreateFeeRecordRequest {
            student_id: student.id,
            semester_id: "sem::5".to_string(),
            total_amount: 100.0,
            due_date: Some("next week".to_string()),
        };
        let response = create_fee_record(State(state), Json(request))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
