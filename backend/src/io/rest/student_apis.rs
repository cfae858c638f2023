//! # REST API for Students
//!
//! Endpoints for the student registry.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::info;

use super::{domain_error_response, mappers};
use crate::domain::commands::students::CreateStudentCommand;
use crate::AppState;
use shared::CreateStudentRequest;

/// Register a new student
pub async fn create_student(
    State(state): State<AppState>,
    Json(request): Json<CreateStudentRequest>,
) -> impl IntoResponse {
    info!("POST /api/students - roll_no: {}", request.roll_no);

    let command = CreateStudentCommand {
        roll_no: request.roll_no,
        name: request.name,
        email: request.email,
        semester: request.semester,
    };

    match state.student_service.create_student(command) {
        Ok(student) => {
            (StatusCode::CREATED, Json(mappers::student_to_dto(student))).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// List all students
pub async fn list_students(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/students");

    match state.student_service.list_students() {
        Ok(students) => {
            let dtos: Vec<shared::Student> =
                students.into_iter().map(mappers::student_to_dto).collect();
            (StatusCode::OK, Json(dtos)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// Fetch one student by id
pub async fn get_student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/students/{}", student_id);

    match state.student_service.get_student(&student_id) {
        Ok(student) => (StatusCode::OK, Json(mappers::student_to_dto(student))).into_response(),
        Err(e) => domain_error_response(e),
    }
}
