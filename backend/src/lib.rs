//! # Campus Ledger Backend
//!
//! A university student-management backend over a single in-memory store.
//!
//! The crate follows a layered architecture:
//! ```text
//! IO Layer (REST API, axum handlers)
//!     |
//! Domain Layer (services, commands, models)
//!     |
//! Storage Layer (traits + in-memory repositories)
//! ```
//!
//! There is no persistence: [`initialize_backend`] seeds a fresh store on
//! every start. All services are cheap to clone and share the same store
//! through `Arc`.

pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::Method,
    routing::{get, post, put},
    Router,
};
use log::info;
use tower_http::cors::{Any, CorsLayer};

use crate::domain::{
    AttendanceService, FeeService, LeaveService, MarksService, QrSessionService, StudentService,
};
use crate::io::rest::{
    attendance_apis, fee_apis, leave_apis, marks_apis, qr_apis, student_apis,
};
use crate::storage::memory::{seed, MemoryStore};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub student_service: StudentService,
    pub attendance_service: AttendanceService,
    pub qr_session_service: QrSessionService,
    pub fee_service: FeeService,
    pub leave_service: LeaveService,
    pub marks_service: MarksService,
}

impl AppState {
    /// Wire every service against one shared store.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            student_service: StudentService::new(store.clone()),
            attendance_service: AttendanceService::new(store.clone()),
            qr_session_service: QrSessionService::new(store.clone()),
            fee_service: FeeService::new(store.clone()),
            leave_service: LeaveService::new(store.clone()),
            marks_service: MarksService::new(store),
        }
    }
}

/// Initialize the backend with a freshly seeded store
pub fn initialize_backend() -> Result<AppState> {
    info!("Setting up in-memory store");
    let store = Arc::new(MemoryStore::new());
    seed::load_seed(&store)?;

    info!("Setting up domain services");
    Ok(AppState::new(store))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS is wide open: the mobile client has no meaningful origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/students",
            post(student_apis::create_student).get(student_apis::list_students),
        )
        .route("/students/:id", get(student_apis::get_student))
        .route("/attendance/mark", post(attendance_apis::mark_attendance))
        .route("/attendance", get(attendance_apis::list_attendance))
        .route(
            "/attendance/summary/:student_id",
            get(attendance_apis::attendance_summary),
        )
        .route(
            "/attendance/qr/generate",
            post(qr_apis::generate_session),
        )
        .route("/attendance/qr/scan", post(qr_apis::scan_session))
        .route("/attendance/qr/:id/end", post(qr_apis::end_session))
        .route("/attendance/qr/:id/extend", post(qr_apis::extend_session))
        .route(
            "/attendance/:id",
            put(attendance_apis::update_attendance).delete(attendance_apis::delete_attendance),
        )
        .route(
            "/fees",
            post(fee_apis::create_fee_record).get(fee_apis::list_fee_records),
        )
        .route("/fees/defaulters", get(fee_apis::list_defaulters))
        .route("/fees/:id/payments", post(fee_apis::record_payment))
        .route(
            "/leaves",
            post(leave_apis::submit_leave).get(leave_apis::list_leaves),
        )
        .route("/leaves/:id/status", put(leave_apis::set_leave_status))
        .route("/marks", post(marks_apis::record_mark))
        .route("/marks/summary/:student_id", get(marks_apis::marks_summary));

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
