//! Domain layer: business logic and rules for the campus ledger.

pub mod attendance_service;
pub mod commands;
pub mod errors;
pub mod fee_service;
pub mod grading;
pub mod leave_service;
pub mod marks_service;
pub mod models;
pub mod qr_session_service;
pub mod student_service;

pub use attendance_service::AttendanceService;
pub use errors::{DomainError, DomainResult};
pub use fee_service::FeeService;
pub use leave_service::LeaveService;
pub use marks_service::MarksService;
pub use qr_session_service::QrSessionService;
pub use student_service::StudentService;
