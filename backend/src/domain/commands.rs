//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the public DTOs defined
//! in the `shared` crate to these internal types.

pub mod students {
    /// Input for registering a new student.
    #[derive(Debug, Clone)]
    pub struct CreateStudentCommand {
        pub roll_no: String,
        pub name: String,
        pub email: String,
        pub semester: u32,
    }
}

pub mod attendance {
    use crate::domain::models::attendance::{AttendanceRecord, AttendanceStatus};
    use chrono::NaiveDate;

    /// One entry of a bulk attendance submission.
    #[derive(Debug, Clone)]
    pub struct AttendanceEntry {
        pub student_id: String,
        pub status: AttendanceStatus,
    }

    /// Input for a bulk attendance upsert for one calendar day.
    #[derive(Debug, Clone)]
    pub struct MarkAttendanceCommand {
        pub date: NaiveDate,
        pub entries: Vec<AttendanceEntry>,
    }

    /// A per-student failure inside a bulk submission.
    #[derive(Debug, Clone)]
    pub struct AttendanceEntryError {
        pub student_id: String,
        pub error: String,
    }

    /// Result of a bulk attendance upsert.
    #[derive(Debug, Clone)]
    pub struct MarkAttendanceResult {
        pub records: Vec<AttendanceRecord>,
        pub errors: Vec<AttendanceEntryError>,
    }

    /// Filters for listing attendance records.
    #[derive(Debug, Clone, Default)]
    pub struct AttendanceListQuery {
        pub student_id: Option<String>,
        pub from: Option<NaiveDate>,
        pub to: Option<NaiveDate>,
    }

    /// Query for a per-student attendance summary.
    #[derive(Debug, Clone)]
    pub struct AttendanceSummaryQuery {
        pub student_id: String,
        pub from: Option<NaiveDate>,
        pub to: Option<NaiveDate>,
    }

    /// Per-status counts plus the derived percentage.
    #[derive(Debug, Clone)]
    pub struct AttendanceSummaryResult {
        pub student_id: String,
        pub total_days: u32,
        pub present: u32,
        pub absent: u32,
        pub late: u32,
        pub leave: u32,
        pub percentage: f64,
    }
}

pub mod qr {
    use crate::domain::models::attendance::AttendanceRecord;

    /// Input for creating a new QR attendance session.
    #[derive(Debug, Clone)]
    pub struct GenerateSessionCommand {
        pub teacher_id: String,
        pub subject_id: String,
        /// Validity window in minutes; defaults to 15
        pub valid_minutes: Option<i64>,
    }

    /// Input for a student scan; the token is a session code or session id.
    #[derive(Debug, Clone)]
    pub struct ScanSessionCommand {
        pub student_id: String,
        pub token: String,
    }

    /// Result of an accepted scan.
    #[derive(Debug, Clone)]
    pub struct ScanSessionResult {
        pub session_id: String,
        pub record: AttendanceRecord,
    }
}

pub mod fees {
    use crate::domain::models::fee::FeeRecord;
    use chrono::NaiveDate;

    /// Input for opening a fee record for one (student, semester).
    #[derive(Debug, Clone)]
    pub struct CreateFeeRecordCommand {
        pub student_id: String,
        pub semester_id: String,
        pub total_amount: f64,
        pub due_date: Option<NaiveDate>,
    }

    /// Input for appending one payment to a fee record.
    #[derive(Debug, Clone)]
    pub struct RecordPaymentCommand {
        pub record_id: String,
        pub amount: f64,
        pub method: Option<String>,
    }

    /// One entry of the defaulter report.
    #[derive(Debug, Clone)]
    pub struct DefaulterEntry {
        pub record: FeeRecord,
        pub balance: f64,
        pub overdue_days: i64,
    }
}

pub mod leave {
    use crate::domain::models::leave::LeaveStatus;
    use chrono::NaiveDate;

    /// Input for submitting a leave application.
    #[derive(Debug, Clone)]
    pub struct SubmitLeaveCommand {
        pub student_id: String,
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
        pub reason: String,
        pub leave_type: String,
    }

    /// Input for deciding a leave application.
    #[derive(Debug, Clone)]
    pub struct SetLeaveStatusCommand {
        pub id: String,
        pub status: LeaveStatus,
        pub approver_id: String,
        pub rejection_reason: Option<String>,
    }

    /// Filters for listing leave applications.
    #[derive(Debug, Clone, Default)]
    pub struct LeaveListQuery {
        pub student_id: Option<String>,
        pub status: Option<LeaveStatus>,
    }
}

pub mod marks {
    use crate::domain::models::mark::MarkRecord;

    /// Input for recording one exam result.
    #[derive(Debug, Clone)]
    pub struct RecordMarkCommand {
        pub student_id: String,
        pub subject_id: String,
        pub exam_type: String,
        pub marks_obtained: f64,
        pub max_marks: f64,
    }

    /// Aggregated marks for one student.
    #[derive(Debug, Clone)]
    pub struct StudentMarksSummary {
        pub student_id: String,
        pub marks: Vec<MarkRecord>,
        pub total_obtained: f64,
        pub total_max: f64,
        pub percentage: f64,
        pub grade: String,
    }
}
