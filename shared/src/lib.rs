//! Shared DTO types for the campus ledger API.
//!
//! These types define the JSON wire format consumed by the mobile client.
//! Field names are camelCase on the wire (`studentId`, `markedAt`, ...) to
//! stay drop-in compatible with the existing client, and all dates travel as
//! strings: calendar days as `YYYY-MM-DD`, timestamps as RFC 3339.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Students
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub roll_no: String,
    pub name: String,
    pub email: String,
    pub semester: u32,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    pub roll_no: String,
    pub name: String,
    pub email: String,
    pub semester: u32,
}

// ---------------------------------------------------------------------------
// Attendance
// ---------------------------------------------------------------------------

/// Attendance status for one student on one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Leave,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: String,
    pub student_id: String,
    /// Calendar day (`YYYY-MM-DD`)
    pub date: String,
    pub status: AttendanceStatus,
    /// When the record was written or last overwritten (RFC 3339)
    pub marked_at: String,
    /// Set when the record was produced by a QR session scan
    pub session_id: Option<String>,
}

/// One entry of a bulk attendance submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    pub student_id: String,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceRequest {
    /// Calendar day the whole batch applies to (`YYYY-MM-DD`)
    pub date: String,
    pub records: Vec<AttendanceEntry>,
}

/// Per-student failure inside a bulk submission; the batch itself succeeds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntryError {
    pub student_id: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceResponse {
    pub records: Vec<AttendanceRecord>,
    pub errors: Vec<AttendanceEntryError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAttendanceRequest {
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub student_id: String,
    pub total_days: u32,
    pub present: u32,
    pub absent: u32,
    pub late: u32,
    pub leave: u32,
    /// (present + 0.5 * late) / total * 100, rounded to 2 decimals
    pub percentage: f64,
}

// ---------------------------------------------------------------------------
// QR attendance sessions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrSession {
    pub id: String,
    /// 6-character token shown in the QR code
    pub code: String,
    pub teacher_id: String,
    pub subject_id: String,
    /// Calendar day attendance is written against (`YYYY-MM-DD`)
    pub date: String,
    pub expires_at: String,
    pub is_active: bool,
    pub ended_at: Option<String>,
    pub scanned_by: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQrSessionRequest {
    pub teacher_id: String,
    pub subject_id: String,
    /// Validity window in minutes; defaults to 15
    pub valid_minutes: Option<i64>,
}

/// Scan by `code` or by `sessionId`; at least one must be present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanQrRequest {
    pub student_id: String,
    pub code: Option<String>,
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanQrResponse {
    pub session_id: String,
    pub record: AttendanceRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendQrSessionRequest {
    /// Minutes added to the current expiry; defaults to 10
    pub additional_minutes: Option<i64>,
}

// ---------------------------------------------------------------------------
// Fees
// ---------------------------------------------------------------------------

/// Derived from paid vs. total amount; never set directly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeStatus {
    Pending,
    Partial,
    Paid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeePayment {
    pub amount: f64,
    pub date: String,
    pub method: Option<String>,
    pub receipt_no: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeRecord {
    pub id: String,
    pub student_id: String,
    pub semester_id: String,
    pub total_amount: f64,
    pub paid_amount: f64,
    pub due_date: Option<String>,
    pub status: FeeStatus,
    pub payments: Vec<FeePayment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeeRecordRequest {
    pub student_id: String,
    pub semester_id: String,
    pub total_amount: f64,
    pub due_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentRequest {
    pub amount: f64,
    pub method: Option<String>,
}

/// A fee record past its due date with an outstanding balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaulterEntry {
    pub record: FeeRecord,
    pub balance: f64,
    pub overdue_days: i64,
}

// ---------------------------------------------------------------------------
// Leave applications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveApplication {
    pub id: String,
    pub student_id: String,
    pub start_date: String,
    pub end_date: String,
    /// Inclusive day count: end - start + 1
    pub days: i64,
    pub reason: String,
    pub leave_type: String,
    pub status: LeaveStatus,
    pub approved_by: Option<String>,
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitLeaveRequest {
    pub student_id: String,
    pub start_date: String,
    pub end_date: String,
    pub reason: String,
    pub leave_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetLeaveStatusRequest {
    pub status: LeaveStatus,
    pub approver_id: String,
    pub rejection_reason: Option<String>,
}

// ---------------------------------------------------------------------------
// Marks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkRecord {
    pub id: String,
    pub student_id: String,
    pub subject_id: String,
    pub exam_type: String,
    pub marks_obtained: f64,
    pub max_marks: f64,
    pub recorded_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMarkRequest {
    pub student_id: String,
    pub subject_id: String,
    pub exam_type: String,
    pub marks_obtained: f64,
    pub max_marks: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentMarksSummary {
    pub student_id: String,
    pub marks: Vec<MarkRecord>,
    pub total_obtained: f64,
    pub total_max: f64,
    pub percentage: f64,
    pub grade: String,
}
