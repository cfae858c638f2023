//! # Storage Traits
//!
//! Storage abstraction traits implemented by the in-memory backend. The
//! domain layer only talks to these, so tests can instantiate isolated
//! stores and another backend could be swapped in without touching the
//! services.
//!
//! Every multi-step check-then-act the domain needs (attendance
//! find-then-upsert, the QR scan membership check plus append, the fee
//! read-balance-then-write) is a single trait method, so the implementation
//! can run it under one table lock and keep per-entity operations
//! linearizable.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::models::attendance::{AttendanceRecord, AttendanceStatus};
use crate::domain::models::fee::{FeePayment, FeeRecord, PaymentOutcome};
use crate::domain::models::leave::{LeaveApplication, LeaveStatus};
use crate::domain::models::mark::MarkRecord;
use crate::domain::models::qr_session::{QrSession, ScanAttempt};
use crate::domain::models::student::Student;

/// Student registry storage.
pub trait StudentStorage: Send + Sync {
    /// Store a new student. Returns false (and stores nothing) when a student
    /// with the same roll number already exists.
    fn store_student(&self, student: &Student) -> Result<bool>;

    /// Retrieve a specific student by ID
    fn get_student(&self, student_id: &str) -> Result<Option<Student>>;

    /// Check that a student id resolves
    fn student_exists(&self, student_id: &str) -> Result<bool>;

    /// List all students ordered by roll number
    fn list_students(&self) -> Result<Vec<Student>>;
}

/// Attendance ledger storage.
pub trait AttendanceStorage: Send + Sync {
    /// Upsert keyed on (student_id, date): when a record for that day exists,
    /// its status, marked_at and session_id are overwritten in place and the
    /// existing id is preserved; otherwise the candidate is inserted as-is.
    /// Returns the stored record.
    fn upsert_record(&self, candidate: AttendanceRecord) -> Result<AttendanceRecord>;

    fn get_record(&self, id: &str) -> Result<Option<AttendanceRecord>>;

    /// Overwrite status and marked_at by record id. Returns None if no record
    /// has that id.
    fn update_status(
        &self,
        id: &str,
        status: AttendanceStatus,
        marked_at: DateTime<Utc>,
    ) -> Result<Option<AttendanceRecord>>;

    /// Delete by record id. Returns true if a record was removed.
    fn delete_record(&self, id: &str) -> Result<bool>;

    /// List records, optionally filtered by student and/or inclusive date
    /// range, ordered by date ascending.
    fn list_records(
        &self,
        student_id: Option<&str>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRecord>>;
}

/// QR attendance session storage.
pub trait QrSessionStorage: Send + Sync {
    /// Insert a new session, deactivating any other active session for the
    /// same (teacher_id, subject_id) pair in the same step. Returns how many
    /// sessions were deactivated.
    fn store_session(&self, session: &QrSession) -> Result<usize>;

    fn get_session(&self, id: &str) -> Result<Option<QrSession>>;

    /// Atomically validate and record a scan. Looks up an active session by
    /// code or id, applies lazy expiry (flipping is_active off when past
    /// expires_at), rejects duplicate scans, and otherwise appends the
    /// student to scanned_by. The whole step runs under the session table
    /// lock so concurrent scans for the same student cannot both pass the
    /// membership check.
    fn record_scan(&self, token: &str, student_id: &str, now: DateTime<Utc>)
        -> Result<ScanAttempt>;

    /// Deactivate a session and stamp ended_at; idempotent. Returns None if
    /// no session has that id.
    fn end_session(&self, id: &str, now: DateTime<Utc>) -> Result<Option<QrSession>>;

    /// Push expires_at forward and force the session active again, even if it
    /// had ended or expired. Returns None if no session has that id.
    fn extend_session(&self, id: &str, additional_minutes: i64) -> Result<Option<QrSession>>;
}

/// Fee ledger storage.
pub trait FeeStorage: Send + Sync {
    /// Store a new fee record. Returns false (and stores nothing) when a
    /// record already exists for the same (student_id, semester_id).
    fn store_record(&self, record: &FeeRecord) -> Result<bool>;

    fn get_record(&self, id: &str) -> Result<Option<FeeRecord>>;

    /// Atomically apply one payment: re-reads the balance under the table
    /// lock, rejects overshoot, then appends the payment, bumps paid_amount
    /// and recomputes the status.
    fn apply_payment(&self, record_id: &str, payment: FeePayment) -> Result<PaymentOutcome>;

    /// List records, optionally filtered by student.
    fn list_records(&self, student_id: Option<&str>) -> Result<Vec<FeeRecord>>;
}

/// Leave application storage.
pub trait LeaveStorage: Send + Sync {
    fn store_application(&self, application: &LeaveApplication) -> Result<()>;

    fn get_application(&self, id: &str) -> Result<Option<LeaveApplication>>;

    /// Replace an application by id. Returns false if no application has
    /// that id.
    fn update_application(&self, application: &LeaveApplication) -> Result<bool>;

    /// List applications, optionally filtered by student and/or status,
    /// newest first.
    fn list_applications(
        &self,
        student_id: Option<&str>,
        status: Option<LeaveStatus>,
    ) -> Result<Vec<LeaveApplication>>;
}

/// Mark record storage.
pub trait MarkStorage: Send + Sync {
    /// Upsert keyed on (student_id, subject_id, exam_type); overwrites marks
    /// and recorded_at in place, preserving the existing id. Returns the
    /// stored record.
    fn upsert_mark(&self, candidate: MarkRecord) -> Result<MarkRecord>;

    /// List all marks for a student.
    fn list_marks_for_student(&self, student_id: &str) -> Result<Vec<MarkRecord>>;
}
