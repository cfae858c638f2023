use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of one student on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Leave,
}

/// One attendance ledger entry.
///
/// At most one record exists per (student_id, date); re-marking the same day
/// overwrites status and marked_at in place, keeping the original id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: String,
    pub student_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub marked_at: DateTime<Utc>,
    /// Present when the record came out of a QR session scan
    pub session_id: Option<String>,
}

impl AttendanceRecord {
    pub fn generate_id() -> String {
        format!("attendance::{}", Uuid::new_v4())
    }
}
