use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

/// A student leave application.
///
/// Invariant: start_date <= end_date and days = end_date - start_date + 1.
/// Approval back-fills the attendance ledger with status=leave for every day
/// in the range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveApplication {
    pub id: String,
    pub student_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: i64,
    pub reason: String,
    pub leave_type: String,
    pub status: LeaveStatus,
    pub approved_by: Option<String>,
    pub rejection_reason: Option<String>,
}

impl LeaveApplication {
    pub fn generate_id() -> String {
        format!("leave::{}", Uuid::new_v4())
    }

    /// Inclusive day count for a validated range.
    pub fn day_count(start_date: NaiveDate, end_date: NaiveDate) -> i64 {
        (end_date - start_date).num_days() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_count_inclusive() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        assert_eq!(LeaveApplication::day_count(start, end), 3);
        assert_eq!(LeaveApplication::day_count(start, start), 1);
    }
}
