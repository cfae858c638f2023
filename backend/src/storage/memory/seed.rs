//! Bundled seed data.
//!
//! There is no persistence; every restart loads this fixed roster so the
//! client has something to talk to. Due dates are relative to today so the
//! defaulter report always has one overdue entry to show.

use std::sync::Arc;

use anyhow::Result;
use chrono::{Duration, Utc};
use log::info;

use super::{FeeRepository, MemoryStore, StudentRepository};
use crate::domain::models::fee::{FeeRecord, FeeStatus};
use crate::domain::models::student::Student;
use crate::storage::traits::{FeeStorage, StudentStorage};

const SEED_STUDENTS: &[(&str, &str, &str, u32)] = &[
    ("CS2021001", "Aarav Sharma", "aarav.sharma@campus.test", 5),
    ("CS2021002", "Diya Patel", "diya.patel@campus.test", 5),
    ("CS2021003", "Rohan Mehta", "rohan.mehta@campus.test", 5),
    ("EE2022010", "Sara Khan", "sara.khan@campus.test", 3),
    ("EE2022011", "Vikram Iyer", "vikram.iyer@campus.test", 3),
];

/// Load the bundled roster into an empty store.
pub fn load_seed(store: &Arc<MemoryStore>) -> Result<()> {
    let student_repo = StudentRepository::new(store.clone());
    let fee_repo = FeeRepository::new(store.clone());

    let now = Utc::now();
    for (index, (roll_no, name, email, semester)) in SEED_STUDENTS.iter().enumerate() {
        let student = Student {
            id: Student::generate_id(),
            roll_no: roll_no.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            semester: *semester,
            created_at: now,
        };
        student_repo.store_student(&student)?;

        // One overdue record in the mix, the rest due next month.
        let due_date = if index == 0 {
            now.date_naive() - Duration::days(30)
        } else {
            now.date_naive() + Duration::days(30)
        };
        let fee = FeeRecord {
            id: FeeRecord::generate_id(),
            student_id: student.id.clone(),
            semester_id: format!("sem::{}", semester),
            total_amount: 45_000.0,
            paid_amount: 0.0,
            due_date: Some(due_date),
            status: FeeStatus::Pending,
            payments: Vec::new(),
        };
        fee_repo.store_record(&fee)?;
    }

    info!("Seeded {} students with fee records", SEED_STUDENTS.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_populates_students_and_fees() {
        let store = Arc::new(MemoryStore::new());
        load_seed(&store).unwrap();

        let student_repo = StudentRepository::new(store.clone());
        let fee_repo = FeeRepository::new(store);
        assert_eq!(student_repo.list_students().unwrap().len(), SEED_STUDENTS.len());
        assert_eq!(fee_repo.list_records(None).unwrap().len(), SEED_STUDENTS.len());
    }
}
