//! Test utilities for the in-memory backend.
//!
//! Provides a helper that wires a fresh isolated store with one repository
//! per collection, so tests never share state.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;

use super::{
    AttendanceRepository, FeeRepository, LeaveRepository, MarkRepository, MemoryStore,
    QrSessionRepository, StudentRepository,
};
use crate::domain::models::student::Student;
use crate::storage::traits::StudentStorage;

/// Fresh store plus repository instances for tests
pub struct TestHelper {
    pub store: Arc<MemoryStore>,
    pub student_repo: StudentRepository,
    pub attendance_repo: AttendanceRepository,
    pub session_repo: QrSessionRepository,
    pub fee_repo: FeeRepository,
    pub leave_repo: LeaveRepository,
    pub mark_repo: MarkRepository,
}

impl TestHelper {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            student_repo: StudentRepository::new(store.clone()),
            attendance_repo: AttendanceRepository::new(store.clone()),
            session_repo: QrSessionRepository::new(store.clone()),
            fee_repo: FeeRepository::new(store.clone()),
            leave_repo: LeaveRepository::new(store.clone()),
            mark_repo: MarkRepository::new(store.clone()),
            store,
        }
    }

    /// Create and store a student with default values
    pub fn create_test_student(&self, roll_no: &str) -> Result<Student> {
        let student = Student {
            id: Student::generate_id(),
            roll_no: roll_no.to_string(),
            name: format!("Student {}", roll_no),
            email: format!("{}@campus.test", roll_no.to_lowercase()),
            semester: 4,
            created_at: Utc::now(),
        };
        self.student_repo.store_student(&student)?;
        Ok(student)
    }
}
