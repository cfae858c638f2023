//! Student registry service.

use std::sync::Arc;

use chrono::Utc;
use log::info;

use crate::domain::commands::students::CreateStudentCommand;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::student::Student;
use crate::storage::memory::{MemoryStore, StudentRepository};
use crate::storage::traits::StudentStorage;

#[derive(Clone)]
pub struct StudentService {
    student_repository: StudentRepository,
}

impl StudentService {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            student_repository: StudentRepository::new(store),
        }
    }

    /// Register a new student.
    pub fn create_student(&self, command: CreateStudentCommand) -> DomainResult<Student> {
        if command.roll_no.trim().is_empty() {
            return Err(DomainError::invalid_input("roll number cannot be empty"));
        }
        if command.name.trim().is_empty() {
            return Err(DomainError::invalid_input("name cannot be empty"));
        }

        let student = Student {
            id: Student::generate_id(),
            roll_no: command.roll_no,
            name: command.name,
            email: command.email,
            semester: command.semester,
            created_at: Utc::now(),
        };

        if !self.student_repository.store_student(&student)? {
            return Err(DomainError::conflict(format!(
                "a student with roll number {} already exists",
                student.roll_no
            )));
        }

        info!("Registered student {} ({})", student.roll_no, student.id);
        Ok(student)
    }

    pub fn get_student(&self, student_id: &str) -> DomainResult<Student> {
        self.student_repository
            .get_student(student_id)?
            .ok_or_else(|| DomainError::not_found("student", student_id))
    }

    pub fn list_students(&self) -> DomainResult<Vec<Student>> {
        Ok(self.student_repository.list_students()?)
    }
}
